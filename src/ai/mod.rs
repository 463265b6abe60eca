pub mod chat;
pub mod citations;
pub mod document;
pub mod prompt;
