mod chat;
mod core;

pub use chat::chat;
pub use self::core::{
    Authentication, Citation, CompletionOptions, DataSource, Message, Reply, Role,
    SearchParameters, completion, completion_payload, parse_reply,
};
