//! Stateful chat sessions.
mod core;
mod models;

pub use self::core::next_turn;
pub use models::{Session, SessionStore, Transcript};
