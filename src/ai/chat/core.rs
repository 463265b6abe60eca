use anyhow::{Error, Result};

use super::models::Session;
use crate::openai::{CompletionOptions, Message, Reply, Role, chat};

/// Send `user_input` as the next turn of `session` and wait for the
/// reply. The session only changes when the reply arrives.
pub async fn next_turn(
    session: &mut Session,
    user_input: &str,
    options: &CompletionOptions,
) -> Result<Reply, Error> {
    let user_msg = Message::new(Role::User, user_input);
    let history = session.history_with(&user_msg);
    let reply = chat(&history, options).await?;
    session.record_turn(user_msg, &reply);
    Ok(reply)
}
