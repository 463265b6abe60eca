use anyhow::{Error, Result};

use crate::openai::{CompletionOptions, Message, Reply, completion, parse_reply};

/// Runs the next turn in chat by passing a transcript to the LLM for
/// the next response. The call blocks until the full reply arrives.
pub async fn chat(history: &[Message], options: &CompletionOptions) -> Result<Reply, Error> {
    let resp = completion(history, options).await?;
    let reply = parse_reply(&resp)?;

    tracing::debug!(
        "Received reply of {} chars with {} citations",
        reply.content.chars().count(),
        reply.citations.len()
    );

    Ok(reply)
}
