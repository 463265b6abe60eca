//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::ai::citations::render_citations;
use crate::ai::document::IngestOutcome;
use crate::openai::{Citation, Message, Reply};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub citations: Vec<Citation>,
    // Ready to display markdown, absent when nothing was cited
    pub citations_markdown: Option<String>,
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        Self {
            citations_markdown: render_citations(&reply.citations),
            message: reply.content,
            citations: reply.citations,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ChatTranscriptResponse {
    pub transcript: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
pub struct DocumentResponse {
    pub injected: bool,
    pub characters: usize,
}

impl From<IngestOutcome> for DocumentResponse {
    fn from(outcome: IngestOutcome) -> Self {
        Self {
            injected: outcome.injected,
            characters: outcome.characters,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct DocumentErrorResponse {
    pub error: String,
}
