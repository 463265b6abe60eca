//! Text extraction for uploaded judgment PDFs and injection of that
//! text into a session as context.

use thiserror::Error;

use crate::ai::chat::Session;
use crate::ai::prompt::document_context_message;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read PDF: {0}")]
    Parse(String),

    #[error("no text could be extracted from the PDF")]
    Empty,

    #[error("PDF extraction aborted: {0}")]
    Aborted(String),

    #[error("failed to build document context: {0}")]
    Prompt(String),
}

/// Result of adding a document to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Whether a new context message was appended
    pub injected: bool,
    pub characters: usize,
}

/// Extract the text of every page, in page order, one page per line
/// break so words at page boundaries stay apart. Extraction runs on a
/// blocking thread and a panic inside the PDF parser is reported as an
/// error like any other.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, IngestError> {
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    })
    .await
    .map_err(|e| IngestError::Aborted(e.to_string()))?
    .map_err(|e| IngestError::Parse(e.to_string()))?;

    let text = pages.join("\n");

    if text.trim().is_empty() {
        return Err(IngestError::Empty);
    }

    Ok(text)
}

/// Add already extracted `text` to the session. Repeating the same
/// text is a no-op.
pub fn inject_text(session: &mut Session, text: &str) -> Result<IngestOutcome, IngestError> {
    let characters = text.chars().count();
    if session.document() == Some(text) {
        return Ok(IngestOutcome {
            injected: false,
            characters,
        });
    }

    let context = document_context_message(text).map_err(|e| IngestError::Prompt(e.to_string()))?;
    let injected = session.inject_document(text, &context);
    tracing::info!("Injected document context ({} chars)", characters);

    Ok(IngestOutcome {
        injected,
        characters,
    })
}

/// Extract a PDF and add it to the session. On error the session is
/// left as it was.
pub async fn ingest_pdf(session: &mut Session, bytes: Vec<u8>) -> Result<IngestOutcome, IngestError> {
    let text = extract_pdf_text(bytes).await?;
    inject_text(session, &text)
}
