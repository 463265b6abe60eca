//! Router for the chat API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::public;
use crate::ai::document::{extract_pdf_text, inject_text};
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::openai::{CompletionOptions, Message, Role, chat};

type SharedState = Arc<RwLock<AppState>>;

/// Get the visible transcript of a chat session. Unknown sessions have
/// an empty transcript.
async fn chat_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Json<public::ChatTranscriptResponse> {
    let transcript = state
        .read()
        .expect("Unable to read share state")
        .sessions
        .get(&id)
        .map(|session| session.visible_messages())
        .unwrap_or_default();

    Json(public::ChatTranscriptResponse { transcript })
}

/// Send the next message in a chat session and wait for the full reply.
/// Blank messages are rejected without touching the session.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Response, ApiError> {
    if payload.message.trim().is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "Message must not be empty").into_response());
    }

    let session_id = payload.session_id;
    let user_msg = Message::new(Role::User, &payload.message);

    // The lock is released before waiting on the completion
    let (history, options) = {
        let mut shared_state = state.write().expect("Unable to write share state");
        let options = CompletionOptions::from(&shared_state.config);
        let history = shared_state
            .sessions
            .get_or_create(&session_id)
            .history_with(&user_msg);
        (history, options)
    };

    let reply = chat(&history, &options).await?;

    state
        .write()
        .expect("Unable to write share state")
        .sessions
        .get_or_create(&session_id)
        .record_turn(user_msg, &reply);

    Ok(Json(public::ChatResponse::from(reply)).into_response())
}

/// Upload a judgment PDF whose text is added to the session as
/// context. Extraction failures are reported to the client and the
/// session is left as it was.
async fn document_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file = Some(field.bytes().await?.to_vec());
            break;
        }
    }

    let Some(bytes) = file else {
        return Ok((StatusCode::BAD_REQUEST, "Missing multipart field `file`").into_response());
    };

    let text = match extract_pdf_text(bytes).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Document upload for session {} failed: {}", id, e);
            let body = public::DocumentErrorResponse {
                error: e.to_string(),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
        }
    };

    let outcome = {
        let mut shared_state = state.write().expect("Unable to write share state");
        inject_text(shared_state.sessions.get_or_create(&id), &text)?
    };

    Ok(Json(public::DocumentResponse::from(outcome)).into_response())
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/{id}", get(chat_session))
        .route(
            "/{id}/document",
            post(document_handler).layer(DefaultBodyLimit::disable()),
        )
}
