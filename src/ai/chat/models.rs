//! The core models for managing a stateful chat with an LLM.
use std::collections::HashMap;

use crate::openai::{Message, Reply, Role};

#[derive(Clone, Debug, Default)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new_with_messages(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.0.clone()
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

/// One conversation. The transcript always starts with the persona
/// message and only ever grows.
#[derive(Clone, Debug)]
pub struct Session {
    transcript: Transcript,
    // Text of the last judgment injected into the transcript
    document: Option<String>,
}

impl Session {
    pub fn new(persona_message: &str) -> Self {
        Self {
            transcript: Transcript::new_with_messages(vec![Message::new(
                Role::System,
                persona_message,
            )]),
            document: None,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn push(&mut self, msg: Message) {
        self.transcript.push(msg)
    }

    /// Messages shown to the user. System messages are sent to the
    /// model but never displayed.
    pub fn visible_messages(&self) -> Vec<Message> {
        self.transcript
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect()
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Add the uploaded judgment as context unless the same text is
    /// already the current document. Returns whether a message was
    /// appended.
    pub fn inject_document(&mut self, text: &str, context_message: &str) -> bool {
        if self.document.as_deref() == Some(text) {
            return false;
        }
        self.transcript
            .push(Message::new(Role::System, context_message));
        self.document = Some(text.to_string());
        true
    }

    /// The messages to send for a turn that starts with `user_msg`.
    pub fn history_with(&self, user_msg: &Message) -> Vec<Message> {
        let mut history = self.transcript.messages();
        history.push(user_msg.clone());
        history
    }

    /// Record a completed turn. Both messages are appended together so
    /// a failed request leaves the transcript untouched.
    pub fn record_turn(&mut self, user_msg: Message, reply: &Reply) {
        self.transcript.push(user_msg);
        self.transcript
            .push(Message::new(Role::Assistant, &reply.content));
    }
}

/// In memory sessions keyed by an id chosen by the client. Nothing is
/// persisted; sessions live as long as the process.
#[derive(Debug)]
pub struct SessionStore {
    persona_message: String,
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new(persona_message: &str) -> Self {
        Self {
            persona_message: persona_message.to_string(),
            sessions: HashMap::new(),
        }
    }

    /// Fetch a session, creating it with the persona message on first
    /// access. Existing history is never reset.
    pub fn get_or_create(&mut self, id: &str) -> &mut Session {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::new(&self.persona_message))
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
