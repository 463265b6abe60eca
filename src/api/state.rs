use anyhow::Result;

use crate::ai::chat::SessionStore;
use crate::ai::prompt::persona_message;
use crate::core::AppConfig;

pub struct AppState {
    // Every open conversation, keyed by the id the client sends
    pub sessions: SessionStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let persona = persona_message(config.profile.persona)?;
        Ok(Self {
            sessions: SessionStore::new(&persona),
            config,
        })
    }
}
