use anyhow::Result;

use crate::ai::prompt::Persona;
use crate::api;
use crate::core::AppConfig;

pub async fn run(host: String, port: String, persona: Persona) -> Result<()> {
    let config = AppConfig::from_env(persona)?;
    api::serve(host, port, config).await
}
