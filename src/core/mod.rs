mod config;
mod logging;
pub use config::{AppConfig, ChatProfile, SearchConfig};
pub use logging::init_tracing;
