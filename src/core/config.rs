use std::env;

use anyhow::{Context, Result};

use crate::ai::prompt::Persona;

const DEFAULT_SEARCH_INDEX: &str = "civil-precedent-index";

/// Connection details for the managed search index used to ground
/// answers.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
}

/// Everything that used to differ between copies of the chat script:
/// which persona to use, whether to ground answers in the search
/// index, and the two request knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatProfile {
    pub persona: Persona,
    pub retrieval_enabled: bool,
    pub temperature: Option<f64>,
    pub top_n_documents: u8,
    // Answer only from retrieved documents
    pub in_scope: bool,
    pub query_type: String,
}

impl ChatProfile {
    pub fn preset(persona: Persona) -> Self {
        match persona {
            Persona::Lecturer => Self {
                persona,
                retrieval_enabled: false,
                temperature: None,
                top_n_documents: 5,
                in_scope: false,
                query_type: String::from("simple"),
            },
            Persona::Briefing => Self {
                persona,
                retrieval_enabled: false,
                temperature: Some(0.3),
                top_n_documents: 5,
                in_scope: false,
                query_type: String::from("simple"),
            },
            Persona::Grounded => Self {
                persona,
                retrieval_enabled: true,
                temperature: Some(0.2),
                top_n_documents: 3,
                in_scope: true,
                query_type: String::from("simple"),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_api_version: String,
    pub openai_model: String,
    pub search: Option<SearchConfig>,
    pub profile: ChatProfile,
}

impl AppConfig {
    /// Read the configuration from the environment. The completion
    /// endpoint and key are required, search settings are optional.
    pub fn from_env(persona: Persona) -> Result<Self> {
        let openai_api_hostname =
            env::var("AZURE_OAI_ENDPOINT").context("Missing env var AZURE_OAI_ENDPOINT")?;
        let openai_api_key = env::var("AZURE_OAI_KEY").context("Missing env var AZURE_OAI_KEY")?;
        let openai_api_version = env::var("AZURE_OAI_API_VERSION")
            .unwrap_or_else(|_| "2024-05-01-preview".to_string());
        let openai_model =
            env::var("AZURE_OAI_DEPLOYMENT").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let search = match (env::var("AZURE_SEARCH_ENDPOINT"), env::var("AZURE_SEARCH_KEY")) {
            (Ok(endpoint), Ok(api_key)) => Some(SearchConfig {
                endpoint,
                api_key,
                index_name: env::var("AZURE_SEARCH_INDEX")
                    .unwrap_or_else(|_| DEFAULT_SEARCH_INDEX.to_string()),
            }),
            _ => None,
        };

        let mut profile = ChatProfile::preset(persona);
        if let Ok(temperature) = env::var("CASEBRIEF_TEMPERATURE") {
            let temperature = temperature
                .parse::<f64>()
                .context("CASEBRIEF_TEMPERATURE must be a number")?;
            profile.temperature = Some(temperature);
        }
        if let Ok(top_n) = env::var("CASEBRIEF_TOP_N_DOCUMENTS") {
            profile.top_n_documents = top_n
                .parse::<u8>()
                .context("CASEBRIEF_TOP_N_DOCUMENTS must be a small positive integer")?;
        }

        if profile.retrieval_enabled && search.is_none() {
            tracing::warn!(
                "Persona {} wants retrieval but AZURE_SEARCH_ENDPOINT/AZURE_SEARCH_KEY are not set. Answers will not be grounded.",
                persona
            );
        }

        Ok(Self {
            openai_api_hostname,
            openai_api_key,
            openai_api_version,
            openai_model,
            search,
            profile,
        })
    }

    /// The search index to ground requests in, if this profile uses
    /// one and it is configured.
    pub fn retrieval(&self) -> Option<&SearchConfig> {
        if self.profile.retrieval_enabled {
            self.search.as_ref()
        } else {
            None
        }
    }
}
