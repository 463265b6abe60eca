use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::AppConfig;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

// {
//     "type": "azure_search",
//     "parameters": {
//         "endpoint": "https://example.search.windows.net",
//         "index_name": "civil-precedent-index",
//         "authentication": {"type": "api_key", "key": "..."},
//         "in_scope": true,
//         "top_n_documents": 3,
//         "query_type": "simple"
//     }
// }
#[derive(Clone, Serialize, Debug)]
pub struct Authentication {
    pub r#type: String,
    pub key: String,
}

#[derive(Clone, Serialize, Debug)]
pub struct SearchParameters {
    pub endpoint: String,
    pub index_name: String,
    pub authentication: Authentication,
    pub in_scope: bool,
    pub top_n_documents: u8,
    pub query_type: String,
}

#[derive(Clone, Serialize, Debug)]
pub struct DataSource {
    pub r#type: String,
    pub parameters: SearchParameters,
}

/// Everything needed to make one completion request besides the
/// messages themselves.
#[derive(Clone, Debug)]
pub struct CompletionOptions {
    pub api_hostname: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
    pub temperature: Option<f64>,
    pub data_source: Option<DataSource>,
}

impl From<&AppConfig> for CompletionOptions {
    fn from(config: &AppConfig) -> Self {
        let profile = &config.profile;
        let data_source = config.retrieval().map(|search| DataSource {
            r#type: String::from("azure_search"),
            parameters: SearchParameters {
                endpoint: search.endpoint.clone(),
                index_name: search.index_name.clone(),
                authentication: Authentication {
                    r#type: String::from("api_key"),
                    key: search.api_key.clone(),
                },
                in_scope: profile.in_scope,
                top_n_documents: profile.top_n_documents,
                query_type: profile.query_type.clone(),
            },
        });

        Self {
            api_hostname: config.openai_api_hostname.clone(),
            api_key: config.openai_api_key.clone(),
            api_version: config.openai_api_version.clone(),
            deployment: config.openai_model.clone(),
            temperature: profile.temperature,
            data_source,
        }
    }
}

/// A source document the search index returned alongside an answer.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Citation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filepath: Option<String>,
}

/// The assistant's answer for one turn and whatever it cited.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Reply {
    pub content: String,
    pub citations: Vec<Citation>,
}

pub fn completion_payload(messages: &[Message], options: &CompletionOptions) -> Value {
    let mut payload = json!({
        "messages": messages,
    });
    if let Some(temperature) = options.temperature {
        payload["temperature"] = json!(temperature);
    }
    if let Some(data_source) = &options.data_source {
        payload["data_sources"] = json!([data_source]);
    }
    payload
}

pub async fn completion(messages: &[Message], options: &CompletionOptions) -> Result<Value, Error> {
    let payload = completion_payload(messages, options);
    let url = format!(
        "{}/openai/deployments/{}/chat/completions",
        options.api_hostname.trim_end_matches("/"),
        options.deployment
    );

    tracing::debug!(
        "Requesting completion from {} with {} messages (grounded: {})",
        url,
        messages.len(),
        options.data_source.is_some()
    );

    let response = reqwest::Client::new()
        .post(url)
        .query(&[("api-version", options.api_version.as_str())])
        .header("api-key", &options.api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 5))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response)
}

/// Pull the answer and any citations out of a completion response.
/// Missing or malformed citation metadata means no citations.
pub fn parse_reply(resp: &Value) -> Result<Reply, Error> {
    let message = &resp["choices"][0]["message"];
    let content = message["content"]
        .as_str()
        .ok_or(anyhow!("No message received. Resp:\n\n {}", resp))?;

    let citations = message["context"]["citations"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    serde_json::from_value::<Citation>(item.clone())
                        .inspect_err(|e| tracing::warn!("Skipping malformed citation {}: {}", item, e))
                        .ok()
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Reply {
        content: content.to_string(),
        citations,
    })
}
