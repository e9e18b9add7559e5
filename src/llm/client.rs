use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{env_or, http_timeout_from_env, require_env};

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
const DEFAULT_MODEL: &str = "deepseek-chat";

/// A text-generation service: system + user prompt in, reply text out
///
/// The classifier and ticker resolver only depend on this trait, so tests can
/// drive the whole pipeline with canned replies.
pub trait ChatCompletion {
    fn complete(
        &self,
        system: Option<&str>,
        user: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Configuration for the chat completions client
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API key (from DEEPSEEK_API_KEY env var)
    pub api_key: String,
    /// OpenAI-compatible base URL, without the trailing `/chat/completions`
    pub base_url: String,
    /// Model to use (e.g., "deepseek-chat")
    pub model: String,
    /// Sampling temperature; pinned to 0 for reproducible classification
    pub temperature: f64,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ChatConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require_env("DEEPSEEK_API_KEY")?,
            base_url: env_or("DEEPSEEK_BASE_URL", DEFAULT_BASE_URL),
            model: env_or("DEEPSEEK_MODEL", DEFAULT_MODEL),
            temperature: 0.0,
            timeout: http_timeout_from_env()?,
        })
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            temperature: 0.0,
            timeout: Duration::from_secs(60),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Client for an OpenAI-compatible chat completions API
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    /// Send a chat request and return the first choice's text
    ///
    /// A blank answer comes back as an empty string; callers decide whether
    /// that is an error.
    pub async fn send_message(&self, system: Option<&str>, user: &str) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(Message {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(Message {
            role: "user".to_string(),
            content: user.to_string(),
        });

        let request = ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            messages,
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to chat completions API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completions API error: {} - {}", status, body);
        }

        let response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completions response")?;

        extract_reply(response)
    }
}

impl ChatCompletion for ChatClient {
    async fn complete(&self, system: Option<&str>, user: &str) -> Result<String> {
        self.send_message(system, user).await
    }
}

fn extract_reply(response: ChatResponse) -> Result<String> {
    let text = response
        .choices
        .into_iter()
        .next()
        .context("No choices in response")?
        .message
        .content
        .unwrap_or_default();

    Ok(text.trim().to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
