//! REST client for the OpenAI chat-completion endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the LLM client layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response parsed but carried no usable completion.
    #[error("LLM response contained no choices")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// AiConfig
// ---------------------------------------------------------------------------

/// Default chat-completion endpoint.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model when `OPENAI_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the LLM client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Provider API key.
    pub api_key: String,
    /// Base API URL (defaults to the OpenAI endpoint).
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `OPENAI_API_KEY` is not set, signalling that the
    /// content assistant is not configured.
    ///
    /// | Variable          | Required | Default                       |
    /// |-------------------|----------|-------------------------------|
    /// | `OPENAI_API_KEY`  | yes      | —                             |
    /// | `OPENAI_BASE_URL` | no       | `https://api.openai.com/v1`   |
    /// | `OPENAI_MODEL`    | no       | `gpt-3.5-turbo`               |
    /// | `AI_TIMEOUT_SECS` | no       | `30`                          |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("AI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// One suggested blog topic parsed from the model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSuggestion {
    pub topic: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// AiClient
// ---------------------------------------------------------------------------

/// HTTP client for the chat-completion API.
pub struct AiClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl AiClient {
    /// Create a new client. Fails only if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Suggest blog topics matching the user's interests.
    ///
    /// Returns up to five parsed (topic, description) pairs.
    pub async fn suggest_topics(
        &self,
        interests: &[String],
    ) -> Result<Vec<TopicSuggestion>, AiError> {
        let prompt = build_suggest_prompt(interests);
        let text = self.complete(&prompt, 0.8).await?;
        Ok(parse_suggestions(&text))
    }

    /// Analyze a piece of content: summary, keywords, tone, and a quality
    /// assessment as free text.
    pub async fn analyze_content(&self, content: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Analyze the following blog content. Provide a short summary, \
             5 keywords, the overall sentiment (positive, negative, or neutral), \
             and one suggestion to improve it.\n\n{content}"
        );
        self.complete(&prompt, 0.2).await
    }

    /// Rewrite content for clarity and flow while preserving meaning.
    pub async fn improve_content(
        &self,
        content: &str,
        style_guide: Option<&str>,
    ) -> Result<String, AiError> {
        let mut prompt = String::from(
            "Improve the following blog content for clarity, grammar, and flow. \
             Keep the author's meaning and voice. Return only the revised text.\n",
        );
        if let Some(style) = style_guide {
            prompt.push_str(&format!("Follow this style guide: {style}\n"));
        }
        prompt.push('\n');
        prompt.push_str(content);
        self.complete(&prompt, 0.4).await
    }

    /// Send one chat-completion request and return the first choice's text.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, AiError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a writing assistant for a blogging platform.".to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed.choices.into_iter().next().ok_or(AiError::EmptyResponse)?;
        Ok(choice.message.content)
    }
}

/// Build the topic-suggestion prompt from a list of interests.
fn build_suggest_prompt(interests: &[String]) -> String {
    format!(
        "Suggest 5 blog post topics for a writer interested in: {}. \
         Answer with one topic per line in the form \"topic: description\".",
        interests.join(", ")
    )
}

/// Parse "topic: description" lines out of the model output. Lines
/// without a colon and leading list markers are tolerated.
fn parse_suggestions(text: &str) -> Vec<TopicSuggestion> {
    text.lines()
        .filter_map(|line| {
            let line = line
                .trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == '-' || c == ')')
                .trim();
            let (topic, description) = line.split_once(':')?;
            let topic = topic.trim();
            if topic.is_empty() {
                return None;
            }
            Some(TopicSuggestion {
                topic: topic.to_string(),
                description: description.trim().to_string(),
            })
        })
        .take(5)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
