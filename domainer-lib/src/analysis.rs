//! Analysis dispatch to a text-generation API.
//!
//! The dispatcher serializes a domain collection into a prompt, submits it
//! to an OpenAI-compatible chat-completions endpoint, and relays the textual
//! response verbatim. It is a plain request/response collaborator: no
//! retries, no streaming, no interpretation of the content.

use crate::error::DomainerError;
use crate::types::DomainRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str =
    "You are an assistant that provides in-depth domain name analysis and recommendations.";

/// Client for the text-generation capability.
#[derive(Clone)]
pub struct AnalysisClient {
    /// HTTP client for completion requests
    http_client: reqwest::Client,
    /// Base URL of the chat-completions API (e.g. "https://api.openai.com/v1")
    api_base: String,
    /// Bearer token for the API
    api_key: String,
    /// Model to request
    model: String,
    /// Completion budget
    max_tokens: u32,
    /// Sampling temperature
    temperature: f64,
    /// Overall request timeout
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl AnalysisClient {
    /// Create a new analysis client.
    ///
    /// # Arguments
    ///
    /// * `api_base` - Endpoint base URL, without the `/chat/completions` suffix
    /// * `api_key` - Bearer token (typically from `OPENAI_API_KEY`)
    pub fn new<B: Into<String>, K: Into<String>>(
        api_base: B,
        api_key: K,
        model: String,
        max_tokens: u32,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Self, DomainerError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                DomainerError::network_with_source(
                    "Failed to create analysis HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model,
            max_tokens,
            temperature,
            timeout,
        })
    }

    /// Submit the domain collection for analysis and return the response text.
    ///
    /// # Errors
    ///
    /// Returns `DomainerError` if:
    /// - The collection is empty (`EmptyInput`, checked before any I/O)
    /// - No API key is configured (`ConfigError`)
    /// - The request fails, times out, or the server responds with a
    ///   non-success status or an unusable body (`AnalysisError`/`Timeout`)
    pub async fn analyze(&self, records: &[DomainRecord]) -> Result<String, DomainerError> {
        if records.is_empty() {
            return Err(DomainerError::empty_input("analysis"));
        }
        if self.api_key.is_empty() {
            return Err(DomainerError::config(
                "no API key configured; set OPENAI_API_KEY",
            ));
        }

        let prompt = build_prompt(records);
        tracing::debug!("dispatching {} domains for analysis", records.len());

        let result = tokio::time::timeout(self.timeout, self.request_completion(&prompt)).await;

        match result {
            Ok(inner) => inner,
            Err(_) => Err(DomainerError::timeout("analysis request", self.timeout)),
        }
    }

    async fn request_completion(&self, prompt: &str) -> Result<String, DomainerError> {
        let url = format!("{}/chat/completions", self.api_base);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainerError::analysis(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainerError::analysis_with_status(
                truncate(&body, 200),
                status.as_u16(),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainerError::analysis(format!("unparseable response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainerError::analysis("response contained no choices"))?;

        Ok(content.trim().to_string())
    }
}

/// Build the analysis prompt from a domain collection.
pub fn build_prompt(records: &[DomainRecord]) -> String {
    let names: Vec<&str> = records.iter().map(|r| r.domain.as_str()).collect();

    format!(
        "Analyze the following domain names based on their potential value and provide a \
         specific recommendation for each. Consider factors like brandability, relevance to \
         industries or trends, commercial potential, and any risks. Format the response as a \
         numbered list with a brief explanation for each domain.\n\n\
         Domains:\n{}\n\n\
         Provide concise recommendations for each domain:",
        names.join("\n")
    )
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
