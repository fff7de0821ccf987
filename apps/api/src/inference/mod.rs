/// Inference client: the single point of entry for hosted model calls
/// (summarisation and translation).
///
/// No retries: a failed call surfaces to the caller, who retries manually.
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub const SUMMARY_MODEL: &str = "facebook/bart-large-cnn";
pub const TRANSLATION_MODEL: &str = "Helsinki-NLP/opus-mt-en-iir";
/// Input budget for the summarisation model, in characters.
pub const SUMMARY_INPUT_CHARS: usize = 2000;
/// Target-language token the multilingual translation model expects.
pub const URDU_MARKER: &str = ">>urd<<";

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

#[derive(Debug, Deserialize)]
struct ModelError {
    error: Value,
}

/// Shared client for the hosted inference API.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl InferenceClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, InferenceError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Summarises `text`, truncated to the model's input budget.
    pub async fn summarise(&self, text: &str) -> Result<String, InferenceError> {
        let input = truncate_chars(text, SUMMARY_INPUT_CHARS);
        let body = self.call(SUMMARY_MODEL, input).await?;
        extract_field(&body, "summary_text")
    }

    /// Translates English `text` to Urdu.
    pub async fn translate(&self, text: &str) -> Result<String, InferenceError> {
        let input = translation_input(text);
        let body = self.call(TRANSLATION_MODEL, &input).await?;
        extract_field(&body, "translation_text")
    }

    async fn call(&self, model: &str, input: &str) -> Result<Value, InferenceError> {
        let url = format!("{}/{}", self.base_url, model);
        let mut request = self.client.post(&url).json(&json!({ "inputs": input }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Inference API returned {status} for {model}: {text}");
            let message = serde_json::from_str::<ModelError>(&text)
                .map(|e| error_message(&e.error))
                .unwrap_or(text);
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Inference call to {model} succeeded ({} bytes)", text.len());
        serde_json::from_str(&text).map_err(|e| InferenceError::UnexpectedShape(e.to_string()))
    }
}

/// Takes at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn translation_input(text: &str) -> String {
    format!("{URDU_MARKER} {text}")
}

fn error_message(error: &Value) -> String {
    error
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

/// Reads `[{ "<field>": "..." }]`, or surfaces `{ "error": ... }`.
fn extract_field(body: &Value, field: &str) -> Result<String, InferenceError> {
    if let Some(text) = body
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get(field))
        .and_then(Value::as_str)
    {
        return Ok(text.to_string());
    }
    if let Some(error) = body.get("error") {
        return Err(InferenceError::Model(error_message(error)));
    }
    Err(InferenceError::UnexpectedShape(format!(
        "missing '{field}' in response"
    )))
}
