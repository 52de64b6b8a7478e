//! Remembrance explanations from a generative language model
//!
//! One `generateContent` call per request. [`Explainer::explain`] never
//! fails: every outcome is a displayable Arabic string. Use
//! [`Explainer::try_explain`] to see why a request failed.

use noor_common::config::LlmConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("noor/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;
const API_KEY_HEADER: &str = "x-goog-api-key";

pub const MISSING_KEY_MESSAGE: &str =
    "عذراً، خدمة الذكاء الاصطناعي غير متوفرة حالياً (مفتاح API مفقود).";
pub const EMPTY_REPLY_MESSAGE: &str = "لم أتمكن من الحصول على شرح في الوقت الحالي.";
pub const FAILURE_MESSAGE: &str = "حدث خطأ أثناء محاولة شرح الذكر.";

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model returned no text")]
    EmptyReply,
}

impl ExplainError {
    /// Text shown to the user in place of an explanation
    pub fn user_message(&self) -> &'static str {
        match self {
            ExplainError::MissingApiKey => MISSING_KEY_MESSAGE,
            ExplainError::EmptyReply => EMPTY_REPLY_MESSAGE,
            _ => FAILURE_MESSAGE,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Prompt asking for a short, inspiring Arabic explanation of `dhikr_text`
pub fn build_prompt(dhikr_text: &str) -> String {
    format!(
        "أنت مساعد إسلامي عالم. اشرح لي فضل ومعنى هذا الذكر باختصار وجمال:\n\"{}\"\n\nاجعل الرد موجزاً وملهماً باللغة العربية.",
        dhikr_text
    )
}

pub struct Explainer {
    http_client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl Explainer {
    pub fn new(config: &LlmConfig) -> Result<Self, ExplainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ExplainError::Network(e.to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http_client,
            url,
            api_key: config.api_key().map(str::to_string),
        })
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn try_explain(&self, dhikr_text: &str) -> Result<String, ExplainError> {
        let api_key = self.api_key.as_deref().ok_or(ExplainError::MissingApiKey)?;

        let prompt = build_prompt(dhikr_text);
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        tracing::debug!(url = %self.url, "Requesting dhikr explanation");

        let response = self
            .http_client
            .post(&self.url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExplainError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExplainError::Api(status.as_u16(), error_text));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::Parse(e.to_string()))?;

        reply.text().ok_or(ExplainError::EmptyReply)
    }

    /// Explanation text, or the fixed message for whatever went wrong
    pub async fn explain(&self, dhikr_text: &str) -> String {
        match self.try_explain(dhikr_text).await {
            Ok(text) => {
                tracing::info!(chars = text.chars().count(), "Dhikr explanation received");
                text
            }
            Err(ExplainError::MissingApiKey) => {
                tracing::debug!("Explanation requested without an API key");
                MISSING_KEY_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dhikr explanation failed");
                e.user_message().to_string()
            }
        }
    }
}
