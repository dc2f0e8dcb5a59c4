//! Gemini text generation
//!
//! The chat endpoint hands each [`ConversationRequest`] to a [`TextGenerator`].
//! Generation never fails from the caller's point of view: every problem is
//! logged and turned into one of the fallback replies.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Reply used when the model answers with no text
pub const EMPTY_REPLY: &str =
    "I apologize, I'm processing a lot of data right now. Could you ask that again?";

/// Reply used when the request could not be completed
pub const FALLBACK_REPLY: &str =
    "Our systems are currently calibrating. Please try again in a moment.";

/// Prior messages forwarded with each request
pub const HISTORY_WINDOW: usize = 5;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const TEMPERATURE: f64 = 0.7;

/// Fixed persona sent as the system instruction
pub const PERSONA: &str = "You are \"Phit\", the AI ambassador for Phitopolis.
Phitopolis is a FinTech company based in Taguig, Philippines, supporting global hedge funds.
Mission: \"Making tomorrow's technology available today.\"
Culture: Elite engineering, vibrant, academic, high-performance, Python/React focused.
Your goal is to answer questions about the company, its tech stack (Python, AWS, React, C++), and attract top-tier engineering talent.
Keep answers professional, concise (under 100 words unless asked for details), and enthusiastic about technology.
If asked about specific jobs, encourage them to check the Careers section.";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationRequest {
    /// Texts of the most recent prior messages, oldest first
    #[serde(default)]
    pub history: Vec<String>,
    pub message: String,
}

impl ConversationRequest {
    /// The forwarded history, limited to the most recent entries
    pub fn recent_history(&self) -> &[String] {
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        &self.history[start..]
    }
}

/// Response of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationReply {
    pub text: String,
}

/// Anything that can answer a conversation request
pub trait TextGenerator: Send + Sync + 'static {
    /// Produce reply text. Implementations return a fallback instead of failing.
    fn generate(&self, request: &ConversationRequest) -> impl Future<Output = String> + Send;
}

/// Errors while talking to the Gemini API
#[derive(thiserror::Error, Debug)]
pub enum GeminiError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn build_request_body(request: &ConversationRequest) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(2);
    let history = request.recent_history();
    if !history.is_empty() {
        let mut context = String::from("Recent conversation:");
        for line in history {
            context.push_str("\n- ");
            context.push_str(line);
        }
        parts.push(Part::text(context));
    }
    parts.push(Part::text(request.message.clone()));

    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part::text(PERSONA)],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
        },
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the `generateContent` REST endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_options(api_key, DEFAULT_MODEL, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        api_key: Option<String>,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Call the API; `Ok(None)` means it answered without text
    async fn request(&self, request: &ConversationRequest) -> Result<Option<String>, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&build_request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &ConversationRequest) -> String {
        match self.request(request).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!(model = %self.model, "model returned no text");
                EMPTY_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(model = %self.model, error = %e, "text generation failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(history: &[&str], message: &str) -> ConversationRequest {
        ConversationRequest {
            history: history.iter().map(|s| s.to_string()).collect(),
            message: message.to_string(),
        }
    }

    #[test]
    fn request_body_without_history_has_single_part() {
        let body = serde_json::to_value(build_request_body(&request(&[], "Hi"))).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0]["text"], "Hi");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generationConfig"]["temperature"], 0.7);
        assert!(
            body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("You are \"Phit\"")
        );
    }

    #[test]
    fn history_goes_in_a_context_part_before_the_message() {
        let body = build_request_body(&request(&["Hello!", "What stack?"], "Hiring?"));
        let parts = &body.contents[0].parts;
        assert_eq!(parts.len(), 2);
        insta::assert_snapshot!(
            parts[0].text.as_deref().unwrap_or_default(),
            @r"
        Recent conversation:
        - Hello!
        - What stack?
        "
        );
        assert_eq!(parts[1].text.as_deref(), Some("Hiring?"));
    }

    #[test]
    fn history_is_trimmed_to_most_recent() {
        let req = request(&["1", "2", "3", "4", "5", "6", "7"], "now");
        assert_eq!(req.recent_history(), ["3", "4", "5", "6", "7"]);
    }

    #[test]
    fn missing_history_field_defaults_to_empty() {
        let req: ConversationRequest = serde_json::from_str(r#"{"message":"Hi"}"#).unwrap();
        assert!(req.history.is_empty());
        assert_eq!(req.message, "Hi");
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there"}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Hello there"));
    }

    #[test]
    fn blank_or_absent_text_is_none() {
        for raw in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#,
        ] {
            let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed.text(), None, "{raw}");
        }
    }

    #[test]
    fn endpoint_uses_model_and_trims_base_url() {
        let client = GeminiClient::with_options(
            Some("k".into()),
            "gemini-test",
            "http://localhost:9999/",
            DEFAULT_TIMEOUT,
        );
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert!(!GeminiClient::new(Some("  ".into())).has_api_key());
        assert!(!GeminiClient::new(None).has_api_key());
        assert!(GeminiClient::new(Some("key".into())).has_api_key());
    }

    #[tokio::test]
    async fn missing_key_yields_fallback_without_network() {
        let client = GeminiClient::new(None);
        let reply = client.generate(&request(&[], "Hi")).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn unreachable_api_yields_fallback() {
        let client = GeminiClient::with_options(
            Some("key".into()),
            DEFAULT_MODEL,
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        );
        let reply = client.generate(&request(&[], "Hi")).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }
}
