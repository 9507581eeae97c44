//! Google Generative AI behavior judge.
//!
//! Sends one `generateContent` request per behavior and asks for a JSON
//! verdict shaped like [`JudgeDecision`]. Every failure is turned into the
//! fallback approval before it reaches the domain layer.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use super::JudgeError;
use crate::config::JudgeConfig;
use crate::domain::judge::{decision_or_fallback, BehaviorJudge};
use crate::domain::models::JudgeDecision;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google error wrapper.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Behavior judge backed by a Gemini model
pub struct GeminiJudge {
    client: reqwest::Client,
    config: JudgeConfig,
}

impl GeminiJudge {
    pub fn new(config: JudgeConfig) -> Result<Self, JudgeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Prompt asking the model to rate one behavior
    pub fn build_prompt(behavior: &str, child_name: &str) -> String {
        format!(
            "The child, {child_name}, did the following behavior: \"{behavior}\".\n\
             \n\
             Your task:\n\
             1. Determine if this is a positive behavior that deserves a reward stamp (true/false).\n\
             2. Write a short, enthusiastic, child-friendly compliment (max 15 words).\n\
             3. Select a single fun emoji related to the behavior or celebration.\n\
             \n\
             If the behavior is negative or harmful, set approved to false and give a gentle \
             encouragement to try again."
        )
    }

    fn build_request_body(behavior: &str, child_name: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": Self::build_prompt(behavior, child_name) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "approved": { "type": "BOOLEAN" },
                        "praise": { "type": "STRING" },
                        "emoji": { "type": "STRING" }
                    },
                    "required": ["approved", "praise", "emoji"]
                }
            }
        })
    }

    async fn request_decision(
        &self,
        behavior: &str,
        child_name: &str,
    ) -> Result<JudgeDecision, JudgeError> {
        let api_key = self.config.api_key.as_deref().ok_or(JudgeError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key).map_err(|_| JudgeError::InvalidApiKey)?,
        );

        let url = format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&Self::build_request_body(behavior, child_name))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(JudgeError::ApiResponse {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| JudgeError::Malformed(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(JudgeError::EmptyResponse)?;

        parse_decision(&text)
    }
}

/// Parse and sanity-check the model's JSON verdict
fn parse_decision(text: &str) -> Result<JudgeDecision, JudgeError> {
    let decision: JudgeDecision =
        serde_json::from_str(text.trim()).map_err(|e| JudgeError::Malformed(e.to_string()))?;

    let praise = decision.praise.trim();
    let emoji = decision.emoji.trim();
    if praise.is_empty() || emoji.is_empty() {
        return Err(JudgeError::Malformed("missing praise or emoji".to_string()));
    }

    Ok(JudgeDecision {
        approved: decision.approved,
        praise: praise.to_string(),
        emoji: emoji.to_string(),
    })
}

#[async_trait]
impl BehaviorJudge for GeminiJudge {
    async fn evaluate(&self, behavior: &str, child_name: &str) -> JudgeDecision {
        let decision = decision_or_fallback(self.request_decision(behavior, child_name).await);
        info!(
            "Judge decision for {}: approved={} {}",
            child_name, decision.approved, decision.emoji
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn judge_for(server: &MockServer, api_key: Option<&str>) -> GeminiJudge {
        GeminiJudge::new(JudgeConfig {
            api_key: api_key.map(str::to_string),
            base_url: format!("{}/v1beta/models", server.uri()),
            ..JudgeConfig::default()
        })
        .expect("Failed to build judge")
    }

    fn model_reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    fn assert_fallback(decision: &JudgeDecision) {
        assert_eq!(decision, &JudgeDecision::fallback());
    }

    #[test]
    fn test_prompt_names_child_and_behavior() {
        let prompt = GeminiJudge::build_prompt("Shared my crayons", "Mia");

        assert!(prompt.contains("The child, Mia,"));
        assert!(prompt.contains("\"Shared my crayons\""));
        assert!(prompt.contains("max 15 words"));
    }

    #[test]
    fn test_parse_decision_rejects_blank_fields() {
        assert!(parse_decision(r#"{"approved":true,"praise":"  ","emoji":"⭐"}"#).is_err());
        assert!(parse_decision(r#"{"approved":true,"praise":"Yay"}"#).is_err());
        assert_eq!(
            parse_decision(r#" {"approved":false,"praise":" Try again! ","emoji":"💪"} "#).unwrap(),
            JudgeDecision {
                approved: false,
                praise: "Try again!".to_string(),
                emoji: "💪".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_approved_decision() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(
                r#"{"approved":true,"praise":"You're a super helper!","emoji":"🦸"}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let decision = judge_for(&server, Some("test-key"))
            .evaluate("Helped carry groceries", "Leo")
            .await;

        assert!(decision.approved);
        assert_eq!(decision.praise, "You're a super helper!");
        assert_eq!(decision.emoji, "🦸");
    }

    #[tokio::test]
    async fn test_rejected_decision_is_not_replaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(
                r#"{"approved":false,"praise":"Let's use gentle hands next time.","emoji":"🤲"}"#,
            )))
            .mount(&server)
            .await;

        let decision = judge_for(&server, Some("test-key"))
            .evaluate("Pushed a friend", "Leo")
            .await;

        assert!(!decision.approved);
        assert_eq!(decision.emoji, "🤲");
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
            })))
            .mount(&server)
            .await;

        let judge = judge_for(&server, Some("test-key"));
        let err = judge.request_decision("Read a book", "Ava").await.unwrap_err();
        assert!(matches!(err, JudgeError::ApiResponse { status: 503, ref message } if message == "The model is overloaded."));

        assert_fallback(&judge.evaluate("Read a book", "Ava").await);
    }

    #[tokio::test]
    async fn test_malformed_payload_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_reply("Sure! Great job!")))
            .mount(&server)
            .await;

        assert_fallback(&judge_for(&server, Some("test-key")).evaluate("Read a book", "Ava").await);
    }

    #[tokio::test]
    async fn test_empty_candidates_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let judge = judge_for(&server, Some("test-key"));
        assert!(matches!(
            judge.request_decision("Read a book", "Ava").await,
            Err(JudgeError::EmptyResponse)
        ));
        assert_fallback(&judge.evaluate("Read a book", "Ava").await);
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert_fallback(&judge_for(&server, None).evaluate("Read a book", "Ava").await);
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        let server = MockServer::start().await;
        let judge = judge_for(&server, Some("test-key"));
        drop(server);

        assert_fallback(&judge.evaluate("Read a book", "Ava").await);
    }
}
