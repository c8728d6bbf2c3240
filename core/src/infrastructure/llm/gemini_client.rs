use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{common::entities::app_errors::CoreError, meal_plan::ports::LLMClient};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

impl GeminiLLMClient {
    pub fn new(
        api_key: String,
        model_name: String,
        base_url: String,
    ) -> Result<Self, CoreError> {
        if api_key.trim().is_empty() {
            return Err(CoreError::ExternalServiceError(
                "Gemini API key is not configured".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        // Parts of one candidate are fragments of the same answer.
        gemini_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_text(
        &self,
        system_instruction: String,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let request = GeminiRequest {
            system_instruction: Some(Content {
                parts: vec![Part {
                    text: system_instruction,
                }],
            }),
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            }),
        };

        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;

    type Captured = Arc<Mutex<Vec<Value>>>;

    async fn spawn_gemini(status: StatusCode, reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let app = Router::new()
            .route(
                "/v1beta/models/{model_action}",
                post(
                    move |State(captured): State<Captured>, Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            captured.lock().unwrap().push(body);
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), captured)
    }

    fn client(base_url: String) -> GeminiLLMClient {
        GeminiLLMClient::new("test-key".to_string(), "gemini-test".to_string(), base_url).unwrap()
    }

    #[tokio::test]
    async fn test_joins_candidate_parts() {
        let (base_url, captured) = spawn_gemini(
            StatusCode::OK,
            json!({
                "candidates": [{ "content": { "parts": [{ "text": "{\"meals\":" }, { "text": "[]}" }] } }]
            }),
        )
        .await;

        let text = client(base_url)
            .generate_with_text("be strict".into(), "make food".into(), json!({"type": "object"}))
            .await
            .unwrap();

        assert_eq!(text, "{\"meals\":[]}");

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["contents"][0]["parts"][0]["text"], "make food");
        assert_eq!(requests[0]["system_instruction"]["parts"][0]["text"], "be strict");
        assert_eq!(
            requests[0]["generation_config"]["response_mime_type"],
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_error_status_is_external_error() {
        let (base_url, _) =
            spawn_gemini(StatusCode::TOO_MANY_REQUESTS, json!({ "error": "quota" })).await;

        let err = client(base_url)
            .generate_with_text(String::new(), "prompt".into(), json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(msg) if msg.contains("429")));
    }

    #[tokio::test]
    async fn test_no_candidates_is_external_error() {
        let (base_url, _) = spawn_gemini(StatusCode::OK, json!({ "candidates": [] })).await;

        let err = client(base_url)
            .generate_with_text(String::new(), "prompt".into(), json!({}))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::ExternalServiceError("No response from LLM".to_string())
        );
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        assert!(GeminiLLMClient::new(" ".into(), "m".into(), "http://x".into()).is_err());
    }
}
