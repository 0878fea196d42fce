use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::dispatch::Endpoint;
use crate::error::MentorError;
use crate::payload::{Content, GenerationConfig};

const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024; // 2MB

#[derive(Debug)]
pub struct HttpDispatch {
    client: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: &'a [Content],
    generation_config: &'a GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: Option<i64>,
    message: Option<String>,
    status: Option<String>,
    details: Option<serde_json::Value>,
}

impl Default for HttpDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpDispatch {
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// One request to one endpoint. Transport failures, non-success statuses
    /// and unusable success bodies all come back as errors tagged with the
    /// endpoint name; the fallback loop decides what happens next.
    pub async fn attempt(
        &self,
        endpoint: &Endpoint,
        api_key: &str,
        contents: &[Content],
        generation: &GenerationConfig,
    ) -> Result<String, MentorError> {
        let body = GenerateRequest {
            contents,
            generation_config: generation,
        };

        let response = self
            .client
            .post(&endpoint.url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| MentorError::Transport {
                endpoint: endpoint.name.clone(),
                source: e,
            })?;

        let status = response.status();

        if !status.is_success() {
            // Best-effort parse of the structured error body; fall back to
            // raw status plus text. Cap the read to MAX_RESPONSE_BYTES.
            let bytes = response.bytes().await.unwrap_or_default();
            let truncated = &bytes[..bytes.len().min(MAX_RESPONSE_BYTES)];

            return Err(match serde_json::from_slice::<ErrorBody>(truncated) {
                Ok(parsed) => MentorError::Endpoint {
                    endpoint: endpoint.name.clone(),
                    http_status: status.as_u16(),
                    code: parsed.error.code,
                    status: parsed.error.status,
                    message: parsed
                        .error
                        .message
                        .unwrap_or_else(|| status.to_string()),
                    detail: parsed.error.details.map(Box::new),
                },
                Err(_) => MentorError::Endpoint {
                    endpoint: endpoint.name.clone(),
                    http_status: status.as_u16(),
                    code: None,
                    status: None,
                    message: format!("{status}: {}", String::from_utf8_lossy(truncated)),
                    detail: None,
                },
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MentorError::Transport {
                endpoint: endpoint.name.clone(),
                source: e,
            })?;

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(MentorError::Malformed {
                endpoint: endpoint.name.clone(),
                message: format!(
                    "response too large: {} bytes (max {MAX_RESPONSE_BYTES})",
                    bytes.len()
                ),
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_slice(&bytes).map_err(|e| MentorError::Malformed {
                endpoint: endpoint.name.clone(),
                message: format!("failed to parse response: {e}"),
            })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| MentorError::Malformed {
                endpoint: endpoint.name.clone(),
                message: "no candidates or empty content".to_string(),
            })
    }
}
