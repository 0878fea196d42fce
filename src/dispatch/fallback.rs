use crate::dispatch::http::HttpDispatch;
use crate::dispatch::Endpoint;
use crate::error::MentorError;
use crate::payload::{Content, GenerationConfig};

/// Tries a prioritized list of endpoints one at a time and returns the
/// first success. Holds only read-only configuration; nothing is cached
/// between dispatch calls.
#[derive(Debug)]
pub struct Dispatcher {
    endpoints: Vec<Endpoint>,
    api_key: String,
    generation: GenerationConfig,
    http: HttpDispatch,
}

impl Dispatcher {
    pub fn new(endpoints: Vec<Endpoint>, api_key: impl Into<String>) -> Result<Self, MentorError> {
        if endpoints.is_empty() {
            return Err(MentorError::Config("endpoint list is empty".to_string()));
        }
        Ok(Self {
            endpoints,
            api_key: api_key.into(),
            generation: GenerationConfig::default(),
            http: HttpDispatch::new(),
        })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Deliver one payload. Endpoints are attempted strictly in order, one
    /// request in flight at a time, stopping at the first success. No retry
    /// of the same endpoint and no backoff between attempts; the only
    /// timeouts are the transport's own.
    pub async fn dispatch(&self, contents: &[Content]) -> Result<String, MentorError> {
        let mut failures = Vec::new();

        for endpoint in &self.endpoints {
            tracing::debug!(endpoint = %endpoint.name, "trying endpoint");

            match self
                .http
                .attempt(endpoint, &self.api_key, contents, &self.generation)
                .await
            {
                Ok(text) => {
                    tracing::info!(
                        endpoint = %endpoint.name,
                        attempts = failures.len() + 1,
                        "endpoint succeeded"
                    );
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint.name, "attempt failed: {e}");
                    failures.push(e);
                }
            }
        }

        tracing::error!(attempts = failures.len(), "all endpoints failed");
        Err(MentorError::Exhausted { failures })
    }
}
