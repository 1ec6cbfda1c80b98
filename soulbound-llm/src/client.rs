//! Generator client — unified interface over Ollama and OpenAI-compatible
//! backends, with a `None` provider for hosts that play fully offline.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::GenError;
use crate::types::{GenRequest, GenResponse};

/// Provider backend for narrative generation.
#[derive(Debug, Clone)]
pub enum GenProvider {
    /// Ollama running locally.
    Ollama {
        /// Base URL, e.g. `http://localhost:11434`.
        base_url: String,
    },
    /// OpenAI-compatible API.
    OpenAiCompatible {
        /// Base URL of the API.
        base_url: String,
        /// Bearer token.
        api_key: String,
    },
    /// No generator configured — every call errors, which the adapter
    /// treats as a normal fallback path.
    None,
}

/// The generator client. Routes requests to the configured backend.
pub struct GenClient {
    provider: GenProvider,
    http: Client,
    model: String,
    max_retries: u32,
}

impl GenClient {
    /// Create a new client.
    #[must_use]
    pub fn new(provider: GenProvider, model: impl Into<String>, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            max_retries,
        }
    }

    /// A client with no backend. All calls fail, so scenario generation
    /// always falls back to the built-in selector.
    #[must_use]
    pub fn none() -> Self {
        Self {
            provider: GenProvider::None,
            http: Client::new(),
            model: String::new(),
            max_retries: 0,
        }
    }

    /// Whether a backend is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, GenProvider::None)
    }

    /// Send one generation request.
    ///
    /// The returned text is untrusted; callers must run it through the
    /// adapter before it goes anywhere near a player.
    pub async fn generate(&self, request: &GenRequest) -> Result<GenResponse, GenError> {
        match &self.provider {
            GenProvider::None => Err(GenError::Unavailable(
                "no generator provider configured".into(),
            )),
            GenProvider::Ollama { base_url } => self.generate_ollama(base_url, request).await,
            GenProvider::OpenAiCompatible { base_url, api_key } => {
                self.generate_openai(base_url, api_key, request).await
            }
        }
    }

    async fn generate_ollama(
        &self,
        base_url: &str,
        request: &GenRequest,
    ) -> Result<GenResponse, GenError> {
        let url = format!("{base_url}/api/generate");
        let body = json!({
            "model": self.model,
            "prompt": format!("{}\n\n{}", request.system, request.user),
            "stream": false,
            "format": "json",
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            }
        });

        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(
                    "retrying generator call (attempt {}/{})",
                    attempt + 1,
                    self.max_retries + 1
                );
            }

            let start = Instant::now();
            let result = self
                .http
                .post(&url)
                .json(&body)
                .timeout(Duration::from_millis(request.timeout_ms))
                .send()
                .await;

            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    if resp.status().is_success() {
                        let json: serde_json::Value = resp
                            .json()
                            .await
                            .map_err(|e| GenError::ParseError(e.to_string()))?;

                        let text = json["response"].as_str().unwrap_or("").to_string();
                        return Ok(GenResponse {
                            text,
                            tokens_generated: json["eval_count"].as_u64().unwrap_or(0) as u32,
                            latency_ms,
                            model: self.model.clone(),
                        });
                    }
                    last_error = format!(
                        "HTTP {}: {}",
                        resp.status(),
                        resp.text().await.unwrap_or_default()
                    );
                    warn!("Ollama returned error: {last_error}");
                }
                Err(e) => {
                    last_error = e.to_string();
                    if e.is_timeout() {
                        warn!("generator request timed out after {}ms", request.timeout_ms);
                    } else {
                        warn!("generator request failed: {last_error}");
                    }
                }
            }
        }

        Err(GenError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }

    async fn generate_openai(
        &self,
        base_url: &str,
        api_key: &str,
        request: &GenRequest,
    ) -> Result<GenResponse, GenError> {
        let url = format!("{base_url}/v1/chat/completions");
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "response_format": { "type": "json_object" },
        });

        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(
                    "retrying generator call (attempt {}/{})",
                    attempt + 1,
                    self.max_retries + 1
                );
            }

            let start = Instant::now();
            let result = self
                .http
                .post(&url)
                .header("Authorization", format!("Bearer {api_key}"))
                .json(&body)
                .timeout(Duration::from_millis(request.timeout_ms))
                .send()
                .await;

            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    if resp.status().is_success() {
                        let json: serde_json::Value = resp
                            .json()
                            .await
                            .map_err(|e| GenError::ParseError(e.to_string()))?;

                        let text = json["choices"][0]["message"]["content"]
                            .as_str()
                            .unwrap_or("")
                            .to_string();
                        let tokens =
                            json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32;

                        return Ok(GenResponse {
                            text,
                            tokens_generated: tokens,
                            latency_ms,
                            model: self.model.clone(),
                        });
                    }
                    last_error = format!("HTTP {}", resp.status());
                    warn!("generator API returned error: {last_error}");
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!("generator API request failed: {last_error}");
                }
            }
        }

        Err(GenError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }
}
