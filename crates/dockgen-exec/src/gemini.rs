//! Gemini `generateContent` backend for assisted generation.

use std::fmt;
use std::time::Duration;

use dockgen_build::{AssistError, TextGenerator};
use dockgen_core::{AssistConfig, Credentials};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: SecretString,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: SecretString,
    ) -> Result<Self, AssistError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AssistError::Request {
                detail: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_owned(),
            model: model.into(),
            api_key,
        })
    }

    /// Client for the configured backend, or `None` when assistance is
    /// disabled or no API key is available.
    pub fn from_config(
        config: &AssistConfig,
        credentials: &Credentials,
    ) -> Result<Option<Self>, AssistError> {
        if !config.enabled {
            tracing::debug!("assisted generation disabled by configuration");
            return Ok(None);
        }
        let Some(key) = &credentials.gemini_api_key else {
            tracing::debug!("GEMINI_API_KEY not set, templates only");
            return Ok(None);
        };
        Self::new(&config.endpoint, &config.model, key.clone()).map(Some)
    }

    fn request_url(&self) -> String {
        format!(
            "{endpoint}/models/{model}:generateContent",
            endpoint = self.endpoint,
            model = self.model
        )
    }
}

impl TextGenerator for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AssistError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_owned()),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "requesting Dockerfile from Gemini");
        let response = self
            .http
            .post(self.request_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistError::Request {
                detail: e.without_url().to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| AssistError::Request {
            detail: e.without_url().to_string(),
        })?;

        if !status.is_success() {
            return Err(AssistError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        response_text(&text)
    }
}

/// Concatenated text parts of the first candidate.
fn response_text(body: &str) -> Result<String, AssistError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| AssistError::Decode {
            detail: e.to_string(),
        })?;

    Ok(response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}
