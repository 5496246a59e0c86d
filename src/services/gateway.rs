use crate::core::config::Config;
use crate::core::speaker::Roster;
use crate::core::style::Style;
use crate::core::validate::{ErrorKind, ValidationErrors};
use crate::services::voices::{parse_voices, Voice};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// Body of POST /api/generate, shaped exactly as validated.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePayload {
    pub script_style: Style,
    pub speakers: usize,
    pub speakers_info: Roster,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub script: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "podcastId", default)]
    pub podcast_id: Option<String>,
}

/// Draft the backend stores server-side during /api/generate and hands
/// back to the edit view via GET /api/draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub script_style: Style,
    pub speakers_count: usize,
    pub speakers_info: Roster,
    pub description: String,
    pub script: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Submission failure. Server rejections carry the backend's field
/// errors, keyed identically to the client-side checks.
#[derive(Debug)]
pub enum GatewayError {
    ServerRejected {
        message: String,
        field_errors: ValidationErrors,
    },
    Network(anyhow::Error),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::ServerRejected { message, .. } => {
                ErrorKind::ServerRejected(message.clone())
            }
            GatewayError::Network(_) => ErrorKind::NetworkFailure,
        }
    }

    /// Fold this failure into an error mapping for uniform rendering.
    pub fn apply_to(&self, errors: &mut ValidationErrors) {
        errors.add(&self.kind());
        if let GatewayError::ServerRejected { field_errors, .. } = self {
            errors.merge(field_errors.clone());
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::ServerRejected { message, .. } => write!(f, "{}", message),
            GatewayError::Network(e) => write!(f, "Network error: {}", e),
        }
    }
}

impl std::error::Error for GatewayError {}

#[async_trait]
pub trait BackendClient: Send + Sync + Debug {
    async fn generate(&self, payload: &GeneratePayload)
        -> Result<GenerateResponse, GatewayError>;

    /// Fetch the voice catalog. Degrades to an empty list on any
    /// failure; voice selection is optional and must never block the
    /// wizard.
    async fn voices(&self) -> Vec<Voice>;

    /// The draft stored during the last generate, or `None` when the
    /// session has none (the backend answers `{}` then).
    async fn fetch_draft(&self) -> Result<Option<Draft>>;

    /// Persist an edited script into the server-side draft.
    async fn save_edit(&self, edited_script: &str) -> Result<()>;
}

pub fn create_backend(config: &Config) -> Result<Box<dyn BackendClient>> {
    Ok(Box::new(HttpBackend::new(config)?))
}

#[derive(Debug)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

/// Error body of a 4xx from the backend: a banner message plus,
/// optionally, per-field messages.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<ValidationErrors>,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn generate(
        &self,
        payload: &GeneratePayload,
    ) -> Result<GenerateResponse, GatewayError> {
        debug!(
            "POST /api/generate style={} speakers={}",
            payload.script_style, payload.speakers
        );
        let resp = self
            .client
            .post(self.url("/api/generate"))
            .json(payload)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.into()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.into()))?;

        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or(ErrorBody {
                error: None,
                errors: None,
            });
            return Err(GatewayError::ServerRejected {
                message: parsed
                    .error
                    .unwrap_or_else(|| "Failed to generate. Please try again.".to_string()),
                field_errors: parsed.errors.unwrap_or_default(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::Network(
                anyhow::Error::from(e).context("Malformed response from /api/generate"),
            )
        })
    }

    async fn voices(&self) -> Vec<Voice> {
        let result: Result<serde_json::Value> = async {
            let resp = self
                .client
                .get(self.url("/api/voices"))
                .send()
                .await
                .context("GET /api/voices failed")?;
            let status = resp.status();
            if !status.is_success() {
                anyhow::bail!("GET /api/voices returned {}", status);
            }
            Ok(resp.json().await.context("Invalid /api/voices body")?)
        }
        .await;

        match result {
            Ok(value) => parse_voices(&value),
            Err(e) => {
                warn!("Voice catalog unavailable, continuing without voices: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_draft(&self) -> Result<Option<Draft>> {
        let resp = self
            .client
            .get(self.url("/api/draft"))
            .send()
            .await
            .context("GET /api/draft failed")?;
        if !resp.status().is_success() {
            anyhow::bail!("GET /api/draft returned {}", resp.status());
        }
        let value: serde_json::Value = resp.json().await.context("Invalid /api/draft body")?;
        if value.get("script").is_none() {
            return Ok(None);
        }
        let draft = serde_json::from_value(value).context("Malformed draft")?;
        Ok(Some(draft))
    }

    async fn save_edit(&self, edited_script: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/api/edit/save"))
            .json(&serde_json::json!({ "edited_script": edited_script }))
            .send()
            .await
            .context("POST /api/edit/save failed")?;
        if !resp.status().is_success() {
            anyhow::bail!("POST /api/edit/save returned {}", resp.status());
        }
        Ok(())
    }
}
