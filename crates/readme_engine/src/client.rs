use std::time::Duration;

use readme_logging::{readme_debug, readme_warn};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::types::{fallback_message, PreviewRequest, RepositoryRequest, WireEnvelope};
use crate::{ClientError, Envelope, GeneratedReadme, HealthStatus, PreviewHtml, RepositoryAnalysis};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// The four operations of the generation backend.
///
/// None of them fail in the `Result` sense: transport problems come back as
/// [`Envelope::Failure`] and a broken health endpoint as a degraded status.
#[async_trait::async_trait]
pub trait ReadmeApi: Send + Sync {
    async fn analyze(&self, github_url: &str) -> Envelope<RepositoryAnalysis>;

    async fn generate(&self, github_url: &str) -> Envelope<GeneratedReadme>;

    async fn preview(&self, content: &str) -> Envelope<PreviewHtml>;

    async fn health(&self) -> HealthStatus;
}

#[derive(Debug, Clone)]
pub struct HttpReadmeApi {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl HttpReadmeApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        Url::parse(&settings.base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, name: &str) -> Result<Url, ClientError> {
        let raw = format!("{}/{name}", self.settings.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|err| ClientError::InvalidUrl(format!("{raw}: {err}")))
    }

    async fn post<B, R>(&self, name: &str, body: &B) -> Envelope<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        match self.try_post::<B, R>(name, body).await {
            Ok(envelope) => {
                if !envelope.is_success() {
                    readme_warn!(
                        "{} declared failure: {}",
                        name,
                        envelope.error().unwrap_or(fallback_message(name))
                    );
                }
                envelope
            }
            Err(err) => {
                readme_warn!("{} request failed: {}", name, err);
                let text = err.to_string();
                if text.is_empty() {
                    Envelope::failure(fallback_message(name))
                } else {
                    Envelope::failure(text)
                }
            }
        }
    }

    async fn try_post<B, R>(&self, name: &str, body: &B) -> Result<Envelope<R>, ClientError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(name)?;
        let payload = serde_json::to_vec(body).map_err(|err| ClientError::Encode(err.to_string()))?;
        readme_debug!("POST {} body_len={}", url, payload.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<WireEnvelope>(&bytes)
            .and_then(WireEnvelope::into_envelope)
            .map_err(|err| ClientError::Decode(err.to_string()))
    }

    async fn try_health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.endpoint("health")?;
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ReadmeApi for HttpReadmeApi {
    async fn analyze(&self, github_url: &str) -> Envelope<RepositoryAnalysis> {
        self.post("analyze", &RepositoryRequest { github_url }).await
    }

    async fn generate(&self, github_url: &str) -> Envelope<GeneratedReadme> {
        self.post("generate-readme", &RepositoryRequest { github_url })
            .await
    }

    async fn preview(&self, content: &str) -> Envelope<PreviewHtml> {
        self.post("preview", &PreviewRequest { content }).await
    }

    async fn health(&self) -> HealthStatus {
        match self.try_health().await {
            Ok(status) => status,
            Err(err) => {
                readme_warn!("health check failed: {}", err);
                HealthStatus::degraded()
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return ClientError::Decode(err.to_string());
    }
    ClientError::Network(err.to_string())
}
