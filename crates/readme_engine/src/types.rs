use readme_core::{
    CallOutcome, GenerationResult, RepositoryInfo, ANALYZE_FAILED_MESSAGE,
    GENERATE_FAILED_MESSAGE,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PREVIEW_FAILED_MESSAGE: &str = "Failed to preview README";

/// Uniform result of every remote operation. Transport failures and
/// `success: false` payloads both end up as `Failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    Success(T),
    Failure { error: Option<String> },
}

impl<T> Envelope<T> {
    pub fn failure(error: impl Into<String>) -> Self {
        Envelope::Failure {
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure { error } => error.as_deref(),
        }
    }

    pub fn into_outcome<U: From<T>>(self) -> CallOutcome<U> {
        match self {
            Envelope::Success(payload) => CallOutcome::Success(payload.into()),
            Envelope::Failure { error } => CallOutcome::Failure { error },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RepositoryAnalysis {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stars: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GeneratedReadme {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PreviewHtml {
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub const DEGRADED: &'static str = "error";

    pub fn degraded() -> Self {
        Self {
            status: Self::DEGRADED.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == Self::DEGRADED
    }
}

impl From<RepositoryAnalysis> for RepositoryInfo {
    fn from(analysis: RepositoryAnalysis) -> Self {
        RepositoryInfo {
            name: analysis.name,
            description: analysis.description,
            language: analysis.language,
            stars: analysis.stars,
        }
    }
}

impl From<GeneratedReadme> for GenerationResult {
    fn from(readme: GeneratedReadme) -> Self {
        GenerationResult {
            markdown: readme.markdown.unwrap_or_default(),
            html: readme.html.unwrap_or_default(),
            message: readme.message.filter(|m| !m.is_empty()),
        }
    }
}

/// Transport-level failures. Never leaves the client: every variant is
/// folded into [`Envelope::Failure`] with its display text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Network(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Response shape shared by the analyze, generate and preview endpoints.
///
/// Payload fields stay untyped until `success` is known, so a declared
/// failure keeps its error text even when the other fields are junk.
#[derive(Debug, Deserialize)]
pub(crate) struct WireEnvelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl WireEnvelope {
    pub fn into_envelope<T: DeserializeOwned>(self) -> Result<Envelope<T>, serde_json::Error> {
        if self.success {
            serde_json::from_value(Value::Object(self.payload)).map(Envelope::Success)
        } else {
            Ok(Envelope::Failure { error: self.error })
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RepositoryRequest<'a> {
    pub github_url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PreviewRequest<'a> {
    pub content: &'a str,
}

/// Fallback shown when an operation fails without any description.
pub(crate) fn fallback_message(endpoint: &str) -> &'static str {
    match endpoint {
        "analyze" => ANALYZE_FAILED_MESSAGE,
        "generate-readme" => GENERATE_FAILED_MESSAGE,
        _ => PREVIEW_FAILED_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_success_keeps_payload_fields() {
        let wire: WireEnvelope =
            serde_json::from_str(r##"{"success":true,"markdown":"# hi","message":"ok"}"##).unwrap();
        let envelope: Envelope<GeneratedReadme> = wire.into_envelope().unwrap();
        assert_eq!(
            envelope,
            Envelope::Success(GeneratedReadme {
                markdown: Some("# hi".to_string()),
                html: None,
                message: Some("ok".to_string()),
            })
        );
    }

    #[test]
    fn wire_failure_keeps_error_text() {
        let wire: WireEnvelope =
            serde_json::from_str(r#"{"success":false,"error":"not found"}"#).unwrap();
        let envelope: Envelope<RepositoryAnalysis> = wire.into_envelope().unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.error(), Some("not found"));
    }

    #[test]
    fn failure_ignores_mistyped_payload_fields() {
        let wire: WireEnvelope = serde_json::from_str(
            r#"{"success":false,"error":"Repository not found","stars":"n/a"}"#,
        )
        .unwrap();
        let envelope: Envelope<RepositoryAnalysis> = wire.into_envelope().unwrap();
        assert_eq!(envelope.error(), Some("Repository not found"));
    }

    #[test]
    fn success_with_mistyped_payload_is_a_decode_error() {
        let wire: WireEnvelope =
            serde_json::from_str(r#"{"success":true,"stars":"n/a"}"#).unwrap();
        assert!(wire.into_envelope::<RepositoryAnalysis>().is_err());
    }

    #[test]
    fn missing_success_flag_is_a_decode_error() {
        let parsed = serde_json::from_str::<WireEnvelope>(r#"{"html":"<p/>"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_server_message_is_dropped() {
        let result = GenerationResult::from(GeneratedReadme {
            message: Some(String::new()),
            ..GeneratedReadme::default()
        });
        assert_eq!(result.message, None);
    }

    #[test]
    fn generated_readme_defaults_missing_text_to_empty() {
        let result = GenerationResult::from(GeneratedReadme::default());
        assert_eq!(result.markdown, "");
        assert_eq!(result.html, "");
    }

    #[test]
    fn failure_envelope_maps_to_failure_outcome() {
        let envelope: Envelope<RepositoryAnalysis> = Envelope::Failure { error: None };
        let outcome: CallOutcome<RepositoryInfo> = envelope.into_outcome();
        assert_eq!(outcome, CallOutcome::Failure { error: None });
    }

    #[test]
    fn request_bodies_use_wire_field_names() {
        let body = serde_json::to_string(&RepositoryRequest {
            github_url: "https://github.com/a/b",
        })
        .unwrap();
        assert_eq!(body, r#"{"github_url":"https://github.com/a/b"}"#);
        let body = serde_json::to_string(&PreviewRequest { content: "# x" }).unwrap();
        assert_eq!(body, r##"{"content":"# x"}"##);
    }

    #[test]
    fn http_status_error_text() {
        assert_eq!(
            ClientError::HttpStatus(502).to_string(),
            "HTTP error! status: 502"
        );
    }
}
