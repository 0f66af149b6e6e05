//! HTTP client for the generation service.
//!
//! Three GET endpoints against a fixed base address: `/v1/random`
//! (generate an IBAN/BIC pair), `/v1/bics` (the supported bank
//! identifiers) and `/v1/countryCodes`. Generation responses are
//! classified into the closed [`GenerationOutcome`] set so the rest of
//! the crate never inspects transport types.

use async_trait::async_trait;
use shared::{Bic, ErrorResponse, IbanGeneration};
use thiserror::Error;
use tracing::debug;

/// Base URL of the public generator deployment.
pub const DEFAULT_BASE_URL: &str = "https://ibans.es.klump.solutions";

/// Errors from the directory and country-code endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Service(String),
}

/// Query parameters for a generation call. Empty fields are omitted
/// from the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    pub bic: String,
    pub bank_code: String,
    pub country_code: String,
}

/// Every way a generation call can settle.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// 2xx with a well-formed payload.
    Generated(IbanGeneration),
    /// 2xx with a payload failing the shape check. The raw body is the
    /// user-facing message.
    Malformed(String),
    /// Non-2xx carrying a structured error body.
    ServiceError(String),
    /// Transport failure, or a non-2xx body without a structured error.
    Faulted(String),
}

/// Seam over the remote generation call, so the orchestrator can be
/// driven against a stub in tests.
#[async_trait]
pub trait GenerationService {
    async fn generate(&self, params: &GenerationParams) -> GenerationOutcome;
}

/// Seam over the directory fetch, mirroring [`GenerationService`].
#[async_trait]
pub trait DirectoryService {
    async fn bics(&self, country_code: Option<&str>) -> Result<Vec<Bic>, ApiError>;
}

/// Client for the generation service endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client against the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Request a generated IBAN/BIC pair.
    ///
    /// Never fails: transport errors and unreadable bodies are folded
    /// into [`GenerationOutcome::Faulted`] along with the other failure
    /// modes, so no submission path escapes the outcome set.
    pub async fn generate(&self, params: &GenerationParams) -> GenerationOutcome {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if !params.bic.is_empty() {
            query.push(("bic", &params.bic));
        }
        if !params.bank_code.is_empty() {
            query.push(("bankCode", &params.bank_code));
        }
        if !params.country_code.is_empty() {
            query.push(("countryCode", &params.country_code));
        }

        debug!(
            "GET /v1/random - bic={:?} bankCode={:?} countryCode={:?}",
            params.bic, params.bank_code, params.country_code
        );

        let response = match self
            .http
            .get(format!("{}/v1/random", self.base_url))
            .query(&query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return GenerationOutcome::Faulted(format!("Network error: {}", e)),
        };

        let ok = response.status().is_success();
        match response.text().await {
            Ok(body) => classify_generation(ok, &body),
            Err(e) => GenerationOutcome::Faulted(format!("Network error: {}", e)),
        }
    }

    /// The bank identifiers the generator supports, optionally
    /// restricted to one country code.
    pub async fn bics(&self, country_code: Option<&str>) -> Result<Vec<Bic>, ApiError> {
        let mut request = self.http.get(format!("{}/v1/bics", self.base_url));
        if let Some(cc) = country_code {
            request = request.query(&[("countryCode", cc)]);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(error_from_body(&response.text().await?))
        }
    }

    /// The country codes the generator supports.
    pub async fn country_codes(&self) -> Result<Vec<String>, ApiError> {
        let response = self
            .http
            .get(format!("{}/v1/countryCodes", self.base_url))
            .send()
            .await?;
        if response.status().is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(error_from_body(&response.text().await?))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for ApiClient {
    async fn generate(&self, params: &GenerationParams) -> GenerationOutcome {
        ApiClient::generate(self, params).await
    }
}

#[async_trait]
impl DirectoryService for ApiClient {
    async fn bics(&self, country_code: Option<&str>) -> Result<Vec<Bic>, ApiError> {
        ApiClient::bics(self, country_code).await
    }
}

/// Classify a settled generation response.
///
/// Success bodies must carry `iban` and `bankcode`; anything else is
/// malformed and the raw body becomes the message. Only non-2xx bodies
/// are mined for a structured `{"error": ...}`.
fn classify_generation(ok: bool, body: &str) -> GenerationOutcome {
    if ok {
        match serde_json::from_str::<IbanGeneration>(body) {
            Ok(generation) => GenerationOutcome::Generated(generation),
            Err(_) => GenerationOutcome::Malformed(body.to_string()),
        }
    } else {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => GenerationOutcome::ServiceError(err.error),
            Err(_) => GenerationOutcome::Faulted(body.to_string()),
        }
    }
}

fn error_from_body(body: &str) -> ApiError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => ApiError::Service(err.error),
        Err(_) => ApiError::Service(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_well_formed_success() {
        let outcome = classify_generation(
            true,
            r#"{"iban":"DE89370400440532013000","bic":"DEUTDEFF","bankcode":"50070010"}"#,
        );

        match outcome {
            GenerationOutcome::Generated(generation) => {
                assert_eq!(generation.iban, "DE89370400440532013000");
                assert_eq!(generation.bic.as_deref(), Some("DEUTDEFF"));
                assert_eq!(generation.bankcode, "50070010");
            }
            other => panic!("Expected Generated, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_success_without_bic() {
        let outcome =
            classify_generation(true, r#"{"iban":"DE89370400440532013000","bankcode":"50070010"}"#);
        assert!(matches!(outcome, GenerationOutcome::Generated(g) if g.bic.is_none()));
    }

    #[test]
    fn test_classify_malformed_success_keeps_raw_body() {
        let raw = r#"{"iban":"DE89370400440532013000"}"#;
        let outcome = classify_generation(true, raw);
        assert_eq!(outcome, GenerationOutcome::Malformed(raw.to_string()));
    }

    #[test]
    fn test_classify_structured_error_extracts_message() {
        let outcome = classify_generation(false, r#"{"error":"unknown bank code"}"#);
        assert_eq!(
            outcome,
            GenerationOutcome::ServiceError("unknown bank code".to_string())
        );
    }

    #[test]
    fn test_classify_unstructured_error_is_a_fault() {
        let outcome = classify_generation(false, "502 Bad Gateway");
        assert_eq!(outcome, GenerationOutcome::Faulted("502 Bad Gateway".to_string()));
    }

    #[test]
    fn test_error_body_without_structure_falls_back_to_text() {
        match error_from_body("gateway timeout") {
            ApiError::Service(message) => assert_eq!(message, "gateway timeout"),
            other => panic!("Expected Service, got {:?}", other),
        }
    }
}
