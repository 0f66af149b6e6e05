use serde::{Deserialize, Serialize};

/// One bank identifier known to the generator service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bic {
    /// The bank's BIC, unique within a country.
    pub bic: String,
    /// Human-readable bank name.
    pub bank: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

/// A generated IBAN/BIC pair.
///
/// `iban` and `bankcode` are mandatory in a well-formed payload; a response
/// missing either does not decode and is treated as malformed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IbanGeneration {
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    /// National bank code (Bankleitzahl) the IBAN was generated for.
    pub bankcode: String,
}

/// Error body returned by the generator service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bic_decodes_wire_field_names() {
        let bic: Bic = serde_json::from_str(
            r#"{"bic":"DEUTDEFF","bank":"Deutsche Bank","countryCode":"DE"}"#,
        )
        .expect("Failed to decode BIC");

        assert_eq!(bic.bic, "DEUTDEFF");
        assert_eq!(bic.bank, "Deutsche Bank");
        assert_eq!(bic.country_code, "DE");
    }

    #[test]
    fn test_generation_decodes_without_optional_bic() {
        let gen: IbanGeneration =
            serde_json::from_str(r#"{"iban":"DE89370400440532013000","bankcode":"50070010"}"#)
                .expect("Failed to decode generation");

        assert_eq!(gen.iban, "DE89370400440532013000");
        assert_eq!(gen.bic, None);
        assert_eq!(gen.bankcode, "50070010");
    }

    #[test]
    fn test_generation_requires_iban_and_bankcode() {
        assert!(serde_json::from_str::<IbanGeneration>(r#"{"iban":"DE89"}"#).is_err());
        assert!(serde_json::from_str::<IbanGeneration>(r#"{"bankcode":"50070010"}"#).is_err());
    }

    #[test]
    fn test_error_response_decodes() {
        let err: ErrorResponse = serde_json::from_str(r#"{"error":"unknown bank code"}"#)
            .expect("Failed to decode error body");
        assert_eq!(err.error, "unknown bank code");
    }
}
