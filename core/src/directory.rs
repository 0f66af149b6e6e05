//! Directory cache of known bank identifiers.
//!
//! Loaded once at startup for a fixed jurisdiction and immutable for the
//! process lifetime. A failed or malformed fetch degrades to an empty
//! directory with no user-visible error; matching is then effectively
//! disabled and raw input is forwarded as a bank code.

use shared::Bic;
use tracing::{info, warn};

use crate::api::DirectoryService;

/// One known bank identifier, as the matcher sees it.
///
/// The field-renamed view of the wire [`Bic`] (`bic` → `code`,
/// `bank` → `name`); nothing outside this module touches the wire names.
#[derive(Debug, Clone, PartialEq)]
pub struct BankIdentifierEntry {
    pub code: String,
    pub name: String,
    pub country_code: String,
}

impl From<Bic> for BankIdentifierEntry {
    fn from(bic: Bic) -> Self {
        Self {
            code: bic.bic,
            name: bic.bank,
            country_code: bic.country_code,
        }
    }
}

/// The cached bank identifiers for one jurisdiction, in the order the
/// directory service returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    entries: Vec<BankIdentifierEntry>,
}

impl Directory {
    pub fn new(entries: Vec<BankIdentifierEntry>) -> Self {
        Self { entries }
    }

    /// Fetch the directory for `jurisdiction`.
    ///
    /// Fail-closed: a transport error or a body with even one
    /// ill-shaped element yields the empty directory, never a partial
    /// one.
    pub async fn load<S: DirectoryService>(service: &S, jurisdiction: &str) -> Self {
        match service.bics(Some(jurisdiction)).await {
            Ok(bics) => {
                info!("Loaded {} bank identifiers for {}", bics.len(), jurisdiction);
                Self::new(bics.into_iter().map(BankIdentifierEntry::from).collect())
            }
            Err(e) => {
                warn!("Directory load failed, matching disabled: {}", e);
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[BankIdentifierEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;

    struct StubDirectoryService {
        bics: Option<Vec<Bic>>,
    }

    #[async_trait]
    impl DirectoryService for StubDirectoryService {
        async fn bics(&self, _country_code: Option<&str>) -> Result<Vec<Bic>, ApiError> {
            match &self.bics {
                Some(bics) => Ok(bics.clone()),
                None => Err(ApiError::Service("directory unavailable".to_string())),
            }
        }
    }

    fn wire_entry(bic: &str, bank: &str) -> Bic {
        Bic {
            bic: bic.to_string(),
            bank: bank.to_string(),
            country_code: "DE".to_string(),
        }
    }

    #[test]
    fn test_wire_mapping_renames_fields() {
        let entry = BankIdentifierEntry::from(wire_entry("DEUTDEFF", "Deutsche Bank"));

        assert_eq!(entry.code, "DEUTDEFF");
        assert_eq!(entry.name, "Deutsche Bank");
        assert_eq!(entry.country_code, "DE");
    }

    #[test]
    fn test_one_bad_element_fails_the_whole_decode() {
        let body = r#"[
            {"bic":"DEUTDEFF","bank":"Deutsche Bank","countryCode":"DE"},
            {"bic":"COBADEFF","countryCode":"DE"}
        ]"#;
        assert!(serde_json::from_str::<Vec<Bic>>(body).is_err());
    }

    #[tokio::test]
    async fn test_load_preserves_service_order() {
        let service = StubDirectoryService {
            bics: Some(vec![
                wire_entry("DEUTDEFF", "Deutsche Bank"),
                wire_entry("COBADEFF", "Commerzbank"),
            ]),
        };

        let directory = Directory::load(&service, "DE").await;

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.entries()[0].code, "DEUTDEFF");
        assert_eq!(directory.entries()[1].code, "COBADEFF");
    }

    #[tokio::test]
    async fn test_failed_load_degrades_to_empty_directory() {
        let service = StubDirectoryService { bics: None };

        let directory = Directory::load(&service, "DE").await;

        assert!(directory.is_empty());
    }
}
