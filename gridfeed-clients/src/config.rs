//! Serializable client configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings shared by all adapters, loadable from TOML.
///
/// `Default` gives production values; overrides exist to point an adapter at
/// a mirror or a local test server without touching adapter code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Feed base-URL override per balancing-authority code.
    pub base_url_overrides: HashMap<String, String>,

    /// HTTP timeout per date-batch fetch, in seconds.
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url_overrides: HashMap::new(),
            timeout_secs: 30,
            user_agent: format!("gridfeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The feed base URL for a balancing authority, honoring any override.
    pub fn base_url_for(&self, ba: &str, default: &str) -> String {
        self.base_url_overrides
            .get(ba)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_production_values() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.base_url_overrides.is_empty());
    }

    #[test]
    fn toml_overrides_base_url_and_timeout() {
        let config = ClientConfig::from_toml(
            r#"
            timeout_secs = 5

            [base_url_overrides]
            NYISO = "http://localhost:8080/csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.base_url_for("NYISO", "http://mis.nyiso.com/public/csv"),
            "http://localhost:8080/csv"
        );
        assert_eq!(config.base_url_for("CAISO", "http://example"), "http://example");
    }
}
