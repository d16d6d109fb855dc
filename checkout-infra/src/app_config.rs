use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub shipping: ShippingConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaymentConfig {
    /// Payment methods the standard gateway accepts (case-insensitive).
    /// Empty accepts any non-blank method.
    #[serde(default)]
    pub accepted_methods: Vec<String>,
}

impl PaymentConfig {
    pub fn accepts(&self, method: &str) -> bool {
        let method = method.trim();
        if method.is_empty() {
            return false;
        }
        self.accepted_methods.is_empty()
            || self.accepted_methods.iter().any(|m| m.trim().eq_ignore_ascii_case(method))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShippingConfig {
    #[serde(default = "default_carrier_code")]
    pub carrier_code: String,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            carrier_code: default_carrier_code(),
        }
    }
}

fn default_carrier_code() -> String {
    "STD".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuditConfig {
    /// Records kept in memory by the audit journal. 0 keeps none.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            journal_capacity: default_journal_capacity(),
        }
    }
}

fn default_journal_capacity() -> usize {
    1000
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/checkout").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Eg.. `CHECKOUT_PAYMENT__ACCEPTED_METHODS=visa,amex`
            .add_source(
                config::Environment::with_prefix("CHECKOUT")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("payment.accepted_methods")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse a TOML document on top of the defaults, without touching the
    /// filesystem or environment.
    pub fn from_toml(document: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.payment.accepted_methods.is_empty());
        assert_eq!(config.shipping.carrier_code, "STD");
        assert_eq!(config.audit.journal_capacity, 1000);
    }

    #[test]
    fn test_toml_overrides() {
        let config = Config::from_toml(
            r#"
            [payment]
            accepted_methods = ["SuperCard", "Visa"]

            [shipping]
            carrier_code = "DHL"

            [audit]
            journal_capacity = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.payment.accepted_methods, vec!["SuperCard", "Visa"]);
        assert_eq!(config.shipping.carrier_code, "DHL");
        assert_eq!(config.audit.journal_capacity, 5);
    }

    #[test]
    fn test_accepted_methods() {
        let open = PaymentConfig::default();
        assert!(open.accepts("SuperCard"));
        assert!(!open.accepts(""));
        assert!(!open.accepts("   "));

        let restricted = PaymentConfig {
            accepted_methods: vec!["SuperCard".to_string()],
        };
        assert!(restricted.accepts("supercard"));
        assert!(!restricted.accepts("Visa"));
    }
}
