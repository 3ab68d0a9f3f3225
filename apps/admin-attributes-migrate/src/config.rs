//! Layered configuration for the migration binary.
//!
//! Precedence: defaults, then the YAML file (if given), then
//! `ADMIN_ATTRIBUTES__*` environment variables (`__` separates nesting).

use std::collections::HashSet;
use std::path::Path;

use admin_attributes::AdminAttributesConfig;
use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use static_realm_plugin::StaticRealmPluginConfig;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "ADMIN_ATTRIBUTES__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub admin_attributes: AdminAttributesConfig,
    pub static_realm: StaticRealmPluginConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Text,
    Json,
}

impl AppConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist, cannot be parsed, or contains
    /// unknown keys.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// Check the loaded configuration for semantic errors.
    ///
    /// # Errors
    ///
    /// Fails on empty claim URIs or duplicate tenant ids.
    pub fn validate(&self) -> Result<()> {
        self.admin_attributes.validate()?;

        let mut seen = HashSet::new();
        for tenant in &self.static_realm.tenants {
            if !seen.insert(tenant.id) {
                bail!("tenant {} is configured more than once", tenant.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::load(None).unwrap();

        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.admin_attributes.bootstrap_tenant_id, -1234);
        assert_eq!(cfg.static_realm.primary_domain, "PRIMARY");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let file = yaml_file(
            r"
logging:
  format: json
admin_attributes:
  claim_profile: custom
static_realm:
  tenants:
    - id: 1
      admin_username: admin
",
        );

        let cfg = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.admin_attributes.claim_profile, "custom");
        assert_eq!(cfg.static_realm.tenant_ids(), vec![1]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/config.yaml"))).unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let file = yaml_file("server:\n  port: 8080\n");

        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn duplicate_tenants_fail_validation() {
        let file = yaml_file(
            r"
static_realm:
  tenants:
    - id: 7
      admin_username: a
    - id: 7
      admin_username: b
",
        );
        let cfg = AppConfig::load(Some(file.path())).unwrap();

        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("tenant 7"));
    }
}
