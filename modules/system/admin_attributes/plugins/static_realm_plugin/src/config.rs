//! Configuration for the static realm plugin.

use std::collections::BTreeMap;

use admin_attributes_sdk::TenantId;
use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticRealmPluginConfig {
    /// Name of the primary user store domain.
    pub primary_domain: String,

    /// Static tenant definitions.
    pub tenants: Vec<TenantConfig>,
}

impl Default for StaticRealmPluginConfig {
    fn default() -> Self {
        Self {
            primary_domain: "PRIMARY".to_owned(),
            tenants: Vec::new(),
        }
    }
}

impl StaticRealmPluginConfig {
    /// Configured tenant ids, in declaration order.
    #[must_use]
    pub fn tenant_ids(&self) -> Vec<TenantId> {
        self.tenants.iter().map(|t| t.id).collect()
    }
}

/// Configuration for a single tenant and its admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantConfig {
    /// Tenant ID.
    pub id: TenantId,

    /// Realm administrator username.
    pub admin_username: String,

    /// Whether SCIM provisioning is enabled (defaults to true).
    #[serde(default = "default_true")]
    pub provisioning_enabled: bool,

    #[serde(default)]
    pub role_group_separation_enabled: bool,

    /// `DomainName` property of the primary user store, if set.
    #[serde(default)]
    pub domain_name: Option<String>,

    #[serde(default = "default_admin_role_name")]
    pub admin_role_name: String,

    /// Claims of the admin user, keyed by claim URI.
    #[serde(default)]
    pub claims: BTreeMap<String, String>,

    /// Domain-qualified names of existing group records.
    #[serde(default)]
    pub groups: Vec<String>,

    /// Domain-qualified names of existing roles.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Operations that fail for this tenant.
    #[serde(default)]
    pub failures: Vec<FailurePoint>,
}

/// Store operation that can be configured to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePoint {
    AdminLookup,
    Capabilities,
    ClaimRead,
    ClaimWrite,
    GroupLookup,
    AddMandatoryAttributes,
}

fn default_true() -> bool {
    true
}

fn default_admin_role_name() -> String {
    "admin".to_owned()
}
