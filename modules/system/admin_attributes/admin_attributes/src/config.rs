//! Configuration for the admin attributes module.

use admin_attributes_sdk::{BOOTSTRAP_ADMIN_USERNAME, BOOTSTRAP_TENANT_ID, TenantId};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminAttributesConfig {
    /// Sentinel id of the bootstrap (super) tenant.
    pub bootstrap_tenant_id: TenantId,

    /// Admin name the bootstrap tenant resolves to without a realm lookup.
    pub bootstrap_admin_username: String,

    /// Claim holding the SCIM id of a user.
    pub scim_id_claim_uri: String,

    /// SCIM `meta.created` claim.
    pub created_claim_uri: String,

    /// SCIM `meta.lastModified` claim.
    pub last_modified_claim_uri: String,

    /// SCIM `meta.resourceType` claim.
    pub resource_type_claim_uri: String,

    /// User-store profile claims are read from and written to.
    pub claim_profile: String,

    /// Separator between a domain and a role name.
    pub domain_separator: String,
}

impl Default for AdminAttributesConfig {
    fn default() -> Self {
        Self {
            bootstrap_tenant_id: BOOTSTRAP_TENANT_ID,
            bootstrap_admin_username: BOOTSTRAP_ADMIN_USERNAME.to_owned(),
            scim_id_claim_uri: "urn:ietf:params:scim:schemas:core:2.0:id".to_owned(),
            created_claim_uri: "urn:ietf:params:scim:schemas:core:2.0:meta.created".to_owned(),
            last_modified_claim_uri: "urn:ietf:params:scim:schemas:core:2.0:meta.lastModified"
                .to_owned(),
            resource_type_claim_uri: "urn:ietf:params:scim:schemas:core:2.0:meta.resourceType"
                .to_owned(),
            claim_profile: "default".to_owned(),
            domain_separator: "/".to_owned(),
        }
    }
}

impl AdminAttributesConfig {
    /// Check that names used to address the stores are usable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` naming the first empty field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("bootstrap_admin_username", &self.bootstrap_admin_username),
            ("scim_id_claim_uri", &self.scim_id_claim_uri),
            ("created_claim_uri", &self.created_claim_uri),
            ("last_modified_claim_uri", &self.last_modified_claim_uri),
            ("resource_type_claim_uri", &self.resource_type_claim_uri),
            ("claim_profile", &self.claim_profile),
            ("domain_separator", &self.domain_separator),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidConfig(format!(
                    "'{field}' must not be empty"
                )));
            }
        }
        Ok(())
    }
}
