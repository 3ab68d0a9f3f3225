//! Admin user reconciliation: the SCIM id claim of the tenant admin.

use std::collections::BTreeMap;
use std::sync::Arc;

use admin_attributes_sdk::{
    AdminUserRecord, ClaimStore, TenantId, TenantRealmProvider, UserReconciliation,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::policy::{Disposition, ReconciliationErrorPolicy, ReconciliationStage};
use super::{DomainError, TenantResolver};
use crate::config::AdminAttributesConfig;

/// SCIM resource type written for admin users.
const USER_RESOURCE_TYPE: &str = "User";

/// Ensures the admin user of a tenant carries a SCIM id.
pub struct AdminUserReconciler {
    resolver: Arc<TenantResolver>,
    realm: Arc<dyn TenantRealmProvider>,
    claims: Arc<dyn ClaimStore>,
    config: Arc<AdminAttributesConfig>,
}

impl AdminUserReconciler {
    #[must_use]
    pub fn new(
        resolver: Arc<TenantResolver>,
        realm: Arc<dyn TenantRealmProvider>,
        claims: Arc<dyn ClaimStore>,
        config: Arc<AdminAttributesConfig>,
    ) -> Self {
        Self {
            resolver,
            realm,
            claims,
            config,
        }
    }

    /// Write a fresh SCIM id to the tenant admin when needed.
    ///
    /// | provisioning | validate | current id | action   |
    /// |--------------|----------|------------|----------|
    /// | off          | any      | any        | none     |
    /// | on           | no       | any        | write    |
    /// | on           | yes      | blank      | write    |
    /// | on           | yes      | present    | none     |
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` when the user store fails after the admin
    /// was resolved. Resolution failures are contained and reported as
    /// [`UserReconciliation::Skipped`].
    pub async fn update_admin_user(
        &self,
        tenant_id: TenantId,
        validate_existing_id: bool,
    ) -> Result<UserReconciliation, DomainError> {
        let ctx = self.resolver.resolve_context(tenant_id);
        let username = match self.resolver.resolve_admin_username(tenant_id).await {
            Ok(username) => username,
            Err(e) => {
                let err = DomainError::from(e);
                return match ReconciliationErrorPolicy::classify(
                    ReconciliationStage::AdminUser,
                    &err,
                ) {
                    Disposition::Contained => {
                        error!(
                            tenant_id,
                            error = %err,
                            "Error while retrieving the admin username, skipping SCIM id update"
                        );
                        Ok(UserReconciliation::Skipped {
                            reason: err.to_string(),
                        })
                    }
                    Disposition::Propagated => Err(err),
                };
            }
        };

        let capabilities = self.realm.get_user_store_capabilities(tenant_id).await?;
        if !capabilities.provisioning_enabled {
            debug!(tenant_id, "SCIM provisioning disabled, admin user left as is");
            return Ok(UserReconciliation::ProvisioningDisabled);
        }

        if validate_existing_id {
            let record = self.read_admin_record(tenant_id, username).await?;
            if record.has_provisioning_id() {
                debug!(
                    tenant_id,
                    username = %record.username,
                    "Admin user already has a SCIM id"
                );
                return Ok(UserReconciliation::AlreadyValid {
                    username: record.username,
                });
            }
            return self.write_new_id(tenant_id, record.username).await;
        }

        debug!(
            tenant_id,
            bootstrap = ctx.is_bootstrap_tenant,
            "Refreshing admin SCIM id without validation"
        );
        self.write_new_id(tenant_id, username).await
    }

    async fn read_admin_record(
        &self,
        tenant_id: TenantId,
        username: String,
    ) -> Result<AdminUserRecord, DomainError> {
        let provisioning_id = self
            .claims
            .get_claim(
                tenant_id,
                &username,
                &self.config.scim_id_claim_uri,
                &self.config.claim_profile,
            )
            .await?
            .unwrap_or_default();
        Ok(AdminUserRecord {
            username,
            provisioning_id,
        })
    }

    async fn write_new_id(
        &self,
        tenant_id: TenantId,
        username: String,
    ) -> Result<UserReconciliation, DomainError> {
        let provisioning_id = Uuid::new_v4().to_string();
        let now = OffsetDateTime::now_utc().format(&Rfc3339)?;

        let mut claims = BTreeMap::new();
        claims.insert(self.config.scim_id_claim_uri.clone(), provisioning_id.clone());
        claims.insert(self.config.created_claim_uri.clone(), now.clone());
        claims.insert(self.config.last_modified_claim_uri.clone(), now);
        claims.insert(
            self.config.resource_type_claim_uri.clone(),
            USER_RESOURCE_TYPE.to_owned(),
        );

        self.claims
            .set_claims(tenant_id, &username, &claims, &self.config.claim_profile)
            .await?;

        info!(tenant_id, username = %username, "Wrote SCIM id for admin user");
        Ok(UserReconciliation::Written {
            username,
            provisioning_id,
        })
    }
}
