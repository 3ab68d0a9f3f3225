//! Tenant to admin-username resolution.

use std::sync::Arc;

use admin_attributes_sdk::{ResolutionError, TenantContext, TenantId, TenantRealmProvider};

/// Resolves tenants to their administrative user.
///
/// The bootstrap tenant has a fixed administrator and is answered without
/// touching the realm provider.
pub struct TenantResolver {
    realm: Arc<dyn TenantRealmProvider>,
    bootstrap_tenant_id: TenantId,
    bootstrap_admin_username: String,
}

impl TenantResolver {
    #[must_use]
    pub fn new(
        realm: Arc<dyn TenantRealmProvider>,
        bootstrap_tenant_id: TenantId,
        bootstrap_admin_username: String,
    ) -> Self {
        Self {
            realm,
            bootstrap_tenant_id,
            bootstrap_admin_username,
        }
    }

    /// Build the per-call context for a tenant.
    #[must_use]
    pub fn resolve_context(&self, tenant_id: TenantId) -> TenantContext {
        TenantContext {
            tenant_id,
            is_bootstrap_tenant: tenant_id == self.bootstrap_tenant_id,
        }
    }

    /// Resolve the administrative username of a tenant.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError` if the tenant is unknown or the lookup
    /// fails. The bootstrap tenant never fails.
    pub async fn resolve_admin_username(
        &self,
        tenant_id: TenantId,
    ) -> Result<String, ResolutionError> {
        if self.resolve_context(tenant_id).is_bootstrap_tenant {
            return Ok(self.bootstrap_admin_username.clone());
        }

        let username = self.realm.get_admin_username(tenant_id).await?;
        if username.trim().is_empty() {
            return Err(ResolutionError::lookup_failed(
                tenant_id,
                "realm returned an empty admin username",
            ));
        }
        Ok(username)
    }
}
