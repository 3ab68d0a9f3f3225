//! Domain service for admin attribute reconciliation.

use std::sync::Arc;

use admin_attributes_sdk::{
    ClaimStore, GroupPersistenceStore, GroupReconciliation, PrimaryDomainProvider, TenantId,
    TenantRealmProvider, TenantReconciliationReport, UserReconciliation,
};
use tracing::{info, warn};

use super::{AdminGroupReconciler, AdminUserReconciler, DomainError, TenantResolver};
use crate::config::AdminAttributesConfig;

/// External collaborators the service is built from.
#[derive(Clone)]
pub struct Collaborators {
    pub realm: Arc<dyn TenantRealmProvider>,
    pub claims: Arc<dyn ClaimStore>,
    pub groups: Arc<dyn GroupPersistenceStore>,
    pub primary_domain: Arc<dyn PrimaryDomainProvider>,
}

/// Admin attributes service.
///
/// Holds no per-tenant state; every call reads the stores afresh.
pub struct Service {
    user: AdminUserReconciler,
    group: AdminGroupReconciler,
}

impl Service {
    /// Creates the service from validated configuration and collaborators.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` if the configuration is unusable.
    pub fn new(
        config: AdminAttributesConfig,
        collaborators: Collaborators,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        let config = Arc::new(config);

        let resolver = Arc::new(TenantResolver::new(
            collaborators.realm.clone(),
            config.bootstrap_tenant_id,
            config.bootstrap_admin_username.clone(),
        ));
        let user = AdminUserReconciler::new(
            resolver.clone(),
            collaborators.realm.clone(),
            collaborators.claims,
            config.clone(),
        );
        let group = AdminGroupReconciler::new(
            resolver,
            collaborators.realm,
            collaborators.groups,
            collaborators.primary_domain,
            config.domain_separator.clone(),
        );

        Ok(Self { user, group })
    }

    /// Ensure the admin user of a tenant carries a SCIM id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on user store failures.
    #[tracing::instrument(
        skip_all,
        fields(tenant_id = tenant_id, validate_existing_id = validate_existing_id)
    )]
    pub async fn update_admin_user(
        &self,
        tenant_id: TenantId,
        validate_existing_id: bool,
    ) -> Result<UserReconciliation, DomainError> {
        self.user
            .update_admin_user(tenant_id, validate_existing_id)
            .await
    }

    /// Ensure the admin role of a tenant has a provisioned group.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on user store or persistence failures.
    #[tracing::instrument(skip_all, fields(tenant_id = tenant_id))]
    pub async fn update_admin_group(
        &self,
        tenant_id: TenantId,
    ) -> Result<GroupReconciliation, DomainError> {
        self.group.update_admin_group(tenant_id).await
    }

    /// Reconcile user and group attributes of every tenant in order.
    #[tracing::instrument(
        skip_all,
        fields(
            tenant_count = tenant_ids.len(),
            validate_existing_id = validate_existing_id
        )
    )]
    pub async fn reconcile_tenants(
        &self,
        tenant_ids: &[TenantId],
        validate_existing_id: bool,
    ) -> Vec<TenantReconciliationReport> {
        let mut reports = Vec::with_capacity(tenant_ids.len());
        for &tenant_id in tenant_ids {
            let user = self
                .update_admin_user(tenant_id, validate_existing_id)
                .await
                .map_err(|e| {
                    warn!(tenant_id, error = %e, "Admin user reconciliation failed");
                    e.into()
                });
            let group = self.update_admin_group(tenant_id).await.map_err(|e| {
                warn!(tenant_id, error = %e, "Admin group reconciliation failed");
                e.into()
            });
            reports.push(TenantReconciliationReport {
                tenant_id,
                user,
                group,
            });
        }

        let failed = reports.iter().filter(|r| !r.is_success()).count();
        let writes: usize = reports
            .iter()
            .map(TenantReconciliationReport::writes_issued)
            .sum();
        info!(
            tenants = reports.len(),
            failed, writes, "Admin attribute reconciliation finished"
        );
        reports
    }
}
