//! Public API trait for admin attribute reconciliation.

use async_trait::async_trait;

use crate::error::AdminAttributesError;
use crate::models::{GroupReconciliation, TenantId, TenantReconciliationReport, UserReconciliation};

/// Public API trait for admin attribute reconciliation.
///
/// Invoked by tenant provisioning and migration workflows. Each call is
/// independent and holds no state across tenants, so one client can serve
/// concurrent reconciliation of many tenants.
#[async_trait]
pub trait AdminAttributesClient: Send + Sync {
    /// Ensure the tenant's admin user carries a SCIM id claim.
    ///
    /// With `validate_existing_id` a present, non-blank id is kept; without
    /// it a new id is always written.
    ///
    /// Tenant resolution failures are contained: the call returns
    /// [`UserReconciliation::Skipped`] without writing anything.
    ///
    /// # Errors
    ///
    /// - `Store` if the user store fails after the admin was resolved
    async fn update_admin_user(
        &self,
        tenant_id: TenantId,
        validate_existing_id: bool,
    ) -> Result<UserReconciliation, AdminAttributesError>;

    /// Ensure the tenant's admin role has a provisioned group record.
    ///
    /// # Errors
    ///
    /// - `Store` if capability, existence lookup or write fails; writes
    ///   issued for earlier candidates are not rolled back
    async fn update_admin_group(
        &self,
        tenant_id: TenantId,
    ) -> Result<GroupReconciliation, AdminAttributesError>;

    /// Reconcile user and group attributes of every tenant in order.
    ///
    /// A failing tenant never stops the batch; its error is reported in
    /// the tenant's entry.
    async fn reconcile_tenants(
        &self,
        tenant_ids: &[TenantId],
        validate_existing_id: bool,
    ) -> Vec<TenantReconciliationReport>;
}
