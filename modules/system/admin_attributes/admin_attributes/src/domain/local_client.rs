//! Local client implementation of the admin attributes API.

use std::sync::Arc;

use admin_attributes_sdk::{
    AdminAttributesClient, AdminAttributesError, GroupReconciliation, TenantId,
    TenantReconciliationReport, UserReconciliation,
};
use async_trait::async_trait;
use tracing::warn;

use super::{DomainError, Service};

/// Local implementation of [`AdminAttributesClient`].
///
/// Wraps the domain service and converts domain errors to SDK errors.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

fn log_and_convert(operation: &str, tenant_id: TenantId, e: DomainError) -> AdminAttributesError {
    warn!(operation, tenant_id, error = %e, "Admin attributes call failed");
    e.into()
}

#[async_trait]
impl AdminAttributesClient for LocalClient {
    async fn update_admin_user(
        &self,
        tenant_id: TenantId,
        validate_existing_id: bool,
    ) -> Result<UserReconciliation, AdminAttributesError> {
        self.service
            .update_admin_user(tenant_id, validate_existing_id)
            .await
            .map_err(|e| log_and_convert("update_admin_user", tenant_id, e))
    }

    async fn update_admin_group(
        &self,
        tenant_id: TenantId,
    ) -> Result<GroupReconciliation, AdminAttributesError> {
        self.service
            .update_admin_group(tenant_id)
            .await
            .map_err(|e| log_and_convert("update_admin_group", tenant_id, e))
    }

    async fn reconcile_tenants(
        &self,
        tenant_ids: &[TenantId],
        validate_existing_id: bool,
    ) -> Vec<TenantReconciliationReport> {
        self.service
            .reconcile_tenants(tenant_ids, validate_existing_id)
            .await
    }
}
