//! Collaborator traits consumed by the reconciliation core.
//!
//! The surrounding infrastructure (or a plugin such as the static realm
//! plugin) implements these traits. The core receives them as
//! `Arc<dyn Trait>` at construction time and never looks them up globally.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{ResolutionError, StoreError};
use crate::models::{TenantId, UserStoreCapabilities};

/// Tenant-to-realm resolution.
#[async_trait]
pub trait TenantRealmProvider: Send + Sync {
    /// Get the administrative username of a tenant.
    ///
    /// # Errors
    ///
    /// - `TenantNotFound` if the tenant id is unknown
    /// - `LookupFailed` if the underlying realm or tenant store fails
    async fn get_admin_username(&self, tenant_id: TenantId) -> Result<String, ResolutionError>;

    /// Get a snapshot of the tenant's user store configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the user store cannot be reached.
    async fn get_user_store_capabilities(
        &self,
        tenant_id: TenantId,
    ) -> Result<UserStoreCapabilities, StoreError>;
}

/// Claim storage of the tenant's user store.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Read one claim value of a user. `None` when the claim is unset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the claim cannot be read.
    async fn get_claim(
        &self,
        tenant_id: TenantId,
        username: &str,
        claim_uri: &str,
        profile: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Write a set of claims of a user in a single store operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the claims cannot be written.
    async fn set_claims(
        &self,
        tenant_id: TenantId,
        username: &str,
        claims: &BTreeMap<String, String>,
        profile: &str,
    ) -> Result<(), StoreError>;
}

/// Group/role persistence store.
#[async_trait]
pub trait GroupPersistenceStore: Send + Sync {
    /// Whether a provisioned group record exists for the qualified name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the persistence store cannot be read.
    async fn group_exists(&self, tenant_id: TenantId, qualified_name: &str)
    -> Result<bool, StoreError>;

    /// Whether the role object exists in the user store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the role lookup fails.
    async fn role_exists(&self, tenant_id: TenantId, qualified_name: &str)
    -> Result<bool, StoreError>;

    /// Create the group record with its mandatory attributes (id, created,
    /// last modified).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record cannot be written.
    async fn add_mandatory_attributes(
        &self,
        tenant_id: TenantId,
        qualified_name: &str,
    ) -> Result<(), StoreError>;
}

/// Source of the platform's primary user-store domain name.
pub trait PrimaryDomainProvider: Send + Sync {
    fn primary_domain_name(&self) -> String;
}
