//! Admin Attributes SDK
//!
//! This crate provides the public API for the `admin_attributes` module:
//!
//! - [`AdminAttributesClient`] - Public API trait for reconciliation callers
//! - [`TenantRealmProvider`], [`ClaimStore`], [`GroupPersistenceStore`],
//!   [`PrimaryDomainProvider`] - Collaborator traits implemented by the
//!   surrounding infrastructure (or by a plugin)
//! - [`UserReconciliation`], [`GroupReconciliation`] - Reconciliation outcomes
//! - [`AdminAttributesError`], [`ResolutionError`], [`StoreError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use admin_attributes_sdk::AdminAttributesClient;
//!
//! // Ensure the admin user carries a SCIM id, keeping a valid existing one.
//! let user = client.update_admin_user(tenant_id, true).await?;
//!
//! // Ensure the admin role has a provisioned group record.
//! let group = client.update_admin_group(tenant_id).await?;
//!
//! assert!(user.writes_issued() + group.writes_issued() <= 3);
//! ```
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::AdminAttributesClient;
pub use error::{AdminAttributesError, ResolutionError, StoreError};
pub use models::{
    AdminGroupRecord, AdminUserRecord, BOOTSTRAP_ADMIN_USERNAME, BOOTSTRAP_TENANT_ID,
    CandidateOutcome, DomainCandidate, GroupAction, GroupReconciliation, TenantContext, TenantId,
    TenantReconciliationReport, UserReconciliation, UserStoreCapabilities,
};
pub use plugin_api::{ClaimStore, GroupPersistenceStore, PrimaryDomainProvider, TenantRealmProvider};
