//! Domain layer for admin attribute reconciliation.

pub mod error;
pub mod group;
pub mod local_client;
pub mod policy;
pub mod resolver;
pub mod service;
pub mod user;

#[cfg(test)]
mod test_support;

pub use error::DomainError;
pub use group::{AdminGroupReconciler, derive_candidates, qualify_name};
pub use local_client::LocalClient;
pub use policy::{Disposition, ReconciliationErrorPolicy, ReconciliationStage};
pub use resolver::TenantResolver;
pub use service::{Collaborators, Service};
pub use user::AdminUserReconciler;
