//! Domain errors for admin attribute reconciliation.

use admin_attributes_sdk::{AdminAttributesError, ResolutionError, StoreError};
use thiserror::Error;

/// Domain-level errors raised while reconciling a tenant.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Tenant or admin-username resolution failed
    #[error("tenant resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    /// User store or group persistence failure
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// SCIM meta timestamp could not be rendered
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Invalid module configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convert domain errors to SDK errors for API boundary.
impl From<DomainError> for AdminAttributesError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Resolution(e) => Self::Resolution(e),
            DomainError::Store(e) => Self::Store(e),
            DomainError::Timestamp(e) => {
                Self::Internal(format!("failed to format timestamp: {e}"))
            }
            DomainError::InvalidConfig(msg) => {
                Self::Internal(format!("invalid configuration: {msg}"))
            }
        }
    }
}
