//! Error types for admin attribute reconciliation.

use thiserror::Error;

use crate::models::TenantId;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Tenant or admin-username lookup failed.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The tenant id is unknown to the realm provider.
    #[error("tenant not found: {tenant_id}")]
    TenantNotFound {
        /// The tenant ID that was not found.
        tenant_id: TenantId,
    },

    /// The admin username could not be retrieved.
    #[error("unable to retrieve the admin name for tenant {tenant_id}: {message}")]
    LookupFailed {
        /// The tenant ID being resolved.
        tenant_id: TenantId,
        /// Error message
        message: String,
        /// Underlying lookup error
        #[source]
        source: Option<BoxedSource>,
    },
}

impl ResolutionError {
    /// Create a lookup failure with a message only.
    #[must_use]
    pub fn lookup_failed(tenant_id: TenantId, message: impl Into<String>) -> Self {
        Self::LookupFailed {
            tenant_id,
            message: message.into(),
            source: None,
        }
    }

    /// Create a lookup failure with a source error.
    #[must_use]
    pub fn lookup_failed_with_source(
        tenant_id: TenantId,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::LookupFailed {
            tenant_id,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The tenant the failed lookup was for.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        match self {
            Self::TenantNotFound { tenant_id } | Self::LookupFailed { tenant_id, .. } => *tenant_id,
        }
    }
}

/// Failure reported by the user store or the group persistence store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// User store or claim storage failure
    #[error("user store error: {message}")]
    UserStore {
        /// Error message
        message: String,
        /// Source error from the user store
        #[source]
        source: Option<BoxedSource>,
    },

    /// Group persistence failure
    #[error("group persistence error: {message}")]
    Persistence {
        /// Error message
        message: String,
        /// Source error from the persistence store
        #[source]
        source: Option<BoxedSource>,
    },
}

impl StoreError {
    /// Create a user store error with a message only.
    #[must_use]
    pub fn user_store(message: impl Into<String>) -> Self {
        Self::UserStore {
            message: message.into(),
            source: None,
        }
    }

    /// Create a user store error with a source error.
    #[must_use]
    pub fn user_store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::UserStore {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a persistence error with a message only.
    #[must_use]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Create a persistence error with a source error.
    #[must_use]
    pub fn persistence_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Errors surfaced by the admin attributes API.
#[derive(Debug, Error)]
pub enum AdminAttributesError {
    /// Tenant resolution failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A collaborator store failed; surfaced unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
