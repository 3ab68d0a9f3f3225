//! Classification of collaborator failures.
//!
//! Only resolution failures during admin user reconciliation are absorbed.
//! Everything else is handed back to the caller unchanged.

use super::DomainError;

/// Which reconciliation raised the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationStage {
    AdminUser,
    AdminGroup,
}

/// What to do with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Log it and abort the tenant's operation without surfacing an error.
    Contained,
    /// Surface it to the caller as-is.
    Propagated,
}

/// Error policy shared by the reconcilers.
pub struct ReconciliationErrorPolicy;

impl ReconciliationErrorPolicy {
    #[must_use]
    pub fn classify(stage: ReconciliationStage, err: &DomainError) -> Disposition {
        match (stage, err) {
            (ReconciliationStage::AdminUser, DomainError::Resolution(_)) => {
                Disposition::Contained
            }
            _ => Disposition::Propagated,
        }
    }
}
