//! Domain models for admin attribute reconciliation.

use serde::{Deserialize, Serialize};

use crate::error::AdminAttributesError;

/// Numeric tenant identifier as known to the user-store realm.
pub type TenantId = i32;

/// Reserved id of the platform's built-in super tenant.
pub const BOOTSTRAP_TENANT_ID: TenantId = -1234;

/// Administrator name the bootstrap tenant resolves to.
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

/// Per-call tenant context. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub is_bootstrap_tenant: bool,
}

/// The admin user as seen by one reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUserRecord {
    pub username: String,
    /// Current SCIM id claim value; empty when the claim is unset.
    pub provisioning_id: String,
}

impl AdminUserRecord {
    /// Whether the record already carries a usable provisioning id.
    ///
    /// Whitespace-only values count as empty.
    #[must_use]
    pub fn has_provisioning_id(&self) -> bool {
        !self.provisioning_id.trim().is_empty()
    }
}

/// Read-only snapshot of a tenant's user store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStoreCapabilities {
    /// SCIM provisioning is enabled on the user store.
    pub provisioning_enabled: bool,

    /// Roles and groups are modelled as distinct artifacts.
    pub role_group_separation_enabled: bool,

    /// The `DomainName` property of the realm configuration, if set.
    pub configured_domain_name: Option<String>,

    /// Administrative role name from the realm configuration.
    pub admin_role_name: String,
}

/// A user-store domain whose admin group is reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCandidate {
    pub domain_name: String,

    /// `true` for the user store's own domain (the configured one, or the
    /// primary domain when none is configured); `false` for the primary
    /// domain added because of role/group separation.
    pub is_configured_domain: bool,
}

/// Existence evidence gathered for one domain candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminGroupRecord {
    pub role_name: String,
    pub domain_qualified_name: String,
    pub group_exists: bool,
    pub role_exists: bool,
}

/// Outcome of admin user reconciliation for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UserReconciliation {
    /// A freshly generated SCIM id was written to the admin user.
    Written {
        username: String,
        provisioning_id: String,
    },
    /// Provisioning is disabled on the tenant's user store.
    ProvisioningDisabled,
    /// The admin user already carries a SCIM id.
    AlreadyValid { username: String },
    /// Tenant resolution failed; the tenant was skipped without writes.
    Skipped { reason: String },
}

impl UserReconciliation {
    /// Number of claim writes issued (0 or 1).
    #[must_use]
    pub fn writes_issued(&self) -> usize {
        usize::from(matches!(self, Self::Written { .. }))
    }
}

/// Decision taken for one domain candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAction {
    /// Mandatory group attributes were added.
    MandatoryAttributesAdded,
    /// The group record already exists; nothing to do.
    GroupAlreadyExists,
    /// The primary-domain group mirrors a role that does not exist.
    RoleMissing,
}

/// Per-candidate result of admin group reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateOutcome {
    pub candidate: DomainCandidate,
    pub record: AdminGroupRecord,
    pub action: GroupAction,
}

/// Outcome of admin group reconciliation for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GroupReconciliation {
    /// Provisioning is disabled on the tenant's user store.
    ProvisioningDisabled,
    /// Candidates were evaluated in order.
    Reconciled { candidates: Vec<CandidateOutcome> },
}

impl GroupReconciliation {
    /// Number of mandatory-attribute writes issued.
    #[must_use]
    pub fn writes_issued(&self) -> usize {
        match self {
            Self::ProvisioningDisabled => 0,
            Self::Reconciled { candidates } => candidates
                .iter()
                .filter(|c| c.action == GroupAction::MandatoryAttributesAdded)
                .count(),
        }
    }
}

/// Result of reconciling both admin attributes of one tenant in a batch.
#[derive(Debug)]
pub struct TenantReconciliationReport {
    pub tenant_id: TenantId,
    pub user: Result<UserReconciliation, AdminAttributesError>,
    pub group: Result<GroupReconciliation, AdminAttributesError>,
}

impl TenantReconciliationReport {
    /// Total writes issued for the tenant, counting only successful stages.
    ///
    /// A failed group stage may still have applied writes for earlier
    /// candidates; those are not visible here.
    #[must_use]
    pub fn writes_issued(&self) -> usize {
        let user = self.user.as_ref().map_or(0, UserReconciliation::writes_issued);
        let group = self
            .group
            .as_ref()
            .map_or(0, GroupReconciliation::writes_issued);
        user + group
    }

    /// Whether neither stage surfaced an error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.user.is_ok() && self.group.is_ok()
    }
}
