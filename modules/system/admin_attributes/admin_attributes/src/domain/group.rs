//! Admin group reconciliation: the provisioned group of the admin role.
//!
//! Candidates are evaluated in a fixed order (the user store's own domain,
//! then the primary domain when role/group separation adds it). A failure
//! on a later candidate leaves writes of earlier candidates applied.

use std::sync::Arc;

use admin_attributes_sdk::{
    AdminGroupRecord, CandidateOutcome, DomainCandidate, GroupAction, GroupPersistenceStore,
    GroupReconciliation, PrimaryDomainProvider, TenantId, TenantRealmProvider,
    UserStoreCapabilities,
};
use tracing::{debug, info};

use super::{DomainError, TenantResolver};

/// Ensures the admin role of a tenant has a provisioned group record.
pub struct AdminGroupReconciler {
    resolver: Arc<TenantResolver>,
    realm: Arc<dyn TenantRealmProvider>,
    groups: Arc<dyn GroupPersistenceStore>,
    primary_domain: Arc<dyn PrimaryDomainProvider>,
    domain_separator: String,
}

impl AdminGroupReconciler {
    #[must_use]
    pub fn new(
        resolver: Arc<TenantResolver>,
        realm: Arc<dyn TenantRealmProvider>,
        groups: Arc<dyn GroupPersistenceStore>,
        primary_domain: Arc<dyn PrimaryDomainProvider>,
        domain_separator: String,
    ) -> Self {
        Self {
            resolver,
            realm,
            groups,
            primary_domain,
            domain_separator,
        }
    }

    /// Add mandatory group attributes for every candidate lacking a group.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` as soon as a capability read, evidence
    /// lookup or write fails. Writes issued before the failure stay applied.
    pub async fn update_admin_group(
        &self,
        tenant_id: TenantId,
    ) -> Result<GroupReconciliation, DomainError> {
        let ctx = self.resolver.resolve_context(tenant_id);
        let capabilities = self.realm.get_user_store_capabilities(tenant_id).await?;
        if !capabilities.provisioning_enabled {
            debug!(tenant_id, "SCIM provisioning disabled, admin group left as is");
            return Ok(GroupReconciliation::ProvisioningDisabled);
        }

        let primary = self.primary_domain.primary_domain_name();
        let candidates = derive_candidates(&capabilities, &primary);
        debug!(
            tenant_id,
            bootstrap = ctx.is_bootstrap_tenant,
            candidates = candidates.len(),
            "Reconciling admin group"
        );

        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let record = self
                .gather_evidence(tenant_id, &capabilities.admin_role_name, &candidate)
                .await?;
            let action = decide(&candidate, &record);

            if action == GroupAction::MandatoryAttributesAdded {
                self.groups
                    .add_mandatory_attributes(tenant_id, &record.domain_qualified_name)
                    .await?;
                info!(
                    tenant_id,
                    group = %record.domain_qualified_name,
                    "Added mandatory attributes for admin group"
                );
            } else {
                debug!(
                    tenant_id,
                    group = %record.domain_qualified_name,
                    action = ?action,
                    "Admin group left as is"
                );
            }

            outcomes.push(CandidateOutcome {
                candidate,
                record,
                action,
            });
        }

        Ok(GroupReconciliation::Reconciled {
            candidates: outcomes,
        })
    }

    async fn gather_evidence(
        &self,
        tenant_id: TenantId,
        role_name: &str,
        candidate: &DomainCandidate,
    ) -> Result<AdminGroupRecord, DomainError> {
        let qualified = qualify_name(role_name, &candidate.domain_name, &self.domain_separator);
        let group_exists = self.groups.group_exists(tenant_id, &qualified).await?;
        let role_exists = self.groups.role_exists(tenant_id, &qualified).await?;
        Ok(AdminGroupRecord {
            role_name: role_name.to_owned(),
            domain_qualified_name: qualified,
            group_exists,
            role_exists,
        })
    }
}

/// Domains whose admin group must be reconciled, in processing order.
///
/// The user store's own domain comes first (the configured `DomainName`, or
/// the primary domain when unset). With role/group separation the primary
/// domain follows, unless it is the same domain.
#[must_use]
pub fn derive_candidates(
    capabilities: &UserStoreCapabilities,
    primary_domain: &str,
) -> Vec<DomainCandidate> {
    let own_domain = capabilities
        .configured_domain_name
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(primary_domain);

    let mut candidates = vec![DomainCandidate {
        domain_name: own_domain.to_owned(),
        is_configured_domain: true,
    }];

    if capabilities.role_group_separation_enabled
        && !own_domain.eq_ignore_ascii_case(primary_domain)
    {
        candidates.push(DomainCandidate {
            domain_name: primary_domain.to_owned(),
            is_configured_domain: false,
        });
    }

    candidates
}

/// Qualify a role name with its domain (`DOMAIN/name`).
///
/// Names that already carry a domain are returned unchanged.
#[must_use]
pub fn qualify_name(name: &str, domain: &str, separator: &str) -> String {
    if name.contains(separator) {
        return name.to_owned();
    }
    format!("{}{separator}{name}", domain.to_uppercase())
}

/// Write rule for one candidate.
///
/// An absent group is written for the user store's own domain regardless of
/// the role. The separation candidate mirrors an existing role, so it is
/// written only when that role exists.
fn decide(candidate: &DomainCandidate, record: &AdminGroupRecord) -> GroupAction {
    if record.group_exists {
        GroupAction::GroupAlreadyExists
    } else if !candidate.is_configured_domain && !record.role_exists {
        GroupAction::RoleMissing
    } else {
        GroupAction::MandatoryAttributesAdded
    }
}
