//! Domain service for the static realm plugin.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use admin_attributes_sdk::{TenantId, UserStoreCapabilities};
use parking_lot::{Mutex, RwLock};

use crate::config::{FailurePoint, StaticRealmPluginConfig};

/// A write accepted by the plugin, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedWrite {
    Claims {
        tenant_id: TenantId,
        username: String,
        claims: BTreeMap<String, String>,
    },
    MandatoryGroupAttributes {
        tenant_id: TenantId,
        qualified_name: String,
    },
}

/// Mutable per-tenant state.
pub(super) struct TenantState {
    pub(super) admin_username: String,
    pub(super) capabilities: UserStoreCapabilities,
    /// Claims by username, then by claim URI.
    pub(super) claims: HashMap<String, BTreeMap<String, String>>,
    pub(super) groups: BTreeSet<String>,
    pub(super) roles: BTreeSet<String>,
    pub(super) failures: HashSet<FailurePoint>,
}

/// Static realm service.
///
/// Holds tenant data in memory, loaded from configuration. Writes update the
/// state so a second reconciliation run observes the first one.
pub struct Service {
    pub(super) primary_domain: String,
    pub(super) tenants: RwLock<HashMap<TenantId, TenantState>>,
    pub(super) writes: Mutex<Vec<RecordedWrite>>,
}

impl Service {
    /// Creates a new service from configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticRealmPluginConfig) -> Self {
        let tenants = cfg
            .tenants
            .iter()
            .map(|t| {
                let state = TenantState {
                    admin_username: t.admin_username.clone(),
                    capabilities: UserStoreCapabilities {
                        provisioning_enabled: t.provisioning_enabled,
                        role_group_separation_enabled: t.role_group_separation_enabled,
                        configured_domain_name: t.domain_name.clone(),
                        admin_role_name: t.admin_role_name.clone(),
                    },
                    claims: HashMap::from([(t.admin_username.clone(), t.claims.clone())]),
                    groups: t.groups.iter().cloned().collect(),
                    roles: t.roles.iter().cloned().collect(),
                    failures: t.failures.iter().copied().collect(),
                };
                (t.id, state)
            })
            .collect();

        Self {
            primary_domain: cfg.primary_domain.clone(),
            tenants: RwLock::new(tenants),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// All writes accepted so far.
    #[must_use]
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().clone()
    }

    /// Current value of a user's claim.
    #[must_use]
    pub fn claim(&self, tenant_id: TenantId, username: &str, claim_uri: &str) -> Option<String> {
        self.tenants
            .read()
            .get(&tenant_id)
            .and_then(|t| t.claims.get(username))
            .and_then(|c| c.get(claim_uri))
            .cloned()
    }

    /// Whether a group record exists for the qualified name.
    #[must_use]
    pub fn has_group(&self, tenant_id: TenantId, qualified_name: &str) -> bool {
        self.tenants
            .read()
            .get(&tenant_id)
            .is_some_and(|t| t.groups.contains(qualified_name))
    }

    /// Make an operation fail for a tenant from now on.
    pub fn inject_failure(&self, tenant_id: TenantId, point: FailurePoint) {
        if let Some(tenant) = self.tenants.write().get_mut(&tenant_id) {
            tenant.failures.insert(point);
        }
    }

    /// Remove all injected failures of a tenant.
    pub fn clear_failures(&self, tenant_id: TenantId) {
        if let Some(tenant) = self.tenants.write().get_mut(&tenant_id) {
            tenant.failures.clear();
        }
    }

    pub(super) fn fails(&self, tenant_id: TenantId, point: FailurePoint) -> bool {
        self.tenants
            .read()
            .get(&tenant_id)
            .is_some_and(|t| t.failures.contains(&point))
    }
}
