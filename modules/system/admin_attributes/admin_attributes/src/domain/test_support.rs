//! Counting mock collaborators shared by the domain unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use admin_attributes_sdk::{
    ClaimStore, GroupPersistenceStore, PrimaryDomainProvider, ResolutionError, StoreError,
    TenantId, TenantRealmProvider, UserStoreCapabilities,
};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Tenant ids whose admin lookup always fails.
pub const INVALID_TENANT_IDS: [TenantId; 3] = [-1, -2, -3];

pub fn capabilities(
    provisioning_enabled: bool,
    role_group_separation_enabled: bool,
    configured_domain_name: Option<&str>,
) -> UserStoreCapabilities {
    UserStoreCapabilities {
        provisioning_enabled,
        role_group_separation_enabled,
        configured_domain_name: configured_domain_name.map(str::to_owned),
        admin_role_name: "admin".to_owned(),
    }
}

/// Realm provider answering every valid tenant with the same state.
pub struct MockRealm {
    pub admin_username: String,
    pub capabilities: UserStoreCapabilities,
    pub capabilities_unavailable: bool,
    pub username_lookups: AtomicUsize,
    pub capability_lookups: AtomicUsize,
}

impl Default for MockRealm {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_owned(),
            capabilities: capabilities(true, false, None),
            capabilities_unavailable: false,
            username_lookups: AtomicUsize::new(0),
            capability_lookups: AtomicUsize::new(0),
        }
    }
}

impl MockRealm {
    pub fn with_capabilities(capabilities: UserStoreCapabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    pub fn username_lookups(&self) -> usize {
        self.username_lookups.load(Ordering::SeqCst)
    }

    pub fn capability_lookups(&self) -> usize {
        self.capability_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantRealmProvider for MockRealm {
    async fn get_admin_username(&self, tenant_id: TenantId) -> Result<String, ResolutionError> {
        self.username_lookups.fetch_add(1, Ordering::SeqCst);
        if INVALID_TENANT_IDS.contains(&tenant_id) {
            return Err(ResolutionError::lookup_failed_with_source(
                tenant_id,
                "realm lookup failed",
                std::io::Error::other("user store exception"),
            ));
        }
        Ok(self.admin_username.clone())
    }

    async fn get_user_store_capabilities(
        &self,
        _tenant_id: TenantId,
    ) -> Result<UserStoreCapabilities, StoreError> {
        self.capability_lookups.fetch_add(1, Ordering::SeqCst);
        if self.capabilities_unavailable {
            return Err(StoreError::user_store("user store manager unavailable"));
        }
        Ok(self.capabilities.clone())
    }
}

/// Claim store returning a fixed SCIM id and counting writes.
#[derive(Default)]
pub struct MockClaims {
    pub current: Option<String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub reads: AtomicUsize,
    pub writes: Mutex<Vec<(String, BTreeMap<String, String>)>>,
}

impl MockClaims {
    pub fn with_current(current: &str) -> Self {
        Self {
            current: Some(current.to_owned()),
            ..Self::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn last_write(&self) -> Option<(String, BTreeMap<String, String>)> {
        self.writes.lock().last().cloned()
    }
}

#[async_trait]
impl ClaimStore for MockClaims {
    async fn get_claim(
        &self,
        _tenant_id: TenantId,
        _username: &str,
        _claim_uri: &str,
        _profile: &str,
    ) -> Result<Option<String>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(StoreError::user_store("claim read failed"));
        }
        Ok(self.current.clone())
    }

    async fn set_claims(
        &self,
        _tenant_id: TenantId,
        username: &str,
        claims: &BTreeMap<String, String>,
        _profile: &str,
    ) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::user_store("claim write failed"));
        }
        self.writes.lock().push((username.to_owned(), claims.clone()));
        Ok(())
    }
}

/// Group store answering every name with the same evidence.
#[derive(Default)]
pub struct MockGroups {
    pub group_exists: bool,
    pub role_exists: bool,
    /// Fail the group lookup with this 1-based call number.
    pub fail_group_lookup_at: Option<usize>,
    pub fail_role_lookup: bool,
    pub group_lookups: AtomicUsize,
    pub writes: Mutex<Vec<String>>,
}

impl MockGroups {
    pub fn new(group_exists: bool, role_exists: bool) -> Self {
        Self {
            group_exists,
            role_exists,
            ..Self::default()
        }
    }

    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_group_lookup_at: Some(call),
            ..Self::default()
        }
    }

    pub fn group_lookups(&self) -> usize {
        self.group_lookups.load(Ordering::SeqCst)
    }

    pub fn written(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl GroupPersistenceStore for MockGroups {
    async fn group_exists(
        &self,
        _tenant_id: TenantId,
        _qualified_name: &str,
    ) -> Result<bool, StoreError> {
        let call = self.group_lookups.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_group_lookup_at == Some(call) {
            return Err(StoreError::persistence_with_source(
                "Error when reading the group information from the persistence store.",
                std::io::Error::other("sql exception"),
            ));
        }
        Ok(self.group_exists)
    }

    async fn role_exists(
        &self,
        _tenant_id: TenantId,
        _qualified_name: &str,
    ) -> Result<bool, StoreError> {
        if self.fail_role_lookup {
            return Err(StoreError::persistence_with_source(
                "Error when reading the role information from the persistence store.",
                std::io::Error::other("sql exception"),
            ));
        }
        Ok(self.role_exists)
    }

    async fn add_mandatory_attributes(
        &self,
        _tenant_id: TenantId,
        qualified_name: &str,
    ) -> Result<(), StoreError> {
        self.writes.lock().push(qualified_name.to_owned());
        Ok(())
    }
}

pub struct MockPrimaryDomain(pub &'static str);

impl PrimaryDomainProvider for MockPrimaryDomain {
    fn primary_domain_name(&self) -> String {
        self.0.to_owned()
    }
}
