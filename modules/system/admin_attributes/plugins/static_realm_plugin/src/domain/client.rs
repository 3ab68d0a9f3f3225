//! Collaborator trait implementations for the static realm plugin.
//!
//! One service answers as realm, claim store, group store and primary domain.

use std::collections::BTreeMap;

use admin_attributes_sdk::{
    ClaimStore, GroupPersistenceStore, PrimaryDomainProvider, ResolutionError, StoreError,
    TenantId, TenantRealmProvider, UserStoreCapabilities,
};
use async_trait::async_trait;
use tracing::debug;

use super::service::{RecordedWrite, Service};
use crate::config::FailurePoint;

fn unknown_user_store(tenant_id: TenantId) -> StoreError {
    StoreError::user_store(format!("no user store configured for tenant {tenant_id}"))
}

fn unknown_persistence(tenant_id: TenantId) -> StoreError {
    StoreError::persistence(format!("no group store configured for tenant {tenant_id}"))
}

#[async_trait]
impl TenantRealmProvider for Service {
    async fn get_admin_username(&self, tenant_id: TenantId) -> Result<String, ResolutionError> {
        if self.fails(tenant_id, FailurePoint::AdminLookup) {
            return Err(ResolutionError::lookup_failed(
                tenant_id,
                "realm configuration unavailable",
            ));
        }
        self.tenants
            .read()
            .get(&tenant_id)
            .map(|t| t.admin_username.clone())
            .ok_or(ResolutionError::TenantNotFound { tenant_id })
    }

    async fn get_user_store_capabilities(
        &self,
        tenant_id: TenantId,
    ) -> Result<UserStoreCapabilities, StoreError> {
        if self.fails(tenant_id, FailurePoint::Capabilities) {
            return Err(StoreError::user_store("user store manager unavailable"));
        }
        self.tenants
            .read()
            .get(&tenant_id)
            .map(|t| t.capabilities.clone())
            .ok_or_else(|| unknown_user_store(tenant_id))
    }
}

#[async_trait]
impl ClaimStore for Service {
    async fn get_claim(
        &self,
        tenant_id: TenantId,
        username: &str,
        claim_uri: &str,
        _profile: &str,
    ) -> Result<Option<String>, StoreError> {
        if self.fails(tenant_id, FailurePoint::ClaimRead) {
            return Err(StoreError::user_store(format!(
                "failed to read claim {claim_uri} of {username}"
            )));
        }
        let tenants = self.tenants.read();
        let tenant = tenants
            .get(&tenant_id)
            .ok_or_else(|| unknown_user_store(tenant_id))?;
        Ok(tenant
            .claims
            .get(username)
            .and_then(|c| c.get(claim_uri))
            .cloned())
    }

    async fn set_claims(
        &self,
        tenant_id: TenantId,
        username: &str,
        claims: &BTreeMap<String, String>,
        _profile: &str,
    ) -> Result<(), StoreError> {
        if self.fails(tenant_id, FailurePoint::ClaimWrite) {
            return Err(StoreError::user_store(format!(
                "failed to write claims of {username}"
            )));
        }
        {
            let mut tenants = self.tenants.write();
            let tenant = tenants
                .get_mut(&tenant_id)
                .ok_or_else(|| unknown_user_store(tenant_id))?;
            tenant
                .claims
                .entry(username.to_owned())
                .or_default()
                .extend(claims.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        debug!(tenant_id, username, count = claims.len(), "Stored user claims");
        self.writes.lock().push(RecordedWrite::Claims {
            tenant_id,
            username: username.to_owned(),
            claims: claims.clone(),
        });
        Ok(())
    }
}

#[async_trait]
impl GroupPersistenceStore for Service {
    async fn group_exists(
        &self,
        tenant_id: TenantId,
        qualified_name: &str,
    ) -> Result<bool, StoreError> {
        if self.fails(tenant_id, FailurePoint::GroupLookup) {
            return Err(StoreError::persistence(
                "Error when reading the group information from the persistence store.",
            ));
        }
        self.tenants
            .read()
            .get(&tenant_id)
            .map(|t| t.groups.contains(qualified_name))
            .ok_or_else(|| unknown_persistence(tenant_id))
    }

    async fn role_exists(
        &self,
        tenant_id: TenantId,
        qualified_name: &str,
    ) -> Result<bool, StoreError> {
        if self.fails(tenant_id, FailurePoint::GroupLookup) {
            return Err(StoreError::persistence(
                "Error when reading the role information from the persistence store.",
            ));
        }
        self.tenants
            .read()
            .get(&tenant_id)
            .map(|t| t.roles.contains(qualified_name))
            .ok_or_else(|| unknown_persistence(tenant_id))
    }

    async fn add_mandatory_attributes(
        &self,
        tenant_id: TenantId,
        qualified_name: &str,
    ) -> Result<(), StoreError> {
        if self.fails(tenant_id, FailurePoint::AddMandatoryAttributes) {
            return Err(StoreError::persistence(format!(
                "failed to add mandatory attributes for group {qualified_name}"
            )));
        }
        {
            let mut tenants = self.tenants.write();
            let tenant = tenants
                .get_mut(&tenant_id)
                .ok_or_else(|| unknown_persistence(tenant_id))?;
            tenant.groups.insert(qualified_name.to_owned());
        }

        debug!(tenant_id, group = qualified_name, "Added mandatory group attributes");
        self.writes
            .lock()
            .push(RecordedWrite::MandatoryGroupAttributes {
                tenant_id,
                qualified_name: qualified_name.to_owned(),
            });
        Ok(())
    }
}

impl PrimaryDomainProvider for Service {
    fn primary_domain_name(&self) -> String {
        self.primary_domain.clone()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::{StaticRealmPluginConfig, TenantConfig};

    const SCIM_ID: &str = "urn:ietf:params:scim:schemas:core:2.0:id";

    fn tenant(id: TenantId) -> TenantConfig {
        TenantConfig {
            id,
            admin_username: "admin".to_owned(),
            provisioning_enabled: true,
            role_group_separation_enabled: false,
            domain_name: Some("carbon".to_owned()),
            admin_role_name: "admin".to_owned(),
            claims: BTreeMap::from([(SCIM_ID.to_owned(), "existing".to_owned())]),
            groups: vec!["CARBON/admin".to_owned()],
            roles: vec!["PRIMARY/admin".to_owned()],
            failures: Vec::new(),
        }
    }

    fn service() -> Service {
        Service::from_config(&StaticRealmPluginConfig {
            primary_domain: "PRIMARY".to_owned(),
            tenants: vec![tenant(1)],
        })
    }

    #[tokio::test]
    async fn realm_answers_configured_tenant() {
        let svc = service();

        assert_eq!(svc.get_admin_username(1).await.unwrap(), "admin");
        let caps = svc.get_user_store_capabilities(1).await.unwrap();
        assert!(caps.provisioning_enabled);
        assert_eq!(caps.configured_domain_name.as_deref(), Some("carbon"));
        assert_eq!(svc.primary_domain_name(), "PRIMARY");
    }

    #[tokio::test]
    async fn unknown_tenant_is_not_found() {
        let svc = service();

        let err = svc.get_admin_username(42).await.unwrap_err();

        assert!(matches!(err, ResolutionError::TenantNotFound { tenant_id: 42 }));
        assert!(svc.get_user_store_capabilities(42).await.is_err());
        assert!(svc.group_exists(42, "CARBON/admin").await.is_err());
    }

    #[tokio::test]
    async fn claims_are_read_and_merged() {
        let svc = service();

        assert_eq!(
            svc.get_claim(1, "admin", SCIM_ID, "default").await.unwrap(),
            Some("existing".to_owned())
        );
        assert_eq!(svc.get_claim(1, "other", SCIM_ID, "default").await.unwrap(), None);

        let update = BTreeMap::from([
            (SCIM_ID.to_owned(), "fresh".to_owned()),
            ("urn:x:meta".to_owned(), "User".to_owned()),
        ]);
        svc.set_claims(1, "admin", &update, "default").await.unwrap();

        assert_eq!(svc.claim(1, "admin", SCIM_ID).as_deref(), Some("fresh"));
        assert_eq!(svc.claim(1, "admin", "urn:x:meta").as_deref(), Some("User"));
        assert_eq!(svc.writes().len(), 1);
    }

    #[tokio::test]
    async fn added_group_becomes_visible() {
        let svc = service();

        assert!(!svc.group_exists(1, "PRIMARY/admin").await.unwrap());
        assert!(svc.role_exists(1, "PRIMARY/admin").await.unwrap());

        svc.add_mandatory_attributes(1, "PRIMARY/admin").await.unwrap();

        assert!(svc.group_exists(1, "PRIMARY/admin").await.unwrap());
        assert!(svc.has_group(1, "PRIMARY/admin"));
        assert_eq!(
            svc.writes(),
            vec![RecordedWrite::MandatoryGroupAttributes {
                tenant_id: 1,
                qualified_name: "PRIMARY/admin".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn injected_failures_can_be_cleared() {
        let svc = service();
        svc.inject_failure(1, FailurePoint::ClaimWrite);

        let err = svc
            .set_claims(1, "admin", &BTreeMap::new(), "default")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UserStore { .. }));
        assert!(svc.writes().is_empty());

        svc.clear_failures(1);
        svc.set_claims(1, "admin", &BTreeMap::new(), "default")
            .await
            .unwrap();
        assert_eq!(svc.writes().len(), 1);
    }

    #[tokio::test]
    async fn configured_failures_apply_from_start() {
        let svc = Service::from_config(&StaticRealmPluginConfig {
            primary_domain: "PRIMARY".to_owned(),
            tenants: vec![TenantConfig {
                failures: vec![FailurePoint::AdminLookup, FailurePoint::GroupLookup],
                ..tenant(1)
            }],
        });

        assert!(matches!(
            svc.get_admin_username(1).await,
            Err(ResolutionError::LookupFailed { .. })
        ));
        assert!(matches!(
            svc.group_exists(1, "CARBON/admin").await,
            Err(StoreError::Persistence { .. })
        ));
        assert!(svc.get_user_store_capabilities(1).await.is_ok());
    }
}
