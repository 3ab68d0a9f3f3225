//! Admin Attributes Module
//!
//! Reconciles two provisioning attributes of every tenant's administrator:
//!
//! - **Admin user**: the SCIM id claim (plus SCIM `meta` claims) of the
//!   tenant admin, written when missing or when a refresh is requested
//! - **Admin group**: the provisioned group record of the admin role, for the
//!   user store's own domain and, with role/group separation, the primary
//!   domain
//!
//! Collaborators (realm, claim store, group persistence, primary domain) are
//! supplied through the SDK traits; see the `static_realm_plugin` crate for an
//! in-memory implementation.
//!
//! ```ignore
//! let service = Service::new(AdminAttributesConfig::default(), collaborators)?;
//! let client = LocalClient::new(Arc::new(service));
//! let reports = client.reconcile_tenants(&[-1234, 1, 2], true).await;
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Re-export SDK types
pub use admin_attributes_sdk::*;

pub mod config;
#[doc(hidden)]
pub mod domain;

pub use config::AdminAttributesConfig;
pub use domain::{Collaborators, DomainError, LocalClient, Service};
