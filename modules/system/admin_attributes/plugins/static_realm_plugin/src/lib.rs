//! Static Realm Plugin
//!
//! This plugin provides realm, claim and group data from configuration.
//! Useful for testing, development and offline migrations.
//!
//! ## Configuration
//!
//! ```yaml
//! static_realm:
//!   primary_domain: "PRIMARY"
//!   tenants:
//!     - id: -1234
//!       admin_username: "admin"
//!     - id: 1
//!       admin_username: "tenant-admin"
//!       role_group_separation_enabled: true
//!       domain_name: "carbon"
//!       groups: ["CARBON/admin"]
//!       roles: ["PRIMARY/admin"]
//! ```
//!
//! Writes are applied to the in-memory state and recorded; see
//! [`StaticRealmPlugin::writes`].

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::{FailurePoint, StaticRealmPluginConfig, TenantConfig};
pub use domain::{RecordedWrite, Service as StaticRealmPlugin};
