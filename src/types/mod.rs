//! Domain types
//!
//! Plain data shapes for every resource family the console manages. All
//! records serialize to the camelCase JSON the console API speaks.
//!
//! # Module Structure
//!
//! - [`auth`] - Session users and credential payloads
//! - [`compute`] - VM instances, instance types, regions
//! - [`dashboard`] - Dashboard widgets and the combined summary
//! - [`networking`] - Virtual networks, load balancers, firewalls
//! - [`security`] - Alerts, policies, access keys
//! - [`settings`] - Profile, billing, notification preferences, API usage
//! - [`storage`] - Buckets and files
//! - [`users`] - Users, roles, permissions

use serde::{Deserialize, Serialize};

/// Implements [`Record`] for a struct with an `id: String` field
macro_rules! impl_record {
    ($ty:ty, $resource:literal) => {
        impl $crate::types::Record for $ty {
            const RESOURCE: &'static str = $resource;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

pub(crate) use impl_record;

pub mod auth;
pub mod compute;
pub mod dashboard;
pub mod networking;
pub mod security;
pub mod settings;
pub mod storage;
pub mod users;

/// A record addressable by id inside its domain's table
pub trait Record {
    /// Human-readable resource name used in "not found" errors
    const RESOURCE: &'static str;

    fn id(&self) -> &str;
}

/// Body returned by delete and fire-and-forget endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
