//! Mock Store - seeded snapshot the mock handlers read from
//!
//! The seed data is embedded as JSON fixtures (compiled into the binary) and
//! decoded once. Handlers never mutate it: every create/update/delete answer
//! is computed from a copy, so each call sees the same seeded state.

use crate::types::auth::{AuthUser, LoginCredentials};
use crate::types::compute::{ComputeInstance, InstanceType, Region};
use crate::types::dashboard::DashboardSummary;
use crate::types::networking::{Firewall, LoadBalancer, VirtualNetwork};
use crate::types::security::{AccessKey, SecurityAlert, SecurityPolicy};
use crate::types::settings::{ApiUsage, BillingInfo, NotificationSettings, UserProfile};
use crate::types::storage::{BucketType, StorageBucket, StorageFile};
use crate::types::users::{Permission, Role, User};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

const COMPUTE_JSON: &str = include_str!("fixtures/compute.json");
const STORAGE_JSON: &str = include_str!("fixtures/storage.json");
const NETWORKING_JSON: &str = include_str!("fixtures/networking.json");
const SECURITY_JSON: &str = include_str!("fixtures/security.json");
const SETTINGS_JSON: &str = include_str!("fixtures/settings.json");
const USERS_JSON: &str = include_str!("fixtures/users.json");
const DASHBOARD_JSON: &str = include_str!("fixtures/dashboard.json");
const AUTH_JSON: &str = include_str!("fixtures/auth.json");

static SEEDED: OnceLock<MockStore> = OnceLock::new();

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeTables {
    pub instances: Vec<ComputeInstance>,
    pub instance_types: Vec<InstanceType>,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageTables {
    pub buckets: Vec<StorageBucket>,
    /// Files keyed by bucket id
    pub files: HashMap<String, Vec<StorageFile>>,
    pub bucket_types: Vec<BucketType>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkingTables {
    pub vnets: Vec<VirtualNetwork>,
    pub load_balancers: Vec<LoadBalancer>,
    pub firewalls: Vec<Firewall>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityTables {
    pub alerts: Vec<SecurityAlert>,
    pub policies: Vec<SecurityPolicy>,
    pub access_keys: Vec<AccessKey>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsTables {
    pub profile: UserProfile,
    pub billing: BillingInfo,
    pub notifications: NotificationSettings,
    pub api_usage: ApiUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersTables {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthRedirects {
    pub google: String,
    pub microsoft: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTables {
    pub current_user: AuthUser,
    /// The only credentials the mock login accepts
    pub demo_credentials: LoginCredentials,
    pub session_token: String,
    pub redirects: OAuthRedirects,
}

/// Every domain's seed tables
#[derive(Debug, Clone)]
pub struct MockStore {
    pub compute: ComputeTables,
    pub storage: StorageTables,
    pub networking: NetworkingTables,
    pub security: SecurityTables,
    pub settings: SettingsTables,
    pub users: UsersTables,
    pub dashboard: DashboardSummary,
    pub auth: AuthTables,
}

impl MockStore {
    /// Decode the embedded fixtures
    pub fn load() -> Result<Self, serde_json::Error> {
        Ok(Self {
            compute: serde_json::from_str(COMPUTE_JSON)?,
            storage: serde_json::from_str(STORAGE_JSON)?,
            networking: serde_json::from_str(NETWORKING_JSON)?,
            security: serde_json::from_str(SECURITY_JSON)?,
            settings: serde_json::from_str(SETTINGS_JSON)?,
            users: serde_json::from_str(USERS_JSON)?,
            dashboard: serde_json::from_str(DASHBOARD_JSON)?,
            auth: serde_json::from_str(AUTH_JSON)?,
        })
    }

    /// Shared seeded snapshot, decoded on first use
    pub fn seeded() -> &'static MockStore {
        SEEDED.get_or_init(|| match Self::load() {
            Ok(store) => {
                tracing::debug!(
                    "Loaded mock store: {} instances, {} buckets, {} users",
                    store.compute.instances.len(),
                    store.storage.buckets.len(),
                    store.users.users.len()
                );
                store
            },
            Err(e) => {
                tracing::error!("Failed to decode mock fixtures: {}", e);
                panic!("embedded mock fixtures are invalid: {e}");
            },
        })
    }

    /// Files stored in a bucket; unknown buckets hold none
    pub fn bucket_files(&self, bucket_id: &str) -> &[StorageFile] {
        self.storage
            .files
            .get(bucket_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Users whose role is `role_name`
    pub fn users_with_role<'a>(&'a self, role_name: &'a str) -> impl Iterator<Item = &'a User> {
        self.users.users.iter().filter(move |u| u.role == role_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::compute::InstanceStatus;

    #[test]
    fn test_fixtures_decode() {
        let store = MockStore::load().expect("fixtures should decode");

        assert_eq!(store.compute.instances.len(), 5);
        assert_eq!(store.compute.instance_types.len(), 8);
        assert_eq!(store.storage.buckets.len(), 4);
        assert_eq!(store.networking.vnets.len(), 3);
        assert_eq!(store.security.access_keys.len(), 3);
        assert_eq!(store.users.roles.len(), 3);
        assert_eq!(store.dashboard.service_status.len(), 5);
        assert_eq!(store.auth.session_token, "mock-jwt-token-xyz");
    }

    #[test]
    fn test_seeded_is_shared() {
        let a = MockStore::seeded();
        let b = MockStore::seeded();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.compute.instances[0].status, InstanceStatus::Running);
    }

    #[test]
    fn test_bucket_files() {
        let store = MockStore::seeded();
        assert_eq!(store.bucket_files("bucket-01").len(), 3);
        assert!(store.bucket_files("bucket-99").is_empty());
    }

    #[test]
    fn test_every_seeded_role_is_in_use() {
        let store = MockStore::seeded();
        for role in &store.users.roles {
            assert!(store.users_with_role(&role.name).count() > 0, "{}", role.name);
        }
    }
}
