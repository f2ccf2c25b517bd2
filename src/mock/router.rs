//! Dispatch Router
//!
//! Maps an endpoint's first path segment to the domain that serves it.

use super::handler::Handler;
use super::route::RouteTable;
use super::store::MockStore;
use super::{auth, compute, dashboard, networking, security, settings, storage, users};
use crate::api::{ApiError, Result};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A mocked API domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Compute,
    Storage,
    Networking,
    Users,
    Security,
    Settings,
    Dashboard,
    Auth,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Domain::Compute,
        Domain::Storage,
        Domain::Networking,
        Domain::Users,
        Domain::Security,
        Domain::Settings,
        Domain::Dashboard,
        Domain::Auth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::Networking => "networking",
            Self::Users => "users",
            Self::Security => "security",
            Self::Settings => "settings",
            Self::Dashboard => "dashboard",
            Self::Auth => "auth",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == segment)
    }

    /// Domain owning `endpoint`, by exact first-segment equality
    pub fn from_endpoint(endpoint: &str) -> Option<Self> {
        let path = endpoint.strip_prefix('/')?;
        let first = path.split('/').next()?;
        Self::from_segment(first)
    }

    /// Run the domain's handler
    pub fn handle(
        &self,
        store: &MockStore,
        endpoint: &str,
        method: &Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        match self {
            Self::Compute => compute::handle(store, endpoint, method, body),
            Self::Storage => storage::handle(store, endpoint, method, body),
            Self::Networking => networking::handle(store, endpoint, method, body),
            Self::Users => users::handle(store, endpoint, method, body),
            Self::Security => security::handle(store, endpoint, method, body),
            Self::Settings => settings::handle(store, endpoint, method, body),
            Self::Dashboard => dashboard::handle(store, endpoint, method, body),
            Self::Auth => auth::handle(store, endpoint, method, body),
        }
    }

    /// The domain's route table, most specific first
    pub fn routes(&self) -> &'static RouteTable<Handler> {
        match self {
            Self::Compute => compute::routes(),
            Self::Storage => storage::routes(),
            Self::Networking => networking::routes(),
            Self::Users => users::routes(),
            Self::Security => security::routes(),
            Self::Settings => settings::routes(),
            Self::Dashboard => dashboard::routes(),
            Self::Auth => auth::routes(),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the route listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub domain: Domain,
    pub method: Method,
    pub template: String,
}

/// Answers API calls from the seeded store
#[derive(Debug, Clone)]
pub struct MockRouter {
    store: Arc<MockStore>,
}

impl Default for MockRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRouter {
    /// Router over the embedded seed data
    pub fn new() -> Self {
        Self::with_store(MockStore::seeded().clone())
    }

    pub fn with_store(store: MockStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Route a call to its domain handler
    pub fn dispatch(&self, endpoint: &str, method: &Method, body: Option<&Value>) -> Result<Value> {
        let Some(domain) = Domain::from_endpoint(endpoint) else {
            return Err(ApiError::UnroutableEndpoint {
                endpoint: endpoint.to_string(),
            });
        };

        tracing::debug!("mock {} {} -> {}", method, endpoint, domain);
        domain.handle(&self.store, endpoint, method, body)
    }

    /// Every route in every domain
    pub fn routes(&self) -> Vec<RouteInfo> {
        Domain::ALL
            .into_iter()
            .flat_map(|domain| {
                domain.routes().iter().map(move |r| RouteInfo {
                    domain,
                    method: r.method.clone(),
                    template: r.template.to_string(),
                })
            })
            .collect()
    }
}
