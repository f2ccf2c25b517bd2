//! Domain Services
//!
//! One async function per console operation. Each takes the shared
//! [`ApiClient`](crate::api::ApiClient), builds the endpoint, and decodes the
//! typed answer. Update functions accept any serializable patch so callers
//! can send only the fields they change.
//!
//! # Module Structure
//!
//! - [`auth`] - Sign-in, registration, password and email flows
//! - [`compute`] - Instances and their lifecycle actions
//! - [`dashboard`] - Dashboard widgets
//! - [`networking`] - Virtual networks, load balancers, firewalls
//! - [`security`] - Alerts, policies, access keys
//! - [`settings`] - Profile, billing, notification preferences
//! - [`storage`] - Buckets and files
//! - [`users`] - Users, roles, permissions

pub mod auth;
pub mod compute;
pub mod dashboard;
pub mod networking;
pub mod security;
pub mod settings;
pub mod storage;
pub mod users;

/// `<collection>/<id>` with the id percent-encoded
pub(crate) fn resource_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path_encodes_id() {
        assert_eq!(resource_path("/users", "user-01"), "/users/user-01");
        assert_eq!(resource_path("/users", "a/b c"), "/users/a%2Fb%20c");
    }
}
