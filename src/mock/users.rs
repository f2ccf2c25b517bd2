//! Users, roles and permissions mock handlers

use super::handler::{self, find, merge, new_id, success, to_json, today, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::{ApiError, Result};
use crate::types::users::{NewRole, NewUser, Role, User, UserStatus};
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            .route(Method::GET, "/users", list_users)
            .route(Method::GET, "/users/{id}", get_user)
            .route(Method::POST, "/users", create_user)
            .route(Method::PUT, "/users/{id}", update_user)
            .route(Method::DELETE, "/users/{id}", delete_user)
            .route(Method::GET, "/users/roles", list_roles)
            .route(Method::GET, "/users/roles/{id}", get_role)
            .route(Method::POST, "/users/roles", create_role)
            .route(Method::PUT, "/users/roles/{id}", update_role)
            .route(Method::DELETE, "/users/roles/{id}", delete_role)
            .route(Method::GET, "/users/permissions", list_permissions)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Users, routes(), store, endpoint, method, body)
}

fn list_users(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.users.users)
}

fn get_user(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.users.users, req.id())?)
}

/// New users stay inactive until they set a password
fn create_user(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewUser = req.body()?;
    to_json(&User {
        id: new_id("user"),
        name: new.name,
        email: new.email,
        role: new.role,
        status: UserStatus::Inactive,
        created: today(),
        last_login: None,
    })
}

fn update_user(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(find(&store.users.users, req.id())?, req.body)
}

fn delete_user(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.users.users, req.id())?;
    success()
}

fn list_roles(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.users.roles)
}

fn get_role(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.users.roles, req.id())?)
}

fn create_role(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewRole = req.body()?;
    to_json(&Role {
        id: new_id("role"),
        name: new.name,
        description: new.description,
        permissions: new.permissions,
        user_count: 0,
        created: today(),
    })
}

fn update_role(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(find(&store.users.roles, req.id())?, req.body)
}

fn delete_role(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let role = find(&store.users.roles, req.id())?;
    let users = store.users_with_role(&role.name).count();
    if users > 0 {
        return Err(ApiError::RoleInUse {
            role: role.name.clone(),
            users,
        });
    }
    success()
}

fn list_permissions(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.users.permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(endpoint: &str, method: Method, body: Option<Value>) -> Result<Value> {
        handle(MockStore::seeded(), endpoint, &method, body.as_ref())
    }

    #[test]
    fn test_roles_is_not_a_user_id() {
        let roles = call("/users/roles", Method::GET, None).unwrap();
        assert_eq!(roles.as_array().unwrap().len(), 3);

        let permissions = call("/users/permissions", Method::GET, None).unwrap();
        assert_eq!(permissions.as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_create_user_is_inactive() {
        let body = json!({"name": "Ada", "email": "ada@example.com", "role": "viewer"});
        let user = call("/users", Method::POST, Some(body)).unwrap();
        assert_eq!(user["status"], "inactive");
        assert_eq!(user["lastLogin"], Value::Null);
    }

    #[test]
    fn test_create_role_defaults() {
        let body = json!({"name": "auditor", "description": "Reads audit logs"});
        let role = call("/users/roles", Method::POST, Some(body)).unwrap();
        assert_eq!(role["userCount"], 0);
        assert_eq!(role["permissions"], json!([]));
    }

    #[test]
    fn test_delete_role_in_use() {
        let err = call("/users/roles/role-02", Method::DELETE, None).unwrap_err();
        match err {
            ApiError::RoleInUse { role, users } => {
                assert_eq!(role, "developer");
                assert_eq!(users, 2);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_delete_unreferenced_role() {
        let mut store = MockStore::seeded().clone();
        store.users.roles.push(Role {
            id: "role-04".to_string(),
            name: "billing".to_string(),
            description: "Billing only".to_string(),
            permissions: vec![],
            user_count: 0,
            created: "2024-01-01".to_string(),
        });

        let ok = handle(&store, "/users/roles/role-04", &Method::DELETE, None).unwrap();
        assert_eq!(ok, json!({"success": true}));
    }

    #[test]
    fn test_missing_user() {
        let err = call("/users/user-99", Method::PUT, Some(json!({}))).unwrap_err();
        assert_eq!(err.to_string(), "User not found: user-99");
    }
}
