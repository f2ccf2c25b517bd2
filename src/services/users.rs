//! Users, roles and permissions

use super::resource_path;
use crate::api::{ApiClient, Result};
use crate::types::users::{NewRole, NewUser, Permission, Role, User};
use crate::types::SuccessResponse;
use serde::Serialize;

const USERS: &str = "/users";
const ROLES: &str = "/users/roles";

pub async fn list_users(client: &ApiClient) -> Result<Vec<User>> {
    client.get(USERS).await
}

pub async fn get_user(client: &ApiClient, id: &str) -> Result<User> {
    client.get(&resource_path(USERS, id)).await
}

/// Invite a user; they stay inactive until they set a password
pub async fn create_user(client: &ApiClient, user: &NewUser) -> Result<User> {
    client.post(USERS, user).await
}

pub async fn update_user<P: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    patch: &P,
) -> Result<User> {
    client.put(&resource_path(USERS, id), patch).await
}

pub async fn delete_user(client: &ApiClient, id: &str) -> Result<SuccessResponse> {
    client.delete(&resource_path(USERS, id)).await
}

pub async fn list_roles(client: &ApiClient) -> Result<Vec<Role>> {
    client.get(ROLES).await
}

pub async fn get_role(client: &ApiClient, id: &str) -> Result<Role> {
    client.get(&resource_path(ROLES, id)).await
}

pub async fn create_role(client: &ApiClient, role: &NewRole) -> Result<Role> {
    client.post(ROLES, role).await
}

pub async fn update_role<P: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    patch: &P,
) -> Result<Role> {
    client.put(&resource_path(ROLES, id), patch).await
}

/// Fails with `RoleInUse` while any user holds the role
pub async fn delete_role(client: &ApiClient, id: &str) -> Result<SuccessResponse> {
    client.delete(&resource_path(ROLES, id)).await
}

pub async fn list_permissions(client: &ApiClient) -> Result<Vec<Permission>> {
    client.get("/users/permissions").await
}
