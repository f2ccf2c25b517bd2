//! Security alerts, policies and access keys

use super::resource_path;
use crate::api::{ApiClient, Result};
use crate::types::security::{
    AccessKey, CreatedAccessKey, NewAccessKey, NewSecurityPolicy, SecurityAlert, SecurityPolicy,
};
use crate::types::SuccessResponse;
use serde::Serialize;

const ALERTS: &str = "/security/alerts";
const POLICIES: &str = "/security/policies";
const ACCESS_KEYS: &str = "/security/access-keys";

pub async fn list_alerts(client: &ApiClient) -> Result<Vec<SecurityAlert>> {
    client.get(ALERTS).await
}

pub async fn get_alert(client: &ApiClient, id: &str) -> Result<SecurityAlert> {
    client.get(&resource_path(ALERTS, id)).await
}

pub async fn update_alert<P: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    patch: &P,
) -> Result<SecurityAlert> {
    client.put(&resource_path(ALERTS, id), patch).await
}

pub async fn list_policies(client: &ApiClient) -> Result<Vec<SecurityPolicy>> {
    client.get(POLICIES).await
}

pub async fn get_policy(client: &ApiClient, id: &str) -> Result<SecurityPolicy> {
    client.get(&resource_path(POLICIES, id)).await
}

pub async fn create_policy(
    client: &ApiClient,
    policy: &NewSecurityPolicy,
) -> Result<SecurityPolicy> {
    client.post(POLICIES, policy).await
}

pub async fn update_policy<P: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    patch: &P,
) -> Result<SecurityPolicy> {
    client.put(&resource_path(POLICIES, id), patch).await
}

pub async fn delete_policy(client: &ApiClient, id: &str) -> Result<SuccessResponse> {
    client.delete(&resource_path(POLICIES, id)).await
}

pub async fn list_access_keys(client: &ApiClient) -> Result<Vec<AccessKey>> {
    client.get(ACCESS_KEYS).await
}

pub async fn get_access_key(client: &ApiClient, id: &str) -> Result<AccessKey> {
    client.get(&resource_path(ACCESS_KEYS, id)).await
}

/// Issue a key. The secret in the answer is not retrievable later.
pub async fn create_access_key(
    client: &ApiClient,
    key: &NewAccessKey,
) -> Result<CreatedAccessKey> {
    client.post(ACCESS_KEYS, key).await
}

pub async fn update_access_key<P: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    patch: &P,
) -> Result<AccessKey> {
    client.put(&resource_path(ACCESS_KEYS, id), patch).await
}

pub async fn delete_access_key(client: &ApiClient, id: &str) -> Result<SuccessResponse> {
    client.delete(&resource_path(ACCESS_KEYS, id)).await
}
