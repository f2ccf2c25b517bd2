//! Security mock handlers

use super::handler::{self, find, merge, new_id, success, to_json, today, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::Result;
use crate::types::security::{
    AccessKey, AccessKeyStatus, CreatedAccessKey, NewAccessKey, NewSecurityPolicy,
    SecurityPolicy,
};
use rand::Rng;
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            // Alerts
            .route(Method::GET, "/security/alerts", list_alerts)
            .route(Method::GET, "/security/alerts/{id}", get_alert)
            .route(Method::PUT, "/security/alerts/{id}", update_alert)
            // Policies
            .route(Method::GET, "/security/policies", list_policies)
            .route(Method::GET, "/security/policies/{id}", get_policy)
            .route(Method::POST, "/security/policies", create_policy)
            .route(Method::PUT, "/security/policies/{id}", update_policy)
            .route(Method::DELETE, "/security/policies/{id}", delete_policy)
            // Access keys
            .route(Method::GET, "/security/access-keys", list_access_keys)
            .route(Method::GET, "/security/access-keys/{id}", get_access_key)
            .route(Method::POST, "/security/access-keys", create_access_key)
            .route(Method::PUT, "/security/access-keys/{id}", update_access_key)
            .route(Method::DELETE, "/security/access-keys/{id}", delete_access_key)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Security, routes(), store, endpoint, method, body)
}

/// Visible key prefix: `CLDHVN` + digit + uppercase letter
fn key_prefix() -> String {
    let mut rng = rand::thread_rng();
    let digit = rng.gen_range(0..10);
    let letter = char::from(b'A' + rng.gen_range(0..26u8));
    format!("CLDHVN{}{}", digit, letter)
}

fn list_alerts(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.security.alerts)
}

fn get_alert(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.security.alerts, req.id())?)
}

fn update_alert(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(find(&store.security.alerts, req.id())?, req.body)
}

fn list_policies(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.security.policies)
}

fn get_policy(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.security.policies, req.id())?)
}

fn create_policy(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewSecurityPolicy = req.body()?;
    let date = today();
    to_json(&SecurityPolicy {
        id: new_id("policy"),
        name: new.name,
        description: new.description,
        status: new.status.unwrap_or_default(),
        applied_to: new.applied_to,
        created: date.clone(),
        last_updated: date,
        settings: new.settings,
    })
}

fn update_policy(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let mut policy = merge(find(&store.security.policies, req.id())?, req.body)?;
    policy["lastUpdated"] = Value::String(today());
    Ok(policy)
}

fn delete_policy(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.security.policies, req.id())?;
    success()
}

fn list_access_keys(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.security.access_keys)
}

fn get_access_key(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.security.access_keys, req.id())?)
}

fn create_access_key(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewAccessKey = req.body()?;
    to_json(&CreatedAccessKey {
        key: AccessKey {
            id: new_id("key"),
            name: new.name,
            prefix: key_prefix(),
            created: today(),
            last_used: None,
            created_by: new.created_by,
            status: AccessKeyStatus::Active,
        },
        secret_value: uuid::Uuid::new_v4().to_string(),
    })
}

fn update_access_key(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(find(&store.security.access_keys, req.id())?, req.body)
}

fn delete_access_key(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.security.access_keys, req.id())?;
    success()
}
