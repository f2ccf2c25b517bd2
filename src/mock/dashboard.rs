//! Dashboard widget mock handlers

use super::handler::{self, to_json, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::Result;
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            .route(Method::GET, "/dashboard/service-status", service_status)
            .route(Method::GET, "/dashboard/vm-resources", vm_resources)
            .route(Method::GET, "/dashboard/storage-resources", storage_resources)
            .route(Method::GET, "/dashboard/cpu-usage", cpu_usage)
            .route(Method::GET, "/dashboard/network-usage", network_usage)
            .route(Method::GET, "/dashboard/stats", stats)
            .route(Method::GET, "/dashboard/resource-usage", resource_usage)
            .route(Method::GET, "/dashboard/summary", summary)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Dashboard, routes(), store, endpoint, method, body)
}

fn service_status(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard.service_status)
}

fn vm_resources(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard.vm_resources)
}

fn storage_resources(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard.storage_resources)
}

fn cpu_usage(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard.cpu_usage)
}

fn network_usage(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard.network_usage)
}

fn stats(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard.stats)
}

fn resource_usage(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard.resource_usage)
}

fn summary(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.dashboard)
}
