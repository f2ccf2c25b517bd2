//! Compute mock handlers

use super::handler::{self, find, merge, new_id, success, to_json, today, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::Result;
use crate::types::compute::{
    ComputeInstance, InstanceActionResponse, InstanceStatus, NewComputeInstance,
};
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            .route(Method::GET, "/compute/instances", list_instances)
            .route(Method::GET, "/compute/instances/{id}", get_instance)
            .route(Method::POST, "/compute/instances", create_instance)
            .route(Method::PUT, "/compute/instances/{id}", update_instance)
            .route(Method::DELETE, "/compute/instances/{id}", delete_instance)
            .route(Method::POST, "/compute/instances/{id}/start", start_instance)
            .route(Method::POST, "/compute/instances/{id}/stop", stop_instance)
            .route(Method::POST, "/compute/instances/{id}/restart", restart_instance)
            .route(Method::GET, "/compute/instance-types", list_instance_types)
            .route(Method::GET, "/compute/regions", list_regions)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Compute, routes(), store, endpoint, method, body)
}

fn list_instances(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.compute.instances)
}

fn get_instance(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.compute.instances, req.id())?)
}

fn create_instance(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewComputeInstance = req.body()?;
    to_json(&ComputeInstance {
        id: new_id("vm"),
        name: new.name,
        instance_type: new.instance_type,
        status: InstanceStatus::Provisioning,
        region: new.region,
        created: today(),
        specs: new.specs,
    })
}

fn update_instance(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let instance = find(&store.compute.instances, req.id())?;
    merge(instance, req.body)
}

fn delete_instance(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.compute.instances, req.id())?;
    success()
}

fn start_instance(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let instance = find(&store.compute.instances, req.id())?;
    let response = if instance.status == InstanceStatus::Running {
        InstanceActionResponse {
            message: "Instance already running".to_string(),
            status: None,
        }
    } else {
        InstanceActionResponse {
            message: "Instance started successfully".to_string(),
            status: Some(InstanceStatus::Running),
        }
    };
    to_json(&response)
}

fn stop_instance(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let instance = find(&store.compute.instances, req.id())?;
    let response = if instance.status == InstanceStatus::Stopped {
        InstanceActionResponse {
            message: "Instance already stopped".to_string(),
            status: None,
        }
    } else {
        InstanceActionResponse {
            message: "Instance stopped successfully".to_string(),
            status: Some(InstanceStatus::Stopped),
        }
    };
    to_json(&response)
}

fn restart_instance(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.compute.instances, req.id())?;
    to_json(&InstanceActionResponse {
        message: "Instance restarted successfully".to_string(),
        status: Some(InstanceStatus::Running),
    })
}

fn list_instance_types(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.compute.instance_types)
}

fn list_regions(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.compute.regions)
}
