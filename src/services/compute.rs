//! Compute instances

use super::resource_path;
use crate::api::{ApiClient, Result};
use crate::types::compute::{
    ComputeInstance, InstanceActionResponse, InstanceType, NewComputeInstance, Region,
};
use crate::types::SuccessResponse;
use serde::Serialize;

const INSTANCES: &str = "/compute/instances";

pub async fn list_instances(client: &ApiClient) -> Result<Vec<ComputeInstance>> {
    client.get(INSTANCES).await
}

pub async fn get_instance(client: &ApiClient, id: &str) -> Result<ComputeInstance> {
    client.get(&resource_path(INSTANCES, id)).await
}

pub async fn create_instance(
    client: &ApiClient,
    instance: &NewComputeInstance,
) -> Result<ComputeInstance> {
    client.post(INSTANCES, instance).await
}

pub async fn update_instance<P: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    patch: &P,
) -> Result<ComputeInstance> {
    client.put(&resource_path(INSTANCES, id), patch).await
}

pub async fn delete_instance(client: &ApiClient, id: &str) -> Result<SuccessResponse> {
    client.delete(&resource_path(INSTANCES, id)).await
}

/// Lifecycle action on an instance (`start`, `stop` or `restart`)
async fn instance_action(
    client: &ApiClient,
    id: &str,
    action: &str,
) -> Result<InstanceActionResponse> {
    let endpoint = format!("{}/{}", resource_path(INSTANCES, id), action);
    tracing::info!("compute: {} {}", action, id);
    client.post_empty(&endpoint).await
}

pub async fn start_instance(client: &ApiClient, id: &str) -> Result<InstanceActionResponse> {
    instance_action(client, id, "start").await
}

pub async fn stop_instance(client: &ApiClient, id: &str) -> Result<InstanceActionResponse> {
    instance_action(client, id, "stop").await
}

pub async fn restart_instance(client: &ApiClient, id: &str) -> Result<InstanceActionResponse> {
    instance_action(client, id, "restart").await
}

pub async fn list_instance_types(client: &ApiClient) -> Result<Vec<InstanceType>> {
    client.get("/compute/instance-types").await
}

pub async fn list_regions(client: &ApiClient) -> Result<Vec<Region>> {
    client.get("/compute/regions").await
}
