//! Compute resources

use super::impl_record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Running,
    Stopped,
    Provisioning,
    Error,
}

/// Hardware shape of an instance (cpu count, memory GB, storage GB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSpecs {
    pub cpu: u32,
    pub memory: u32,
    pub storage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeInstance {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instance_type: String,
    pub status: InstanceStatus,
    pub region: String,
    pub created: String,
    pub specs: InstanceSpecs,
}

impl_record!(ComputeInstance, "Instance");

/// Caller-supplied fields for a new instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComputeInstance {
    pub name: String,
    #[serde(rename = "type")]
    pub instance_type: String,
    pub region: String,
    pub specs: InstanceSpecs,
}

/// Catalog entry for instance creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceType {
    pub id: String,
    pub name: String,
    pub cpu: u32,
    pub memory: u32,
    pub storage: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

/// Answer to start/stop/restart. `status` is absent when the action was a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceActionResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InstanceStatus>,
}
