//! Storage resources

use super::impl_record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketAccess {
    Public,
    #[default]
    Private,
    Restricted,
}

/// Used and provisioned capacity, in GB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSize {
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageBucket {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub bucket_type: String,
    pub region: String,
    pub created: String,
    pub size: BucketSize,
    pub access: BucketAccess,
}

impl_record!(StorageBucket, "Bucket");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStorageBucket {
    pub name: String,
    #[serde(rename = "type")]
    pub bucket_type: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<BucketAccess>,
    /// Requested capacity in GB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
    pub last_modified: String,
}

impl_record!(StorageFile, "File");

/// File metadata sent on upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStorageFile {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketType {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
}
