//! Storage buckets and files

use super::resource_path;
use crate::api::{ApiClient, Result};
use crate::types::storage::{
    BucketType, NewStorageBucket, NewStorageFile, StorageBucket, StorageFile,
};
use crate::types::SuccessResponse;
use serde::Serialize;

const BUCKETS: &str = "/storage/buckets";

fn files_path(bucket_id: &str) -> String {
    format!("{}/files", resource_path(BUCKETS, bucket_id))
}

pub async fn list_buckets(client: &ApiClient) -> Result<Vec<StorageBucket>> {
    client.get(BUCKETS).await
}

pub async fn get_bucket(client: &ApiClient, id: &str) -> Result<StorageBucket> {
    client.get(&resource_path(BUCKETS, id)).await
}

pub async fn create_bucket(client: &ApiClient, bucket: &NewStorageBucket) -> Result<StorageBucket> {
    client.post(BUCKETS, bucket).await
}

pub async fn update_bucket<P: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    patch: &P,
) -> Result<StorageBucket> {
    client.put(&resource_path(BUCKETS, id), patch).await
}

pub async fn delete_bucket(client: &ApiClient, id: &str) -> Result<SuccessResponse> {
    client.delete(&resource_path(BUCKETS, id)).await
}

pub async fn list_files(client: &ApiClient, bucket_id: &str) -> Result<Vec<StorageFile>> {
    client.get(&files_path(bucket_id)).await
}

/// Register file metadata in a bucket
pub async fn upload_file(
    client: &ApiClient,
    bucket_id: &str,
    file: &NewStorageFile,
) -> Result<StorageFile> {
    client.post(&files_path(bucket_id), file).await
}

pub async fn delete_file(
    client: &ApiClient,
    bucket_id: &str,
    file_id: &str,
) -> Result<SuccessResponse> {
    client
        .delete(&resource_path(&files_path(bucket_id), file_id))
        .await
}

pub async fn list_bucket_types(client: &ApiClient) -> Result<Vec<BucketType>> {
    client.get("/storage/bucket-types").await
}
