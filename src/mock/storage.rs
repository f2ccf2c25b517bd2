//! Storage mock handlers

use super::handler::{self, find, merge, new_id, success, to_json, today, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::{ApiError, Result};
use crate::types::storage::{
    BucketSize, NewStorageBucket, NewStorageFile, StorageBucket, StorageFile,
};
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

/// Capacity (GB) given to buckets created without an explicit size
const DEFAULT_BUCKET_SIZE_GB: u64 = 500;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            .route(Method::GET, "/storage/buckets", list_buckets)
            .route(Method::GET, "/storage/buckets/{id}", get_bucket)
            .route(Method::POST, "/storage/buckets", create_bucket)
            .route(Method::PUT, "/storage/buckets/{id}", update_bucket)
            .route(Method::DELETE, "/storage/buckets/{id}", delete_bucket)
            .route(Method::GET, "/storage/buckets/{id}/files", list_files)
            .route(Method::POST, "/storage/buckets/{id}/files", upload_file)
            .route(
                Method::DELETE,
                "/storage/buckets/{bucketId}/files/{fileId}",
                delete_file,
            )
            .route(Method::GET, "/storage/bucket-types", list_bucket_types)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Storage, routes(), store, endpoint, method, body)
}

fn list_buckets(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.storage.buckets)
}

fn get_bucket(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.storage.buckets, req.id())?)
}

fn create_bucket(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewStorageBucket = req.body()?;
    to_json(&StorageBucket {
        id: new_id("bucket"),
        name: new.name,
        bucket_type: new.bucket_type,
        region: new.region,
        created: today(),
        size: BucketSize {
            used: 0,
            total: new
                .size
                .filter(|gb| *gb > 0)
                .unwrap_or(DEFAULT_BUCKET_SIZE_GB),
        },
        access: new.access.unwrap_or_default(),
    })
}

fn update_bucket(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(find(&store.storage.buckets, req.id())?, req.body)
}

fn delete_bucket(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.storage.buckets, req.id())?;
    success()
}

fn list_files(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(store.bucket_files(req.id()))
}

/// Accepts uploads for any bucket id
fn upload_file(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewStorageFile = req.body()?;
    to_json(&StorageFile {
        id: new_id("file"),
        name: new.name,
        content_type: new.content_type,
        size: new.size,
        last_modified: today(),
    })
}

fn delete_file(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let bucket_id = req.param("bucketId");
    let files = store
        .storage
        .files
        .get(bucket_id)
        .ok_or_else(|| ApiError::not_found::<StorageBucket>(bucket_id))?;
    find(files, req.param("fileId"))?;
    success()
}

fn list_bucket_types(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.storage.bucket_types)
}
