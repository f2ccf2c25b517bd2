//! Shared handler plumbing: request view, lookup and record helpers

use super::route::{PathParams, RouteTable};
use super::router::Domain;
use super::store::MockStore;
use crate::api::{ApiError, Result};
use crate::types::{Record, SuccessResponse};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A handler answers one route from the seeded store
pub type Handler = fn(&MockStore, &MockRequest<'_>) -> Result<Value>;

/// What a handler sees of the incoming call
#[derive(Debug)]
pub struct MockRequest<'a> {
    pub endpoint: &'a str,
    pub method: &'a Method,
    pub params: PathParams,
    pub body: Option<&'a Value>,
}

impl MockRequest<'_> {
    /// Captured path parameter, empty if the template has none by that name
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    /// The `{id}` parameter
    pub fn id(&self) -> &str {
        self.param("id")
    }

    /// Decode the body into its expected shape
    pub fn body<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.body.ok_or_else(|| ApiError::InvalidBody {
            endpoint: self.endpoint.to_string(),
            reason: "missing request body".to_string(),
        })?;

        T::deserialize(value).map_err(|e| ApiError::InvalidBody {
            endpoint: self.endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// Decode the body, or use defaults when there is none
    pub fn body_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        match self.body {
            None | Some(Value::Null) => Ok(T::default()),
            Some(_) => self.body(),
        }
    }
}

/// Resolve `endpoint` in a domain's table and run the matching handler
pub fn dispatch(
    domain: Domain,
    table: &RouteTable<Handler>,
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    let Some((handler, params)) = table.resolve(method, endpoint) else {
        return Err(ApiError::UnhandledMockEndpoint {
            domain,
            endpoint: endpoint.to_string(),
            method: method.clone(),
        });
    };

    let request = MockRequest {
        endpoint,
        method,
        params,
        body,
    };
    handler(store, &request)
}

/// Look up a record by id
pub fn find<'a, T: Record>(table: &'a [T], id: &str) -> Result<&'a T> {
    table
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| ApiError::not_found::<T>(id))
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(ApiError::Encode)
}

/// Shallow overlay of `patch`'s fields onto `record`
pub fn merge<T: Serialize + ?Sized>(record: &T, patch: Option<&Value>) -> Result<Value> {
    let mut merged = to_json(record)?;
    if let (Value::Object(target), Some(Value::Object(fields))) = (&mut merged, patch) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(merged)
}

/// Fresh record id: `<prefix>-<8 hex chars>`
pub fn new_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &uuid[..8])
}

/// Today's date (UTC) as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

pub fn success() -> Result<Value> {
    to_json(&SuccessResponse::ok())
}
