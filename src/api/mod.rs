//! CloudHaven API access
//!
//! # Module Structure
//!
//! - [`client`] - Fetch wrapper with live, development and mock serve modes
//! - [`error`] - Error taxonomy shared by handlers and services
//! - [`http`] - reqwest transport
//!
//! # Example
//!
//! ```ignore
//! use cloudhaven::api::{ApiClient, ServeMode};
//!
//! async fn example() -> cloudhaven::api::Result<()> {
//!     let client = ApiClient::new("http://localhost:8080/api", ServeMode::Development)?;
//!     let instances: serde_json::Value = client.get("/compute/instances").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;

pub use client::{ApiClient, RequestOptions, ServeMode, DEFAULT_API_BASE_URL};
pub use error::{format_api_error, ApiError, Result};
