//! CloudHaven console API layer
//!
//! Typed domain services over a fetch wrapper that talks to the live
//! CloudHaven backend or answers from an in-process mock backend.
//!
//! # Module Structure
//!
//! - [`api`] - Fetch wrapper, HTTP transport, error taxonomy
//! - [`config`] - Persistent configuration
//! - [`mock`] - Dispatch router, route tables, per-domain mock handlers
//! - [`notification`] - Failure toasts raised by API calls
//! - [`services`] - One async function per console operation
//! - [`types`] - Domain records

pub mod api;
pub mod config;
pub mod mock;
pub mod notification;
pub mod services;
pub mod types;

pub use api::{ApiClient, ApiError, RequestOptions, ServeMode};
