//! Mock backend
//!
//! Answers console API calls without a network. The [`MockRouter`] picks a
//! domain from the endpoint's first path segment; each domain module holds
//! an ordered [`RouteTable`] of pure handler functions that read from the
//! seeded [`MockStore`].
//!
//! # Module Structure
//!
//! - [`route`] - Route templates and specificity-ordered tables
//! - [`store`] - Embedded seed data
//! - [`handler`] - Handler signature and record helpers
//! - [`router`] - Domain dispatch
//! - one module per domain

pub mod auth;
pub mod compute;
pub mod dashboard;
pub mod handler;
pub mod networking;
pub mod route;
pub mod router;
pub mod security;
pub mod settings;
pub mod storage;
pub mod store;
pub mod users;

pub use handler::{Handler, MockRequest};
pub use route::{PathParams, RouteTable, RouteTemplate};
pub use router::{Domain, MockRouter, RouteInfo};
pub use store::MockStore;
