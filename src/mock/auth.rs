//! Authentication mock handlers
//!
//! Simulated sessions only: one demo account, a fixed placeholder token,
//! and canned OAuth redirect URLs.

use super::handler::{self, new_id, success, to_json, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::{ApiError, Result};
use crate::types::auth::{
    AuthSession, AuthUser, LoginCredentials, RedirectResponse, RegisterCredentials,
};
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            .route(Method::POST, "/auth/login", login)
            .route(Method::POST, "/auth/register", register)
            .route(Method::POST, "/auth/logout", acknowledge)
            .route(Method::GET, "/auth/me", current_user)
            .route(Method::GET, "/auth/google", google_redirect)
            .route(Method::GET, "/auth/microsoft", microsoft_redirect)
            .route(Method::POST, "/auth/reset-password", acknowledge)
            .route(Method::POST, "/auth/new-password", acknowledge)
            .route(Method::GET, "/auth/verify-email/{*token}", acknowledge)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Auth, routes(), store, endpoint, method, body)
}

fn session(store: &MockStore, user: AuthUser) -> Result<Value> {
    to_json(&AuthSession {
        user,
        token: store.auth.session_token.clone(),
    })
}

fn login(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let credentials: LoginCredentials = req.body()?;
    if credentials != store.auth.demo_credentials {
        tracing::debug!("Rejected mock login for {}", credentials.email);
        return Err(ApiError::InvalidCredentials);
    }
    session(store, store.auth.current_user.clone())
}

fn register(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let credentials: RegisterCredentials = req.body()?;
    let user = AuthUser {
        id: new_id("user"),
        email: credentials.email,
        name: Some(credentials.name),
        email_verified: false,
        ..store.auth.current_user.clone()
    };
    session(store, user)
}

fn current_user(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.auth.current_user)
}

fn google_redirect(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&RedirectResponse {
        redirect_url: store.auth.redirects.google.clone(),
    })
}

fn microsoft_redirect(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&RedirectResponse {
        redirect_url: store.auth.redirects.microsoft.clone(),
    })
}

/// Logout, password reset, new password and email verification all succeed
fn acknowledge(_store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    success()
}
