//! Authentication flows

use super::resource_path;
use crate::api::{ApiClient, Result};
use crate::notification::Notification;
use crate::types::auth::{
    AuthSession, AuthUser, LoginCredentials, NewPasswordData, RedirectResponse,
    RegisterCredentials, ResetPasswordData,
};
use crate::types::SuccessResponse;

/// Message shown after a password reset request
///
/// The wording never depends on whether the address belongs to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetNotice {
    pub title: &'static str,
    pub description: &'static str,
}

impl PasswordResetNotice {
    fn sent() -> Self {
        Self {
            title: "Reset link sent",
            description: "If an account exists with that email, you'll receive a password reset link",
        }
    }
}

pub async fn login(client: &ApiClient, credentials: &LoginCredentials) -> Result<AuthSession> {
    client.post("/auth/login", credentials).await
}

pub async fn register(
    client: &ApiClient,
    credentials: &RegisterCredentials,
) -> Result<AuthSession> {
    client.post("/auth/register", credentials).await
}

pub async fn logout(client: &ApiClient) -> Result<SuccessResponse> {
    client.post_empty("/auth/logout").await
}

pub async fn current_user(client: &ApiClient) -> Result<AuthUser> {
    client.get("/auth/me").await
}

pub async fn google_login(client: &ApiClient) -> Result<RedirectResponse> {
    client.get("/auth/google").await
}

pub async fn microsoft_login(client: &ApiClient) -> Result<RedirectResponse> {
    client.get("/auth/microsoft").await
}

/// Request a reset link. Failures are logged, never surfaced.
pub async fn reset_password(client: &ApiClient, data: &ResetPasswordData) -> PasswordResetNotice {
    match client
        .post::<SuccessResponse, _>("/auth/reset-password", data)
        .await
    {
        Ok(_) => tracing::info!("Password reset requested"),
        Err(e) => tracing::warn!("Password reset request failed: {}", e),
    }
    let notice = PasswordResetNotice::sent();
    client
        .notifications()
        .write()
        .await
        .push(Notification::info(notice.title, notice.description));
    notice
}

pub async fn set_new_password(
    client: &ApiClient,
    data: &NewPasswordData,
) -> Result<SuccessResponse> {
    client.post("/auth/new-password", data).await
}

pub async fn verify_email(client: &ApiClient, token: &str) -> Result<SuccessResponse> {
    client
        .get(&resource_path("/auth/verify-email", token))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ServeMode};
    use crate::notification::ToastVariant;

    #[tokio::test]
    async fn test_login_round_trip() {
        let client = ApiClient::mock().unwrap();
        let session = login(
            &client,
            &LoginCredentials {
                email: "john.doe@example.com".to_string(),
                password: "password".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(session.user.email, "john.doe@example.com");

        let err = login(
            &client,
            &LoginCredentials {
                email: "john.doe@example.com".to_string(),
                password: "wrong".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_reset_password_wording_is_fixed() {
        let data = ResetPasswordData {
            email: "nobody@example.com".to_string(),
        };

        let mock = ApiClient::mock().unwrap();
        let ok = reset_password(&mock, &data).await;

        // Unreachable server in live mode: the call fails, the notice does not change
        let live = ApiClient::new("http://127.0.0.1:9", ServeMode::Live).unwrap();
        let failed = reset_password(&live, &data).await;

        assert_eq!(ok, failed);
        assert_eq!(ok.title, "Reset link sent");

        let notifications = mock.notifications();
        let manager = notifications.read().await;
        let toast = manager.current_toast().unwrap();
        assert_eq!(toast.title, "Reset link sent");
        assert_eq!(toast.variant, ToastVariant::Default);
        assert_eq!(manager.error_count(), 0);
    }
}
