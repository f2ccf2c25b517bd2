//! Account settings

use crate::api::{ApiClient, Result};
use crate::types::settings::{
    ApiUsage, BillingInfo, NewPaymentMethod, NotificationSettings, PaymentMethodRecord,
    UserProfile,
};
use serde::Serialize;

pub async fn get_profile(client: &ApiClient) -> Result<UserProfile> {
    client.get("/settings/profile").await
}

pub async fn update_profile<P: Serialize + ?Sized>(
    client: &ApiClient,
    patch: &P,
) -> Result<UserProfile> {
    client.put("/settings/profile", patch).await
}

pub async fn get_billing(client: &ApiClient) -> Result<BillingInfo> {
    client.get("/settings/billing").await
}

pub async fn update_billing<P: Serialize + ?Sized>(
    client: &ApiClient,
    patch: &P,
) -> Result<BillingInfo> {
    client.put("/settings/billing", patch).await
}

pub async fn add_payment_method(
    client: &ApiClient,
    card: &NewPaymentMethod,
) -> Result<PaymentMethodRecord> {
    client.post("/settings/billing/payment-methods", card).await
}

pub async fn get_notification_settings(client: &ApiClient) -> Result<NotificationSettings> {
    client.get("/settings/notifications").await
}

pub async fn update_notification_settings<P: Serialize + ?Sized>(
    client: &ApiClient,
    patch: &P,
) -> Result<NotificationSettings> {
    client.put("/settings/notifications", patch).await
}

pub async fn get_api_usage(client: &ApiClient) -> Result<ApiUsage> {
    client.get("/settings/api-usage").await
}
