//! Account settings mock handlers

use super::handler::{self, merge, new_id, to_json, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::Result;
use crate::types::settings::{NewPaymentMethod, PaymentMethodRecord};
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            .route(Method::GET, "/settings/profile", get_profile)
            .route(Method::PUT, "/settings/profile", update_profile)
            .route(Method::GET, "/settings/billing", get_billing)
            .route(Method::PUT, "/settings/billing", update_billing)
            .route(
                Method::POST,
                "/settings/billing/payment-methods",
                add_payment_method,
            )
            .route(Method::GET, "/settings/notifications", get_notifications)
            .route(Method::PUT, "/settings/notifications", update_notifications)
            .route(Method::GET, "/settings/api-usage", get_api_usage)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Settings, routes(), store, endpoint, method, body)
}

fn get_profile(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.settings.profile)
}

fn update_profile(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(&store.settings.profile, req.body)
}

fn get_billing(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.settings.billing)
}

fn update_billing(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(&store.settings.billing, req.body)
}

fn add_payment_method(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let card: NewPaymentMethod = req.body_or_default()?;
    to_json(&PaymentMethodRecord {
        id: new_id("payment"),
        last_four: card
            .last_four
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "1234".to_string()),
        expiry_month: card.expiry_month.filter(|n| *n > 0).unwrap_or(12),
        expiry_year: card.expiry_year.filter(|n| *n > 0).unwrap_or(2025),
        brand: card
            .brand
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Visa".to_string()),
    })
}

fn get_notifications(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.settings.notifications)
}

fn update_notifications(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    merge(&store.settings.notifications, req.body)
}

fn get_api_usage(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.settings.api_usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(endpoint: &str, method: Method, body: Option<Value>) -> Result<Value> {
        handle(MockStore::seeded(), endpoint, &method, body.as_ref())
    }

    #[test]
    fn test_payment_method_defaults() {
        let card = call("/settings/billing/payment-methods", Method::POST, None).unwrap();
        assert_eq!(card["lastFour"], "1234");
        assert_eq!(card["expiryMonth"], 12);
        assert_eq!(card["expiryYear"], 2025);
        assert_eq!(card["brand"], "Visa");

        let body = json!({"lastFour": "9876", "brand": "Mastercard"});
        let card = call("/settings/billing/payment-methods", Method::POST, Some(body)).unwrap();
        assert_eq!(card["lastFour"], "9876");
        assert_eq!(card["brand"], "Mastercard");
        assert_eq!(card["expiryYear"], 2025);
    }

    #[test]
    fn test_payment_method_blank_fields_take_defaults() {
        let body = json!({"lastFour": "", "expiryMonth": 0, "expiryYear": 0, "brand": ""});
        let card = call("/settings/billing/payment-methods", Method::POST, Some(body)).unwrap();
        assert_eq!(card["lastFour"], "1234");
        assert_eq!(card["expiryMonth"], 12);
        assert_eq!(card["expiryYear"], 2025);
        assert_eq!(card["brand"], "Visa");
    }

    #[test]
    fn test_profile_update_is_shallow() {
        let patch = json!({"company": "Haven Labs", "address": {"city": "Austin"}});
        let profile = call("/settings/profile", Method::PUT, Some(patch)).unwrap();
        assert_eq!(profile["company"], "Haven Labs");
        assert_eq!(profile["address"], json!({"city": "Austin"}));

        let seeded = call("/settings/profile", Method::GET, None).unwrap();
        assert_ne!(seeded["company"], "Haven Labs");
    }

    #[test]
    fn test_settings_reads() {
        let usage = call("/settings/api-usage", Method::GET, None).unwrap();
        assert!(usage["totalRequests"].as_u64().is_some());

        let prefs = call("/settings/notifications", Method::GET, None).unwrap();
        assert_eq!(prefs["id"], "notif-01");
    }
}
