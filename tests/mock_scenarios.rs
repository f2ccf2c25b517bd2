//! End-to-end scenarios through the domain services in mock mode
//!
//! Every call goes service -> fetch wrapper -> dispatch router -> handler,
//! exactly as the console would in an offline build.

use cloudhaven::api::{ApiClient, ApiError};
use cloudhaven::mock::{MockRouter, MockStore};
use cloudhaven::services::{
    auth, compute, dashboard, networking, security, settings, storage, users,
};
use cloudhaven::types::auth::{LoginCredentials, RegisterCredentials, ResetPasswordData};
use cloudhaven::types::compute::{InstanceSpecs, InstanceStatus, NewComputeInstance};
use cloudhaven::types::networking::{LoadBalancerType, NetworkStatus, NewLoadBalancer};
use cloudhaven::types::security::{AccessKeyStatus, NewAccessKey, PolicyStatus};
use cloudhaven::types::settings::NewPaymentMethod;
use cloudhaven::types::storage::{BucketAccess, NewStorageBucket};
use cloudhaven::types::users::{NewRole, Role, UserStatus};
use serde::Serialize;
use serde_json::{json, Value};

fn client() -> ApiClient {
    ApiClient::mock().expect("mock client")
}

/// Seed records as the handlers serialize them
fn seed<T: Serialize>(records: &T) -> Value {
    serde_json::to_value(records).expect("seed serializes")
}

/// Collections whose records are also addressable as `<collection>/{id}`
fn addressable_collections() -> Vec<(&'static str, Value)> {
    let store = MockStore::seeded();
    vec![
        ("/compute/instances", seed(&store.compute.instances)),
        ("/storage/buckets", seed(&store.storage.buckets)),
        ("/networking/vnets", seed(&store.networking.vnets)),
        ("/networking/load-balancers", seed(&store.networking.load_balancers)),
        ("/networking/firewalls", seed(&store.networking.firewalls)),
        ("/security/alerts", seed(&store.security.alerts)),
        ("/security/policies", seed(&store.security.policies)),
        ("/security/access-keys", seed(&store.security.access_keys)),
        ("/users", seed(&store.users.users)),
        ("/users/roles", seed(&store.users.roles)),
    ]
}

mod seed_tables {
    use super::*;

    #[tokio::test]
    async fn test_collections_return_seed() {
        let client = client();
        let store = MockStore::seeded();

        let mut tables = addressable_collections();
        tables.extend([
            ("/compute/instance-types", seed(&store.compute.instance_types)),
            ("/compute/regions", seed(&store.compute.regions)),
            ("/storage/bucket-types", seed(&store.storage.bucket_types)),
            ("/users/permissions", seed(&store.users.permissions)),
            ("/settings/profile", seed(&store.settings.profile)),
            ("/settings/billing", seed(&store.settings.billing)),
            ("/settings/notifications", seed(&store.settings.notifications)),
            ("/settings/api-usage", seed(&store.settings.api_usage)),
            ("/dashboard/summary", seed(&store.dashboard)),
        ]);

        for (collection, expected) in tables {
            let listed: Value = client.get(collection).await.unwrap();
            assert_eq!(listed, expected, "GET {collection}");
        }
    }

    #[tokio::test]
    async fn test_lookup_by_id_hits_and_misses() {
        let client = client();

        for (collection, records) in addressable_collections() {
            let records = records.as_array().expect("collection is an array");
            assert!(!records.is_empty(), "{collection} has seed records");

            for record in records {
                let id = record["id"].as_str().unwrap();
                let fetched: Value = client.get(&format!("{collection}/{id}")).await.unwrap();
                assert_eq!(&fetched, record, "GET {collection}/{id}");
            }

            let first = records[0]["id"].as_str().unwrap();
            let prefix = first.split('-').next().unwrap();
            let missing = format!("{prefix}-99");
            assert!(records.iter().all(|r| r["id"] != missing.as_str()));

            let err = client
                .get::<Value>(&format!("{collection}/{missing}"))
                .await
                .unwrap_err();
            match err {
                ApiError::NotFound { id, .. } => assert_eq!(id, missing),
                other => panic!("GET {collection}/{missing}: unexpected {other:?}"),
            }
        }
    }
}

mod compute_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_list_matches_seed() {
        let instances = compute::list_instances(&client()).await.unwrap();
        assert_eq!(instances, MockStore::seeded().compute.instances);
    }

    #[tokio::test]
    async fn test_missing_instance() {
        let err = compute::get_instance(&client(), "vm-99").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotFound {
                resource: "Instance",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_create_then_list_unchanged() {
        let client = client();
        let created = compute::create_instance(
            &client,
            &NewComputeInstance {
                name: "Batch Worker".to_string(),
                instance_type: "Standard-2".to_string(),
                region: "us-east-1".to_string(),
                specs: InstanceSpecs {
                    cpu: 2,
                    memory: 4,
                    storage: 80,
                },
            },
        )
        .await
        .unwrap();

        assert_eq!(created.status, InstanceStatus::Provisioning);
        assert_eq!(compute::list_instances(&client).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update_then_get_unchanged() {
        let client = client();
        let updated = compute::update_instance(&client, "vm-01", &json!({"name": "Edge"}))
            .await
            .unwrap();
        assert_eq!(updated.name, "Edge");

        let fetched = compute::get_instance(&client, "vm-01").await.unwrap();
        assert_eq!(fetched.name, "Web Server");
    }

    #[tokio::test]
    async fn test_lifecycle_actions() {
        let client = client();

        let running = compute::start_instance(&client, "vm-02").await.unwrap();
        assert_eq!(running.message, "Instance already running");
        assert_eq!(running.status, None);

        let started = compute::start_instance(&client, "vm-03").await.unwrap();
        assert_eq!(started.status, Some(InstanceStatus::Running));

        let stopped = compute::stop_instance(&client, "vm-01").await.unwrap();
        assert_eq!(stopped.status, Some(InstanceStatus::Stopped));
    }

    #[tokio::test]
    async fn test_delete() {
        let client = client();
        assert!(compute::delete_instance(&client, "vm-05").await.unwrap().success);
        assert!(compute::delete_instance(&client, "vm-55").await.is_err());
    }
}

mod storage_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_bucket_defaults_and_files() {
        let client = client();
        let bucket = storage::create_bucket(
            &client,
            &NewStorageBucket {
                name: "logs".to_string(),
                bucket_type: "archive".to_string(),
                region: "us-east-1".to_string(),
                access: None,
                size: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(bucket.size.used, 0);
        assert_eq!(bucket.size.total, 500);
        assert_eq!(bucket.access, BucketAccess::Private);

        assert!(storage::list_files(&client, "bucket-404").await.unwrap().is_empty());
        assert_eq!(storage::list_files(&client, "bucket-02").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_file() {
        let client = client();
        assert!(storage::delete_file(&client, "bucket-02", "file-004")
            .await
            .unwrap()
            .success);

        let err = storage::delete_file(&client, "bucket-02", "file-001")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found: file-001");
    }
}

mod networking_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_create_load_balancer() {
        let lb = networking::create_load_balancer(
            &client(),
            &NewLoadBalancer {
                name: "edge".to_string(),
                lb_type: LoadBalancerType::Network,
                region: "us-west-1".to_string(),
                vnet_id: "vnet-01".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(lb.status, NetworkStatus::Provisioning);
        assert!(lb.public_ip.starts_with("52."));
        assert!(lb.backends.is_empty());
    }

    #[tokio::test]
    async fn test_subnets_of_vnet() {
        let client = client();
        let vnet = networking::get_vnet(&client, "vnet-02").await.unwrap();
        let subnets = networking::list_subnets(&client, "vnet-02").await.unwrap();
        assert_eq!(vnet.subnets, subnets);
    }
}

mod security_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_access_key_issue() {
        let created = security::create_access_key(
            &client(),
            &NewAccessKey {
                name: "CI".to_string(),
                created_by: "john.doe@example.com".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(created.key.status, AccessKeyStatus::Active);
        assert_eq!(created.key.last_used, None);
        assert!(created.key.prefix.starts_with("CLDHVN"));
        assert!(!created.secret_value.is_empty());
    }

    #[tokio::test]
    async fn test_policy_update_keeps_other_fields() {
        let client = client();
        let before = security::get_policy(&client, "policy-02").await.unwrap();
        let after = security::update_policy(&client, "policy-02", &json!({"status": "enabled"}))
            .await
            .unwrap();

        assert_eq!(after.status, PolicyStatus::Enabled);
        assert_eq!(after.name, before.name);
        assert_eq!(after.settings, before.settings);
    }
}

mod users_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_roles_route_is_not_a_user() {
        let roles = users::list_roles(&client()).await.unwrap();
        assert_eq!(roles, MockStore::seeded().users.roles);
    }

    #[tokio::test]
    async fn test_seeded_role_in_use() {
        let err = users::delete_role(&client(), "role-02").await.unwrap_err();
        match err {
            ApiError::RoleInUse { role, users } => {
                assert_eq!(role, "developer");
                assert_eq!(users, 2);
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreferenced_role_deletes() {
        let mut store = MockStore::seeded().clone();
        let created = users::create_role(
            &client(),
            &NewRole {
                name: "auditor".to_string(),
                description: "Reads audit logs".to_string(),
                permissions: vec![],
            },
        )
        .await
        .unwrap();
        assert_eq!(created.user_count, 0);

        store.users.roles.push(Role {
            id: "role-09".to_string(),
            ..created
        });
        let client = client().with_router(MockRouter::with_store(store));

        assert!(users::delete_role(&client, "role-09").await.unwrap().success);
    }

    #[tokio::test]
    async fn test_invited_user_is_inactive() {
        let user = users::create_user(
            &client(),
            &cloudhaven::types::users::NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: "viewer".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(user.status, UserStatus::Inactive);
        assert_eq!(user.last_login, None);
    }
}

mod settings_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_payment_method_defaults() {
        let card = settings::add_payment_method(&client(), &NewPaymentMethod::default())
            .await
            .unwrap();
        assert_eq!(card.last_four, "1234");
        assert_eq!(card.expiry_month, 12);
        assert_eq!(card.expiry_year, 2025);
        assert_eq!(card.brand, "Visa");
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let client = client();
        let profile = settings::get_profile(&client).await.unwrap();
        let usage = settings::get_api_usage(&client).await.unwrap();
        assert_eq!(profile, MockStore::seeded().settings.profile);
        assert!(usage.total_requests > 0);
    }
}

mod dashboard_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_summary_equals_seed() {
        let summary = dashboard::get_summary(&client()).await.unwrap();
        assert_eq!(&summary, &MockStore::seeded().dashboard);
    }
}

mod auth_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_login_and_register() {
        let client = client();
        let session = auth::login(
            &client,
            &LoginCredentials {
                email: "john.doe@example.com".to_string(),
                password: "password".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(session.token, "mock-jwt-token-xyz");
        assert!(session.user.email_verified);

        let registered = auth::register(
            &client,
            &RegisterCredentials {
                email: "ada@example.com".to_string(),
                password: "secret".to_string(),
                name: "Ada".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(!registered.user.email_verified);
        assert_eq!(registered.user.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_reset_password_always_acknowledged() {
        let notice = auth::reset_password(
            &client(),
            &ResetPasswordData {
                email: "unknown@example.com".to_string(),
            },
        )
        .await;
        assert_eq!(notice.title, "Reset link sent");
    }

    #[tokio::test]
    async fn test_verify_email_and_redirects() {
        let client = client();
        assert!(auth::verify_email(&client, "token-123").await.unwrap().success);
        assert!(auth::verify_email(&client, "eyJhbGci.eyJzdWIi.sig")
            .await
            .unwrap()
            .success);
        let redirect = auth::microsoft_login(&client).await.unwrap();
        assert!(redirect.redirect_url.contains("login.microsoftonline.com"));
    }
}
