//! Dashboard widgets

use crate::api::{ApiClient, Result};
use crate::types::dashboard::{
    DashboardStats, DashboardSummary, ResourceSummary, ResourceUsage, ServiceStatus, UsagePoint,
};

/// Every widget in one call
pub async fn get_summary(client: &ApiClient) -> Result<DashboardSummary> {
    client.get("/dashboard/summary").await
}

pub async fn get_service_status(client: &ApiClient) -> Result<Vec<ServiceStatus>> {
    client.get("/dashboard/service-status").await
}

pub async fn get_vm_resources(client: &ApiClient) -> Result<Vec<ResourceSummary>> {
    client.get("/dashboard/vm-resources").await
}

pub async fn get_storage_resources(client: &ApiClient) -> Result<Vec<ResourceSummary>> {
    client.get("/dashboard/storage-resources").await
}

pub async fn get_cpu_usage(client: &ApiClient) -> Result<Vec<UsagePoint>> {
    client.get("/dashboard/cpu-usage").await
}

pub async fn get_network_usage(client: &ApiClient) -> Result<Vec<UsagePoint>> {
    client.get("/dashboard/network-usage").await
}

pub async fn get_stats(client: &ApiClient) -> Result<DashboardStats> {
    client.get("/dashboard/stats").await
}

pub async fn get_resource_usage(client: &ApiClient) -> Result<ResourceUsage> {
    client.get("/dashboard/resource-usage").await
}

/// Fetch each widget separately, concurrently, and assemble the summary
pub async fn get_dashboard_widgets(client: &ApiClient) -> Result<DashboardSummary> {
    let (
        service_status,
        vm_resources,
        storage_resources,
        cpu_usage,
        network_usage,
        stats,
        resource_usage,
    ) = futures::try_join!(
        get_service_status(client),
        get_vm_resources(client),
        get_storage_resources(client),
        get_cpu_usage(client),
        get_network_usage(client),
        get_stats(client),
        get_resource_usage(client),
    )?;

    Ok(DashboardSummary {
        service_status,
        vm_resources,
        storage_resources,
        cpu_usage,
        network_usage,
        stats,
        resource_usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widgets_match_summary() {
        let client = ApiClient::mock().unwrap();
        let (summary, widgets) = tokio_test::block_on(async {
            futures::join!(get_summary(&client), get_dashboard_widgets(&client))
        });
        assert_eq!(summary.unwrap(), widgets.unwrap());
    }
}
