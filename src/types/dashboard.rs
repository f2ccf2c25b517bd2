//! Dashboard widgets

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceHealth {
    Operational,
    Degraded,
    Outage,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub name: String,
    pub status: ServiceHealth,
    pub region: String,
    /// Relative freshness label, e.g. "2m ago"
    pub updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceState {
    Running,
    Stopped,
    Provisioning,
    Error,
}

/// Utilisation percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilisationSample {
    pub cpu: u32,
    pub memory: u32,
    pub storage: u32,
}

/// Row in the dashboard's VM/storage resource lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub status: ResourceState,
    pub region: String,
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UtilisationSample>,
}

/// One point of a usage chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsagePoint {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub value: u32,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatTrends {
    pub total_vms: Trend,
    pub storage_used: Trend,
    pub network_bandwidth: Trend,
    pub active_services: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vms: u32,
    pub storage_used: String,
    pub network_bandwidth: String,
    pub active_services: u32,
    pub trends: StatTrends,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageGauge {
    pub used: f64,
    pub total: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub compute: UsageGauge,
    pub storage: UsageGauge,
    pub network: UsageGauge,
}

/// Every dashboard widget, fetched in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub service_status: Vec<ServiceStatus>,
    pub vm_resources: Vec<ResourceSummary>,
    pub storage_resources: Vec<ResourceSummary>,
    pub cpu_usage: Vec<UsagePoint>,
    pub network_usage: Vec<UsagePoint>,
    pub stats: DashboardStats,
    pub resource_usage: ResourceUsage,
}
