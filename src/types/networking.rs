//! Networking resources

use super::impl_record;
use serde::{Deserialize, Serialize};

/// Lifecycle status shared by vnets, load balancers and firewalls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    Active,
    Provisioning,
    Inactive,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub name: String,
    pub cidr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubnet {
    pub name: String,
    pub cidr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetwork {
    pub id: String,
    pub name: String,
    pub region: String,
    pub cidr: String,
    pub status: NetworkStatus,
    pub created: String,
    pub subnets: Vec<Subnet>,
}

impl_record!(VirtualNetwork, "Virtual network");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVirtualNetwork {
    pub name: String,
    pub region: String,
    pub cidr: String,
    #[serde(default)]
    pub subnets: Vec<Subnet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadBalancerType {
    Application,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backend {
    pub id: String,
    pub name: String,
    pub instances: u32,
    pub health_status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub lb_type: LoadBalancerType,
    pub status: NetworkStatus,
    pub region: String,
    pub vnet_id: String,
    pub public_ip: String,
    pub created: String,
    pub backends: Vec<Backend>,
}

impl_record!(LoadBalancer, "Load balancer");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoadBalancer {
    pub name: String,
    #[serde(rename = "type")]
    pub lb_type: LoadBalancerType,
    pub region: String,
    pub vnet_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: String,
    pub name: String,
    pub protocol: String,
    pub port: String,
    pub source: String,
    pub action: RuleAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFirewallRule {
    pub name: String,
    pub protocol: String,
    pub port: String,
    pub source: String,
    pub action: RuleAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Firewall {
    pub id: String,
    pub name: String,
    pub status: NetworkStatus,
    pub region: String,
    pub vnet_id: String,
    pub created: String,
    pub rules: Vec<FirewallRule>,
}

impl_record!(Firewall, "Firewall");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFirewall {
    pub name: String,
    pub region: String,
    pub vnet_id: String,
}
