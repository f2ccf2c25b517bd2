//! Virtual networks, load balancers and firewalls

use super::resource_path;
use crate::api::{ApiClient, Result};
use crate::types::networking::{
    Firewall, FirewallRule, LoadBalancer, NewFirewall, NewFirewallRule, NewLoadBalancer,
    NewSubnet, NewVirtualNetwork, Subnet, VirtualNetwork,
};
use crate::types::SuccessResponse;

const VNETS: &str = "/networking/vnets";
const LOAD_BALANCERS: &str = "/networking/load-balancers";
const FIREWALLS: &str = "/networking/firewalls";

// =============================================================================
// Virtual networks
// =============================================================================

pub async fn list_vnets(client: &ApiClient) -> Result<Vec<VirtualNetwork>> {
    client.get(VNETS).await
}

pub async fn get_vnet(client: &ApiClient, id: &str) -> Result<VirtualNetwork> {
    client.get(&resource_path(VNETS, id)).await
}

pub async fn create_vnet(client: &ApiClient, vnet: &NewVirtualNetwork) -> Result<VirtualNetwork> {
    client.post(VNETS, vnet).await
}

pub async fn delete_vnet(client: &ApiClient, id: &str) -> Result<SuccessResponse> {
    client.delete(&resource_path(VNETS, id)).await
}

pub async fn list_subnets(client: &ApiClient, vnet_id: &str) -> Result<Vec<Subnet>> {
    client
        .get(&format!("{}/subnets", resource_path(VNETS, vnet_id)))
        .await
}

pub async fn add_subnet(client: &ApiClient, vnet_id: &str, subnet: &NewSubnet) -> Result<Subnet> {
    client
        .post(&format!("{}/subnets", resource_path(VNETS, vnet_id)), subnet)
        .await
}

// =============================================================================
// Load balancers
// =============================================================================

pub async fn list_load_balancers(client: &ApiClient) -> Result<Vec<LoadBalancer>> {
    client.get(LOAD_BALANCERS).await
}

pub async fn get_load_balancer(client: &ApiClient, id: &str) -> Result<LoadBalancer> {
    client.get(&resource_path(LOAD_BALANCERS, id)).await
}

pub async fn create_load_balancer(
    client: &ApiClient,
    load_balancer: &NewLoadBalancer,
) -> Result<LoadBalancer> {
    client.post(LOAD_BALANCERS, load_balancer).await
}

// =============================================================================
// Firewalls
// =============================================================================

pub async fn list_firewalls(client: &ApiClient) -> Result<Vec<Firewall>> {
    client.get(FIREWALLS).await
}

pub async fn get_firewall(client: &ApiClient, id: &str) -> Result<Firewall> {
    client.get(&resource_path(FIREWALLS, id)).await
}

pub async fn create_firewall(client: &ApiClient, firewall: &NewFirewall) -> Result<Firewall> {
    client.post(FIREWALLS, firewall).await
}

pub async fn add_firewall_rule(
    client: &ApiClient,
    firewall_id: &str,
    rule: &NewFirewallRule,
) -> Result<FirewallRule> {
    client
        .post(&format!("{}/rules", resource_path(FIREWALLS, firewall_id)), rule)
        .await
}
