//! Networking mock handlers

use super::handler::{self, find, new_id, success, to_json, today, Handler, MockRequest};
use super::route::RouteTable;
use super::router::Domain;
use super::store::MockStore;
use crate::api::Result;
use crate::types::networking::{
    Firewall, FirewallRule, LoadBalancer, NetworkStatus, NewFirewall, NewFirewallRule,
    NewLoadBalancer, NewSubnet, NewVirtualNetwork, Subnet, VirtualNetwork,
};
use rand::Rng;
use reqwest::Method;
use serde_json::Value;
use std::sync::OnceLock;

pub fn routes() -> &'static RouteTable<Handler> {
    static ROUTES: OnceLock<RouteTable<Handler>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        RouteTable::<Handler>::new()
            // Virtual networks
            .route(Method::GET, "/networking/vnets", list_vnets)
            .route(Method::GET, "/networking/vnets/{id}", get_vnet)
            .route(Method::POST, "/networking/vnets", create_vnet)
            .route(Method::DELETE, "/networking/vnets/{id}", delete_vnet)
            .route(Method::GET, "/networking/vnets/{id}/subnets", list_subnets)
            .route(Method::POST, "/networking/vnets/{id}/subnets", add_subnet)
            // Load balancers
            .route(Method::GET, "/networking/load-balancers", list_load_balancers)
            .route(Method::GET, "/networking/load-balancers/{id}", get_load_balancer)
            .route(Method::POST, "/networking/load-balancers", create_load_balancer)
            // Firewalls
            .route(Method::GET, "/networking/firewalls", list_firewalls)
            .route(Method::GET, "/networking/firewalls/{id}", get_firewall)
            .route(Method::POST, "/networking/firewalls", create_firewall)
            .route(Method::POST, "/networking/firewalls/{id}/rules", add_firewall_rule)
    })
}

pub fn handle(
    store: &MockStore,
    endpoint: &str,
    method: &Method,
    body: Option<&Value>,
) -> Result<Value> {
    handler::dispatch(Domain::Networking, routes(), store, endpoint, method, body)
}

/// Random address in 52.0.0.0/8
fn random_public_ip() -> String {
    let mut rng = rand::thread_rng();
    format!("52.{}.{}.{}", rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>())
}

fn list_vnets(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.networking.vnets)
}

fn get_vnet(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.networking.vnets, req.id())?)
}

fn create_vnet(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewVirtualNetwork = req.body()?;
    to_json(&VirtualNetwork {
        id: new_id("vnet"),
        name: new.name,
        region: new.region,
        cidr: new.cidr,
        status: NetworkStatus::Provisioning,
        created: today(),
        subnets: new.subnets,
    })
}

fn delete_vnet(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.networking.vnets, req.id())?;
    success()
}

fn list_subnets(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(&find(&store.networking.vnets, req.id())?.subnets)
}

fn add_subnet(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.networking.vnets, req.id())?;
    let new: NewSubnet = req.body()?;
    to_json(&Subnet {
        id: new_id("subnet"),
        name: new.name,
        cidr: new.cidr,
    })
}

fn list_load_balancers(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.networking.load_balancers)
}

fn get_load_balancer(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.networking.load_balancers, req.id())?)
}

fn create_load_balancer(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewLoadBalancer = req.body()?;
    to_json(&LoadBalancer {
        id: new_id("lb"),
        name: new.name,
        lb_type: new.lb_type,
        status: NetworkStatus::Provisioning,
        region: new.region,
        vnet_id: new.vnet_id,
        public_ip: random_public_ip(),
        created: today(),
        backends: Vec::new(),
    })
}

fn list_firewalls(store: &MockStore, _req: &MockRequest<'_>) -> Result<Value> {
    to_json(&store.networking.firewalls)
}

fn get_firewall(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    to_json(find(&store.networking.firewalls, req.id())?)
}

fn create_firewall(_store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    let new: NewFirewall = req.body()?;
    to_json(&Firewall {
        id: new_id("fw"),
        name: new.name,
        status: NetworkStatus::Provisioning,
        region: new.region,
        vnet_id: new.vnet_id,
        created: today(),
        rules: Vec::new(),
    })
}

fn add_firewall_rule(store: &MockStore, req: &MockRequest<'_>) -> Result<Value> {
    find(&store.networking.firewalls, req.id())?;
    let new: NewFirewallRule = req.body()?;
    to_json(&FirewallRule {
        id: new_id("rule"),
        name: new.name,
        protocol: new.protocol,
        port: new.port,
        source: new.source,
        action: new.action,
    })
}
