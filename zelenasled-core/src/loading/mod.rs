//! This module is responsible for loading street networks and environmental
//! datasets and building the routing model.

mod builder;
mod config;
pub mod environment;
pub mod network;

pub use builder::create_routing_model;
pub use config::RoutingModelConfig;
