#[macro_use]
extern crate log;

use std::sync::Arc;

use hlt_core::gateways::ai::AiGateway;
use hlt_db_jfs::Connections;

mod adapters;
mod core;
mod web;

pub use web::Cfg;

pub async fn run(
    connections: Connections,
    enable_cors: bool,
    cfg: Cfg,
    ai: Arc<dyn AiGateway + Send + Sync>,
    version: &'static str,
) {
    web::run(connections.into(), enable_cors, cfg, ai, version).await;
}
