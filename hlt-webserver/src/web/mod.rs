use std::sync::Arc;

use rocket::{config::Config as RocketCfg, Rocket, Route};

use crate::core::{gateways::ai::AiGateway, usecases::AdminCredentials};

pub mod api;
mod guards;
mod jfs;


#[derive(Debug, Clone)]
pub struct Cfg {
    /// Base URL that is used to build share links.
    pub public_url: String,
    pub admin: AdminCredentials,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Gateways {
    ai: Arc<dyn AiGateway + Send + Sync>,
}

pub(crate) struct Connections {
    db: jfs::Connections,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    connections: Connections,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Connections { db } = connections;
    let Gateways { ai } = gateways;

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let ai = guards::Ai::new(ai);
    let version = guards::Version(version);

    let mut instance = r.manage(db).manage(ai).manage(cfg).manage(version);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(
    db: jfs::Connections,
    enable_cors: bool,
    cfg: Cfg,
    ai: Arc<dyn AiGateway + Send + Sync>,
    version: &'static str,
) {
    let mounts = mounts();
    let options = InstanceOptions {
        mounts,
        rocket_cfg: None,
        cfg,
        version,
    };
    let connections = Connections { db };
    let gateways = Gateways { ai };

    let mut instance = rocket_instance(options, connections, gateways);
    if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance = instance.attach(cors),
            Err(err) => log::warn!("Unable to enable CORS: {err}"),
        }
    }
    if let Err(err) = instance.launch().await {
        log::error!("Unable to run web server: {err}");
    }
}
