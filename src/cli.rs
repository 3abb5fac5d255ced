use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use hlt_core::{
    entities::{Id, Password},
    gateways::ai::AiGateway,
    usecases::{self, AdminCredentials},
};
use hlt_db_jfs::{Catalog, Connections};
use hlt_gateways::{
    gemini::{Gemini, GeminiConfig},
    offline::Offline,
};

use crate::config::{self, Config};

#[derive(Parser)]
#[command(author, version, about = "Tourism guide for the province of Huelva")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print all places including every modification as JSON
    Report,
}

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;

    let catalog = match &cfg.catalog.file {
        Some(file) => {
            info!("Loading catalog from {}", file.display());
            Catalog::from_file(file)?
        }
        None => Catalog::bundled()?,
    };

    let connections = match &cfg.db.storage {
        config::Storage::InMemory => {
            warn!("Using an in-memory store: all modifications are lost on shutdown");
            Connections::in_memory(catalog)
        }
        config::Storage::Directory(dir) => {
            info!("Opening JSON store in {}", dir.display());
            Connections::init(dir, catalog)?
        }
    };

    if let Some(Command::Report) = args.command {
        let places = usecases::generate_report(&connections.shared())?;
        println!("{}", hlt_db_jfs::places_to_json(places)?);
        return Ok(());
    }

    let admin = admin_credentials(&cfg.admin)?;
    let ai = ai_gateway(cfg.ai)?;
    let web_cfg = hlt_webserver::Cfg {
        public_url: cfg.webserver.public_url,
        admin,
    };
    let enable_cors = args.enable_cors || cfg.webserver.enable_cors;

    // The blocking HTTP client of the AI gateway must be dropped outside of the runtime.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(hlt_webserver::run(
        connections,
        enable_cors,
        web_cfg,
        Arc::clone(&ai),
        env!("CARGO_PKG_VERSION"),
    ));
    drop(runtime);
    drop(ai);
    Ok(())
}

fn admin_credentials(cfg: &config::Admin) -> Result<AdminCredentials> {
    let password: Password = match &cfg.password {
        Some(password) => password.parse()?,
        None => {
            warn!("No admin password configured: the administration is locked");
            Id::new().as_str().parse()?
        }
    };
    Ok(AdminCredentials {
        username: cfg.username.clone(),
        password,
    })
}

fn ai_gateway(cfg: config::Ai) -> Result<Arc<dyn AiGateway + Send + Sync>> {
    let config::Ai {
        gateway,
        image_generation,
    } = cfg;
    let gemini = match gateway {
        Some(config::AiGateway::Gemini(gemini)) => gemini,
        None => {
            warn!("No AI gateway configured: AI features are disabled");
            return Ok(Arc::new(Offline));
        }
    };
    let config::Gemini {
        api_key,
        api_base_url,
        text_model,
        image_model,
        maps_model,
        timeout,
    } = gemini;
    let Some(api_key) = api_key else {
        warn!("Missing Gemini API key: AI features are disabled");
        return Ok(Arc::new(Offline));
    };
    let mut gemini_cfg = GeminiConfig::new(api_key);
    if let Some(url) = api_base_url {
        gemini_cfg.api_base_url = url;
    }
    if let Some(model) = text_model {
        gemini_cfg.text_model = model;
    }
    if let Some(model) = image_model {
        gemini_cfg.image_model = model;
    }
    if let Some(model) = maps_model {
        gemini_cfg.maps_model = model;
    }
    if let Some(timeout) = timeout {
        gemini_cfg.timeout = timeout;
    }
    gemini_cfg.image_generation = image_generation;
    if !image_generation {
        info!("Image generation is disabled");
    }
    Ok(Arc::new(Gemini::try_new(gemini_cfg)?))
}
