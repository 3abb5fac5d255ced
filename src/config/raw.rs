use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("huelvalate.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub catalog: Option<Catalog>,
    pub webserver: Option<WebServer>,
    pub admin: Option<Admin>,
    pub ai: Option<Ai>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub in_memory: bool,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Catalog {
    pub file: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
    pub public_url: String,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Admin {
    pub username: String,
    pub password: Option<String>,
}

impl Default for Admin {
    fn default() -> Self {
        Config::default().admin.expect("Admin configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ai {
    pub gateway: Option<AiGateway>,
    #[serde(default)]
    pub image_generation: bool,
}

impl Default for Ai {
    fn default() -> Self {
        Config::default().ai.expect("AI configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiGateway {
    Gemini,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub gemini: Option<Gemini>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gemini {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub maps_model: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

impl Default for Gemini {
    fn default() -> Self {
        Gateway::default().gemini.expect("Gemini configuration")
    }
}
