use anyhow::{anyhow, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "huelvalate.toml";

const ENV_NAME_DATA_DIR: &str = "HUELVALATE_DATA_DIR";
const ENV_NAME_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
const ENV_NAME_ADMIN_PASSWORD: &str = "HUELVALATE_ADMIN_PASSWORD";

pub struct Config {
    pub db: Db,
    pub catalog: Catalog,
    pub webserver: WebServer,
    pub admin: Admin,
    pub ai: Ai,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_env_overrides(|name| env::var(name).ok().filter(|v| !v.is_empty()));
        Ok(cfg)
    }

    fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var(ENV_NAME_DATA_DIR) {
            self.db.storage = Storage::Directory(dir.into());
        }
        if let Some(password) = var(ENV_NAME_ADMIN_PASSWORD) {
            self.admin.password = Some(password);
        }
        if let Some(key) = var(ENV_NAME_GEMINI_API_KEY) {
            match &mut self.ai.gateway {
                Some(AiGateway::Gemini(gemini)) => gemini.api_key = Some(key),
                None => {
                    log::info!("Found {ENV_NAME_GEMINI_API_KEY}: enable Gemini gateway");
                    self.ai.gateway = Some(AiGateway::Gemini(Gemini {
                        api_key: Some(key),
                        ..Gemini::from(raw::Gemini::default())
                    }));
                }
            }
        }
    }
}

pub struct Db {
    pub storage: Storage,
}

pub enum Storage {
    /// Modifications are lost on restart.
    InMemory,
    /// File system directory of the JSON store.
    Directory(PathBuf),
}

pub struct Catalog {
    /// Replaces the bundled catalog.
    pub file: Option<PathBuf>,
}

pub struct WebServer {
    pub enable_cors: bool,
    pub public_url: String,
}

pub struct Admin {
    pub username: String,
    pub password: Option<String>,
}

pub struct Ai {
    pub gateway: Option<AiGateway>,
    pub image_generation: bool,
}

pub enum AiGateway {
    Gemini(Gemini),
}

pub struct Gemini {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub maps_model: Option<String>,
    pub timeout: Option<Duration>,
}

impl From<raw::Gemini> for Gemini {
    fn from(from: raw::Gemini) -> Self {
        let raw::Gemini {
            api_key,
            api_base_url,
            text_model,
            image_model,
            maps_model,
            timeout,
        } = from;
        Self {
            api_key,
            api_base_url,
            text_model,
            image_model,
            maps_model,
            timeout,
        }
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            catalog,
            webserver,
            admin,
            ai,
            gateway,
        } = from;

        let raw::Db {
            data_dir,
            in_memory,
        } = db.unwrap_or_default();

        let storage = match (in_memory, data_dir) {
            (true, _) => Storage::InMemory,
            (false, Some(dir)) => Storage::Directory(dir),
            (false, None) => return Err(anyhow!("Missing data directory")),
        };
        let db = Db { storage };

        let raw::Catalog { file } = catalog.unwrap_or_default();
        let catalog = Catalog { file };

        let raw::WebServer { cors, public_url } = webserver.unwrap_or_default();
        if public_url.trim().is_empty() {
            return Err(anyhow!("Missing public URL"));
        }
        let webserver = WebServer {
            enable_cors: cors,
            public_url,
        };

        let raw::Admin { username, password } = admin.unwrap_or_default();
        if username.trim().is_empty() {
            return Err(anyhow!("Missing admin username"));
        }
        let admin = Admin { username, password };

        let raw::Ai {
            gateway: gateway_name,
            image_generation,
        } = ai.unwrap_or_default();

        let ai_gateway = match gateway_name {
            Some(gw_name) => {
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::AiGateway::Gemini => {
                        let gemini = gateway
                            .gemini
                            .ok_or_else(|| anyhow!("Missing 'gemini' gateway configuration"))?;
                        log::info!("Use Gemini gateway");
                        AiGateway::Gemini(gemini.into())
                    }
                };
                Some(gw)
            }
            None => None,
        };

        let ai = Ai {
            gateway: ai_gateway,
            image_generation,
        };

        Ok(Self {
            db,
            catalog,
            webserver,
            admin,
            ai,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn load_default_config() {
        let mut cfg = Config::try_from(raw::Config::default()).unwrap();
        cfg.apply_env_overrides(no_env);
        assert!(matches!(cfg.db.storage, Storage::Directory(_)));
        assert!(cfg.catalog.file.is_none());
        assert!(!cfg.webserver.enable_cors);
        assert_eq!(cfg.admin.username, "admin");
        assert_eq!(cfg.admin.password.as_deref(), Some("huelvalate"));
        assert!(cfg.ai.gateway.is_none());
        assert!(!cfg.ai.image_generation);
    }

    #[test]
    fn override_config_by_env() {
        let mut cfg = Config::try_from(raw::Config::default()).unwrap();
        cfg.apply_env_overrides(|name| match name {
            ENV_NAME_DATA_DIR => Some("/tmp/hlt".into()),
            ENV_NAME_GEMINI_API_KEY => Some("secret-key".into()),
            ENV_NAME_ADMIN_PASSWORD => Some("cadiz-no".into()),
            _ => None,
        });
        let Storage::Directory(dir) = cfg.db.storage else {
            panic!("Expected a data directory");
        };
        assert_eq!(dir, PathBuf::from("/tmp/hlt"));
        assert_eq!(cfg.admin.password.as_deref(), Some("cadiz-no"));
        let Some(AiGateway::Gemini(gemini)) = cfg.ai.gateway else {
            panic!("Expected the Gemini gateway");
        };
        assert_eq!(gemini.api_key.as_deref(), Some("secret-key"));
        assert_eq!(gemini.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn in_memory_db_needs_no_directory() {
        let raw_cfg: raw::Config = toml::from_str(
            r#"
            [db]
            in-memory = true
            "#,
        )
        .unwrap();
        let cfg = Config::try_from(raw_cfg).unwrap();
        assert!(matches!(cfg.db.storage, Storage::InMemory));
    }

    #[test]
    fn missing_gateway_configuration() {
        let raw_cfg: raw::Config = toml::from_str(
            r#"
            [ai]
            gateway = "gemini"
            [gateway]
            "#,
        )
        .unwrap();
        assert!(Config::try_from(raw_cfg).is_err());
    }
}
