use std::env;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, Level};
use uuid::Uuid;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    pub database_url: String,
    pub jwt_secret: String,
    /// token lifetime in minutes
    #[serde(default = "default_jwt_exp")]
    pub jwt_exp: u16,
    /// profile handed to credentials that were created before profiles were linked
    pub default_profile_id: Option<Uuid>,
    #[serde(default)]
    pub auto_migrate: bool,
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_jwt_exp() -> u16 {
    60
}

impl Config {
    pub fn log_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|x| x.parse::<Level>().ok())
            .unwrap_or(Level::INFO)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("ENV").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
    envy::from_env::<Config>().context("read config from environment")
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use crate::core::test_utils::test_config;

    #[test]
    fn test_log_level_fallback() {
        let mut config = test_config();
        config.log_level = None;
        assert_eq!(config.log_level(), Level::INFO);
        config.log_level = Some("debug".to_string());
        assert_eq!(config.log_level(), Level::DEBUG);
        config.log_level = Some("not-a-level".to_string());
        assert_eq!(config.log_level(), Level::INFO);
    }

    #[test]
    fn test_config_from_env_iter() {
        let vars = vec![
            ("HOST".to_string(), "0.0.0.0".to_string()),
            ("PORT".to_string(), "8000".to_string()),
            (
                "DATABASE_URL".to_string(),
                "postgres://localhost/portfolio".to_string(),
            ),
            ("JWT_SECRET".to_string(), "secret".to_string()),
            (
                "DEFAULT_PROFILE_ID".to_string(),
                "0195a1c2-7d1e-7000-8000-000000000001".to_string(),
            ),
        ];
        let config = envy::from_iter::<_, super::Config>(vars).unwrap();
        assert_eq!(config.env, "file");
        assert_eq!(config.jwt_exp, 60);
        assert!(!config.auto_migrate);
        assert!(config.default_profile_id.is_some());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }
}
