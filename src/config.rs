use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database_dsn: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("failed to parse {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    #[error(
        "config file not found and environment variables are incomplete. \
         Tried: '{path}', 'config.yaml', 'config.example.yaml', and environment variables. \
         Error: {source}"
    )]
    NotFound {
        path: String,
        source: Box<ConfigError>,
    },
}

fn load_from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn load_from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let database_dsn = lookup("PG_DSN").ok_or(ConfigError::MissingVar("PG_DSN"))?;

    let host = lookup("HOST").unwrap_or_else(default_host);

    let port = match lookup("PORT") {
        Some(port) => port.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
            name: "PORT",
            reason: e.to_string(),
        })?,
        None => DEFAULT_PORT,
    };

    Ok(Config {
        database_dsn,
        host,
        port,
    })
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_owned());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env(|name| env::var(name).ok()) {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(ConfigError::NotFound {
            path: config_path,
            source: Box::new(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn yaml_without_host_and_port_uses_defaults() {
        let config: Config =
            serde_yaml::from_str("database_dsn: postgres://notes@localhost/notes").unwrap();

        assert_eq!(config.database_dsn, "postgres://notes@localhost/notes");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn example_config_file_parses() {
        let config = load_from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config.example.yaml"
        ))
        .unwrap();

        assert_eq!(config.port, 8000);
    }

    #[test]
    fn env_requires_dsn() {
        let err = load_from_env(lookup(&[("PORT", "9000")])).unwrap_err();

        assert!(matches!(err, ConfigError::MissingVar("PG_DSN")));
    }

    #[test]
    fn env_overrides_host_and_port() {
        let config = load_from_env(lookup(&[
            ("PG_DSN", "postgres://db/notes"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            Config {
                database_dsn: "postgres://db/notes".to_owned(),
                host: "127.0.0.1".to_owned(),
                port: 9000,
            }
        );
    }

    #[test]
    fn env_rejects_invalid_port() {
        let err = load_from_env(lookup(&[("PG_DSN", "x"), ("PORT", "http")])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_from_file("/nonexistent/notes-api.yaml").unwrap_err();

        assert!(err.to_string().contains("/nonexistent/notes-api.yaml"));
    }
}
