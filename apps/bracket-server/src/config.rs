//! Server configuration: defaults, then an optional YAML file, then
//! `BRACKET_` environment variables (`__` separates nested keys).

use anyhow::{Context, Result};
use bracket_service::Config as BracketConfig;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "BRACKET_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// SeaORM connection string
    pub database_url: String,

    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,

    #[serde(default)]
    pub bracket: BracketConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_url: "sqlite://bracket.db?mode=rwc".to_string(),
            log_level: "info".to_string(),
            bracket: BracketConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
        }

        let config: AppConfig = Self::figment(path)
            .extract()
            .context("failed to load configuration")?;
        config.bracket.validate()?;
        Ok(config)
    }
}

/// `database_url` with any userinfo replaced, for logs and error messages
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***@{}", scheme, &rest[at + 1..]),
        None => url.to_string(),
    }
}
