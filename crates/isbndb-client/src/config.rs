// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::Plan;

/// Client settings for embedding applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsbndbConfig {
    /// API key sent with every request.
    pub api_key: Option<String>,
    /// Subscription plan, selecting the API host and request ceiling.
    pub plan: Plan,
    /// Override for the API host (e.g., a local mock during development).
    pub base_url: Option<String>,
    /// Transport timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for IsbndbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            plan: Plan::Default,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: ISBNDB_).
pub fn load(config_path: Option<&Path>) -> Result<IsbndbConfig> {
    let mut figment = Figment::from(Serialized::defaults(IsbndbConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("ISBNDB_"));

    let config: IsbndbConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
