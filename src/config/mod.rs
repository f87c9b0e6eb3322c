//! Configuration module for the company strength pipeline.
//!
//! Settings come from environment variables (a `.env` file is loaded by the
//! binaries first), organized by concern: paths, storage, remote fetch,
//! labeling, training, insights and the read API. Every sub-config parses
//! from a lookup function so tests can supply variables without touching
//! the process environment.

mod fetch_config;
mod insight_config;
mod model_config;
mod paths_config;
mod server_config;

pub use fetch_config::FetchEnvConfig;
pub use insight_config::InsightEnvConfig;
pub use model_config::{LabelingEnvConfig, TrainerEnvConfig};
pub use paths_config::{DatabaseEnvConfig, PathsEnvConfig};
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: PathsEnvConfig,
    pub database: DatabaseEnvConfig,
    pub fetch: FetchEnvConfig,
    pub labeling: LabelingEnvConfig,
    pub trainer: TrainerEnvConfig,
    pub insight: InsightEnvConfig,
    pub server: ServerEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            paths: PathsEnvConfig::from_vars(&lookup),
            database: DatabaseEnvConfig::from_vars(&lookup),
            fetch: FetchEnvConfig::from_vars(&lookup),
            labeling: LabelingEnvConfig::from_vars(&lookup),
            trainer: TrainerEnvConfig::from_vars(&lookup),
            insight: InsightEnvConfig::from_vars(&lookup)
                .context("Failed to load insight config")?,
            server: ServerEnvConfig::from_vars(&lookup),
        })
    }
}

/// Non-empty, trimmed value of `key`.
pub(crate) fn lookup_string<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup_string(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Parses `key`, falling back to `default` when unset or unparseable.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup_string(lookup, key) {
        None => default,
        Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default {}", key, raw, default);
            default
        }),
    }
}

#[cfg(test)]
pub(crate) fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}
