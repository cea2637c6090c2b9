//! Startup configuration read from the environment (`.env` supported by the binaries).

use crate::service::ServiceCommand;
use anyhow::{Context, Result};
use std::env;
use tracing::info;

const DEFAULT_RUNTIME: &str = "java";
const DEFAULT_CLASSPATH: &str = ".:lib/*";
const DEFAULT_MAIN_CLASS: &str = "MovieService";
const DEFAULT_USER_ID: i64 = 1;
const DEFAULT_PLACEHOLDER: &str = "Movie 1,Movie 2,Movie 3";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub service: ServiceCommand,
    pub user_id: i64,
    pub placeholder_list: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service: ServiceCommand::java(DEFAULT_RUNTIME, DEFAULT_CLASSPATH, DEFAULT_MAIN_CLASS),
            user_id: DEFAULT_USER_ID,
            placeholder_list: split_list(DEFAULT_PLACEHOLDER),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            "Movie service command: {}",
            config.service.argv(&[]).join(" ")
        );
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let runtime = get("MOVIE_SERVICE_RUNTIME").unwrap_or_else(|| DEFAULT_RUNTIME.to_string());
        let classpath =
            get("MOVIE_SERVICE_CLASSPATH").unwrap_or_else(|| DEFAULT_CLASSPATH.to_string());
        let main_class =
            get("MOVIE_SERVICE_MAIN").unwrap_or_else(|| DEFAULT_MAIN_CLASS.to_string());
        let user_id = match get("MOVIE_USER_ID") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("MOVIE_USER_ID must be an integer, got '{}'", raw))?,
            None => DEFAULT_USER_ID,
        };
        let placeholder_list = split_list(
            &get("MOVIE_LIST_PLACEHOLDER").unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        );

        Ok(Self {
            service: ServiceCommand::java(&runtime, &classpath, &main_class),
            user_id,
            placeholder_list,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
