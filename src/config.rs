use crate::frontend::FrontendSettings;
use crate::tmdb::TMDB_BASE;
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:3146";
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub addr: SocketAddr,
    pub viewport_width: u32,
    pub frontend: FrontendSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let tmdb_api_key = get("TMDB_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("Missing required environment variable: TMDB_API_KEY"))?;
        let tmdb_base_url = get("TMDB_BASE_URL").unwrap_or_else(|| TMDB_BASE.to_string());
        let addr = get("MOVIESTREAM_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("MOVIESTREAM_ADDR is not a socket address")?;
        let viewport_width = match get("MOVIESTREAM_VIEWPORT_WIDTH") {
            Some(v) => v
                .parse()
                .context("MOVIESTREAM_VIEWPORT_WIDTH must be a pixel count")?,
            None => DEFAULT_VIEWPORT_WIDTH,
        };
        let debounce_ms = match get("MOVIESTREAM_SEARCH_DEBOUNCE_MS") {
            Some(v) => v
                .parse()
                .context("MOVIESTREAM_SEARCH_DEBOUNCE_MS must be milliseconds")?,
            None => DEFAULT_SEARCH_DEBOUNCE_MS,
        };

        Ok(Self {
            tmdb_api_key,
            tmdb_base_url,
            addr,
            viewport_width,
            frontend: FrontendSettings {
                search_debounce: Duration::from_millis(debounce_ms),
                ..FrontendSettings::default()
            },
        })
    }
}
