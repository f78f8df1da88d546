use std::{env, path::PathBuf, time::Duration};

use anyhow::Context as _;

use noelle_utils::pagination::DEFAULT_TIMEOUT_SECS;

/// Default location of the guide data file.
pub const DEFAULT_DATA_PATH: &str = "/data/character_build_data.json";

/// Startup settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (`DISCORD_TOKEN`).
    pub token: String,
    /// Guide data file (`CHARACTER_DATA_PATH`).
    pub data_path: PathBuf,
    /// Extra owner user IDs (`OWNER_IDS`, comma-separated).
    pub owner_ids: Vec<u64>,
    /// Lifetime of paginated messages (`PAGINATION_TIMEOUT_SECS`).
    pub page_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("DISCORD_TOKEN is not set")?;

        let data_path = lookup("CHARACTER_DATA_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);

        let owner_ids = match lookup("OWNER_IDS") {
            Some(raw) => parse_owner_ids(&raw)?,
            None => Vec::new(),
        };

        let timeout_secs = match lookup("PAGINATION_TIMEOUT_SECS") {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            token,
            data_path,
            owner_ids,
            page_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse a comma-separated list of user IDs; blank entries are skipped.
pub fn parse_owner_ids(raw: &str) -> anyhow::Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<u64>()
                .with_context(|| format!("invalid owner id `{entry}` in OWNER_IDS"))
        })
        .collect()
}

/// Longest page lifetime: interaction tokens stop accepting edits after 15 minutes.
pub const MAX_TIMEOUT_SECS: u64 = 900;

fn parse_timeout_secs(raw: &str) -> anyhow::Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid PAGINATION_TIMEOUT_SECS `{raw}`"))?;
    anyhow::ensure!(secs > 0, "PAGINATION_TIMEOUT_SECS must be positive");
    anyhow::ensure!(
        secs <= MAX_TIMEOUT_SECS,
        "PAGINATION_TIMEOUT_SECS must be at most {MAX_TIMEOUT_SECS}"
    );
    Ok(secs)
}
