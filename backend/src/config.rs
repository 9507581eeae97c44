//! Runtime configuration, read from the environment.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::DEFAULT_CELEBRATION_DELAY;

/// Google Generative AI models endpoint
pub const DEFAULT_JUDGE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_JUDGE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

const DATABASE_FILE_NAME: &str = "sticker_card.db";

/// Settings for the behavior judge client
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Without a key every judgement falls back to the default approval
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// HTTP timeout for one judge request; none by default
    pub timeout: Option<Duration>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_JUDGE_MODEL.to_string(),
            base_url: DEFAULT_JUDGE_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    pub cors_origin: String,
    pub celebration_delay: Duration,
    pub judge: JudgeConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_directory = match get("STICKER_CARD_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_directory(&get)?,
        };

        let bind_address = get("STICKER_CARD_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse()
            .context("Invalid STICKER_CARD_BIND_ADDR")?;

        let celebration_delay = match get("STICKER_CARD_CELEBRATION_DELAY_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse().context("Invalid STICKER_CARD_CELEBRATION_DELAY_MS")?,
            ),
            None => DEFAULT_CELEBRATION_DELAY,
        };

        let timeout = get("STICKER_CARD_JUDGE_TIMEOUT_SECS")
            .map(|secs| secs.parse().map(Duration::from_secs))
            .transpose()
            .context("Invalid STICKER_CARD_JUDGE_TIMEOUT_SECS")?;

        let judge = JudgeConfig {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("STICKER_CARD_JUDGE_MODEL").unwrap_or_else(|| DEFAULT_JUDGE_MODEL.to_string()),
            base_url: get("STICKER_CARD_JUDGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_JUDGE_BASE_URL.to_string()),
            timeout,
        };

        Ok(Self {
            data_directory,
            bind_address,
            cors_origin: get("STICKER_CARD_CORS_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            celebration_delay,
            judge,
        })
    }

    /// Location of the SQLite file holding the cards
    pub fn database_path(&self) -> PathBuf {
        self.data_directory.join(DATABASE_FILE_NAME)
    }
}

/// ~/Documents/Sticker Card
fn default_data_directory<F>(get: &F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let home_dir = get("HOME")
        .or_else(|| get("USERPROFILE"))
        .ok_or_else(|| anyhow!("Could not determine home directory"))?;

    Ok(PathBuf::from(home_dir).join("Documents").join("Sticker Card"))
}
