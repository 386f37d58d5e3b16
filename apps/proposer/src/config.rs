use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ProposalError;

pub const DEFAULT_BRIEF_PATH: &str = "input/brief-1.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "proposals";
pub const DEFAULT_FONT_FAMILY: &str = "LiberationSans";
/// Upper bound on a single language model request.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Fails at startup if the API credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Overrides the Anthropic endpoint host, e.g. for a proxy.
    pub anthropic_base_url: Option<String>,
    pub brief_path: PathBuf,
    pub output_dir: PathBuf,
    pub fonts_dir: Option<PathBuf>,
    pub font_family: String,
    pub llm_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ProposalError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProposalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let anthropic_api_key = get("ANTHROPIC_API_KEY").ok_or_else(|| {
            ProposalError::Config(
                "Required environment variable 'ANTHROPIC_API_KEY' is not set".to_string(),
            )
        })?;

        let llm_timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                ProposalError::Config(format!(
                    "LLM_TIMEOUT_SECS must be a positive number of seconds, got '{raw}'"
                ))
            })?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        Ok(Config {
            anthropic_api_key,
            anthropic_base_url: get("ANTHROPIC_BASE_URL").map(|url| url.trim().to_string()),
            brief_path: get("BRIEF_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BRIEF_PATH)),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            fonts_dir: get("PROPOSAL_FONTS_DIR").map(PathBuf::from),
            font_family: get("FONT_FAMILY").unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
