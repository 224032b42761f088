use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::ScanArgs;
use crate::fetch::FetchMode;

pub const DEFAULT_BASE_URL: &str = "https://www.konzolvilag.hu/switch/jatekok";

// the shop serves a bot-detection page to obviously non-browser agents
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

const DEFAULT_RETRY_LIMIT: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct Config {
    /// Base listing URL; page N lives at `{base_url}/oldal-{N}`.
    pub base_url: String,
    pub user_agent: String,
    /// How many failed fetches a run tolerates before giving up.
    pub retry_limit: u32,
    pub timeout_secs: u64,
    pub fetch_mode: FetchMode,
    /// Store file override; `None` means the platform data directory.
    pub store_path: Option<PathBuf>,
    pub json_output: bool,
    pub verbose: bool,
}

/// Optional file layer (~/.config/consoletrack/config.toml). Every field is
/// optional; CLI arguments win over file values.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub retry_limit: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub store_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Read the config file if one exists. A missing file is the common
    /// case and yields defaults; a present but malformed file is an error
    /// rather than a silent fallback.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let Some(dirs) = directories::ProjectDirs::from("", "", "consoletrack") else {
            return Ok(ConfigFile::default());
        };

        let path = dirs.config_dir().join("config.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigFile::default())
            }
            Err(e) => return Err(e.into()),
        };

        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| format!("invalid config file {}: {e}", path.display()))?;
        Ok(file)
    }
}

impl Config {
    pub fn from_scan_args(args: &ScanArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let file = ConfigFile::load()?;

        let fetch_mode = if args.cached {
            FetchMode::Cached
        } else {
            FetchMode::Live
        };

        Ok(Config {
            base_url: args
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: file
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            retry_limit: file.retry_limit.unwrap_or(DEFAULT_RETRY_LIMIT),
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            fetch_mode,
            store_path: args.store.clone().or(file.store_path),
            json_output: args.json,
            verbose: args.verbose,
        })
    }

    pub fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry_limit: DEFAULT_RETRY_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fetch_mode: FetchMode::Live,
            store_path: None,
            json_output: false,
            verbose: false,
        }
    }
}
