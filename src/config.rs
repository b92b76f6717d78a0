//! Runtime settings for the `ipcalc` binary.
//!
//! Values come from the environment (after `dotenv` has loaded any `.env`
//! file). Unknown or malformed values fall back to the defaults.

use std::env;

/// Default path of the log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Default number of hosts listed in a summary.
pub const DEFAULT_HOST_LIMIT: usize = 16;

/// How the binary prints a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<OutputFormat> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `IPCALC_LOG_CONFIG`
    pub log_config: String,
    /// `IPCALC_HOST_LIMIT`
    pub host_limit: usize,
    /// `IPCALC_OUTPUT`
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            host_limit: DEFAULT_HOST_LIMIT,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Config {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("IPCALC_LOG_CONFIG").filter(|p| !p.trim().is_empty()) {
            config.log_config = path;
        }

        if let Some(limit) = lookup("IPCALC_HOST_LIMIT") {
            match limit.trim().parse::<usize>() {
                Ok(limit) => config.host_limit = limit,
                Err(e) => log::warn!(
                    "Ignoring IPCALC_HOST_LIMIT={limit}: {e}, using {}",
                    DEFAULT_HOST_LIMIT
                ),
            }
        }

        if let Some(output) = lookup("IPCALC_OUTPUT") {
            match OutputFormat::parse(&output) {
                Some(format) => config.output = format,
                None => log::warn!("Ignoring IPCALC_OUTPUT={output}, expected text or json"),
            }
        }

        log::debug!("Config: {:?}", config);
        config
    }
}
