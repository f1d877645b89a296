//! CLI utilities for binaries
//!
//! Handles configuration path lookup (`--config`, `BEAM_CONFIG_PATH`) and
//! command parsing for the `beam` executable.

use std::path::PathBuf;

/// Project used when a command is given no project id
pub const DEFAULT_PROJECT_ID: &str = "AUTO123";

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Service client configuration (beam.yaml, or `BEAM_CONFIG_PATH`)
    Service,
    /// Path given with `--config`
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Service => "config/beam.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Environment variable that can replace the default path.
    /// An explicit `--config` path is never replaced.
    pub fn env_var_name(&self) -> Option<&str> {
        match self {
            ConfigType::Service => Some("BEAM_CONFIG_PATH"),
            ConfigType::Custom(_) => None,
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use beam_app::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Service);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    config_type
        .env_var_name()
        .and_then(|name| std::env::var(name).ok())
        .unwrap_or_else(|| config_type.default_path().to_string())
        .into()
}

/// Pull `--config <path>` / `--config=<path>` out of the argument list.
///
/// Returns the config to load and the remaining arguments.
pub fn take_config_arg(args: Vec<String>) -> Result<(ConfigType, Vec<String>), String> {
    let mut config_type = ConfigType::Service;
    let mut rest = Vec::with_capacity(args.len());
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let path = if arg == "--config" {
            args.next()
                .ok_or_else(|| "--config requires a path".to_string())?
        } else if let Some(path) = arg.strip_prefix("--config=") {
            path.to_string()
        } else {
            rest.push(arg);
            continue;
        };

        if path.is_empty() {
            return Err("--config requires a path".to_string());
        }
        if matches!(config_type, ConfigType::Custom(_)) {
            return Err("--config given more than once".to_string());
        }
        config_type = ConfigType::Custom(path);
    }

    Ok((config_type, rest))
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// What the `beam` binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print configuration and client state
    Info,
    /// Print the signed-in user
    WhoAmI,
    /// Print the emissions summary of a project
    Summary { project_id: String },
    /// Store the default project and material table
    Reset { project_id: String },
}

impl Command {
    /// Parse from arguments (program name excluded). No arguments means `info`.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut args = args.iter().map(String::as_str);
        let command = args.next().unwrap_or("info");
        let project_id = args.next().unwrap_or(DEFAULT_PROJECT_ID).to_string();

        if let Some(extra) = args.next() {
            return Err(format!("unexpected argument '{}'", extra));
        }

        match command {
            "info" => Ok(Command::Info),
            "whoami" => Ok(Command::WhoAmI),
            "summary" => Ok(Command::Summary { project_id }),
            "reset" => Ok(Command::Reset { project_id }),
            other => Err(format!(
                "unknown command '{}' (expected info, whoami, summary or reset)",
                other
            )),
        }
    }
}
