use bps_domain::constants::ENV_PREFIX;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "server";

/// Configuration loading failures.
#[bps_derive::bps_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration file and overlays `BPS__`-prefixed environment variables.
///
/// 1. **Base file**: `path`, or `server` in the working directory when `None`.
///    The extension may be omitted; any format the `config` crate knows is tried.
/// 2. **Environment**: `BPS__SECTION__KEY` overrides `section.key`,
///    e.g. `BPS__SERVER__PORT=8080`.
///
/// # Errors
/// Fails when the file is missing, unparsable, or does not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_prefix(path, ENV_PREFIX)
}

/// [`load_config`] with a caller-chosen environment prefix.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with_prefix<T>(
    path: Option<impl AsRef<Path>>,
    env_prefix: &str,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!(path = %path.display(), env_prefix, "Loading config");

    Config::builder()
        .add_source(File::from(path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
