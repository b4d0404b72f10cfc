use crate::{APP_NAME, Res, error::Error, file_watcher::WatcherKind};
use etcetera::BaseStrategy;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const ENV_PREFIX: &str = "SVNLINE_";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub svn: SvnConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SvnConfig {
    pub executable: PathBuf,
    pub backend: BackendKind,
    #[serde(default)]
    pub watcher: WatcherKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Cli,
    Xml,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("Failed to parse default_config.toml")
    }
}

impl Default for SvnConfig {
    fn default() -> Self {
        Config::default().svn
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    match etcetera::choose_base_strategy() {
        Ok(strategy) => Some(strategy.config_dir().join(APP_NAME).join("config.toml")),
        Err(e) => {
            log::warn!("Couldn't find config directory: {}", e);
            None
        }
    }
}

/// Defaults, then the config file, then `SVNLINE_SVN__*` environment variables.
pub fn init_config(path: Option<&Path>) -> Res<Config> {
    let path = path.map(Path::to_path_buf).or_else(default_config_path);

    let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));
    if let Some(path) = path {
        log::debug!("Reading config from {:?}", path);
        figment = figment.merge(Toml::file(path));
    }

    let config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| Error::Config(Box::new(e)))?;

    Ok(config)
}
