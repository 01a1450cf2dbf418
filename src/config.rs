use crate::error::{LandasError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_ENV: &str = "LANDAS_HOME";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LandasConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolchainConfig {
    /// Compiler to probe instead of the CXX/CC/PATH discovery chain.
    #[serde(default)]
    pub cxx: Option<String>,

    /// Extra arguments appended to every probe invocation.
    #[serde(default)]
    pub args: Vec<String>,
}

impl LandasConfig {
    pub fn load(landas_home: &Path) -> Result<Self> {
        let config_path = landas_home.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            log::debug!("Config file not found at {config_path:?}, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: LandasConfig = toml::from_str(&contents)
            .map_err(|e| LandasError::ConfigFile(format!("Failed to parse config.toml: {e}")))?;

        log::debug!("Loaded config from {config_path:?}");
        Ok(config)
    }

    pub fn save(&self, landas_home: &Path) -> Result<()> {
        let config_path = landas_home.join(CONFIG_FILE_NAME);

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| LandasError::ConfigFile(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }
}

/// Home directory resolution: `LANDAS_HOME` if set, else `~/.landas`.
pub fn landas_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV)
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|home| home.join(".landas"))
        .ok_or_else(|| LandasError::ConfigFile("Cannot determine home directory".to_string()))
}

pub fn new_landas_config() -> Result<LandasConfig> {
    LandasConfig::load(&landas_home()?)
}
