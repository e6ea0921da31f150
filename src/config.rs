use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::{UserRecord, default_users};
use crate::catalog::default_domains;
use crate::error::AppError;
use crate::models::Domain;

const APP_DIR: &str = "mockview";
const CONFIG_ENV: &str = "MOCKVIEW_CONFIG";
const DEFAULT_TICK_MS: u64 = 1000;

/// TOML 配置文件结构，所有字段可选
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub tick_interval_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub domains: Option<Vec<Domain>>,
    pub users: Option<Vec<UserRecord>>,
}

/// 运行时配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tick_interval: Duration,
    pub log_file: Option<PathBuf>,
    pub domains: Vec<Domain>,
    pub users: Vec<UserRecord>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            log_file: default_log_file(),
            domains: default_domains(),
            users: default_users(),
        }
    }
}

impl AppConfig {
    fn from_file(file: ConfigFile, path: &Path) -> Result<Self, AppError> {
        let defaults = Self::default();

        let tick_ms = file.tick_interval_ms.unwrap_or(DEFAULT_TICK_MS);
        if tick_ms == 0 {
            return Err(AppError::config(path, "tick_interval_ms must be greater than zero"));
        }
        let domains = file.domains.unwrap_or(defaults.domains);
        if domains.is_empty() {
            return Err(AppError::config(path, "at least one domain is required"));
        }

        Ok(Self {
            tick_interval: Duration::from_millis(tick_ms),
            log_file: file.log_file.or(defaults.log_file),
            domains,
            users: file.users.unwrap_or(defaults.users),
        })
    }
}

/// 配置文件路径：`$MOCKVIEW_CONFIG` 或 `~/.config/mockview/config.toml`
pub fn config_path() -> Option<PathBuf> {
    match env::var_os(CONFIG_ENV) {
        Some(path) => Some(PathBuf::from(path)),
        None => dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml")),
    }
}

/// 日志默认写到 `~/.local/share/mockview/mockview.log`
fn default_log_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("mockview.log"))
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content).map_err(|e| AppError::config(path, e))?;

    AppConfig::from_file(file, path)
}
