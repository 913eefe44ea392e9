use crate::vault::paths::resolve_config_path;
use crate::vault::view::DEFAULT_SNIPPET_CHARS;
use crate::vault::zone::DisplayZone;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub snippet_chars: usize,
    pub time_zone: String,
}

fn default_time_zone() -> String {
    "local".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            time_zone: default_time_zone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VaultConfig {
    pub logging: LoggingConfig,
    pub viewer: ViewerConfig,
}

impl VaultConfig {
    pub fn display_zone(&self) -> Result<DisplayZone> {
        self.viewer.time_zone.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialVaultConfig {
    logging: Option<LoggingConfig>,
    viewer: Option<ViewerConfig>,
}

fn env_or_usize(var: &str, fallback: usize) -> usize {
    match env::var(var) {
        Ok(v) => v.trim().parse::<usize>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn validate(cfg: &VaultConfig) -> Result<()> {
    let level = cfg.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(anyhow!(
            "invalid log level `{}`: use one of {}",
            cfg.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
    if cfg.viewer.snippet_chars == 0 {
        return Err(anyhow!("invalid snippet length: must be >= 1 character"));
    }
    cfg.display_zone()?;
    Ok(())
}

fn merge_file_config(base: &mut VaultConfig, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path)?;
    let parsed: PartialVaultConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse vault config {}: {err}", path.display()))?;
    if let Some(logging) = parsed.logging {
        base.logging = logging;
    }
    if let Some(viewer) = parsed.viewer {
        base.viewer = viewer;
    }
    Ok(())
}

fn apply_env_overrides(cfg: &mut VaultConfig) {
    cfg.logging.level = env_or_string("MESSAGE_VAULT_LOG_LEVEL", &cfg.logging.level);
    cfg.viewer.snippet_chars = env_or_usize("MESSAGE_VAULT_SNIPPET_CHARS", cfg.viewer.snippet_chars);
    cfg.viewer.time_zone = env_or_string("MESSAGE_VAULT_TIME_ZONE", &cfg.viewer.time_zone);
}

pub fn load_config_from(path: Option<&Path>) -> Result<VaultConfig> {
    let mut cfg = VaultConfig::default();
    if let Some(path) = path {
        merge_file_config(&mut cfg, path)?;
    }
    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}

pub fn load_config() -> Result<VaultConfig> {
    load_config_from(resolve_config_path().as_deref())
}
