use anyhow::Result;
use std::env;
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "native_host.log";

#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub vault_root: PathBuf,
    pub log_file: PathBuf,
    pub config_file: Option<PathBuf>,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn default_vault_root(home: PathBuf) -> PathBuf {
    home.join("Documents").join("MessageVault")
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("MESSAGE_VAULT_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let base = dirs::config_dir()?;
    Some(base.join("message-vault").join("config.toml"))
}

pub fn resolve_paths() -> Result<VaultPaths> {
    let home = required_home_dir()?;
    let vault_root = env_or_default_path("MESSAGE_VAULT_HOME", default_vault_root(home));
    let log_file = env_or_default_path("MESSAGE_VAULT_LOG_FILE", vault_root.join(LOG_FILE_NAME));

    Ok(VaultPaths {
        vault_root,
        log_file,
        config_file: resolve_config_path(),
    })
}

#[cfg(test)]
mod tests {
    use super::default_vault_root;
    use std::path::PathBuf;

    #[test]
    fn default_root_lives_under_documents() {
        let got = default_vault_root(PathBuf::from("/home/alice"));
        assert_eq!(got, PathBuf::from("/home/alice/Documents/MessageVault"));
    }
}
