use anyhow::{Context, Result};
use std::fs;
use std::io;

use crate::logging;
use crate::native::host::{ServeSummary, serve};
use crate::vault::config::load_config;
use crate::vault::paths::resolve_paths;
use crate::vault::store::Vault;

/// Entry point for the browser-launched native messaging host.
pub fn run() -> Result<ServeSummary> {
    let paths = resolve_paths()?;
    fs::create_dir_all(&paths.vault_root)
        .with_context(|| format!("failed to create {}", paths.vault_root.display()))?;

    let cfg = load_config()?;
    logging::init_file_logging(&paths.log_file, &cfg.logging.level)?;
    tracing::debug!(root = %paths.vault_root.display(), "native host started");

    let vault = Vault::new(&paths.vault_root);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = serve(&vault, stdin.lock(), stdout.lock());
    if let Err(err) = &result {
        tracing::error!(err = %format!("{err:#}"), "native host stopped on framing fault");
    }
    result
}
