use anyhow::Result;

use crate::commands::CommandReport;
use crate::vault::config::VaultConfig;
use crate::vault::paths::VaultPaths;
use crate::vault::record::Direction;
use crate::vault::store::Vault;

pub fn run(paths: &VaultPaths, cfg: &VaultConfig) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");

    report.detail(format!("vault_root={}", paths.vault_root.display()));
    report.detail(format!("log_file={}", paths.log_file.display()));
    match &paths.config_file {
        Some(path) if path.exists() => report.detail(format!("config_file={}", path.display())),
        Some(path) => report.detail(format!("config_file={} (absent, defaults)", path.display())),
        None => report.detail("config_file=none"),
    }
    report.detail(format!("logging.level={}", cfg.logging.level));
    report.detail(format!("viewer.snippet_chars={}", cfg.viewer.snippet_chars));
    report.detail(format!("viewer.time_zone={}", cfg.viewer.time_zone));

    if !paths.vault_root.exists() {
        report.detail("vault root does not exist yet; nothing archived");
        return Ok(report);
    }

    let scan = Vault::new(&paths.vault_root).scan();
    let sent = scan
        .records
        .iter()
        .filter(|r| r.direction == Direction::Sent)
        .count();
    report.detail(format!("messages.total={}", scan.records.len()));
    report.detail(format!("messages.sent={sent}"));
    report.detail(format!("messages.received={}", scan.records.len() - sent));
    report.detail(format!("scan.issues={}", scan.issues.len()));
    report.scan_warnings(&scan.issues);

    Ok(report)
}
