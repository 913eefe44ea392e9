use anyhow::Result;

use crate::commands::{CommandReport, FilterOptions, ViewerSession};
use crate::vault::config::VaultConfig;
use crate::vault::paths::VaultPaths;
use crate::vault::view::render_detail;

/// Show the full message at `index` in the filtered, newest-first listing.
pub fn run(
    paths: &VaultPaths,
    cfg: &VaultConfig,
    opts: &FilterOptions,
    index: usize,
) -> Result<CommandReport> {
    let session = ViewerSession::open(paths, cfg, opts)?;
    let mut report = CommandReport::new("show");

    let visible = session.visible();
    let Some(record) = visible.get(index) else {
        report.issue(format!(
            "no message at index {index}; the current filter matches {}",
            visible.len()
        ));
        return Ok(report);
    };

    report.detail(render_detail(record, &session.filter.zone));
    report.detail(format!("file={}", record.path.display()));
    Ok(report)
}
