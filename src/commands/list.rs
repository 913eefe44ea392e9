use anyhow::Result;
use serde::Serialize;

use crate::commands::{CommandReport, FilterOptions, ViewerSession};
use crate::vault::config::VaultConfig;
use crate::vault::paths::VaultPaths;
use crate::vault::view::{TableRow, render_row, table_rows};

#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    pub report: CommandReport,
    pub rows: Vec<TableRow>,
}

pub fn run(paths: &VaultPaths, cfg: &VaultConfig, opts: &FilterOptions) -> Result<ListOutput> {
    let session = ViewerSession::open(paths, cfg, opts)?;
    let mut report = CommandReport::new("list");

    let visible = session.visible();
    let rows = table_rows(&visible, &session.filter.zone, cfg.viewer.snippet_chars);

    report.scan_warnings(&session.issues);
    for row in &rows {
        report.detail(render_row(row));
    }
    report.detail(format!(
        "showing {} of {} messages",
        rows.len(),
        session.records.len()
    ));

    Ok(ListOutput { report, rows })
}
