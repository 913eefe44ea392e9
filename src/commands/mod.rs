pub mod host;
pub mod list;
pub mod show;
pub mod status;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::vault::config::VaultConfig;
use crate::vault::filter::{Category, MessageFilter, sort_newest_first};
use crate::vault::loader::ScanIssue;
use crate::vault::paths::VaultPaths;
use crate::vault::record::MessageRecord;
use crate::vault::store::Vault;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    /// Scan problems are worth showing but never fail a viewer command.
    pub fn scan_warnings(&mut self, issues: &[ScanIssue]) {
        for issue in issues {
            self.details.push(format!(
                "skipped {}: {}",
                issue.path.display(),
                issue.reason
            ));
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub keyword: Option<String>,
    pub category: Option<String>,
}

fn parse_date(raw: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid {flag} date `{raw}`: expected YYYY-MM-DD"))
}

/// Loaded archive plus the filter the viewer would open with.
pub struct ViewerSession {
    pub records: Vec<MessageRecord>,
    pub issues: Vec<ScanIssue>,
    pub filter: MessageFilter,
}

impl ViewerSession {
    pub fn open(paths: &VaultPaths, cfg: &VaultConfig, opts: &FilterOptions) -> Result<Self> {
        let scan = Vault::new(&paths.vault_root).scan();
        let mut records = scan.records;
        sort_newest_first(&mut records);

        let category = match opts.category.as_deref() {
            Some(raw) => raw.parse::<Category>()?,
            None => Category::All,
        };
        let filter = MessageFilter {
            start: opts.from.as_deref().map(|d| parse_date(d, "--from")).transpose()?,
            end: opts.to.as_deref().map(|d| parse_date(d, "--to")).transpose()?,
            keyword: opts.keyword.clone().unwrap_or_default(),
            category,
            zone: cfg.display_zone()?,
        }
        .with_default_range(&records);

        Ok(Self {
            records,
            issues: scan.issues,
            filter,
        })
    }

    pub fn visible(&self) -> Vec<&MessageRecord> {
        self.filter.apply(&self.records)
    }
}
