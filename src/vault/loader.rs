//! Full scan of the archive tree.
//!
//! Each level of `<subject>/<direction>/<year>/<month>/<file>` is guarded by a
//! small predicate; anything that fails one is skipped, and anything that
//! fails to read is recorded as an issue. The scan itself never fails.

use crate::vault::layout::{MESSAGE_EXT, decode_file_name};
use crate::vault::record::{Direction, MessageRecord};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub records: Vec<MessageRecord>,
    pub issues: Vec<ScanIssue>,
}

impl ScanReport {
    fn issue(&mut self, path: &Path, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(path = %path.display(), %reason, "skipping archive entry");
        self.issues.push(ScanIssue {
            path: path.to_path_buf(),
            reason,
        });
    }
}

pub fn direction_of(dir: &Path) -> Option<Direction> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .and_then(Direction::from_dir_name)
}

/// Year and month folders are all-digit names.
pub fn is_calendar_dir(dir: &Path) -> bool {
    dir.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
}

pub fn is_message_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MESSAGE_EXT)
}

fn subject_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(ToOwned::to_owned)
}

fn child_dirs(dir: &Path, report: &mut ScanReport) -> Vec<PathBuf> {
    children(dir, report)
        .into_iter()
        .filter(|p| p.is_dir())
        .collect()
}

fn children(dir: &Path, report: &mut ScanReport) -> Vec<PathBuf> {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(err) => {
            report.issue(dir, format!("failed to list directory: {err}"));
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => out.push(entry.path()),
            Err(err) => report.issue(dir, format!("failed to read directory entry: {err}")),
        }
    }
    out
}

fn load_record(
    path: &Path,
    subject: &str,
    direction: Direction,
) -> Result<MessageRecord, String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| "filename is not valid UTF-8".to_string())?;
    let stored = decode_file_name(file_name).map_err(|err| err.to_string())?;
    let body = fs::read_to_string(path).map_err(|err| format!("failed to read message: {err}"))?;

    Ok(MessageRecord {
        subject: subject.to_string(),
        direction,
        timestamp: stored.timestamp,
        body,
        path: path.to_path_buf(),
    })
}

pub fn scan(root: &Path) -> ScanReport {
    let mut report = ScanReport::default();
    if !root.is_dir() {
        debug!(root = %root.display(), "archive root missing; nothing to load");
        return report;
    }

    for subject_dir in child_dirs(root, &mut report) {
        let Some(subject) = subject_name(&subject_dir) else {
            report.issue(&subject_dir, "subject folder name is not valid UTF-8");
            continue;
        };

        let direction_dirs: Vec<(PathBuf, Direction)> = child_dirs(&subject_dir, &mut report)
            .into_iter()
            .filter_map(|dir| direction_of(&dir).map(|d| (dir, d)))
            .collect();

        for (direction_dir, direction) in direction_dirs {
            let month_dirs: Vec<PathBuf> = child_dirs(&direction_dir, &mut report)
                .into_iter()
                .filter(|dir| is_calendar_dir(dir))
                .flat_map(|year_dir| child_dirs(&year_dir, &mut report))
                .filter(|dir| is_calendar_dir(dir))
                .collect();

            for month_dir in month_dirs {
                for file in children(&month_dir, &mut report) {
                    if !file.is_file() || !is_message_file(&file) {
                        continue;
                    }
                    match load_record(&file, &subject, direction) {
                        Ok(record) => report.records.push(record),
                        Err(reason) => report.issue(&file, reason),
                    }
                }
            }
        }
    }

    debug!(
        root = %root.display(),
        records = report.records.len(),
        issues = report.issues.len(),
        "archive scan finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn put(root: &Path, rel: &str, body: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, body).expect("write");
        path
    }

    #[test]
    fn missing_root_yields_empty_report() {
        let tmp = tempdir().expect("tempdir");
        let report = scan(&tmp.path().join("absent"));
        assert!(report.records.is_empty());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn loads_valid_files_and_skips_bad_siblings() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        put(root, "JaneDoe/sent/2024/03/2024-03-05_10-15-00_2cf24dba5fb0.txt", "hello");
        put(root, "JaneDoe/sent/2024/03/not-a-date_abc.txt", "broken");
        put(root, "JaneDoe/received/2024/04/2024-04-01_08-00-00_aaaaaaaaaaaa.txt", "hi back");

        let report = scan(root);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].path.ends_with("not-a-date_abc.txt"));

        let sent = report
            .records
            .iter()
            .find(|r| r.direction == Direction::Sent)
            .expect("sent record");
        assert_eq!(sent.subject, "JaneDoe");
        assert_eq!(sent.body, "hello");
        assert_eq!(sent.timestamp, Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap());
    }

    #[test]
    fn unreadable_body_is_an_issue_not_a_failure() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        put(root, "JaneDoe/sent/2024/03/2024-03-05_10-15-00_2cf24dba5fb0.txt", "hello");
        let broken = put(root, "JaneDoe/sent/2024/03/2024-03-06_10-15-00_aaaaaaaaaaaa.txt", "");
        fs::write(&broken, [0xff, 0xfe, 0x00, 0xc3]).expect("write invalid utf-8");

        let report = scan(root);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].body, "hello");
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, broken);
        assert!(report.issues[0].reason.starts_with("failed to read message"));
    }

    #[test]
    fn ignores_entries_outside_the_layout() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path();
        put(root, "native_host.log", "log line");
        put(root, "JaneDoe/drafts/2024/03/2024-03-05_10-15-00_x.txt", "wrong direction");
        put(root, "JaneDoe/sent/latest/03/2024-03-05_10-15-00_x.txt", "bad year");
        put(root, "JaneDoe/sent/2024/March/2024-03-05_10-15-00_x.txt", "bad month");
        put(root, "JaneDoe/sent/2024/03/2024-03-05_10-15-00_x.md", "not txt");
        put(root, "JaneDoe/sent/2024/03/.tmpAbC123", "staging leftover");

        let report = scan(root);
        assert!(report.records.is_empty());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn stage_predicates() {
        assert_eq!(direction_of(Path::new("/v/x/sent")), Some(Direction::Sent));
        assert_eq!(direction_of(Path::new("/v/x/Received")), None);
        assert!(is_calendar_dir(Path::new("/v/x/sent/2024")));
        assert!(!is_calendar_dir(Path::new("/v/x/sent/20x4")));
        assert!(is_message_file(Path::new("a/b.txt")));
        assert!(!is_message_file(Path::new("a/b.txt.bak")));
    }
}
