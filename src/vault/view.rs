use crate::vault::record::MessageRecord;
use crate::vault::zone::{DETAIL_TIME_FORMAT, DisplayZone, ROW_DATE_FORMAT};
use serde::Serialize;

pub const DEFAULT_SNIPPET_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub date: String,
    pub direction: String,
    pub subject: String,
    pub snippet: String,
}

/// First `max_chars` characters on one line, with `...` when cut.
pub fn snippet(body: &str, max_chars: usize) -> String {
    let mut out: String = body
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if body.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

pub fn table_rows(records: &[&MessageRecord], zone: &DisplayZone, max_chars: usize) -> Vec<TableRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, r)| TableRow {
            index,
            date: zone.format(&r.timestamp, ROW_DATE_FORMAT),
            direction: r.direction.to_string(),
            subject: r.subject.clone(),
            snippet: snippet(&r.body, max_chars),
        })
        .collect()
}

pub fn render_row(row: &TableRow) -> String {
    format!(
        "{:>4}  {}  {:<8}  {:<16}  {}",
        row.index, row.date, row.direction, row.subject, row.snippet
    )
}

pub fn render_detail(record: &MessageRecord, zone: &DisplayZone) -> String {
    format!(
        "Prisoner: {}\nType: {}\nDate: {}\n\n{}",
        record.subject,
        record.direction,
        zone.format(&record.timestamp, DETAIL_TIME_FORMAT),
        record.body
    )
}
