use crate::vault::record::{Direction, MessageRecord};
use crate::vault::zone::DisplayZone;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Only(Direction),
}

impl Category {
    pub fn matches(self, direction: Direction) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => d == direction,
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "sent" => Ok(Self::Only(Direction::Sent)),
            "received" => Ok(Self::Only(Direction::Received)),
            other => Err(anyhow!("invalid category `{other}`: use all, sent, or received")),
        }
    }
}

/// Conjunction of the viewer's four predicates. Date bounds are inclusive
/// and compared against the record's date in `zone`.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub keyword: String,
    pub category: Category,
    pub zone: DisplayZone,
}

impl MessageFilter {
    pub fn matches(&self, record: &MessageRecord) -> bool {
        self.matches_needle(record, &self.keyword.to_lowercase())
    }

    /// `needle` is the keyword already lowercased.
    fn matches_needle(&self, record: &MessageRecord, needle: &str) -> bool {
        let day = self.zone.date_of(&record.timestamp);
        if self.start.is_some_and(|start| day < start) {
            return false;
        }
        if self.end.is_some_and(|end| day > end) {
            return false;
        }
        if !self.category.matches(record.direction) {
            return false;
        }
        needle.is_empty() || record.body.to_lowercase().contains(needle)
    }

    pub fn apply<'a>(&self, records: &'a [MessageRecord]) -> Vec<&'a MessageRecord> {
        let needle = self.keyword.to_lowercase();
        records
            .iter()
            .filter(|r| self.matches_needle(r, &needle))
            .collect()
    }

    /// Fill unset bounds the way the viewer opens: oldest message through today.
    pub fn with_default_range(mut self, records: &[MessageRecord]) -> Self {
        let today = self.zone.today();
        if self.start.is_none() {
            self.start = Some(
                records
                    .iter()
                    .map(|r| r.timestamp)
                    .min()
                    .map(|oldest| self.zone.date_of(&oldest))
                    .unwrap_or(today),
            );
        }
        if self.end.is_none() {
            self.end = Some(today);
        }
        self
    }
}

pub fn sort_newest_first(records: &mut [MessageRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
