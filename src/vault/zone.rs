use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

pub const DETAIL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";
pub const ROW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Zone in which archived UTC instants are shown and filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Named(Tz),
}

impl DisplayZone {
    pub fn date_of(&self, at: &DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => at.with_timezone(&Local).date_naive(),
            Self::Named(tz) => at.with_timezone(tz).date_naive(),
        }
    }

    pub fn format(&self, at: &DateTime<Utc>, fmt: &str) -> String {
        match self {
            Self::Local => at.with_timezone(&Local).format(fmt).to_string(),
            Self::Named(tz) => at.with_timezone(tz).format(fmt).to_string(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(&Utc::now())
    }
}

impl FromStr for DisplayZone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| anyhow!("unknown time zone `{trimmed}`: use `local` or an IANA name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn named_zone_shifts_calendar_date() {
        let zone: DisplayZone = "America/New_York".parse().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 2, 0, 0).unwrap();
        assert_eq!(zone.date_of(&at), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(zone.format(&at, DETAIL_TIME_FORMAT), "2024-03-04 21:00:00 -05:00");
    }

    #[test]
    fn parses_local_and_rejects_garbage() {
        assert_eq!("local".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert_eq!("".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert!("Mars/Olympus".parse::<DisplayZone>().is_err());
    }
}
