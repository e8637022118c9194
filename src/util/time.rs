use chrono::{DateTime, NaiveDate, Utc};

/// Compact day format the delivery site expects, e.g. `20210429`.
pub const COMPACT_DATE: &str = "%Y%m%d";

/// Report header timestamp, e.g. `Thu, 29 Apr 2021 09:00:00 UTC`.
pub const REPORT_TIMESTAMP: &str = "%a, %d %b %Y %H:%M:%S UTC";

// Parse "YYYY-MM-DD" or "YYYYMMDD". Returns None if unparseable.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, COMPACT_DATE))
        .ok()
}

pub fn compact_date(d: NaiveDate) -> String {
    d.format(COMPACT_DATE).to_string()
}

pub fn report_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(REPORT_TIMESTAMP).to_string()
}
