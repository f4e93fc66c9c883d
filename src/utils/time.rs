use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// `YYYYMMDD`, as embedded in application references.
pub fn compact_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%d").to_string()
}
