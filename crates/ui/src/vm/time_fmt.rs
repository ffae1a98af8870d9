use chrono::{DateTime, Local, TimeZone, Utc};

/// Timestamp shown next to a quiz file, in the machine's local time zone.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    format_in(value, &Local)
}

pub(crate) fn format_in<Tz: TimeZone>(value: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    value.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}
