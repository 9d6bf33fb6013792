use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Pacific::Auckland;
use chrono_tz::Tz;

/// Time zone incident remarks are displayed in.
pub const NZ_TIME_ZONE: Tz = Auckland;

/// Suffix appended to every local time shown to operators.
pub const NZ_TIME_SUFFIX: &str = "NZT";

// `%z` takes both `+13:00` and `+1300`.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the ISO 8601 timestamps the outage API sends. Values carrying an
/// offset keep it; values without one (including a bare date, read as
/// midnight) are taken to be UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc));
    }
    if let Some(date_time) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
    {
        return Some(date_time.with_timezone(&Utc));
    }

    let naive = value
        .strip_suffix(|c: char| c == 'Z' || c == 'z')
        .unwrap_or(value);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Renders `instant` the way the `en-NZ` locale does, e.g. `15/01/2024, 2:30:00 pm`.
pub fn format_en_nz(instant: &DateTime<Utc>, time_zone: Tz) -> String {
    instant
        .with_timezone(&time_zone)
        .format("%d/%m/%Y, %-I:%M:%S %P")
        .to_string()
}

/// `format_en_nz` followed by the literal ` NZT` suffix.
pub fn format_nz_display(instant: &DateTime<Utc>, time_zone: Tz) -> String {
    format!("{} {NZ_TIME_SUFFIX}", format_en_nz(instant, time_zone))
}
