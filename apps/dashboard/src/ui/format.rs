use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a backend timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// Offset-qualified input is converted to local time. A naive date-time is
/// already local (the backend emits `datetime.now().isoformat()`). A bare
/// date means UTC midnight. Anything unparsable is returned unchanged.
pub fn format_start_time(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return chrono::Utc
                .from_utc_datetime(&midnight)
                .with_timezone(&Local)
                .format(DISPLAY_FORMAT)
                .to_string();
        }
    }

    raw.to_string()
}
