//! Resolves "today" in the configured timezone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Look up the current UTC offset for a canonical timezone name, e.g.
/// "Pacific/Auckland".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current calendar date in `canonical_timezone`.
///
/// Falls back to UTC with a warning if the timezone name is not recognized;
/// a misconfigured timezone shifts the window boundaries by at most a day
/// and should not take the dashboard down.
pub fn today_in(canonical_timezone: &str) -> Date {
    let offset = match get_local_offset(canonical_timezone) {
        Some(offset) => offset,
        None => {
            tracing::warn!("unknown timezone {canonical_timezone:?}, falling back to UTC");
            UtcOffset::UTC
        }
    };

    OffsetDateTime::now_utc().to_offset(offset).date()
}
