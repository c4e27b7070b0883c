//! "Until" evaluation: when does the vendor's current state change, and is
//! that later today?
//!
//! "Today" is always judged in the offset of the `until` timestamp (the
//! vendor's local offset), never in the caller's zone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike};

use super::errors::ClassifyError;

/// A resolved `until` timestamp, normalized to the vendor's local offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UntilVendor {
    pub date: NaiveDate,

    /// Local time-of-day, truncated to minutes.
    pub time: NaiveTime,

    pub is_today: bool,

    /// Offset the timestamp was written in.
    pub offset: FixedOffset,
}

/// Parses an ISO-8601 date-time with explicit offset.
///
/// Date and time are separated by an uppercase `T`, seconds are optional,
/// and the offset is `Z` or `±hh:mm` directly after the time.
pub fn parse_until(until: &str) -> Result<DateTime<FixedOffset>, ClassifyError> {
    let normalized = normalize_until(until)
        .map_err(|reason| ClassifyError::malformed_timestamp(until, reason))?;
    DateTime::parse_from_rfc3339(&normalized)
        .map_err(|err| ClassifyError::malformed_timestamp(until, err))
}

/// Checks the shape rfc3339 parsing is lenient about and fills in missing
/// seconds.
fn normalize_until(until: &str) -> Result<String, &'static str> {
    if !until.is_ascii() {
        return Err("non-ASCII characters");
    }
    if until.as_bytes().get(10) != Some(&b'T') {
        return Err("expected 'T' between date and time");
    }

    let offset_len = if until.ends_with('Z') {
        1
    } else if has_colon_offset(until) {
        6
    } else {
        return Err("expected offset 'Z' or '±hh:mm'");
    };
    let (local, offset) = until.split_at(until.len() - offset_len);
    if !local.ends_with(|c: char| c.is_ascii_digit()) {
        return Err("unexpected character before offset");
    }

    let time = local.get(11..).unwrap_or_default();
    if time.matches(':').count() == 1 {
        Ok(format!("{local}:00{offset}"))
    } else {
        Ok(until.to_string())
    }
}

fn has_colon_offset(until: &str) -> bool {
    let bytes = until.as_bytes();
    let Some(offset) = bytes.len().checked_sub(6).map(|start| &bytes[start..]) else {
        return false;
    };
    matches!(offset[0], b'+' | b'-')
        && offset[1].is_ascii_digit()
        && offset[2].is_ascii_digit()
        && offset[3] == b':'
        && offset[4].is_ascii_digit()
        && offset[5].is_ascii_digit()
}

/// Resolves an optional `until` against `now`.
///
/// Absent or empty input has no opinion and yields `None`. Anything else must
/// parse; a malformed timestamp is an upstream contract violation and is
/// returned as an error.
pub fn resolve_until<Tz: TimeZone>(
    until: Option<&str>,
    now: &DateTime<Tz>,
) -> Result<Option<UntilVendor>, ClassifyError> {
    let Some(until) = until.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let at = parse_until(until)?;
    let time = at.time();

    Ok(Some(UntilVendor {
        date: at.date_naive(),
        time: time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time),
        is_today: is_same_day(&at, now),
        offset: *at.offset(),
    }))
}

/// Calendar-date equality after moving `now` into `at`'s offset.
pub fn is_same_day<Tz: TimeZone>(at: &DateTime<FixedOffset>, now: &DateTime<Tz>) -> bool {
    now.with_timezone(at.offset()).date_naive() == at.date_naive()
}

/// Does a closed vendor open again later today?
///
/// Open vendors never "open later", and their `until` is not even parsed.
/// Only today counts: an `until` on a later date yields `false`.
pub fn opens_later<Tz: TimeZone>(
    is_open: bool,
    until: Option<&str>,
    now: &DateTime<Tz>,
) -> Result<bool, ClassifyError> {
    if is_open {
        return Ok(false);
    }

    let Some(until_vendor) = resolve_until(until, now)? else {
        return Ok(false);
    };
    if !until_vendor.is_today {
        return Ok(false);
    }

    let local_now = now.with_timezone(&until_vendor.offset);
    Ok(until_vendor.time > local_now.time())
}
