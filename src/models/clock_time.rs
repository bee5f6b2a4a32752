//! `HH:MM` wall-clock time handling.
//!
//! Attendance logs and the attendance policy store times of day as
//! zero-padded `HH:MM` strings. The helpers here convert between that
//! format and [`NaiveTime`], including the serde adapters used by the
//! persisted models.

use chrono::NaiveTime;

use super::attendance::OPEN_CLOCK_OUT;

const HHMM: &str = "%H:%M";

/// Parses an `HH:MM` string into a time of day.
///
/// Returns `None` for anything that is not a valid 24-hour time,
/// including the open clock-out sentinel `--:--`.
///
/// # Examples
///
/// ```
/// use hr_core::models::parse_hhmm;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_hhmm("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
/// assert_eq!(parse_hhmm("--:--"), None);
/// assert_eq!(parse_hhmm("25:00"), None);
/// ```
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), HHMM).ok()
}

/// Formats a time of day as `HH:MM`, dropping seconds.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(HHMM).to_string()
}

/// Serde adapter for a required `HH:MM` field.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| de::Error::custom(format!("expected HH:MM time, got '{raw}'")))
    }
}

/// Serde adapter for a clock-out field where `--:--` means "still open".
pub(crate) mod hhmm_or_open {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::OPEN_CLOCK_OUT;

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_str(&super::format_hhmm(*time)),
            None => serializer.serialize_str(OPEN_CLOCK_OUT),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == OPEN_CLOCK_OUT {
            return Ok(None);
        }
        super::parse_hhmm(&raw).map(Some).ok_or_else(|| {
            de::Error::custom(format!("expected HH:MM or {OPEN_CLOCK_OUT}, got '{raw}'"))
        })
    }
}
