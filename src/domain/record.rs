use chrono::NaiveDate;
use thiserror::Error;

/// Maximum number of characters of a raw date value that carry meaning;
/// anything past that is trailing noise from the source and is dropped
/// before parsing.
const RAW_DATE_SIGNIFICANT_CHARS: usize = 13;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("date {0:?} is too short to contain a yyyy-mm-dd prefix")]
    DateTooShort(String),
    #[error("date {0:?} has a non-numeric {1} segment")]
    NonNumericDateSegment(String, &'static str),
    #[error("date {0:?} does not name a valid calendar day")]
    DateOutOfRange(String),
    #[error("duration {0:?} is too short, expected \"<minutes>:<seconds>\"")]
    DurationTooShort(String),
    #[error("duration {0:?} has a non-numeric {1} segment")]
    NonNumericDurationSegment(String, &'static str),
    #[error("duration {0:?} has seconds outside 00-59")]
    SecondsOutOfRange(String),
}

/// Elapsed memorization time. Seconds stay in `0..=59`; minutes have no
/// upper bound (no hour rollover).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorizationDuration {
    minutes: u32,
    seconds: u32,
}

impl MemorizationDuration {
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl std::fmt::Display for MemorizationDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// One memorization session as recorded in the source database: the day it
/// was memorized (absent when the source cell was empty) and how long it
/// took. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorizationRecord {
    date: Option<NaiveDate>,
    duration: MemorizationDuration,
}

impl MemorizationRecord {
    /// Builds a record from the raw source strings.
    ///
    /// An empty `raw_date` yields a record without a date; a malformed
    /// non-empty one is a `FormatError`. The duration is parsed and
    /// validated unconditionally, even when the date is empty.
    pub fn parse(raw_date: &str, raw_duration: &str) -> Result<Self, FormatError> {
        let date = if raw_date.is_empty() {
            None
        } else {
            Some(parse_date(raw_date)?)
        };
        let duration = parse_duration(raw_duration)?;

        Ok(MemorizationRecord { date, duration })
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    pub fn duration(&self) -> MemorizationDuration {
        self.duration
    }

    /// `yyyy-MM-dd`, or `"-"` when the date is undefined.
    pub fn formatted_date(&self) -> String {
        match self.date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "-".to_string(),
        }
    }

    /// `mm:ss`, minutes zero-padded to at least two digits, never truncated.
    pub fn formatted_duration(&self) -> String {
        self.duration.to_string()
    }

    /// Day count since the spreadsheet epoch anchor (1899-12-30), the
    /// numeric encoding spreadsheet date cells expect. `None` when the
    /// date is undefined.
    pub fn serial_date(&self) -> Option<i64> {
        self.date
            .map(|date| date.signed_duration_since(sheets_epoch()).num_days())
    }

    /// Fraction-of-day encoding of the duration, rounded to 9 decimal
    /// digits. Integer total seconds over 86400, not a 1/86400 literal.
    pub fn serial_duration(&self) -> f64 {
        let fraction = self.duration.total_seconds() as f64 / SECONDS_PER_DAY as f64;
        (fraction * 1e9).round() / 1e9
    }
}

fn sheets_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("1899-12-30 is a valid date")
}

/// Parses the `yyyy-mm-dd` prefix of a raw date value. Only the first
/// 13 characters are considered; the truncation happens before parsing.
/// Separator characters are not validated.
fn parse_date(raw: &str) -> Result<NaiveDate, FormatError> {
    let significant: String = raw.chars().take(RAW_DATE_SIGNIFICANT_CHARS).collect();

    let too_short = || FormatError::DateTooShort(significant.clone());
    let year_str = significant.get(0..4).ok_or_else(too_short)?;
    let month_str = significant.get(5..7).ok_or_else(too_short)?;
    let day_str = significant.get(8..10).ok_or_else(too_short)?;

    let year: i32 = parse_segment(year_str, &significant, "year")?;
    let month: u32 = parse_segment(month_str, &significant, "month")?;
    let day: u32 = parse_segment(day_str, &significant, "day")?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FormatError::DateOutOfRange(significant.clone()))
}

fn parse_segment<T: std::str::FromStr>(
    segment: &str,
    raw: &str,
    name: &'static str,
) -> Result<T, FormatError> {
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::NonNumericDateSegment(raw.to_string(), name));
    }
    segment
        .parse()
        .map_err(|_| FormatError::NonNumericDateSegment(raw.to_string(), name))
}

/// Parses `"<minutes>:<seconds>"`: the last two characters are the seconds
/// digits, everything before the three-character `":ss"` suffix is the
/// minutes integer.
fn parse_duration(raw: &str) -> Result<MemorizationDuration, FormatError> {
    if raw.len() < 4 || !raw.is_char_boundary(raw.len() - 3) {
        return Err(FormatError::DurationTooShort(raw.to_string()));
    }

    let minutes_str = &raw[..raw.len() - 3];
    let seconds_str = &raw[raw.len() - 2..];

    let numeric = |s: &str| s.bytes().all(|b| b.is_ascii_digit()) && !s.is_empty();
    if !numeric(minutes_str) {
        return Err(FormatError::NonNumericDurationSegment(
            raw.to_string(),
            "minutes",
        ));
    }
    if !numeric(seconds_str) {
        return Err(FormatError::NonNumericDurationSegment(
            raw.to_string(),
            "seconds",
        ));
    }

    let minutes: u32 = minutes_str
        .parse()
        .map_err(|_| FormatError::NonNumericDurationSegment(raw.to_string(), "minutes"))?;
    let seconds: u32 = seconds_str
        .parse()
        .map_err(|_| FormatError::NonNumericDurationSegment(raw.to_string(), "seconds"))?;

    if seconds > 59 {
        return Err(FormatError::SecondsOutOfRange(raw.to_string()));
    }

    Ok(MemorizationDuration { minutes, seconds })
}
