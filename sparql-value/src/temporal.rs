//! Temporal types for XSD dateTime, date, time and the Gregorian g* types
//!
//! This module provides structured temporal types that:
//! - Preserve the original lexical form for round-trip serialization
//! - Keep the local (as written) timeline position plus an optional timezone
//! - Support SPARQL accessor functions (YEAR, MONTH, DAY, HOURS, MINUTES, SECONDS, TZ)
//!
//! ## Comparison Semantics
//!
//! Values are compared with the XML Schema partial order (see [`temporal_cmp`]):
//!
//! - Both sides with a timezone: compare UTC-normalized positions.
//! - Neither side with a timezone: compare local positions.
//! - Exactly one side with a timezone: the floating side may lie anywhere in
//!   a +/-14h window, so the result is `None` (indeterminate) unless the other
//!   value falls outside that window.
//!
//! With [`DateTimeOrder::ImplicitUtc`] a missing timezone is read as `Z`.
//!
//! Missing fields take the XSD reference values (1972-12-31T00:00:00), so
//! `--12-25` and `---25` land on comparable timeline positions.

use crate::options::DateTimeOrder;
use bigdecimal::BigDecimal;
use chrono::{
    DateTime as ChronoDateTime, Datelike, Duration as ChronoDuration, FixedOffset, NaiveDate,
    NaiveDateTime, NaiveTime, Offset, Timelike, Utc,
};
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::cmp::Ordering;
use std::fmt;

const TZ: &str = r"(Z|[+-]\d{2}:\d{2})?";

static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(-?\d{{4,}})-(\d{{2}})-(\d{{2}})T(\d{{2}}):(\d{{2}}):(\d{{2}})(?:\.(\d+))?{TZ}$"
    ))
    .expect("static regex")
});
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(-?\d{{4,}})-(\d{{2}})-(\d{{2}}){TZ}$")).expect("static regex")
});
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(\d{{2}}):(\d{{2}}):(\d{{2}})(?:\.(\d+))?{TZ}$")).expect("static regex")
});
static G_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(-?\d{{4,}}){TZ}$")).expect("static regex"));
static G_YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(-?\d{{4,}})-(\d{{2}}){TZ}$")).expect("static regex"));
static G_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^--(\d{{2}}){TZ}$")).expect("static regex"));
static G_MONTH_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^--(\d{{2}})-(\d{{2}}){TZ}$")).expect("static regex"));
static G_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^---(\d{{2}}){TZ}$")).expect("static regex"));

/// XSD reference year used to fill in fields a type does not carry
const REFERENCE_YEAR: i32 = 1972;

/// Largest timezone offset XSD allows, in seconds
const MAX_TZ_SECS: i64 = 14 * 3600;

/// Shared view over the XSD seven-property model
pub trait Temporal {
    /// Timeline position as written (not timezone-normalized)
    fn local(&self) -> NaiveDateTime;

    /// Timezone offset, `None` when the lexical form has no timezone
    fn tz_offset(&self) -> Option<FixedOffset>;
}

/// Compare two temporal values of the same XSD type.
///
/// Returns `None` when the comparison is indeterminate.
pub fn temporal_cmp<T: Temporal + ?Sized>(a: &T, b: &T, order: DateTimeOrder) -> Option<Ordering> {
    let implicit = order == DateTimeOrder::ImplicitUtc;
    match (a.tz_offset(), b.tz_offset()) {
        (Some(ta), Some(tb)) => Some(to_utc(a.local(), ta).cmp(&to_utc(b.local(), tb))),
        (None, None) => Some(a.local().cmp(&b.local())),
        (Some(ta), None) if implicit => Some(to_utc(a.local(), ta).cmp(&b.local())),
        (None, Some(tb)) if implicit => Some(a.local().cmp(&to_utc(b.local(), tb))),
        (Some(ta), None) => window_cmp(to_utc(a.local(), ta), b.local()),
        (None, Some(tb)) => window_cmp(to_utc(b.local(), tb), a.local()).map(Ordering::reverse),
    }
}

fn to_utc(local: NaiveDateTime, offset: FixedOffset) -> NaiveDateTime {
    local
        .checked_sub_signed(ChronoDuration::seconds(offset.local_minus_utc() as i64))
        .unwrap_or(local)
}

/// Order a fixed UTC position against a floating local one
fn window_cmp(fixed: NaiveDateTime, floating: NaiveDateTime) -> Option<Ordering> {
    let window = ChronoDuration::seconds(MAX_TZ_SECS);
    let earliest = floating.checked_sub_signed(window)?;
    let latest = floating.checked_add_signed(window)?;
    if fixed < earliest {
        Some(Ordering::Less)
    } else if fixed > latest {
        Some(Ordering::Greater)
    } else {
        None
    }
}

fn format_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        "Z".to_string()
    } else {
        let hours = secs.abs() / 3600;
        let mins = (secs.abs() % 3600) / 60;
        let sign = if secs >= 0 { '+' } else { '-' };
        format!("{}{:02}:{:02}", sign, hours, mins)
    }
}

fn parse_tz(tz: Option<&str>) -> Result<Option<FixedOffset>, String> {
    let Some(tz) = tz else {
        return Ok(None);
    };
    if tz == "Z" {
        return Ok(Some(Utc.fix()));
    }
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let hours: i64 = tz[1..3].parse().map_err(|_| format!("Bad timezone: {}", tz))?;
    let mins: i64 = tz[4..6].parse().map_err(|_| format!("Bad timezone: {}", tz))?;
    let total = hours * 3600 + mins * 60;
    if mins >= 60 || total > MAX_TZ_SECS {
        return Err(format!("Timezone out of range: {}", tz));
    }
    FixedOffset::east_opt((sign * total) as i32)
        .map(Some)
        .ok_or_else(|| format!("Timezone out of range: {}", tz))
}

fn group<'a>(caps: &Captures<'a>, idx: usize) -> Option<&'a str> {
    caps.get(idx).map(|m| m.as_str())
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, idx: usize, what: &str) -> Result<T, String> {
    group(caps, idx)
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| format!("Bad {} field", what))
}

/// Fractional seconds digits to nanoseconds (digits past the ninth are dropped)
fn fraction_nanos(frac: Option<&str>) -> u32 {
    match frac {
        None => 0,
        Some(digits) => {
            let mut nanos: u32 = 0;
            for (i, c) in digits.chars().take(9).enumerate() {
                nanos += c.to_digit(10).unwrap_or(0) * 10u32.pow(8 - i as u32);
            }
            nanos
        }
    }
}

/// Build a time of day, accepting `24:00:00` as end-of-day.
///
/// The boolean reports whether the value rolled over to the next day.
fn time_of_day(hour: u32, minute: u32, second: u32, nanos: u32) -> Result<(NaiveTime, bool), String> {
    if hour == 24 {
        if minute == 0 && second == 0 && nanos == 0 {
            return Ok((NaiveTime::default(), true));
        }
        return Err("Hour 24 is only valid as 24:00:00".to_string());
    }
    if second >= 60 {
        return Err("Seconds out of range".to_string());
    }
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .map(|t| (t, false))
        .ok_or_else(|| "Time out of range".to_string())
}

fn seconds_decimal(time: NaiveTime) -> BigDecimal {
    let nanos = time.second() as i64 * 1_000_000_000 + time.nanosecond() as i64;
    BigDecimal::new(BigInt::from(nanos), 9).normalized()
}

/// XSD dateTime (also used for xsd:dateTimeStamp)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    /// Position as written
    local: NaiveDateTime,
    /// Timezone offset (None = no timezone in input)
    tz_offset: Option<FixedOffset>,
    /// Original string for round-trip serialization
    original: String,
}

impl DateTime {
    /// Parse an XSD dateTime string
    ///
    /// Accepts `2024-01-15T10:30:00`, `2024-01-15T10:30:00.123Z`,
    /// `2024-01-15T10:30:00+05:00` and the end-of-day form `2024-01-15T24:00:00`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let caps = DATE_TIME_RE
            .captures(s)
            .ok_or_else(|| format!("Cannot parse dateTime: {}", s))?;
        let year: i32 = number(&caps, 1, "year")?;
        let month: u32 = number(&caps, 2, "month")?;
        let day: u32 = number(&caps, 3, "day")?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| format!("Cannot parse dateTime: {}", s))?;
        let (time, rollover) = time_of_day(
            number(&caps, 4, "hour")?,
            number(&caps, 5, "minute")?,
            number(&caps, 6, "second")?,
            fraction_nanos(group(&caps, 7)),
        )?;
        let date = if rollover {
            date.succ_opt()
                .ok_or_else(|| format!("Cannot parse dateTime: {}", s))?
        } else {
            date
        };
        Ok(Self {
            local: date.and_time(time),
            tz_offset: parse_tz(group(&caps, 8))?,
            original: s.to_string(),
        })
    }

    /// Build from a chrono timestamp (used for NOW()).
    pub fn from_chrono(dt: ChronoDateTime<FixedOffset>) -> Self {
        let offset = *dt.offset();
        let local = dt.naive_local();
        let original = format!(
            "{}{}",
            local.format("%Y-%m-%dT%H:%M:%S%.3f"),
            format_offset(offset)
        );
        Self {
            local,
            tz_offset: Some(offset),
            original,
        }
    }

    /// Get the original string representation
    pub fn original(&self) -> &str {
        &self.original
    }

    // === SPARQL accessor functions ===

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn hours(&self) -> u32 {
        self.local.hour()
    }

    pub fn minutes(&self) -> u32 {
        self.local.minute()
    }

    /// Seconds with fractional part, as xsd:decimal
    pub fn seconds(&self) -> BigDecimal {
        seconds_decimal(self.local.time())
    }

    /// Get the timezone string (e.g., "+05:00", "Z") or None if no timezone
    pub fn timezone(&self) -> Option<String> {
        self.tz_offset.map(format_offset)
    }
}

impl Temporal for DateTime {
    fn local(&self) -> NaiveDateTime {
        self.local
    }

    fn tz_offset(&self) -> Option<FixedOffset> {
        self.tz_offset
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// XSD date (year-month-day with optional timezone)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Date {
    date: NaiveDate,
    tz_offset: Option<FixedOffset>,
    original: String,
}

impl Date {
    /// Parse an XSD date string
    ///
    /// Accepts `2024-01-15`, `2024-01-15Z` and `2024-01-15+05:00`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let caps = DATE_RE
            .captures(s)
            .ok_or_else(|| format!("Cannot parse date: {}", s))?;
        let date = NaiveDate::from_ymd_opt(
            number(&caps, 1, "year")?,
            number(&caps, 2, "month")?,
            number(&caps, 3, "day")?,
        )
        .ok_or_else(|| format!("Cannot parse date: {}", s))?;
        Ok(Self {
            date,
            tz_offset: parse_tz(group(&caps, 4))?,
            original: s.to_string(),
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn timezone(&self) -> Option<String> {
        self.tz_offset.map(format_offset)
    }
}

impl Temporal for Date {
    fn local(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::default())
    }

    fn tz_offset(&self) -> Option<FixedOffset> {
        self.tz_offset
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// XSD time (hour:minute:second with optional timezone)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Time {
    time: NaiveTime,
    tz_offset: Option<FixedOffset>,
    original: String,
}

impl Time {
    /// Parse an XSD time string
    ///
    /// Accepts `10:30:00`, `10:30:00.5Z`, `10:30:00+05:00` and `24:00:00`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let caps = TIME_RE
            .captures(s)
            .ok_or_else(|| format!("Cannot parse time: {}", s))?;
        let (time, _) = time_of_day(
            number(&caps, 1, "hour")?,
            number(&caps, 2, "minute")?,
            number(&caps, 3, "second")?,
            fraction_nanos(group(&caps, 4)),
        )?;
        Ok(Self {
            time,
            tz_offset: parse_tz(group(&caps, 5))?,
            original: s.to_string(),
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn hours(&self) -> u32 {
        self.time.hour()
    }

    pub fn minutes(&self) -> u32 {
        self.time.minute()
    }

    pub fn seconds(&self) -> BigDecimal {
        seconds_decimal(self.time)
    }

    pub fn timezone(&self) -> Option<String> {
        self.tz_offset.map(format_offset)
    }
}

impl Temporal for Time {
    fn local(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, 12, 31)
            .unwrap_or_default()
            .and_time(self.time)
    }

    fn tz_offset(&self) -> Option<FixedOffset> {
        self.tz_offset
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Which Gregorian fragment a [`Gregorian`] value carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GregorianKind {
    /// xsd:gYear
    Year,
    /// xsd:gYearMonth
    YearMonth,
    /// xsd:gMonth
    Month,
    /// xsd:gMonthDay
    MonthDay,
    /// xsd:gDay
    Day,
}

impl GregorianKind {
    /// Datatype IRI for this kind
    pub fn datatype(&self) -> &'static str {
        use crate::vocab::xsd;
        match self {
            GregorianKind::Year => xsd::G_YEAR,
            GregorianKind::YearMonth => xsd::G_YEAR_MONTH,
            GregorianKind::Month => xsd::G_MONTH,
            GregorianKind::MonthDay => xsd::G_MONTH_DAY,
            GregorianKind::Day => xsd::G_DAY,
        }
    }
}

/// XSD gYear, gYearMonth, gMonth, gMonthDay and gDay
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gregorian {
    kind: GregorianKind,
    /// First instant of the period, reference values filling absent fields
    start: NaiveDate,
    tz_offset: Option<FixedOffset>,
    original: String,
}

impl Gregorian {
    /// Parse the lexical form of the given kind
    pub fn parse(kind: GregorianKind, s: &str) -> Result<Self, String> {
        let bad = || format!("Cannot parse {:?}: {}", kind, s);
        let (start, tz_group) = match kind {
            GregorianKind::Year => {
                let caps = G_YEAR_RE.captures(s).ok_or_else(bad)?;
                let date = NaiveDate::from_ymd_opt(number(&caps, 1, "year")?, 1, 1);
                (date, group(&caps, 2).map(str::to_owned))
            }
            GregorianKind::YearMonth => {
                let caps = G_YEAR_MONTH_RE.captures(s).ok_or_else(bad)?;
                let date = NaiveDate::from_ymd_opt(
                    number(&caps, 1, "year")?,
                    number(&caps, 2, "month")?,
                    1,
                );
                (date, group(&caps, 3).map(str::to_owned))
            }
            GregorianKind::Month => {
                let caps = G_MONTH_RE.captures(s).ok_or_else(bad)?;
                let date = NaiveDate::from_ymd_opt(REFERENCE_YEAR, number(&caps, 1, "month")?, 1);
                (date, group(&caps, 2).map(str::to_owned))
            }
            GregorianKind::MonthDay => {
                let caps = G_MONTH_DAY_RE.captures(s).ok_or_else(bad)?;
                let date = NaiveDate::from_ymd_opt(
                    REFERENCE_YEAR,
                    number(&caps, 1, "month")?,
                    number(&caps, 2, "day")?,
                );
                (date, group(&caps, 3).map(str::to_owned))
            }
            GregorianKind::Day => {
                let caps = G_DAY_RE.captures(s).ok_or_else(bad)?;
                let date = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 12, number(&caps, 1, "day")?);
                (date, group(&caps, 2).map(str::to_owned))
            }
        };
        Ok(Self {
            kind,
            start: start.ok_or_else(bad)?,
            tz_offset: parse_tz(tz_group.as_deref())?,
            original: s.to_string(),
        })
    }

    pub fn kind(&self) -> GregorianKind {
        self.kind
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Year component, for kinds that carry one
    pub fn year(&self) -> Option<i32> {
        matches!(self.kind, GregorianKind::Year | GregorianKind::YearMonth).then(|| self.start.year())
    }

    /// Month component, for kinds that carry one
    pub fn month(&self) -> Option<u32> {
        matches!(
            self.kind,
            GregorianKind::YearMonth | GregorianKind::Month | GregorianKind::MonthDay
        )
        .then(|| self.start.month())
    }

    /// Day component, for kinds that carry one
    pub fn day(&self) -> Option<u32> {
        matches!(self.kind, GregorianKind::MonthDay | GregorianKind::Day).then(|| self.start.day())
    }

    pub fn timezone(&self) -> Option<String> {
        self.tz_offset.map(format_offset)
    }
}

impl Temporal for Gregorian {
    fn local(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::default())
    }

    fn tz_offset(&self) -> Option<FixedOffset> {
        self.tz_offset
    }
}

impl fmt::Display for Gregorian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
