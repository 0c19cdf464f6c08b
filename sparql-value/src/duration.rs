//! XSD duration, yearMonthDuration and dayTimeDuration
//!
//! A duration is a (months, nanoseconds) pair sharing one sign. Durations
//! that mix both components only have a partial order: they are compared by
//! adding each to four reference dateTimes and the result is indeterminate
//! when those four comparisons disagree (`P1M` vs `P30D`).

use crate::vocab::xsd;
use chrono::{Duration as ChronoDuration, Months, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:\.(\d+))?S)?)?$",
    )
    .expect("static regex")
});

const NANOS_PER_SEC: i128 = 1_000_000_000;
const AVERAGE_MONTH_SECS: i128 = 2_629_746;

/// Reference dateTimes from XML Schema Part 2, appendix E
const REFERENCE_POINTS: [(i32, u32, u32); 4] = [(1696, 9, 1), (1697, 2, 1), (1903, 3, 1), (1903, 7, 1)];

/// Which XSD duration datatype a [`Duration`] was built as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationKind {
    /// xsd:duration
    General,
    /// xsd:yearMonthDuration
    YearMonth,
    /// xsd:dayTimeDuration
    DayTime,
}

impl DurationKind {
    pub fn datatype(&self) -> &'static str {
        match self {
            DurationKind::General => xsd::DURATION,
            DurationKind::YearMonth => xsd::YEAR_MONTH_DURATION,
            DurationKind::DayTime => xsd::DAY_TIME_DURATION,
        }
    }
}

/// An XSD duration value
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Duration {
    kind: DurationKind,
    /// Signed total months
    months: i64,
    /// Signed total day-time part in nanoseconds
    nanos: i128,
    /// Lexical form as parsed; computed durations print canonically
    original: Option<String>,
}

impl Duration {
    /// Parse an xsd:duration lexical form
    pub fn parse(s: &str) -> Result<Self, String> {
        Self::parse_as(DurationKind::General, s)
    }

    /// Parse a lexical form, enforcing the restrictions of a duration subtype
    pub fn parse_as(kind: DurationKind, s: &str) -> Result<Self, String> {
        let bad = || format!("Cannot parse duration: {}", s);
        let caps = DURATION_RE.captures(s).ok_or_else(bad)?;
        if s.ends_with('P') || s.ends_with('T') {
            return Err(bad());
        }
        let field = |idx: usize| -> Result<i128, String> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse::<i64>().map(i128::from).map_err(|_| bad()),
                None => Ok(0),
            }
        };
        let has_year_month = caps.get(2).is_some() || caps.get(3).is_some();
        let has_day_time = (4..=7).any(|i| caps.get(i).is_some());
        match kind {
            DurationKind::YearMonth if has_day_time => return Err(bad()),
            DurationKind::DayTime if has_year_month => return Err(bad()),
            _ => {}
        }

        let (years, month_part) = (field(2)?, field(3)?);
        let months = years
            .checked_mul(12)
            .and_then(|m| m.checked_add(month_part))
            .ok_or_else(bad)?;
        let secs = ((field(4)? * 24 + field(5)?) * 60 + field(6)?) * 60 + field(7)?;
        let frac = caps
            .get(8)
            .map(|m| {
                m.as_str()
                    .chars()
                    .take(9)
                    .enumerate()
                    .map(|(i, c)| c.to_digit(10).unwrap_or(0) as i128 * 10i128.pow(8 - i as u32))
                    .sum::<i128>()
            })
            .unwrap_or(0);
        let nanos = secs
            .checked_mul(NANOS_PER_SEC)
            .and_then(|n| n.checked_add(frac))
            .ok_or_else(bad)?;
        let months = i64::try_from(months).map_err(|_| bad())?;

        let sign: i64 = if caps.get(1).is_some() { -1 } else { 1 };
        Ok(Self {
            kind,
            months: sign * months,
            nanos: sign as i128 * nanos,
            original: Some(s.to_string()),
        })
    }

    /// A dayTimeDuration of the given signed number of nanoseconds
    pub fn day_time(nanos: i128) -> Self {
        Self {
            kind: DurationKind::DayTime,
            months: 0,
            nanos,
            original: None,
        }
    }

    /// A yearMonthDuration of the given signed number of months
    pub fn year_month(months: i64) -> Self {
        Self {
            kind: DurationKind::YearMonth,
            months,
            nanos: 0,
            original: None,
        }
    }

    /// The dayTimeDuration for a timezone offset (TIMEZONE())
    pub fn from_offset_seconds(secs: i32) -> Self {
        Self::day_time(secs as i128 * NANOS_PER_SEC)
    }

    pub fn kind(&self) -> DurationKind {
        self.kind
    }

    pub fn months(&self) -> i64 {
        self.months
    }

    pub fn nanos(&self) -> i128 {
        self.nanos
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.nanos == 0
    }

    /// Total sort key in nanoseconds, counting a month as 1/12 of a
    /// 365.2425-day year
    pub fn sort_key(&self) -> i128 {
        self.months as i128 * AVERAGE_MONTH_SECS * NANOS_PER_SEC + self.nanos
    }

    /// Canonical lexical form (`-P1Y2M`, `PT1.5S`, `PT0S`)
    pub fn canonical(&self) -> String {
        if self.is_zero() {
            return match self.kind {
                DurationKind::YearMonth => "P0M".to_string(),
                _ => "PT0S".to_string(),
            };
        }
        let mut out = String::new();
        if self.months < 0 || self.nanos < 0 {
            out.push('-');
        }
        out.push('P');

        let months = self.months.unsigned_abs();
        let (years, months) = (months / 12, months % 12);
        if years > 0 {
            out.push_str(&format!("{}Y", years));
        }
        if months > 0 {
            out.push_str(&format!("{}M", months));
        }

        let nanos = self.nanos.unsigned_abs();
        let total_secs = nanos / NANOS_PER_SEC as u128;
        let frac = nanos % NANOS_PER_SEC as u128;
        let days = total_secs / 86_400;
        let hours = (total_secs % 86_400) / 3600;
        let mins = (total_secs % 3600) / 60;
        let secs = total_secs % 60;
        if days > 0 {
            out.push_str(&format!("{}D", days));
        }
        if hours > 0 || mins > 0 || secs > 0 || frac > 0 {
            out.push('T');
            if hours > 0 {
                out.push_str(&format!("{}H", hours));
            }
            if mins > 0 {
                out.push_str(&format!("{}M", mins));
            }
            if frac > 0 {
                let digits = format!("{:09}", frac);
                out.push_str(&format!("{}.{}S", secs, digits.trim_end_matches('0')));
            } else if secs > 0 {
                out.push_str(&format!("{}S", secs));
            }
        }
        out
    }

    /// XSD partial order; `None` when indeterminate
    pub fn partial_cmp_xsd(&self, other: &Self) -> Option<Ordering> {
        if self.months == other.months {
            return Some(self.nanos.cmp(&other.nanos));
        }
        if self.nanos == other.nanos {
            return Some(self.months.cmp(&other.months));
        }
        let mut result = None;
        for (y, m, d) in REFERENCE_POINTS {
            let start = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
            let ord = self.add_to(start)?.cmp(&other.add_to(start)?);
            match result {
                None => result = Some(ord),
                Some(prev) if prev != ord => return None,
                Some(_) => {}
            }
        }
        result
    }

    fn add_to(&self, start: NaiveDateTime) -> Option<NaiveDateTime> {
        let months = u32::try_from(self.months.unsigned_abs()).ok()?;
        let shifted = if self.months >= 0 {
            start.checked_add_months(Months::new(months))?
        } else {
            start.checked_sub_months(Months::new(months))?
        };
        let secs = i64::try_from(self.nanos / NANOS_PER_SEC).ok()?;
        // chrono panics past roughly +/-292 million years of seconds
        if secs.unsigned_abs() > 1 << 52 {
            return None;
        }
        let sub_nanos = (self.nanos % NANOS_PER_SEC) as i64;
        shifted
            .checked_add_signed(ChronoDuration::seconds(secs))?
            .checked_add_signed(ChronoDuration::nanoseconds(sub_nanos))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.original {
            Some(s) => f.write_str(s),
            None => f.write_str(&self.canonical()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dur(s: &str) -> Duration {
        Duration::parse(s).unwrap()
    }

    #[test]
    fn test_parse_components() {
        let d = dur("P1Y2M3DT4H5M6.5S");
        assert_eq!(d.months(), 14);
        assert_eq!(
            d.nanos(),
            ((3 * 86_400 + 4 * 3600 + 5 * 60 + 6) as i128) * NANOS_PER_SEC + 500_000_000
        );
        assert_eq!(d.to_string(), "P1Y2M3DT4H5M6.5S");
    }

    #[test]
    fn test_parse_negative() {
        let d = dur("-PT90M");
        assert_eq!(d.nanos(), -90 * 60 * NANOS_PER_SEC);
        assert_eq!(d.canonical(), "-PT1H30M");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Duration::parse("P").is_err());
        assert!(Duration::parse("PT").is_err());
        assert!(Duration::parse("P1DT").is_err());
        assert!(Duration::parse("1D").is_err());
        assert!(Duration::parse_as(DurationKind::YearMonth, "P1D").is_err());
        assert!(Duration::parse_as(DurationKind::DayTime, "P1Y").is_err());
    }

    #[test]
    fn test_canonical_zero() {
        assert_eq!(Duration::day_time(0).canonical(), "PT0S");
        assert_eq!(Duration::year_month(0).canonical(), "P0M");
        assert_eq!(Duration::from_offset_seconds(-5 * 3600).canonical(), "-PT5H");
    }

    #[test]
    fn test_order_same_component() {
        assert_eq!(dur("P1Y").partial_cmp_xsd(&dur("P13M")), Some(Ordering::Less));
        assert_eq!(dur("PT24H").partial_cmp_xsd(&dur("P1D")), Some(Ordering::Equal));
    }

    #[test]
    fn test_order_mixed_components() {
        assert_eq!(dur("P1M").partial_cmp_xsd(&dur("P30D")), None);
        assert_eq!(dur("P1M").partial_cmp_xsd(&dur("P32D")), Some(Ordering::Less));
        assert_eq!(dur("P1M").partial_cmp_xsd(&dur("P27D")), Some(Ordering::Greater));
    }
}
