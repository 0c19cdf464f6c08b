//! DateTime function implementations
//!
//! Component accessors accept the XSD types that carry the component:
//! YEAR, MONTH and DAY take dateTime or date; HOURS, MINUTES and SECONDS
//! take dateTime or time.

use super::helpers::check_arity;
use crate::context::EvalContext;
use sparql_value::{Duration, EvalError, NodeValue, Result, Temporal, ValueKind};

fn temporal_mismatch(fn_name: &str, expected: &str, value: &NodeValue) -> EvalError {
    EvalError::type_mismatch(
        format!("{} for {}", expected, fn_name),
        format_args!("{} ({})", value, value.type_name()),
    )
}

/// NOW(): the query time fixed in the context
pub(super) fn eval_now(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    check_arity(args, 0, "NOW")?;
    Ok(NodeValue::date_time(ctx.query_time().clone()))
}

fn date_part(args: &[NodeValue], fn_name: &str, part: fn(i32, u32, u32) -> i64) -> Result<NodeValue> {
    check_arity(args, 1, fn_name)?;
    let value = &args[0];
    let (y, m, d) = match value.kind() {
        ValueKind::DateTime(dt) => (dt.year(), dt.month(), dt.day()),
        ValueKind::Date(date) => (date.year(), date.month(), date.day()),
        _ => return Err(temporal_mismatch(fn_name, "xsd:dateTime or xsd:date", value)),
    };
    Ok(NodeValue::integer(part(y, m, d)))
}

pub(super) fn eval_year(args: &[NodeValue]) -> Result<NodeValue> {
    date_part(args, "YEAR", |y, _, _| i64::from(y))
}

pub(super) fn eval_month(args: &[NodeValue]) -> Result<NodeValue> {
    date_part(args, "MONTH", |_, m, _| i64::from(m))
}

pub(super) fn eval_day(args: &[NodeValue]) -> Result<NodeValue> {
    date_part(args, "DAY", |_, _, d| i64::from(d))
}

fn time_part(args: &[NodeValue], fn_name: &str, part: fn(u32, u32) -> i64) -> Result<NodeValue> {
    check_arity(args, 1, fn_name)?;
    let value = &args[0];
    let (h, m) = match value.kind() {
        ValueKind::DateTime(dt) => (dt.hours(), dt.minutes()),
        ValueKind::Time(t) => (t.hours(), t.minutes()),
        _ => return Err(temporal_mismatch(fn_name, "xsd:dateTime or xsd:time", value)),
    };
    Ok(NodeValue::integer(part(h, m)))
}

pub(super) fn eval_hours(args: &[NodeValue]) -> Result<NodeValue> {
    time_part(args, "HOURS", |h, _| i64::from(h))
}

pub(super) fn eval_minutes(args: &[NodeValue]) -> Result<NodeValue> {
    time_part(args, "MINUTES", |_, m| i64::from(m))
}

/// SECONDS: xsd:decimal including the fractional part
pub(super) fn eval_seconds(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "SECONDS")?;
    let value = &args[0];
    match value.kind() {
        ValueKind::DateTime(dt) => Ok(NodeValue::decimal(dt.seconds())),
        ValueKind::Time(t) => Ok(NodeValue::decimal(t.seconds())),
        _ => Err(temporal_mismatch("SECONDS", "xsd:dateTime or xsd:time", value)),
    }
}

/// Timezone offset of any timezone-bearing temporal value
fn offset_of(value: &NodeValue, fn_name: &str) -> Result<Option<i32>> {
    let offset = match value.kind() {
        ValueKind::DateTime(dt) => dt.tz_offset(),
        ValueKind::Date(d) => d.tz_offset(),
        ValueKind::Time(t) => t.tz_offset(),
        _ => return Err(temporal_mismatch(fn_name, "a date or time value", value)),
    };
    Ok(offset.map(|o| o.local_minus_utc()))
}

/// TIMEZONE: xsd:dayTimeDuration; a value without timezone is an error
pub(super) fn eval_timezone(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "TIMEZONE")?;
    match offset_of(&args[0], "TIMEZONE")? {
        Some(secs) => Ok(NodeValue::duration(Duration::from_offset_seconds(secs))),
        None => Err(EvalError::invalid_argument(format!(
            "TIMEZONE: {} has no timezone",
            args[0]
        ))),
    }
}

/// TZ: the timezone as written ("Z", "-05:00"), or "" when absent
pub(super) fn eval_tz(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "TZ")?;
    let value = &args[0];
    let tz = match value.kind() {
        ValueKind::DateTime(dt) => dt.timezone(),
        ValueKind::Date(d) => d.timezone(),
        ValueKind::Time(t) => t.timezone(),
        _ => return Err(temporal_mismatch("TZ", "a date or time value", value)),
    };
    Ok(NodeValue::string(tz.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparql_value::vocab::xsd;
    use sparql_value::Term;

    fn dt(s: &str) -> NodeValue {
        NodeValue::from_term(Term::typed(s, xsd::DATE_TIME))
    }

    #[test]
    fn test_components() {
        let v = dt("2011-01-10T14:45:13.815-05:00");
        assert_eq!(eval_year(&[v.clone()]).unwrap().lexical_form(), "2011");
        assert_eq!(eval_month(&[v.clone()]).unwrap().lexical_form(), "1");
        assert_eq!(eval_day(&[v.clone()]).unwrap().lexical_form(), "10");
        assert_eq!(eval_hours(&[v.clone()]).unwrap().lexical_form(), "14");
        assert_eq!(eval_minutes(&[v.clone()]).unwrap().lexical_form(), "45");
        assert_eq!(eval_seconds(&[v]).unwrap().lexical_form(), "13.815");
    }

    #[test]
    fn test_timezone_and_tz() {
        let v = dt("2011-01-10T14:45:13-05:00");
        assert_eq!(eval_timezone(&[v.clone()]).unwrap().lexical_form(), "-PT5H");
        assert_eq!(eval_tz(&[v]).unwrap().as_string(), Ok("-05:00"));

        let floating = dt("2011-01-10T14:45:13");
        assert!(eval_timezone(&[floating.clone()]).is_err());
        assert_eq!(eval_tz(&[floating]).unwrap().as_string(), Ok(""));

        let utc = dt("2011-01-10T14:45:13Z");
        assert_eq!(eval_tz(&[utc.clone()]).unwrap().as_string(), Ok("Z"));
        assert_eq!(eval_timezone(&[utc]).unwrap().lexical_form(), "PT0S");
    }

    #[test]
    fn test_now_is_fixed_per_context() {
        let ctx = EvalContext::new();
        let a = eval_now(&[], &ctx).unwrap();
        let b = eval_now(&[], &ctx).unwrap();
        assert_eq!(a, b);
        assert!(a.is_date_time());
    }

    #[test]
    fn test_non_temporal_argument() {
        assert!(eval_year(&[NodeValue::string("2011")]).is_err());
        assert!(eval_hours(&[NodeValue::from_term(Term::typed("2011-01-10", xsd::DATE))]).is_err());
    }
}
