//! NodeValue: the runtime value of an expression
//!
//! A `NodeValue` is either *typed* (one of the recognized XSD value spaces,
//! parsed eagerly at construction) or *term-only* (IRIs, blank nodes and
//! literals with an unknown datatype or an ill-formed lexical form).
//!
//! ## Terms
//!
//! Values classified from a [`Term`] keep that term, so `"01"^^xsd:int`
//! round-trips unchanged. Values built from host scalars (arithmetic
//! results, string functions) have no term until [`NodeValue::as_term`] is
//! called; the term is then derived once, cached, and stable.
//!
//! ## Equality
//!
//! `PartialEq`/`Hash` compare the *terms*, not the values: `1` and `1.0`
//! are different values here. SPARQL `=` is [`crate::same_as`].

use crate::duration::{Duration, DurationKind};
use crate::error::{EvalError, Result};
use crate::numeric::{
    format_decimal, format_double, format_float, parse_decimal, parse_double, parse_float,
    parse_integer,
};
use crate::temporal::{Date, DateTime, Gregorian, GregorianKind, Time};
use crate::term::{Literal, Term};
use crate::vocab::{rdf, xsd};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Typed interpretation of a value
#[derive(Clone, Debug)]
pub enum ValueKind {
    Boolean(bool),
    /// Arbitrary precision xsd:integer (and derived types)
    Integer(BigInt),
    /// Arbitrary precision xsd:decimal
    Decimal(BigDecimal),
    Float(f32),
    Double(f64),
    /// Plain literal, xsd:string or a string-derived type
    String(Arc<str>),
    LangString { lexical: Arc<str>, lang: Arc<str> },
    DateTime(DateTime),
    Date(Date),
    Time(Time),
    Duration(Duration),
    /// gYear, gYearMonth, gMonth, gMonthDay, gDay
    Gregorian(Gregorian),
    /// No recognized scalar meaning
    Node(Term),
}

/// An immutable, classified runtime value
#[derive(Clone)]
pub struct NodeValue {
    kind: ValueKind,
    /// Term form for typed values; always empty for `ValueKind::Node`
    term: OnceCell<Term>,
}

impl NodeValue {
    fn typed(kind: ValueKind) -> Self {
        Self {
            kind,
            term: OnceCell::new(),
        }
    }

    /// Classify a term.
    ///
    /// Never fails: a literal whose lexical form is invalid for its datatype,
    /// or whose datatype is not recognized, becomes a term-only value.
    pub fn from_term(term: Term) -> Self {
        let kind = match &term {
            Term::Literal(lit) => classify_literal(lit),
            _ => None,
        };
        match kind {
            Some(kind) => {
                let cell = OnceCell::new();
                let _ = cell.set(term);
                Self { kind, term: cell }
            }
            None => Self::typed(ValueKind::Node(term)),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self::typed(ValueKind::Boolean(value))
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::typed(ValueKind::Integer(value.into()))
    }

    pub fn decimal(value: BigDecimal) -> Self {
        Self::typed(ValueKind::Decimal(value))
    }

    pub fn float(value: f32) -> Self {
        Self::typed(ValueKind::Float(value))
    }

    pub fn double(value: f64) -> Self {
        Self::typed(ValueKind::Double(value))
    }

    /// A simple literal
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Self::typed(ValueKind::String(value.into()))
    }

    pub fn lang_string(lexical: impl Into<Arc<str>>, lang: impl Into<Arc<str>>) -> Self {
        Self::typed(ValueKind::LangString {
            lexical: lexical.into(),
            lang: lang.into(),
        })
    }

    pub fn date_time(value: DateTime) -> Self {
        Self::typed(ValueKind::DateTime(value))
    }

    pub fn date(value: Date) -> Self {
        Self::typed(ValueKind::Date(value))
    }

    pub fn time(value: Time) -> Self {
        Self::typed(ValueKind::Time(value))
    }

    pub fn duration(value: Duration) -> Self {
        Self::typed(ValueKind::Duration(value))
    }

    pub fn gregorian(value: Gregorian) -> Self {
        Self::typed(ValueKind::Gregorian(value))
    }

    pub fn iri(iri: impl Into<Arc<str>>) -> Self {
        Self::typed(ValueKind::Node(Term::iri(iri)))
    }

    pub fn blank(label: impl Into<Arc<str>>) -> Self {
        Self::typed(ValueKind::Node(Term::blank(label)))
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Term form, materialized on first use and cached
    pub fn as_term(&self) -> &Term {
        match &self.kind {
            ValueKind::Node(term) => term,
            kind => self.term.get_or_init(|| derive_term(kind)),
        }
    }

    /// Whether the term form has been materialized (always true for term-only values)
    pub fn has_term(&self) -> bool {
        matches!(self.kind, ValueKind::Node(_)) || self.term.get().is_some()
    }

    // === Classification predicates ===

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            ValueKind::Integer(_) | ValueKind::Decimal(_) | ValueKind::Float(_) | ValueKind::Double(_)
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.kind, ValueKind::Integer(_))
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self.kind, ValueKind::Decimal(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self.kind, ValueKind::Float(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self.kind, ValueKind::Double(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, ValueKind::Boolean(_))
    }

    /// Simple literal or xsd:string
    pub fn is_string(&self) -> bool {
        matches!(self.kind, ValueKind::String(_))
    }

    pub fn is_lang_string(&self) -> bool {
        matches!(self.kind, ValueKind::LangString { .. })
    }

    pub fn is_date_time(&self) -> bool {
        matches!(self.kind, ValueKind::DateTime(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self.kind, ValueKind::Date(_))
    }

    pub fn is_time(&self) -> bool {
        matches!(self.kind, ValueKind::Time(_))
    }

    pub fn is_duration(&self) -> bool {
        matches!(self.kind, ValueKind::Duration(_))
    }

    pub fn is_gregorian(&self) -> bool {
        matches!(self.kind, ValueKind::Gregorian(_))
    }

    /// True for values without a typed interpretation
    pub fn is_term_only(&self) -> bool {
        matches!(self.kind, ValueKind::Node(_))
    }

    pub fn is_literal(&self) -> bool {
        match &self.kind {
            ValueKind::Node(term) => term.is_literal(),
            _ => true,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(&self.kind, ValueKind::Node(Term::Iri(_)))
    }

    pub fn is_blank(&self) -> bool {
        matches!(&self.kind, ValueKind::Node(Term::BlankNode(_)))
    }

    // === Typed accessors ===

    pub fn as_boolean(&self) -> Result<bool> {
        match self.kind {
            ValueKind::Boolean(b) => Ok(b),
            _ => Err(self.mismatch("xsd:boolean")),
        }
    }

    pub fn as_integer(&self) -> Result<&BigInt> {
        match &self.kind {
            ValueKind::Integer(n) => Ok(n),
            _ => Err(self.mismatch("xsd:integer")),
        }
    }

    /// Integer or decimal, as a decimal
    pub fn as_decimal(&self) -> Result<BigDecimal> {
        match &self.kind {
            ValueKind::Integer(n) => Ok(BigDecimal::new(n.clone(), 0)),
            ValueKind::Decimal(d) => Ok(d.clone()),
            _ => Err(self.mismatch("xsd:decimal")),
        }
    }

    /// Integer, decimal or float, as a float
    pub fn as_float(&self) -> Result<f32> {
        match &self.kind {
            ValueKind::Integer(n) => Ok(n.to_f32().unwrap_or(f32::NAN)),
            ValueKind::Decimal(d) => Ok(d.to_f32().unwrap_or(f32::NAN)),
            ValueKind::Float(f) => Ok(*f),
            _ => Err(self.mismatch("xsd:float")),
        }
    }

    /// Any numeric, as a double
    pub fn as_double(&self) -> Result<f64> {
        match &self.kind {
            ValueKind::Integer(n) => Ok(n.to_f64().unwrap_or(f64::NAN)),
            ValueKind::Decimal(d) => Ok(d.to_f64().unwrap_or(f64::NAN)),
            ValueKind::Float(f) => Ok(*f as f64),
            ValueKind::Double(d) => Ok(*d),
            _ => Err(self.mismatch("xsd:double")),
        }
    }

    /// Simple literal or xsd:string content
    pub fn as_string(&self) -> Result<&str> {
        match &self.kind {
            ValueKind::String(s) => Ok(&**s),
            _ => Err(self.mismatch("xsd:string")),
        }
    }

    pub fn as_date_time(&self) -> Result<&DateTime> {
        match &self.kind {
            ValueKind::DateTime(d) => Ok(d),
            _ => Err(self.mismatch("xsd:dateTime")),
        }
    }

    pub fn as_date(&self) -> Result<&Date> {
        match &self.kind {
            ValueKind::Date(d) => Ok(d),
            _ => Err(self.mismatch("xsd:date")),
        }
    }

    pub fn as_time(&self) -> Result<&Time> {
        match &self.kind {
            ValueKind::Time(t) => Ok(t),
            _ => Err(self.mismatch("xsd:time")),
        }
    }

    pub fn as_duration(&self) -> Result<&Duration> {
        match &self.kind {
            ValueKind::Duration(d) => Ok(d),
            _ => Err(self.mismatch("xsd:duration")),
        }
    }

    pub fn as_gregorian(&self) -> Result<&Gregorian> {
        match &self.kind {
            ValueKind::Gregorian(g) => Ok(g),
            _ => Err(self.mismatch("a Gregorian date fragment")),
        }
    }

    /// String content of a simple, xsd:string or language-tagged literal
    pub fn string_content(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(&**s),
            ValueKind::LangString { lexical, .. } => Some(&**lexical),
            _ => None,
        }
    }

    /// Language tag of a language-tagged literal
    pub fn lang(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::LangString { lang, .. } => Some(&**lang),
            ValueKind::Node(term) => term.lang(),
            _ => None,
        }
    }

    /// Lexical form of a literal, or the IRI / blank label of other terms
    pub fn lexical_form(&self) -> &str {
        match self.as_term() {
            Term::Iri(iri) => &**iri,
            Term::BlankNode(label) => &**label,
            Term::Literal(lit) => lit.lexical(),
        }
    }

    /// Datatype IRI of a literal (RDF 1.1: simple literals are xsd:string)
    pub fn datatype_iri(&self) -> Option<&str> {
        match self.as_term() {
            Term::Literal(lit) => Some(match (lit.datatype(), lit.lang()) {
                (Some(dt), _) => dt,
                (None, Some(_)) => rdf::LANG_STRING,
                (None, None) => xsd::STRING,
            }),
            _ => None,
        }
    }

    /// Effective boolean value
    ///
    /// boolean -> itself; string (plain, xsd:string or language-tagged) ->
    /// non-empty; numeric -> nonzero and not NaN; anything else -> TypeMismatch.
    pub fn ebv(&self) -> Result<bool> {
        match &self.kind {
            ValueKind::Boolean(b) => Ok(*b),
            ValueKind::String(s) => Ok(!s.is_empty()),
            ValueKind::LangString { lexical, .. } => Ok(!lexical.is_empty()),
            ValueKind::Integer(n) => Ok(!n.is_zero()),
            ValueKind::Decimal(d) => Ok(!d.is_zero()),
            ValueKind::Float(f) => Ok(*f != 0.0 && !f.is_nan()),
            ValueKind::Double(d) => Ok(*d != 0.0 && !d.is_nan()),
            _ => Err(self.mismatch("a boolean, string or numeric value")),
        }
    }

    /// Short description of the value's class, for error messages
    pub fn type_name(&self) -> Cow<'static, str> {
        match &self.kind {
            ValueKind::Boolean(_) => "xsd:boolean".into(),
            ValueKind::Integer(_) => "xsd:integer".into(),
            ValueKind::Decimal(_) => "xsd:decimal".into(),
            ValueKind::Float(_) => "xsd:float".into(),
            ValueKind::Double(_) => "xsd:double".into(),
            ValueKind::String(_) => "xsd:string".into(),
            ValueKind::LangString { .. } => "rdf:langString".into(),
            ValueKind::DateTime(_) => "xsd:dateTime".into(),
            ValueKind::Date(_) => "xsd:date".into(),
            ValueKind::Time(_) => "xsd:time".into(),
            ValueKind::Duration(d) => xsd_prefixed(d.kind().datatype()),
            ValueKind::Gregorian(g) => xsd_prefixed(g.kind().datatype()),
            ValueKind::Node(Term::Iri(_)) => "IRI".into(),
            ValueKind::Node(Term::BlankNode(_)) => "blank node".into(),
            ValueKind::Node(Term::Literal(_)) => "unrecognized literal".into(),
        }
    }

    fn mismatch(&self, expected: &str) -> EvalError {
        EvalError::type_mismatch(expected, format_args!("{} ({})", self, self.type_name()))
    }
}

fn xsd_prefixed(iri: &str) -> Cow<'static, str> {
    match xsd::local_name(iri) {
        Some(local) => format!("xsd:{}", local).into(),
        None => iri.to_string().into(),
    }
}

fn derive_term(kind: &ValueKind) -> Term {
    match kind {
        ValueKind::Boolean(b) => Term::typed(if *b { "true" } else { "false" }, xsd::BOOLEAN),
        ValueKind::Integer(n) => Term::typed(n.to_string(), xsd::INTEGER),
        ValueKind::Decimal(d) => Term::typed(format_decimal(d), xsd::DECIMAL),
        ValueKind::Float(f) => Term::typed(format_float(*f), xsd::FLOAT),
        ValueKind::Double(d) => Term::typed(format_double(*d), xsd::DOUBLE),
        ValueKind::String(s) => Term::plain(s.clone()),
        ValueKind::LangString { lexical, lang } => Term::lang_string(lexical.clone(), lang.clone()),
        ValueKind::DateTime(d) => Term::typed(d.original(), xsd::DATE_TIME),
        ValueKind::Date(d) => Term::typed(d.original(), xsd::DATE),
        ValueKind::Time(t) => Term::typed(t.original(), xsd::TIME),
        ValueKind::Duration(d) => Term::typed(d.to_string(), d.kind().datatype()),
        ValueKind::Gregorian(g) => Term::typed(g.original(), g.kind().datatype()),
        ValueKind::Node(term) => term.clone(),
    }
}

fn classify_literal(lit: &Literal) -> Option<ValueKind> {
    let lexical = lit.lexical();
    if let Some(lang) = lit.lang() {
        return match lit.datatype() {
            None | Some(rdf::LANG_STRING) => Some(ValueKind::LangString {
                lexical: lexical.into(),
                lang: lang.into(),
            }),
            Some(_) => None,
        };
    }
    let Some(datatype) = lit.datatype() else {
        return Some(ValueKind::String(lexical.into()));
    };
    if !datatype.starts_with(xsd::NS) {
        return None;
    }
    match parse_typed(lexical, datatype)? {
        Ok(kind) => Some(kind),
        Err(reason) => {
            tracing::debug!(
                lexical,
                datatype,
                reason = %reason,
                "ill-formed typed literal treated as term-only value"
            );
            None
        }
    }
}

/// `None` for datatypes outside the recognized allow-list
fn parse_typed(lexical: &str, datatype: &str) -> Option<std::result::Result<ValueKind, String>> {
    let invalid = || format!("invalid lexical form for {}", datatype);
    let parsed = match datatype {
        dt if xsd::is_string_like(dt) => Ok(ValueKind::String(lexical.into())),
        xsd::BOOLEAN => match lexical.trim() {
            "true" | "1" => Ok(ValueKind::Boolean(true)),
            "false" | "0" => Ok(ValueKind::Boolean(false)),
            _ => Err(invalid()),
        },
        dt if xsd::is_integer_family(dt) => parse_integer(lexical)
            .ok_or_else(invalid)
            .and_then(|n| {
                if integer_in_bounds(&n, dt) {
                    Ok(ValueKind::Integer(n))
                } else {
                    Err(format!("{} out of range for {}", n, dt))
                }
            }),
        xsd::DECIMAL => parse_decimal(lexical).map(ValueKind::Decimal).ok_or_else(invalid),
        xsd::FLOAT => parse_float(lexical).map(ValueKind::Float).ok_or_else(invalid),
        xsd::DOUBLE => parse_double(lexical).map(ValueKind::Double).ok_or_else(invalid),
        xsd::DATE_TIME => DateTime::parse(lexical).map(ValueKind::DateTime),
        xsd::DATE_TIME_STAMP => DateTime::parse(lexical).and_then(|d| {
            if d.timezone().is_some() {
                Ok(ValueKind::DateTime(d))
            } else {
                Err("xsd:dateTimeStamp requires a timezone".to_string())
            }
        }),
        xsd::DATE => Date::parse(lexical).map(ValueKind::Date),
        xsd::TIME => Time::parse(lexical).map(ValueKind::Time),
        xsd::DURATION => Duration::parse_as(DurationKind::General, lexical).map(ValueKind::Duration),
        xsd::YEAR_MONTH_DURATION => {
            Duration::parse_as(DurationKind::YearMonth, lexical).map(ValueKind::Duration)
        }
        xsd::DAY_TIME_DURATION => {
            Duration::parse_as(DurationKind::DayTime, lexical).map(ValueKind::Duration)
        }
        xsd::G_YEAR => gregorian(GregorianKind::Year, lexical),
        xsd::G_YEAR_MONTH => gregorian(GregorianKind::YearMonth, lexical),
        xsd::G_MONTH => gregorian(GregorianKind::Month, lexical),
        xsd::G_MONTH_DAY => gregorian(GregorianKind::MonthDay, lexical),
        xsd::G_DAY => gregorian(GregorianKind::Day, lexical),
        _ => return None,
    };
    Some(parsed)
}

fn gregorian(kind: GregorianKind, lexical: &str) -> std::result::Result<ValueKind, String> {
    Gregorian::parse(kind, lexical).map(ValueKind::Gregorian)
}

fn integer_in_bounds(n: &BigInt, datatype: &str) -> bool {
    let (min, max) = xsd::integer_bounds(datatype);
    min.map_or(true, |m| *n >= BigInt::from(m)) && max.map_or(true, |m| *n <= BigInt::from(m))
}

impl PartialEq for NodeValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_term() == other.as_term()
    }
}

impl Eq for NodeValue {}

impl Hash for NodeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_term().hash(state);
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_term())
    }
}

impl fmt::Debug for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeValue")
            .field("kind", &self.kind)
            .field("term", &self.term.get())
            .finish()
    }
}

impl From<Term> for NodeValue {
    fn from(term: Term) -> Self {
        NodeValue::from_term(term)
    }
}

impl From<bool> for NodeValue {
    fn from(value: bool) -> Self {
        NodeValue::boolean(value)
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        NodeValue::integer(value)
    }
}

impl From<i32> for NodeValue {
    fn from(value: i32) -> Self {
        NodeValue::integer(value)
    }
}

impl From<f64> for NodeValue {
    fn from(value: f64) -> Self {
        NodeValue::double(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::string(value)
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn typed(lex: &str, dt: &str) -> NodeValue {
        NodeValue::from_term(Term::typed(lex, dt))
    }

    #[test]
    fn test_classify_numeric_precedence() {
        assert!(typed("1", xsd::INTEGER).is_integer());
        assert!(typed("1", xsd::DECIMAL).is_decimal());
        assert!(typed("1", xsd::FLOAT).is_float());
        assert!(typed("1", xsd::DOUBLE).is_double());
        assert!(typed("7", xsd::UNSIGNED_BYTE).is_integer());
    }

    #[test]
    fn test_classify_keeps_original_term() {
        let v = typed("01", xsd::INT);
        assert_eq!(v.as_integer().unwrap(), &BigInt::from(1));
        assert_eq!(v.as_term(), &Term::typed("01", xsd::INT));
    }

    #[test]
    fn test_ill_formed_literal_is_term_only() {
        let v = typed("abc", xsd::INTEGER);
        assert!(v.is_term_only());
        assert!(v.is_literal());
        assert!(matches!(v.as_integer(), Err(EvalError::TypeMismatch { .. })));

        let out_of_range = typed("300", xsd::BYTE);
        assert!(out_of_range.is_term_only());
    }

    #[test]
    fn test_unknown_datatype_is_term_only() {
        assert!(typed("x", "http://example.org/dt").is_term_only());
        assert!(typed("AB", "http://www.w3.org/2001/XMLSchema#hexBinary").is_term_only());
    }

    #[test]
    fn test_classify_strings() {
        assert!(NodeValue::from_term(Term::plain("a")).is_string());
        assert!(typed("a", xsd::STRING).is_string());
        assert!(typed("a", xsd::TOKEN).is_string());
        let lang = NodeValue::from_term(Term::lang_string("chat", "fr"));
        assert!(lang.is_lang_string());
        assert_eq!(lang.lang(), Some("fr"));
    }

    #[test]
    fn test_classify_temporal() {
        assert!(typed("2024-01-01T00:00:00Z", xsd::DATE_TIME).is_date_time());
        assert!(typed("2024-01-01", xsd::DATE).is_date());
        assert!(typed("12:00:00", xsd::TIME).is_time());
        assert!(typed("P1D", xsd::DAY_TIME_DURATION).is_duration());
        assert!(typed("P1D", xsd::YEAR_MONTH_DURATION).is_term_only());
        assert!(typed("--12-25", xsd::G_MONTH_DAY).is_gregorian());
        assert!(typed("2024-01-01T00:00:00", xsd::DATE_TIME_STAMP).is_term_only());
    }

    #[test]
    fn test_non_literals() {
        let iri = NodeValue::from_term(Term::iri("http://ex.org/a"));
        assert!(iri.is_iri());
        assert!(!iri.is_literal());
        let b = NodeValue::blank("b0");
        assert!(b.is_blank());
    }

    #[test]
    fn test_lazy_term_materialization() {
        let v = NodeValue::integer(5);
        assert!(!v.has_term());
        let t1 = v.as_term() as *const Term;
        assert!(v.has_term());
        let t2 = v.as_term() as *const Term;
        assert_eq!(t1, t2);
        assert_eq!(v.as_term(), &Term::typed("5", xsd::INTEGER));
    }

    #[test]
    fn test_canonical_terms() {
        let d = NodeValue::decimal(BigDecimal::from_str("2.50").unwrap());
        assert_eq!(d.lexical_form(), "2.5");
        assert_eq!(NodeValue::double(1.0).lexical_form(), "1.0E0");
        assert_eq!(NodeValue::boolean(true).lexical_form(), "true");
        assert_eq!(NodeValue::string("x").as_term(), &Term::plain("x"));
    }

    #[test]
    fn test_equality_is_syntactic() {
        let a = typed("1", xsd::INTEGER);
        let b = typed("01", xsd::INTEGER);
        assert_ne!(a, b);
        assert_eq!(a, NodeValue::integer(1));
    }

    #[test]
    fn test_ebv() {
        assert!(NodeValue::boolean(true).ebv().unwrap());
        assert!(!NodeValue::string("").ebv().unwrap());
        assert!(NodeValue::string("x").ebv().unwrap());
        assert!(NodeValue::lang_string("x", "en").ebv().unwrap());
        assert!(!NodeValue::integer(0).ebv().unwrap());
        assert!(NodeValue::integer(-3).ebv().unwrap());
        assert!(!NodeValue::double(f64::NAN).ebv().unwrap());
        assert!(!NodeValue::float(0.0).ebv().unwrap());
        assert!(NodeValue::decimal(BigDecimal::from_str("0.1").unwrap()).ebv().unwrap());
        assert!(matches!(
            NodeValue::iri("http://ex.org").ebv(),
            Err(EvalError::TypeMismatch { .. })
        ));
        assert!(matches!(
            typed("abc", xsd::INTEGER).ebv(),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_datatype_iri() {
        assert_eq!(NodeValue::string("a").datatype_iri(), Some(xsd::STRING));
        assert_eq!(
            NodeValue::lang_string("a", "en").datatype_iri(),
            Some(rdf::LANG_STRING)
        );
        assert_eq!(NodeValue::iri("http://ex.org").datatype_iri(), None);
    }
}
