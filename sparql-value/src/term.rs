//! RDF terms
//!
//! A [`Term`] is an RDF graph element with no attached SPARQL value
//! semantics. Terms are produced by the surrounding engine (pattern matching,
//! parsers) and consumed here; [`crate::NodeValue`] classifies them.
//!
//! ## Ordering
//!
//! `Term` implements a total syntactic order used as the last-resort tie
//! breaker for ORDER BY: blank nodes < IRIs < literals. Literals order by
//! lexical form, then language tag (absent first), then datatype (absent
//! first), so a plain literal sorts immediately before the `xsd:string`
//! literal with the same lexical form.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// An RDF literal: lexical form plus optional datatype and language tag
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: Arc<str>,
    datatype: Option<Arc<str>>,
    lang: Option<Arc<str>>,
}

impl Literal {
    /// Lexical form
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Datatype IRI, `None` for plain and language-tagged literals
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    /// Language tag
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    fn syntactic_cmp(&self, other: &Self) -> Ordering {
        self.lexical
            .cmp(&other.lexical)
            .then_with(|| self.lang.cmp(&other.lang))
            .then_with(|| self.datatype.cmp(&other.datatype))
    }
}

/// An RDF term
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// IRI reference (stored without angle brackets)
    Iri(Arc<str>),
    /// Blank node label (stored without the `_:` prefix)
    BlankNode(Arc<str>),
    /// Literal
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<Arc<str>>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(label: impl Into<Arc<str>>) -> Self {
        Term::BlankNode(label.into())
    }

    /// Plain literal (no datatype, no language tag)
    pub fn plain(lexical: impl Into<Arc<str>>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            lang: None,
        })
    }

    /// Typed literal
    pub fn typed(lexical: impl Into<Arc<str>>, datatype: impl Into<Arc<str>>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            lang: None,
        })
    }

    /// Language-tagged literal
    pub fn lang_string(lexical: impl Into<Arc<str>>, lang: impl Into<Arc<str>>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            lang: Some(lang.into()),
        })
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Language tag, if this is a language-tagged literal
    pub fn lang(&self) -> Option<&str> {
        self.as_literal().and_then(Literal::lang)
    }

    /// Kind rank for the syntactic order: blank < IRI < literal
    fn kind_rank(&self) -> u8 {
        match self {
            Term::BlankNode(_) => 0,
            Term::Iri(_) => 1,
            Term::Literal(_) => 2,
        }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a.cmp(b),
            (Term::BlankNode(a), Term::BlankNode(b)) => a.cmp(b),
            (Term::Literal(a), Term::Literal(b)) => a.syntactic_cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(label) => write!(f, "_:{}", label),
            Term::Literal(lit) => {
                f.write_str("\"")?;
                write_escaped(f, lit.lexical())?;
                f.write_str("\"")?;
                if let Some(lang) = lit.lang() {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = lit.datatype() {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;

    #[test]
    fn test_display() {
        assert_eq!(Term::iri("http://ex.org/a").to_string(), "<http://ex.org/a>");
        assert_eq!(Term::blank("b0").to_string(), "_:b0");
        assert_eq!(Term::lang_string("chat", "fr").to_string(), "\"chat\"@fr");
        assert_eq!(
            Term::typed("1", xsd::INTEGER).to_string(),
            "\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        assert_eq!(Term::plain("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_kind_order() {
        let b = Term::blank("z");
        let i = Term::iri("a");
        let l = Term::plain("a");
        assert!(b < i);
        assert!(i < l);
        assert!(b < l);
    }

    #[test]
    fn test_plain_sorts_before_xsd_string() {
        let plain = Term::plain("a");
        let typed = Term::typed("a", xsd::STRING);
        assert_eq!(plain.cmp(&typed), Ordering::Less);
        assert_ne!(plain, typed);
    }

    #[test]
    fn test_literal_order_lexical_first() {
        let a = Term::typed("10", xsd::INTEGER);
        let b = Term::plain("9");
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_serde_round_trip() {
        let t = Term::lang_string("hello", "en");
        let json = serde_json::to_string(&t).unwrap();
        let back: Term = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
