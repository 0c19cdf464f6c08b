//! Shared helpers for builtin evaluation
//!
//! Contains arity checks, string argument access and regex caching.

use regex::{Regex, RegexBuilder};
use sparql_value::vocab::xsd;
use sparql_value::{EvalError, NodeValue, Result, Term};
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::sync::Arc;

// =============================================================================
// Arity Checking
// =============================================================================

/// Check that a function has the expected number of arguments
#[inline]
pub(crate) fn check_arity<T>(args: &[T], expected: usize, fn_name: &str) -> Result<()> {
    if args.len() != expected {
        Err(EvalError::invalid_argument(format!(
            "{} requires exactly {} argument{}",
            fn_name,
            expected,
            if expected == 1 { "" } else { "s" }
        )))
    } else {
        Ok(())
    }
}

/// Check that a function has between `min` and `max` arguments
#[inline]
pub(crate) fn check_arity_range<T>(args: &[T], min: usize, max: usize, fn_name: &str) -> Result<()> {
    if args.len() < min || args.len() > max {
        Err(EvalError::invalid_argument(format!(
            "{} requires {} to {} arguments, got {}",
            fn_name,
            min,
            max,
            args.len()
        )))
    } else {
        Ok(())
    }
}

// =============================================================================
// String arguments
// =============================================================================

/// Lexical content of a string literal argument (simple, xsd:string or
/// language-tagged)
pub(crate) fn string_arg<'a>(value: &'a NodeValue, fn_name: &str) -> Result<&'a str> {
    value.string_content().ok_or_else(|| {
        EvalError::type_mismatch(
            format!("a string literal for {}", fn_name),
            format_args!("{} ({})", value, value.type_name()),
        )
    })
}

/// Lexical content of a simple or xsd:string literal (no language tag)
pub(crate) fn simple_string_arg<'a>(value: &'a NodeValue, fn_name: &str) -> Result<&'a str> {
    if value.is_string() {
        string_arg(value, fn_name)
    } else {
        Err(EvalError::type_mismatch(
            format!("a simple literal for {}", fn_name),
            format_args!("{} ({})", value, value.type_name()),
        ))
    }
}

/// Whether the value's term is an explicit `xsd:string` literal
fn is_typed_xsd_string(value: &NodeValue) -> bool {
    value
        .as_term()
        .as_literal()
        .and_then(|lit| lit.datatype())
        == Some(xsd::STRING)
}

/// A string result carrying the language tag or `xsd:string` datatype of `template`
pub(crate) fn same_kind(template: &NodeValue, lexical: impl Into<Arc<str>>) -> NodeValue {
    if let Some(lang) = template.lang() {
        NodeValue::lang_string(lexical, lang)
    } else if is_typed_xsd_string(template) {
        NodeValue::from_term(Term::typed(lexical, xsd::STRING))
    } else {
        NodeValue::string(lexical)
    }
}

/// Argument compatibility for two-string functions
///
/// Compatible when both are simple/xsd:string, both carry the same
/// language tag, or only the first carries a tag.
pub(crate) fn check_compatible(left: &NodeValue, right: &NodeValue, fn_name: &str) -> Result<()> {
    match (left.lang(), right.lang()) {
        (_, None) => Ok(()),
        (Some(l), Some(r)) if l.eq_ignore_ascii_case(r) => Ok(()),
        _ => Err(EvalError::invalid_argument(format!(
            "{}: incompatible arguments {} and {}",
            fn_name, left, right
        ))),
    }
}

// =============================================================================
// Regex Caching
// =============================================================================

const REGEX_CACHE_SIZE: usize = 32;

// SPARQL REGEX patterns are usually constant across a query, so each worker
// thread keeps its recently compiled patterns.
thread_local! {
    static REGEX_CACHE: RefCell<lru::LruCache<(String, String), Regex>> = RefCell::new(
        lru::LruCache::new(NonZeroUsize::new(REGEX_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN)),
    );
}

/// Build a regex with optional flags (cached)
///
/// Supported flags: i (case-insensitive), m (multiline), s (dot-all),
/// x (ignore whitespace), q (literal pattern). Unknown flags are an error.
pub(crate) fn build_regex_with_flags(pattern: &str, flags: &str) -> Result<Regex> {
    let cache_key = (pattern.to_string(), flags.to_string());
    let cached = REGEX_CACHE.with(|cache| cache.borrow_mut().get(&cache_key).cloned());
    if let Some(re) = cached {
        return Ok(re);
    }

    let literal = flags.contains('q');
    let source = if literal {
        regex::escape(pattern)
    } else {
        pattern.to_string()
    };
    let mut builder = RegexBuilder::new(&source);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(!literal);
            }
            'q' => {}
            c => {
                return Err(EvalError::invalid_argument(format!(
                    "Unknown regex flag: '{}'",
                    c
                )));
            }
        }
    }
    let re = builder
        .build()
        .map_err(|e| EvalError::invalid_argument(format!("Invalid regex: {}", e)))?;

    REGEX_CACHE.with(|cache| {
        cache.borrow_mut().put(cache_key, re.clone());
    });
    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_arity() {
        assert!(check_arity(&[1, 2], 2, "f").is_ok());
        let err = check_arity(&[1], 2, "STRSTARTS").unwrap_err();
        assert_eq!(
            err,
            EvalError::InvalidArgument("STRSTARTS requires exactly 2 arguments".to_string())
        );
        assert!(check_arity_range(&[1, 2, 3], 2, 3, "SUBSTR").is_ok());
        assert!(check_arity_range(&[1], 2, 3, "SUBSTR").is_err());
    }

    #[test]
    fn test_regex_flags() {
        assert!(build_regex_with_flags("^abc$", "i").unwrap().is_match("ABC"));
        assert!(build_regex_with_flags("a.c", "q").unwrap().is_match("xa.cx"));
        assert!(!build_regex_with_flags("a.c", "q").unwrap().is_match("abc"));
        assert!(build_regex_with_flags("a", "z").is_err());
        assert!(build_regex_with_flags("(", "").is_err());
    }

    #[test]
    fn test_regex_cache_hit_returns_equivalent_regex() {
        let a = build_regex_with_flags("b+", "").unwrap();
        let b = build_regex_with_flags("b+", "").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_same_kind() {
        let tagged = NodeValue::lang_string("abc", "en");
        assert_eq!(same_kind(&tagged, "A").lang(), Some("en"));
        let typed = NodeValue::from_term(Term::typed("abc", xsd::STRING));
        assert_eq!(same_kind(&typed, "A").as_term(), &Term::typed("A", xsd::STRING));
        assert_eq!(same_kind(&NodeValue::string("abc"), "A").as_term(), &Term::plain("A"));
    }

    #[test]
    fn test_compatibility() {
        let en = NodeValue::lang_string("abc", "en");
        let fr = NodeValue::lang_string("b", "fr");
        let plain = NodeValue::string("b");
        assert!(check_compatible(&en, &plain, "f").is_ok());
        assert!(check_compatible(&plain, &plain, "f").is_ok());
        assert!(check_compatible(&en, &fr, "f").is_err());
        assert!(check_compatible(&plain, &en, "f").is_err());
    }
}
