//! String function implementations
//!
//! Functions that return a string derived from their first argument keep
//! that argument's language tag or `xsd:string` datatype. Two-string
//! functions require compatible arguments (see `check_compatible`).

use super::helpers::{
    build_regex_with_flags, check_arity, check_arity_range, check_compatible, same_kind,
    simple_string_arg, string_arg,
};
use super::numeric::round_half_up;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::NoExpand;
use sparql_value::vocab::xsd;
use sparql_value::{EvalError, NodeValue, Result, Term};
use std::sync::Arc;

/// Everything except RFC 3986 unreserved characters
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(super) fn eval_str(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "STR")?;
    match args[0].as_term() {
        Term::Literal(lit) => Ok(NodeValue::string(lit.lexical())),
        Term::Iri(iri) => Ok(NodeValue::string(iri.clone())),
        Term::BlankNode(_) => Err(EvalError::type_mismatch(
            "a literal or IRI for STR",
            format_args!("{} (blank node)", args[0]),
        )),
    }
}

pub(super) fn eval_strlen(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "STRLEN")?;
    let s = string_arg(&args[0], "STRLEN")?;
    Ok(NodeValue::integer(s.chars().count()))
}

/// SUBSTR(str, start [, length]) with 1-based character positions
pub(super) fn eval_substr(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity_range(args, 2, 3, "SUBSTR")?;
    let s = string_arg(&args[0], "SUBSTR")?;
    let start = round_half_up(args[1].as_double()?);
    let end = match args.get(2) {
        Some(len) => start + round_half_up(len.as_double()?),
        None => f64::INFINITY,
    };
    let result: String = s
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let pos = (*i + 1) as f64;
            pos >= start && pos < end
        })
        .map(|(_, c)| c)
        .collect();
    Ok(same_kind(&args[0], result))
}

pub(super) fn eval_ucase(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "UCASE")?;
    let s = string_arg(&args[0], "UCASE")?;
    Ok(same_kind(&args[0], s.to_uppercase()))
}

pub(super) fn eval_lcase(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "LCASE")?;
    let s = string_arg(&args[0], "LCASE")?;
    Ok(same_kind(&args[0], s.to_lowercase()))
}

/// Both string arguments, after the compatibility check
fn string_pair<'a>(args: &'a [NodeValue], fn_name: &str) -> Result<(&'a str, &'a str)> {
    check_arity(args, 2, fn_name)?;
    let haystack = string_arg(&args[0], fn_name)?;
    let needle = string_arg(&args[1], fn_name)?;
    check_compatible(&args[0], &args[1], fn_name)?;
    Ok((haystack, needle))
}

pub(super) fn eval_contains(args: &[NodeValue]) -> Result<NodeValue> {
    let (haystack, needle) = string_pair(args, "CONTAINS")?;
    Ok(NodeValue::boolean(haystack.contains(needle)))
}

pub(super) fn eval_str_starts(args: &[NodeValue]) -> Result<NodeValue> {
    let (haystack, needle) = string_pair(args, "STRSTARTS")?;
    Ok(NodeValue::boolean(haystack.starts_with(needle)))
}

pub(super) fn eval_str_ends(args: &[NodeValue]) -> Result<NodeValue> {
    let (haystack, needle) = string_pair(args, "STRENDS")?;
    Ok(NodeValue::boolean(haystack.ends_with(needle)))
}

/// STRBEFORE: no match gives an empty simple literal
pub(super) fn eval_str_before(args: &[NodeValue]) -> Result<NodeValue> {
    let (haystack, needle) = string_pair(args, "STRBEFORE")?;
    Ok(match haystack.find(needle) {
        Some(idx) => same_kind(&args[0], &haystack[..idx]),
        None => NodeValue::string(""),
    })
}

/// STRAFTER: no match gives an empty simple literal
pub(super) fn eval_str_after(args: &[NodeValue]) -> Result<NodeValue> {
    let (haystack, needle) = string_pair(args, "STRAFTER")?;
    Ok(match haystack.find(needle) {
        Some(idx) => same_kind(&args[0], &haystack[idx + needle.len()..]),
        None => NodeValue::string(""),
    })
}

/// CONCAT: the result keeps a language tag or `xsd:string` only when every
/// argument shares it
pub(super) fn eval_concat(args: &[NodeValue]) -> Result<NodeValue> {
    let mut result = String::new();
    for arg in args {
        result.push_str(string_arg(arg, "CONCAT")?);
    }
    let Some(first) = args.first() else {
        return Ok(NodeValue::string(result));
    };
    let shared_lang = first
        .lang()
        .filter(|lang| args.iter().all(|a| a.lang() == Some(*lang)));
    if let Some(lang) = shared_lang {
        return Ok(NodeValue::lang_string(result, lang));
    }
    let all_typed = args
        .iter()
        .all(|a| a.as_term().as_literal().and_then(|l| l.datatype()) == Some(xsd::STRING));
    if all_typed {
        Ok(NodeValue::from_term(Term::typed(result, xsd::STRING)))
    } else {
        Ok(NodeValue::string(result))
    }
}

/// REGEX(text, pattern [, flags])
pub(super) fn eval_regex(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity_range(args, 2, 3, "REGEX")?;
    let text = string_arg(&args[0], "REGEX")?;
    let pattern = simple_string_arg(&args[1], "REGEX")?;
    let flags = match args.get(2) {
        Some(f) => simple_string_arg(f, "REGEX")?,
        None => "",
    };
    let re = build_regex_with_flags(pattern, flags)?;
    Ok(NodeValue::boolean(re.is_match(text)))
}

/// REPLACE(text, pattern, replacement [, flags])
pub(super) fn eval_replace(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity_range(args, 3, 4, "REPLACE")?;
    let text = string_arg(&args[0], "REPLACE")?;
    let pattern = simple_string_arg(&args[1], "REPLACE")?;
    let replacement = simple_string_arg(&args[2], "REPLACE")?;
    let flags = match args.get(3) {
        Some(f) => simple_string_arg(f, "REPLACE")?,
        None => "",
    };
    let re = build_regex_with_flags(pattern, flags)?;
    if re.is_match("") {
        return Err(EvalError::invalid_argument(format!(
            "REPLACE pattern matches the empty string: {}",
            pattern
        )));
    }
    let replaced = if flags.contains('q') {
        re.replace_all(text, NoExpand(replacement)).into_owned()
    } else {
        re.replace_all(text, translate_replacement(replacement)?.as_str())
            .into_owned()
    };
    Ok(same_kind(&args[0], replaced))
}

/// Translate an XPath replacement string (`$N`, `\$`, `\\`) to regex crate syntax
fn translate_replacement(replacement: &str) -> Result<String> {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('$') => out.push_str("$$"),
                Some('\\') => out.push('\\'),
                _ => {
                    return Err(EvalError::invalid_argument(format!(
                        "Invalid escape in replacement: {}",
                        replacement
                    )))
                }
            },
            '$' => {
                let mut group = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    group.push(*d);
                    chars.next();
                }
                if group.is_empty() {
                    return Err(EvalError::invalid_argument(format!(
                        "Invalid group reference in replacement: {}",
                        replacement
                    )));
                }
                out.push_str("${");
                out.push_str(&group);
                out.push('}');
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

pub(super) fn eval_encode_for_uri(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "ENCODE_FOR_URI")?;
    let s = string_arg(&args[0], "ENCODE_FOR_URI")?;
    Ok(NodeValue::string(
        utf8_percent_encode(s, URI_COMPONENT).to_string(),
    ))
}

/// STRDT(lexical, datatype IRI)
pub(super) fn eval_str_dt(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 2, "STRDT")?;
    let lexical = simple_string_arg(&args[0], "STRDT")?;
    let Term::Iri(datatype) = args[1].as_term() else {
        return Err(EvalError::type_mismatch(
            "a datatype IRI for STRDT",
            format_args!("{} ({})", args[1], args[1].type_name()),
        ));
    };
    Ok(NodeValue::from_term(Term::typed(lexical, datatype.clone())))
}

/// STRLANG(lexical, language tag)
pub(super) fn eval_str_lang(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 2, "STRLANG")?;
    let lexical = simple_string_arg(&args[0], "STRLANG")?;
    let lang = simple_string_arg(&args[1], "STRLANG")?;
    if lang.is_empty() {
        return Err(EvalError::invalid_argument("STRLANG requires a non-empty language tag"));
    }
    Ok(NodeValue::lang_string(lexical, Arc::<str>::from(lang)))
}
