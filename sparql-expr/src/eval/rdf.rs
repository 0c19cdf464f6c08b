//! RDF term functions: sameTerm, LANG, LANGMATCHES, DATATYPE, IRI, BNODE

use super::helpers::{check_arity, check_arity_range, simple_string_arg};
use crate::binding::RowId;
use crate::context::{fresh_bnode_label, EvalContext};
use sparql_value::{EvalError, NodeValue, Result, Term};

pub(super) fn eval_same_term(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 2, "sameTerm")?;
    Ok(NodeValue::boolean(args[0].as_term() == args[1].as_term()))
}

fn literal_mismatch(fn_name: &str, value: &NodeValue) -> EvalError {
    EvalError::type_mismatch(
        format!("a literal for {}", fn_name),
        format_args!("{} ({})", value, value.type_name()),
    )
}

/// LANG: the language tag, or "" for literals without one
pub(super) fn eval_lang(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "LANG")?;
    let value = &args[0];
    if !value.is_literal() {
        return Err(literal_mismatch("LANG", value));
    }
    Ok(NodeValue::string(value.lang().unwrap_or_default()))
}

/// LANGMATCHES(tag, range) per RFC 4647 basic filtering
pub(super) fn eval_lang_matches(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 2, "LANGMATCHES")?;
    let tag = simple_string_arg(&args[0], "LANGMATCHES")?;
    let range = simple_string_arg(&args[1], "LANGMATCHES")?;
    Ok(NodeValue::boolean(lang_matches(tag, range)))
}

fn lang_matches(tag: &str, range: &str) -> bool {
    if range == "*" {
        return !tag.is_empty();
    }
    if tag.len() < range.len() || !tag.is_char_boundary(range.len()) {
        return false;
    }
    let (prefix, rest) = tag.split_at(range.len());
    prefix.eq_ignore_ascii_case(range) && (rest.is_empty() || rest.starts_with('-'))
}

/// DATATYPE: simple literals report xsd:string, tagged ones rdf:langString
pub(super) fn eval_datatype(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "DATATYPE")?;
    let value = &args[0];
    match value.datatype_iri() {
        Some(dt) => Ok(NodeValue::iri(dt)),
        None => Err(literal_mismatch("DATATYPE", value)),
    }
}

/// IRI(str) / IRI(iri), resolving relative references against the base IRI
pub(super) fn eval_iri(args: &[NodeValue], ctx: &EvalContext<'_>) -> Result<NodeValue> {
    check_arity(args, 1, "IRI")?;
    let value = &args[0];
    if value.is_iri() {
        return Ok(value.clone());
    }
    let reference = simple_string_arg(value, "IRI")?;
    let resolved = match ctx.options().base_iri.as_deref() {
        Some(base) => resolve_iri(base, reference),
        None => reference.to_string(),
    };
    Ok(NodeValue::iri(resolved))
}

/// BNODE() is fresh on every call; BNODE(str) is stable within one row
pub(super) fn eval_bnode(args: &[NodeValue], row: RowId, ctx: &EvalContext<'_>) -> Result<NodeValue> {
    check_arity_range(args, 0, 1, "BNODE")?;
    match args.first() {
        None => Ok(NodeValue::blank(fresh_bnode_label())),
        Some(key) => {
            let key = simple_string_arg(key, "BNODE")?;
            Ok(NodeValue::blank(ctx.bnode_label(row, key)))
        }
    }
}

// =============================================================================
// IRI resolution (RFC 3986 section 5.2)
// =============================================================================

fn has_scheme(s: &str) -> bool {
    match s.find(':') {
        Some(idx) if idx > 0 => {
            let scheme = &s[..idx];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn strip_fragment(s: &str) -> &str {
    s.split('#').next().unwrap_or(s)
}

fn strip_query(s: &str) -> &str {
    strip_fragment(s).split('?').next().unwrap_or(s)
}

/// `scheme:` and `//authority` of the base, if present
fn scheme_and_authority(base: &str) -> (&str, &str) {
    let Some(colon) = base.find(':') else {
        return ("", base);
    };
    let scheme = &base[..=colon];
    let rest = &base[colon + 1..];
    match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            (scheme, &rest[..end + 2])
        }
        None => (scheme, ""),
    }
}

fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len().saturating_sub(1);
    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {
                if i == last {
                    output.push("");
                }
            }
            ".." => {
                if output.len() > 1 {
                    output.pop();
                }
                if i == last {
                    output.push("");
                }
            }
            s => output.push(s),
        }
    }
    output.join("/")
}

pub(crate) fn resolve_iri(base: &str, reference: &str) -> String {
    if has_scheme(reference) {
        return reference.to_string();
    }
    let (scheme, authority) = scheme_and_authority(base);
    if let Some(rest) = reference.strip_prefix("//") {
        return format!("{}//{}", scheme, rest);
    }
    if reference.is_empty() {
        return strip_fragment(base).to_string();
    }
    if reference.starts_with('#') {
        return format!("{}{}", strip_fragment(base), reference);
    }
    if reference.starts_with('?') {
        return format!("{}{}", strip_query(base), reference);
    }
    let (path, suffix) = match reference.find(['?', '#']) {
        Some(idx) => reference.split_at(idx),
        None => (reference, ""),
    };
    let merged = if path.starts_with('/') {
        path.to_string()
    } else {
        let base_path = &strip_query(base)[scheme.len() + authority.len()..];
        match base_path.rfind('/') {
            Some(idx) => format!("{}{}", &base_path[..=idx], path),
            None if !authority.is_empty() => format!("/{}", path),
            None => path.to_string(),
        }
    };
    format!("{}{}{}{}", scheme, authority, remove_dot_segments(&merged), suffix)
}
