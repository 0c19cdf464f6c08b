//! Term type tests: isIRI, isBlank, isLiteral, isNumeric

use super::helpers::check_arity;
use sparql_value::{NodeValue, Result};

pub(super) fn eval_is_iri(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "isIRI")?;
    Ok(NodeValue::boolean(args[0].is_iri()))
}

pub(super) fn eval_is_blank(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "isBlank")?;
    Ok(NodeValue::boolean(args[0].is_blank()))
}

pub(super) fn eval_is_literal(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "isLiteral")?;
    Ok(NodeValue::boolean(args[0].is_literal()))
}

/// isNumeric: false for ill-formed numeric literals such as `"abc"^^xsd:integer`
pub(super) fn eval_is_numeric(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 1, "isNumeric")?;
    Ok(NodeValue::boolean(args[0].is_numeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparql_value::vocab::xsd;
    use sparql_value::Term;

    #[test]
    fn test_type_tests() {
        let iri = NodeValue::iri("http://ex.org/a");
        let blank = NodeValue::blank("b0");
        let lit = NodeValue::string("a");
        assert_eq!(eval_is_iri(&[iri.clone()]).unwrap().as_boolean(), Ok(true));
        assert_eq!(eval_is_iri(&[lit.clone()]).unwrap().as_boolean(), Ok(false));
        assert_eq!(eval_is_blank(&[blank]).unwrap().as_boolean(), Ok(true));
        assert_eq!(eval_is_literal(&[lit]).unwrap().as_boolean(), Ok(true));
        assert_eq!(eval_is_literal(&[iri]).unwrap().as_boolean(), Ok(false));
    }

    #[test]
    fn test_is_numeric() {
        let good = NodeValue::from_term(Term::typed("12", xsd::INTEGER));
        let bad = NodeValue::from_term(Term::typed("1x", xsd::INTEGER));
        assert_eq!(eval_is_numeric(&[good]).unwrap().as_boolean(), Ok(true));
        assert_eq!(eval_is_numeric(&[bad]).unwrap().as_boolean(), Ok(false));
    }
}
