//! UUID and STRUUID

use super::helpers::check_arity;
use sparql_value::{NodeValue, Result};

/// UUID(): a fresh `urn:uuid:` IRI
pub(super) fn eval_uuid(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 0, "UUID")?;
    Ok(NodeValue::iri(format!("urn:uuid:{}", uuid::Uuid::new_v4())))
}

/// STRUUID(): a fresh UUID as a simple literal
pub(super) fn eval_struuid(args: &[NodeValue]) -> Result<NodeValue> {
    check_arity(args, 0, "STRUUID")?;
    Ok(NodeValue::string(uuid::Uuid::new_v4().to_string()))
}
