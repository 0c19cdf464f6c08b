//! Function dispatch - routes Function to specialized implementations

use super::{
    arithmetic, compare, conditional, datetime, extension, hash, logical, numeric, rdf, string,
    types, uuid,
};
use crate::binding::{RowAccess, RowId};
use crate::context::EvalContext;
use crate::expr::Expression;
use crate::function::Function;
use sparql_value::{EvalError, NodeValue, Result};

impl Function {
    /// Evaluate this function over unevaluated arguments.
    ///
    /// Special forms receive their arguments as expressions and decide what
    /// to evaluate. Every other function evaluates all arguments first (the
    /// first argument error propagates) and then applies itself to the values.
    pub fn eval(
        &self,
        args: &[Expression],
        row: &dyn RowAccess,
        ctx: &EvalContext<'_>,
    ) -> Result<NodeValue> {
        match self {
            Function::And => logical::eval_and(args, row, ctx),
            Function::Or => logical::eval_or(args, row, ctx),
            Function::In => logical::eval_in(args, row, ctx, false),
            Function::NotIn => logical::eval_in(args, row, ctx, true),
            Function::If => conditional::eval_if(args, row, ctx),
            Function::Coalesce => conditional::eval_coalesce(args, row, ctx),
            Function::Bound => conditional::eval_bound(args, row, ctx),
            Function::Call(cache) => extension::eval_call(cache, args, row, ctx),
            Function::Custom(custom) => extension::eval_custom(custom, args, row, ctx),
            _ => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(row, ctx))
                    .collect::<Result<Vec<_>>>()?;
                self.apply(&values, row.row_id(), ctx)
            }
        }
    }

    /// Apply a strict function to already evaluated arguments.
    ///
    /// `row` identifies the row for per-row state (`BNODE(str)`).
    pub fn apply(&self, args: &[NodeValue], row: RowId, ctx: &EvalContext<'_>) -> Result<NodeValue> {
        match self {
            // Comparison operators
            Function::Eq => compare::eval_eq(args, ctx),
            Function::Ne => compare::eval_ne(args, ctx),
            Function::Lt => compare::eval_lt(args, ctx),
            Function::Le => compare::eval_le(args, ctx),
            Function::Gt => compare::eval_gt(args, ctx),
            Function::Ge => compare::eval_ge(args, ctx),
            Function::SameTerm => rdf::eval_same_term(args),

            // Arithmetic operators
            Function::Add => arithmetic::eval_add(args),
            Function::Sub => arithmetic::eval_sub(args),
            Function::Mul => arithmetic::eval_mul(args),
            Function::Div => arithmetic::eval_div(args),
            Function::Negate => arithmetic::eval_negate(args),
            Function::UnaryPlus => arithmetic::eval_plus(args),

            Function::Not => logical::eval_not(args),

            // String functions
            Function::Str => string::eval_str(args),
            Function::Strlen => string::eval_strlen(args),
            Function::Substr => string::eval_substr(args),
            Function::Ucase => string::eval_ucase(args),
            Function::Lcase => string::eval_lcase(args),
            Function::Contains => string::eval_contains(args),
            Function::StrStarts => string::eval_str_starts(args),
            Function::StrEnds => string::eval_str_ends(args),
            Function::StrBefore => string::eval_str_before(args),
            Function::StrAfter => string::eval_str_after(args),
            Function::Concat => string::eval_concat(args),
            Function::Regex => string::eval_regex(args),
            Function::Replace => string::eval_replace(args),
            Function::EncodeForUri => string::eval_encode_for_uri(args),
            Function::StrDt => string::eval_str_dt(args),
            Function::StrLang => string::eval_str_lang(args),
            Function::Lang => rdf::eval_lang(args),
            Function::LangMatches => rdf::eval_lang_matches(args),
            Function::Datatype => rdf::eval_datatype(args),

            // Numeric functions
            Function::Abs => numeric::eval_abs(args),
            Function::Round => numeric::eval_round(args),
            Function::Ceil => numeric::eval_ceil(args),
            Function::Floor => numeric::eval_floor(args),
            Function::Rand => numeric::eval_rand(args),

            // Term functions
            Function::IsIri => types::eval_is_iri(args),
            Function::IsBlank => types::eval_is_blank(args),
            Function::IsLiteral => types::eval_is_literal(args),
            Function::IsNumeric => types::eval_is_numeric(args),
            Function::Iri => rdf::eval_iri(args, ctx),
            Function::Bnode => rdf::eval_bnode(args, row, ctx),
            Function::Uuid => uuid::eval_uuid(args),
            Function::StrUuid => uuid::eval_struuid(args),

            // DateTime functions
            Function::Now => datetime::eval_now(args, ctx),
            Function::Year => datetime::eval_year(args),
            Function::Month => datetime::eval_month(args),
            Function::Day => datetime::eval_day(args),
            Function::Hours => datetime::eval_hours(args),
            Function::Minutes => datetime::eval_minutes(args),
            Function::Seconds => datetime::eval_seconds(args),
            Function::Timezone => datetime::eval_timezone(args),
            Function::Tz => datetime::eval_tz(args),

            // Hash functions
            Function::Md5 => hash::eval_md5(args),
            Function::Sha1 => hash::eval_sha1(args),
            Function::Sha256 => hash::eval_sha256(args),
            Function::Sha384 => hash::eval_sha384(args),
            Function::Sha512 => hash::eval_sha512(args),

            Function::And
            | Function::Or
            | Function::In
            | Function::NotIn
            | Function::If
            | Function::Coalesce
            | Function::Bound
            | Function::Call(_)
            | Function::Custom(_) => Err(EvalError::internal(format!(
                "special form {} applied to evaluated arguments",
                self.symbol()
            ))),
        }
    }
}
