//! Function identity
//!
//! Every function node carries a [`Function`]. Its symbol (and operator
//! glyph, when it has one) is what structural equality, hashing and
//! printing see. Extension functions carry a resolution cache that is
//! deliberately invisible to equality and hashing.

use crate::registry::ResolverCache;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A custom function bound to a fixed IRI
#[derive(Clone, Debug)]
pub struct CustomFunction {
    pub iri: Arc<str>,
    pub cache: ResolverCache,
}

impl CustomFunction {
    pub fn new(iri: impl Into<Arc<str>>) -> Self {
        Self {
            iri: iri.into(),
            cache: ResolverCache::new(),
        }
    }
}

/// Built-in and extension functions
#[derive(Clone, Debug)]
pub enum Function {
    // =========================================================================
    // Comparison
    // =========================================================================
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    SameTerm,

    // =========================================================================
    // Arithmetic
    // =========================================================================
    Add,
    Sub,
    Mul,
    Div,
    /// Unary minus
    Negate,
    /// Unary plus
    UnaryPlus,

    // =========================================================================
    // Logical
    // =========================================================================
    And,
    Or,
    Not,
    In,
    NotIn,

    // =========================================================================
    // Conditional
    // =========================================================================
    If,
    Coalesce,
    Bound,

    // =========================================================================
    // String functions
    // =========================================================================
    Str,
    Strlen,
    Substr,
    Ucase,
    Lcase,
    Contains,
    StrStarts,
    StrEnds,
    StrBefore,
    StrAfter,
    Concat,
    Regex,
    Replace,
    EncodeForUri,
    Lang,
    LangMatches,
    Datatype,
    StrDt,
    StrLang,

    // =========================================================================
    // Numeric functions
    // =========================================================================
    Abs,
    Round,
    Ceil,
    Floor,
    Rand,

    // =========================================================================
    // Term functions
    // =========================================================================
    IsIri,
    IsBlank,
    IsLiteral,
    IsNumeric,
    Iri,
    Bnode,
    Uuid,
    StrUuid,

    // =========================================================================
    // DateTime functions
    // =========================================================================
    Now,
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
    Timezone,
    Tz,

    // =========================================================================
    // Hash functions
    // =========================================================================
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,

    // =========================================================================
    // Extension functions
    // =========================================================================
    /// CALL(iri, args...) - the IRI is the first argument
    Call(ResolverCache),
    /// A function bound to a fixed IRI
    Custom(CustomFunction),
}

impl Function {
    /// Call a function IRI dynamically
    pub fn call() -> Self {
        Function::Call(ResolverCache::new())
    }

    /// A custom function bound to `iri`
    pub fn custom(iri: impl Into<Arc<str>>) -> Self {
        Function::Custom(CustomFunction::new(iri))
    }

    /// SSE symbol
    pub fn symbol(&self) -> &str {
        match self {
            Function::Eq => "eq",
            Function::Ne => "ne",
            Function::Lt => "lt",
            Function::Le => "le",
            Function::Gt => "gt",
            Function::Ge => "ge",
            Function::SameTerm => "sameTerm",
            Function::Add => "add",
            Function::Sub => "subtract",
            Function::Mul => "multiply",
            Function::Div => "divide",
            Function::Negate => "unaryminus",
            Function::UnaryPlus => "unaryplus",
            Function::And => "and",
            Function::Or => "or",
            Function::Not => "not",
            Function::In => "in",
            Function::NotIn => "notin",
            Function::If => "if",
            Function::Coalesce => "coalesce",
            Function::Bound => "bound",
            Function::Str => "str",
            Function::Strlen => "strlen",
            Function::Substr => "substr",
            Function::Ucase => "ucase",
            Function::Lcase => "lcase",
            Function::Contains => "contains",
            Function::StrStarts => "strstarts",
            Function::StrEnds => "strends",
            Function::StrBefore => "strbefore",
            Function::StrAfter => "strafter",
            Function::Concat => "concat",
            Function::Regex => "regex",
            Function::Replace => "replace",
            Function::EncodeForUri => "encode_for_uri",
            Function::Lang => "lang",
            Function::LangMatches => "langMatches",
            Function::Datatype => "datatype",
            Function::StrDt => "strdt",
            Function::StrLang => "strlang",
            Function::Abs => "abs",
            Function::Round => "round",
            Function::Ceil => "ceil",
            Function::Floor => "floor",
            Function::Rand => "rand",
            Function::IsIri => "isIRI",
            Function::IsBlank => "isBlank",
            Function::IsLiteral => "isLiteral",
            Function::IsNumeric => "isNumeric",
            Function::Iri => "iri",
            Function::Bnode => "bnode",
            Function::Uuid => "uuid",
            Function::StrUuid => "struuid",
            Function::Now => "now",
            Function::Year => "year",
            Function::Month => "month",
            Function::Day => "day",
            Function::Hours => "hours",
            Function::Minutes => "minutes",
            Function::Seconds => "seconds",
            Function::Timezone => "timezone",
            Function::Tz => "tz",
            Function::Md5 => "md5",
            Function::Sha1 => "sha1",
            Function::Sha256 => "sha256",
            Function::Sha384 => "sha384",
            Function::Sha512 => "sha512",
            Function::Call(_) => "call",
            Function::Custom(custom) => &custom.iri,
        }
    }

    /// Operator spelling, for functions written as operators
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            Function::Eq => Some("="),
            Function::Ne => Some("!="),
            Function::Lt => Some("<"),
            Function::Le => Some("<="),
            Function::Gt => Some(">"),
            Function::Ge => Some(">="),
            Function::Add | Function::UnaryPlus => Some("+"),
            Function::Sub | Function::Negate => Some("-"),
            Function::Mul => Some("*"),
            Function::Div => Some("/"),
            Function::And => Some("&&"),
            Function::Or => Some("||"),
            Function::Not => Some("!"),
            _ => None,
        }
    }

    /// Functions that control the evaluation of their own arguments
    pub fn is_special_form(&self) -> bool {
        matches!(
            self,
            Function::And
                | Function::Or
                | Function::If
                | Function::Coalesce
                | Function::Bound
                | Function::In
                | Function::NotIn
                | Function::Call(_)
                | Function::Custom(_)
        )
    }

    /// True for functions whose result depends on the evaluation options:
    /// `IRI()` resolves against the base IRI and the comparison operators
    /// follow the value-space and dateTime ordering settings
    pub fn is_context_dependent(&self) -> bool {
        matches!(
            self,
            Function::Iri
                | Function::Eq
                | Function::Ne
                | Function::Lt
                | Function::Le
                | Function::Gt
                | Function::Ge
                | Function::In
                | Function::NotIn
        )
    }

    /// False for functions whose result may differ between calls with equal arguments
    pub fn is_deterministic(&self) -> bool {
        !matches!(
            self,
            Function::Rand
                | Function::Now
                | Function::Bnode
                | Function::Uuid
                | Function::StrUuid
                | Function::Call(_)
                | Function::Custom(_)
        )
    }

    /// Functions taking a variable number of arguments; always built as `FuncN`
    pub fn is_variadic(&self) -> bool {
        matches!(
            self,
            Function::Concat
                | Function::Coalesce
                | Function::In
                | Function::NotIn
                | Function::Call(_)
                | Function::Custom(_)
        )
    }

    /// Look up a builtin by its SPARQL name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let f = match name.to_ascii_uppercase().as_str() {
            "SAMETERM" => Function::SameTerm,
            "IN" => Function::In,
            "NOT IN" | "NOTIN" => Function::NotIn,
            "IF" => Function::If,
            "COALESCE" => Function::Coalesce,
            "BOUND" => Function::Bound,
            "STR" => Function::Str,
            "STRLEN" => Function::Strlen,
            "SUBSTR" => Function::Substr,
            "UCASE" => Function::Ucase,
            "LCASE" => Function::Lcase,
            "CONTAINS" => Function::Contains,
            "STRSTARTS" => Function::StrStarts,
            "STRENDS" => Function::StrEnds,
            "STRBEFORE" => Function::StrBefore,
            "STRAFTER" => Function::StrAfter,
            "CONCAT" => Function::Concat,
            "REGEX" => Function::Regex,
            "REPLACE" => Function::Replace,
            "ENCODE_FOR_URI" => Function::EncodeForUri,
            "LANG" => Function::Lang,
            "LANGMATCHES" => Function::LangMatches,
            "DATATYPE" => Function::Datatype,
            "STRDT" => Function::StrDt,
            "STRLANG" => Function::StrLang,
            "ABS" => Function::Abs,
            "ROUND" => Function::Round,
            "CEIL" => Function::Ceil,
            "FLOOR" => Function::Floor,
            "RAND" => Function::Rand,
            "ISIRI" | "ISURI" => Function::IsIri,
            "ISBLANK" => Function::IsBlank,
            "ISLITERAL" => Function::IsLiteral,
            "ISNUMERIC" => Function::IsNumeric,
            "IRI" | "URI" => Function::Iri,
            "BNODE" => Function::Bnode,
            "UUID" => Function::Uuid,
            "STRUUID" => Function::StrUuid,
            "NOW" => Function::Now,
            "YEAR" => Function::Year,
            "MONTH" => Function::Month,
            "DAY" => Function::Day,
            "HOURS" => Function::Hours,
            "MINUTES" => Function::Minutes,
            "SECONDS" => Function::Seconds,
            "TIMEZONE" => Function::Timezone,
            "TZ" => Function::Tz,
            "MD5" => Function::Md5,
            "SHA1" => Function::Sha1,
            "SHA256" => Function::Sha256,
            "SHA384" => Function::Sha384,
            "SHA512" => Function::Sha512,
            "CALL" => Function::call(),
            _ => return None,
        };
        Some(f)
    }

    fn identity(&self) -> (std::mem::Discriminant<Function>, Option<&str>) {
        let iri = match self {
            Function::Custom(custom) => Some(&*custom.iri),
            _ => None,
        };
        (std::mem::discriminant(self), iri)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.glyph()) {
            (_, Some(glyph)) => f.write_str(glyph),
            (Function::Custom(custom), None) => write!(f, "<{}>", custom.iri),
            (_, None) => f.write_str(self.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(f: &Function) -> u64 {
        let mut h = DefaultHasher::new();
        f.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_identity_ignores_caches() {
        let a = Function::call();
        let b = Function::call();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(Function::custom("http://ex.org/f"), Function::custom("http://ex.org/f"));
        assert_ne!(Function::custom("http://ex.org/f"), Function::custom("http://ex.org/g"));
    }

    #[test]
    fn test_distinct_functions_differ() {
        assert_ne!(Function::Add, Function::Sub);
        assert_ne!(Function::Negate, Function::Sub);
    }

    #[test]
    fn test_display_prefers_glyph() {
        assert_eq!(Function::Add.to_string(), "+");
        assert_eq!(Function::And.to_string(), "&&");
        assert_eq!(Function::Strlen.to_string(), "strlen");
        assert_eq!(Function::custom("http://ex.org/f").to_string(), "<http://ex.org/f>");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Function::from_name("strlen"), Some(Function::Strlen));
        assert_eq!(Function::from_name("isURI"), Some(Function::IsIri));
        assert_eq!(Function::from_name("nope"), None);
    }

    #[test]
    fn test_classification() {
        assert!(Function::Coalesce.is_special_form());
        assert!(!Function::Add.is_special_form());
        assert!(!Function::Rand.is_deterministic());
        assert!(Function::Concat.is_variadic());
        assert!(Function::Iri.is_context_dependent());
        assert!(Function::Lt.is_context_dependent());
        assert!(!Function::Add.is_context_dependent());
        assert!(!Function::SameTerm.is_context_dependent());
    }
}
