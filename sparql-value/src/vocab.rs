//! RDF and XSD vocabulary constants
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const NORMALIZED_STRING: &str = "http://www.w3.org/2001/XMLSchema#normalizedString";
    pub const TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
    pub const LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#language";
    pub const NAME: &str = "http://www.w3.org/2001/XMLSchema#Name";
    pub const NCNAME: &str = "http://www.w3.org/2001/XMLSchema#NCName";
    pub const NMTOKEN: &str = "http://www.w3.org/2001/XMLSchema#NMTOKEN";
    pub const ENTITY: &str = "http://www.w3.org/2001/XMLSchema#ENTITY";
    pub const ID: &str = "http://www.w3.org/2001/XMLSchema#ID";
    pub const IDREF: &str = "http://www.w3.org/2001/XMLSchema#IDREF";

    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";

    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE_TIME_STAMP: &str = "http://www.w3.org/2001/XMLSchema#dateTimeStamp";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
    pub const G_YEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";
    pub const G_YEAR_MONTH: &str = "http://www.w3.org/2001/XMLSchema#gYearMonth";
    pub const G_MONTH: &str = "http://www.w3.org/2001/XMLSchema#gMonth";
    pub const G_MONTH_DAY: &str = "http://www.w3.org/2001/XMLSchema#gMonthDay";
    pub const G_DAY: &str = "http://www.w3.org/2001/XMLSchema#gDay";

    pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
    pub const DAY_TIME_DURATION: &str = "http://www.w3.org/2001/XMLSchema#dayTimeDuration";
    pub const YEAR_MONTH_DURATION: &str = "http://www.w3.org/2001/XMLSchema#yearMonthDuration";

    /// Check if a datatype IRI is an integer-family type
    #[inline]
    pub fn is_integer_family(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER
                | LONG
                | INT
                | SHORT
                | BYTE
                | UNSIGNED_LONG
                | UNSIGNED_INT
                | UNSIGNED_SHORT
                | UNSIGNED_BYTE
                | NON_NEGATIVE_INTEGER
                | POSITIVE_INTEGER
                | NON_POSITIVE_INTEGER
                | NEGATIVE_INTEGER
        )
    }

    /// Check if a datatype IRI is xsd:string or one of its derived types
    #[inline]
    pub fn is_string_like(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            STRING | NORMALIZED_STRING | TOKEN | LANGUAGE | NAME | NCNAME | NMTOKEN | ENTITY | ID | IDREF
        )
    }

    /// Inclusive (min, max) bounds for an integer subtype; `None` means unbounded on that side.
    pub fn integer_bounds(datatype_iri: &str) -> (Option<i128>, Option<i128>) {
        match datatype_iri {
            BYTE => (Some(i8::MIN as i128), Some(i8::MAX as i128)),
            SHORT => (Some(i16::MIN as i128), Some(i16::MAX as i128)),
            INT => (Some(i32::MIN as i128), Some(i32::MAX as i128)),
            LONG => (Some(i64::MIN as i128), Some(i64::MAX as i128)),
            UNSIGNED_BYTE => (Some(0), Some(u8::MAX as i128)),
            UNSIGNED_SHORT => (Some(0), Some(u16::MAX as i128)),
            UNSIGNED_INT => (Some(0), Some(u32::MAX as i128)),
            UNSIGNED_LONG => (Some(0), Some(u64::MAX as i128)),
            POSITIVE_INTEGER => (Some(1), None),
            NON_NEGATIVE_INTEGER => (Some(0), None),
            NEGATIVE_INTEGER => (None, Some(-1)),
            NON_POSITIVE_INTEGER => (None, Some(0)),
            _ => (None, None),
        }
    }

    /// Local name of an XSD datatype IRI (`xsd:integer` -> `integer`)
    pub fn local_name(datatype_iri: &str) -> Option<&str> {
        datatype_iri.strip_prefix(NS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_family() {
        assert!(xsd::is_integer_family(xsd::UNSIGNED_BYTE));
        assert!(!xsd::is_integer_family(xsd::DECIMAL));
    }

    #[test]
    fn test_sign_constrained_bounds_are_open() {
        assert_eq!(xsd::integer_bounds(xsd::POSITIVE_INTEGER), (Some(1), None));
        assert_eq!(xsd::integer_bounds(xsd::INTEGER), (None, None));
    }

    #[test]
    fn test_local_name() {
        assert_eq!(xsd::local_name(xsd::G_MONTH_DAY), Some("gMonthDay"));
        assert_eq!(xsd::local_name("http://example.org/dt"), None);
    }
}
