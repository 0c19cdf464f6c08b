//! Hash functions: MD5, SHA1, SHA256, SHA384, SHA512
//!
//! The argument must be a simple or `xsd:string` literal; the result is the
//! lowercase hex digest of its UTF-8 bytes as a simple literal.

use super::helpers::{check_arity, simple_string_arg};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use sparql_value::{NodeValue, Result};
use std::fmt::Write;

fn hex_digest<D: Digest>(args: &[NodeValue], fn_name: &str) -> Result<NodeValue> {
    check_arity(args, 1, fn_name)?;
    let input = simple_string_arg(&args[0], fn_name)?;
    let digest = D::digest(input.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(hex, "{:02x}", byte);
    }
    Ok(NodeValue::string(hex))
}

pub(super) fn eval_md5(args: &[NodeValue]) -> Result<NodeValue> {
    hex_digest::<Md5>(args, "MD5")
}

pub(super) fn eval_sha1(args: &[NodeValue]) -> Result<NodeValue> {
    hex_digest::<Sha1>(args, "SHA1")
}

pub(super) fn eval_sha256(args: &[NodeValue]) -> Result<NodeValue> {
    hex_digest::<Sha256>(args, "SHA256")
}

pub(super) fn eval_sha384(args: &[NodeValue]) -> Result<NodeValue> {
    hex_digest::<Sha384>(args, "SHA384")
}

pub(super) fn eval_sha512(args: &[NodeValue]) -> Result<NodeValue> {
    hex_digest::<Sha512>(args, "SHA512")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        let abc = [NodeValue::string("abc")];
        assert_eq!(
            eval_md5(&abc).unwrap().as_string(),
            Ok("900150983cd24fb0d6963f7d28e17f72")
        );
        assert_eq!(
            eval_sha1(&abc).unwrap().as_string(),
            Ok("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
        assert_eq!(
            eval_sha256(&abc).unwrap().as_string(),
            Ok("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(eval_sha384(&abc).unwrap().as_string().unwrap().len(), 96);
        assert_eq!(eval_sha512(&abc).unwrap().as_string().unwrap().len(), 128);
    }

    #[test]
    fn test_rejects_tagged_input() {
        assert!(eval_md5(&[NodeValue::lang_string("abc", "en")]).is_err());
        assert!(eval_sha1(&[NodeValue::integer(1)]).is_err());
    }
}
