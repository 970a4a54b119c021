//! Removal of `aws-chunked` framing left behind in single-part uploads.
//!
//! Some S3-compatible servers store the chunk header of a signed streaming
//! upload (`<hex-size>;chunk-signature=<hex-signature>`) inside the object
//! when the client declared an exact length. Reads in that mode strip it.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use std::borrow::Cow;

lazy_static! {
    // ASCII word classes, matched over raw bytes so non-UTF-8 payloads survive.
    static ref CHUNK_SIGNATURE: Regex =
        Regex::new(r"(?-u:\w)+;chunk-signature=(?-u:\w)+").expect("chunk signature pattern is valid");
}

pub fn contains_chunk_signature(content: &[u8]) -> bool {
    CHUNK_SIGNATURE.is_match(content)
}

/// Removes every non-overlapping chunk-signature match, leaving all other bytes untouched.
pub fn strip_chunk_signatures(content: &[u8]) -> Vec<u8> {
    match CHUNK_SIGNATURE.replace_all(content, &b""[..]) {
        Cow::Borrowed(unchanged) => unchanged.to_vec(),
        Cow::Owned(stripped) => stripped,
    }
}
