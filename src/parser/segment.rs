//! Lexical rules shared by every filter kind.
//!
//! A raw filter string is a `|`-separated list of segments. Each segment may start with the
//! `not_` marker, which negates that segment only. Once the marker is removed, the literal
//! `null` always means an IS NULL test, whatever the kind of the field.

use crate::parser::operator::Operator;

pub const OR_DELIMITER: char = '|';
pub const NOT_PREFIX: &str = "not_";

/// One `|`-delimited unit of a raw filter string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Segment text as received.
    pub raw: &'a str,
    /// Whether the segment carried the `not_` marker.
    pub negated: bool,
    /// Segment text without the marker.
    pub body: &'a str,
}

impl<'a> Segment<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (negated, body) = strip_prefix_ignore_case(raw, NOT_PREFIX)
            .map(|rest| (true, rest))
            .unwrap_or((false, raw));
        Segment { raw, negated, body }
    }

    pub fn is_null(&self) -> bool {
        self.body.eq_ignore_ascii_case(Operator::IsNull.token())
    }
}

/// Splits a raw filter string into its segments. Empty segments are kept.
pub fn split_segments(raw: &str) -> impl Iterator<Item = Segment<'_>> {
    raw.split(OR_DELIMITER).map(Segment::parse)
}

/// Removes `prefix` from the start of `text`, comparing ASCII case-insensitively.
pub fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}
