//! DATE filters.
//!
//! Segment grammar, after the `not_` marker and the `null` literal are handled:
//!
//! ```text
//! segment  := datetime                 EQUALS
//!           | "gt" datetime            SUPERIOR
//!           | "lt" datetime            INFERIOR
//!           | datetime "bt" datetime   BETWEEN (lower bt upper)
//! datetime := yyyy-MM-dd HH:mm:ss
//! ```
//!
//! Operator tokens are the first run of ASCII letters in the segment, since datetimes never
//! contain letters.

use super::{Extractor, FilterValue, ParsedValue, TypedFilter, DATE_FORMAT};
use crate::error::{AppError, AppResult};
use crate::parser::{FilterKind, Operator, Segment};
use chrono::NaiveDateTime;

pub struct DateExtractor;

impl Extractor for DateExtractor {
    fn kind(&self) -> FilterKind {
        FilterKind::Date
    }

    fn extract_segment(&self, filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue> {
        let body = segment.body;
        let (start, end) = match find_operator_token(body) {
            Some(span) => span,
            None => {
                let date = parse_date(filter, segment, body)?;
                return Ok(ParsedValue::equals(segment.negated, body, date));
            }
        };

        let left = &body[..start];
        let token = &body[start..end];
        let right = &body[end..];
        let operator = Operator::from_token(token);

        if !left.is_empty() {
            // Only BETWEEN sits between two operands.
            if operator != Some(Operator::Between) {
                return Err(AppError::unknown_operator(filter.name(), segment.raw));
            }
            if right.is_empty() {
                return Err(AppError::empty_value(filter.name(), segment.raw));
            }
            let lower = parse_date(filter, segment, left)?;
            let upper = parse_date(filter, segment, right)?;
            return Ok(ParsedValue::between(segment.negated, lower, right, upper));
        }

        match operator {
            Some(op @ (Operator::Superior | Operator::Inferior)) => {
                if right.is_empty() {
                    return Err(AppError::empty_value(filter.name(), segment.raw));
                }
                let date = parse_date(filter, segment, right)?;
                Ok(ParsedValue::new(op, segment.negated, right, date))
            }
            Some(Operator::Between) => Err(AppError::empty_value(filter.name(), segment.raw)),
            // A lone word is a malformed date rather than an operator.
            _ if right.is_empty() => Err(AppError::invalid_value(
                filter.name(),
                segment.raw,
                "a date formatted as yyyy-MM-dd HH:mm:ss",
            )),
            _ => Err(AppError::unknown_operator(filter.name(), segment.raw)),
        }
    }
}

/// Byte span of the first run of ASCII letters.
fn find_operator_token(body: &str) -> Option<(usize, usize)> {
    let start = body.find(|c: char| c.is_ascii_alphabetic())?;
    let end = body[start..]
        .find(|c: char| !c.is_ascii_alphabetic())
        .map_or(body.len(), |offset| start + offset);
    Some((start, end))
}

fn parse_date(filter: &TypedFilter, segment: &Segment<'_>, text: &str) -> AppResult<FilterValue> {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT)
        .map(FilterValue::Timestamp)
        .map_err(|_| {
            AppError::invalid_value(
                filter.name(),
                segment.raw,
                "a date formatted as yyyy-MM-dd HH:mm:ss",
            )
        })
}
