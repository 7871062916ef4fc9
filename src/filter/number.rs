use super::{Extractor, FilterValue, ParsedValue, TypedFilter};
use crate::error::{AppError, AppResult};
use crate::parser::{FilterKind, Segment};

/// Literals are signed 64-bit integers.
pub struct NumberExtractor;

impl Extractor for NumberExtractor {
    fn kind(&self) -> FilterKind {
        FilterKind::Number
    }

    fn extract_segment(&self, filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue> {
        let number = segment
            .body
            .parse::<i64>()
            .map_err(|_| AppError::invalid_value(filter.name(), segment.raw, "a 64-bit integer"))?;
        Ok(ParsedValue::equals(
            segment.negated,
            segment.body,
            FilterValue::Integer(number),
        ))
    }
}
