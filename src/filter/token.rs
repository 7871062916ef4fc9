use super::{Extractor, FilterValue, ParsedValue, TypedFilter};
use crate::error::AppResult;
use crate::parser::{FilterKind, Segment};

/// Exact, case-sensitive identifiers such as logins or keys.
pub struct TokenExtractor;

impl Extractor for TokenExtractor {
    fn kind(&self) -> FilterKind {
        FilterKind::Token
    }

    fn extract_segment(&self, _filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue> {
        Ok(ParsedValue::equals(
            segment.negated,
            segment.body,
            FilterValue::Text(segment.body.to_string()),
        ))
    }
}
