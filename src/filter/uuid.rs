use super::{Extractor, FilterValue, ParsedValue, TypedFilter};
use crate::error::{AppError, AppResult};
use crate::parser::{FilterKind, Segment};
use uuid::Uuid;

pub struct UuidExtractor;

impl Extractor for UuidExtractor {
    fn kind(&self) -> FilterKind {
        FilterKind::Uuid
    }

    fn extract_segment(&self, filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue> {
        let id = Uuid::parse_str(segment.body)
            .map_err(|_| AppError::invalid_value(filter.name(), segment.raw, "a UUID"))?;
        Ok(ParsedValue::equals(segment.negated, segment.body, FilterValue::Uuid(id)))
    }
}
