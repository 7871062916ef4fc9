use super::{Extractor, FilterValue, ParsedValue, TypedFilter};
use crate::error::AppResult;
use crate::parser::segment::strip_prefix_ignore_case;
use crate::parser::{FilterKind, Operator, Segment};
use crate::predicate::CaseFolding;

/// Wildcard accepted in LIKE patterns, translated to the SQL `%`.
pub const WILDCARD: char = '*';

/// Free text. Plain literals are compared as given; `lk_` switches to a case-insensitive pattern.
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn kind(&self) -> FilterKind {
        FilterKind::Text
    }

    fn extract_segment(&self, _filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue> {
        match strip_prefix_ignore_case(segment.body, Operator::Like.token()) {
            Some(payload) => {
                let pattern = like_pattern(payload);
                Ok(ParsedValue::new(
                    Operator::Like,
                    segment.negated,
                    CaseFolding::Unicode.fold(&pattern),
                    FilterValue::Text(pattern),
                ))
            }
            None => Ok(ParsedValue::equals(
                segment.negated,
                segment.body,
                FilterValue::Text(segment.body.to_string()),
            )),
        }
    }
}

/// Turns every `*` of the payload into `%`. Case is left to the backend applying the pattern.
pub fn like_pattern(payload: &str) -> String {
    payload.replace(WILDCARD, "%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_one(raw: &str) -> ParsedValue {
        let mut filter = TypedFilter::new("text", Some(raw.to_string()), FilterKind::Text);
        assert!(filter.extract().unwrap());
        assert_eq!(filter.values().len(), 1);
        filter.values()[0].clone()
    }

    #[test]
    fn test_like_prefix() {
        let value = extract_one("lk_test");
        assert_eq!(value.operator, Operator::Like);
        assert_eq!(value.literal, "TEST");
        assert!(!value.negated);

        let value = extract_one("lk_1");
        assert_eq!(value.operator, Operator::Like);
        assert_eq!(value.literal, "1");
    }

    #[test]
    fn test_negated_like_with_wildcards() {
        let value = extract_one("not_lk_t*es*t");
        assert_eq!(value.operator, Operator::Like);
        assert_eq!(value.literal, "T%ES%T");
        assert_eq!(value.value, FilterValue::Text("t%es%t".to_string()));
        assert!(value.negated);

        let value = extract_one("NOT_LK_test");
        assert_eq!(value.operator, Operator::Like);
        assert_eq!(value.literal, "TEST");
        assert!(value.negated);
    }

    #[test]
    fn test_like_literal_folds_non_ascii() {
        let value = extract_one("lk_été*");
        assert_eq!(value.literal, "ÉTÉ%");
        assert_eq!(value.value, FilterValue::Text("été%".to_string()));
    }

    #[test]
    fn test_equality_preserves_case() {
        let value = extract_one("Hello World");
        assert_eq!(value.operator, Operator::Equals);
        assert_eq!(value.literal, "Hello World");
    }

    #[test]
    fn test_percent_without_marker_is_plain_text() {
        let value = extract_one("%");
        assert_eq!(value.operator, Operator::Equals);
        assert_eq!(value.literal, "%");

        let value = extract_one("not_%");
        assert_eq!(value.operator, Operator::Equals);
        assert!(value.negated);
    }

    #[test]
    fn test_empty_literals() {
        let value = extract_one("");
        assert_eq!(value.operator, Operator::Equals);
        assert_eq!(value.literal, "");

        let value = extract_one("not_");
        assert_eq!(value.operator, Operator::Equals);
        assert!(value.negated);
        assert_eq!(value.literal, "");
    }
}
