use super::{Extractor, FilterValue, ParsedValue, TypedFilter};
use crate::error::AppResult;
use crate::parser::{FilterKind, Segment};

/// `true` in any case is true, every other literal is false.
pub struct BooleanExtractor;

impl Extractor for BooleanExtractor {
    fn kind(&self) -> FilterKind {
        FilterKind::Boolean
    }

    fn extract_segment(&self, _filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue> {
        let value = segment.body.eq_ignore_ascii_case("true");
        Ok(ParsedValue::equals(
            segment.negated,
            segment.body,
            FilterValue::Boolean(value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Operator;

    fn extract(raw: &str) -> Vec<ParsedValue> {
        let mut filter = TypedFilter::new("isDirect", Some(raw.to_string()), FilterKind::Boolean);
        assert!(filter.extract().unwrap());
        filter.values().to_vec()
    }

    #[test]
    fn test_boolean_literals() {
        let values = extract("true|not_FALSE|TRUE|yes");
        let parsed: Vec<(bool, FilterValue)> = values
            .into_iter()
            .map(|value| (value.negated, value.value))
            .collect();
        assert_eq!(
            parsed,
            vec![
                (false, FilterValue::Boolean(true)),
                (true, FilterValue::Boolean(false)),
                (false, FilterValue::Boolean(true)),
                (false, FilterValue::Boolean(false)),
            ]
        );
    }

    #[test]
    fn test_boolean_only_equality_or_null() {
        for value in extract("gttrue|null|not_true") {
            assert!(matches!(value.operator, Operator::Equals | Operator::IsNull));
        }
    }
}
