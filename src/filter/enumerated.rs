use super::{Extractor, FilterValue, ParsedValue, TypedFilter};
use crate::error::{AppError, AppResult};
use crate::parser::{FilterKind, Segment};

/// Enum constants compared by name. When the field declares its constants, others are rejected.
pub struct EnumeratedExtractor;

impl Extractor for EnumeratedExtractor {
    fn kind(&self) -> FilterKind {
        FilterKind::Enumerated
    }

    fn extract_segment(&self, filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue> {
        let allowed = filter.allowed_values();
        if !allowed.is_empty() && !allowed.iter().any(|value| value == segment.body) {
            return Err(AppError::invalid_value(
                filter.name(),
                segment.raw,
                format!("one of {}", allowed.join(", ")),
            ));
        }
        Ok(ParsedValue::equals(
            segment.negated,
            segment.body,
            FilterValue::Text(segment.body.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access_control_type(raw: &str) -> TypedFilter {
        TypedFilter::new("type", Some(raw.to_string()), FilterKind::Enumerated).with_allowed_values(
            vec!["ROLE".to_string(), "GROUP".to_string(), "SCOPE".to_string()],
        )
    }

    #[test]
    fn test_declared_constants_are_accepted() {
        let mut filter = access_control_type("ROLE|not_SCOPE|null");
        assert!(filter.extract().unwrap());
        assert_eq!(filter.values().len(), 3);
        assert_eq!(filter.values()[1].value, FilterValue::Text("SCOPE".to_string()));
        assert!(filter.values()[1].negated);
    }

    #[test]
    fn test_unknown_constant_is_invalid_value() {
        let err = access_control_type("ROLE|role").extract().unwrap_err();
        match err {
            AppError::InvalidFilterValue { field, value, expected } => {
                assert_eq!(field, "type");
                assert_eq!(value, "role");
                assert_eq!(expected, "one of ROLE, GROUP, SCOPE");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_open_enumeration_accepts_anything() {
        let mut filter = TypedFilter::new("type", Some("ANYTHING".to_string()), FilterKind::Enumerated);
        assert!(filter.extract().unwrap());
    }
}
