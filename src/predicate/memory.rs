//! Evaluation of predicates against in-memory JSON records.
//!
//! Follows SQL three-valued logic: a comparison against a missing or null attribute is
//! unknown, and a record only matches when the whole predicate is true. LIKE tests fold case
//! with Unicode rules unless a dialect's [`CaseFolding`] is given.

use super::{AttributePath, CaseFolding, Condition, Predicate, Test};
use crate::filter::{FilterValue, DATE_FORMAT};
use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use std::cmp::Ordering;

impl Predicate {
    /// True when the record satisfies the predicate.
    pub fn matches(&self, record: &Value) -> bool {
        self.matches_with(record, CaseFolding::default())
    }

    /// Same as [`Predicate::matches`], folding LIKE operands with `folding`.
    pub fn matches_with(&self, record: &Value, folding: CaseFolding) -> bool {
        self.evaluate_with(record, folding) == Some(true)
    }

    /// Truth value of the predicate for `record`, `None` standing for SQL's UNKNOWN.
    pub fn evaluate(&self, record: &Value) -> Option<bool> {
        self.evaluate_with(record, CaseFolding::default())
    }

    pub fn evaluate_with(&self, record: &Value, folding: CaseFolding) -> Option<bool> {
        match self {
            Predicate::All => Some(true),
            Predicate::Condition(condition) => condition.evaluate(record, folding),
            Predicate::And(items) => {
                let mut unknown = false;
                for item in items {
                    match item.evaluate_with(record, folding) {
                        Some(false) => return Some(false),
                        None => unknown = true,
                        Some(true) => {}
                    }
                }
                if unknown {
                    None
                } else {
                    Some(true)
                }
            }
            Predicate::Or(items) => {
                let mut unknown = false;
                for item in items {
                    match item.evaluate_with(record, folding) {
                        Some(true) => return Some(true),
                        None => unknown = true,
                        Some(false) => {}
                    }
                }
                if unknown {
                    None
                } else {
                    Some(false)
                }
            }
        }
    }
}

impl Condition {
    fn evaluate(&self, record: &Value, folding: CaseFolding) -> Option<bool> {
        let attribute = lookup(record, &self.attribute);
        if let Test::IsNull = self.test {
            return Some(attribute.is_null() != self.negated);
        }
        if attribute.is_null() {
            return None;
        }

        let result = match &self.test {
            Test::Equals(expected) => compare(attribute, expected)? == Ordering::Equal,
            Test::Superior(expected) => compare(attribute, expected)? == Ordering::Greater,
            Test::Inferior(expected) => compare(attribute, expected)? == Ordering::Less,
            Test::Between(lower, upper) => {
                compare(attribute, lower)? != Ordering::Less
                    && compare(attribute, upper)? != Ordering::Greater
            }
            Test::Like(pattern) => {
                let text = coerce(attribute, &FilterValue::Text(String::new()))?;
                like(&folding.fold(&text.to_string()), &folding.fold(pattern))
            }
            Test::In(values) => {
                let mut found = false;
                for value in values {
                    if compare(attribute, value)? == Ordering::Equal {
                        found = true;
                        break;
                    }
                }
                found
            }
            Test::IsNull => unreachable!("handled above"),
        };
        Some(result != self.negated)
    }
}

fn lookup<'a>(record: &'a Value, attribute: &AttributePath) -> &'a Value {
    let scope = match &attribute.qualifier {
        Some(qualifier) => &record[qualifier.as_str()],
        None => record,
    };
    &scope[attribute.field.as_str()]
}

/// Converts a JSON attribute into the variant of `like`, if it can be read that way.
fn coerce(attribute: &Value, like: &FilterValue) -> Option<FilterValue> {
    match like {
        FilterValue::Null => None,
        FilterValue::Boolean(_) => match attribute {
            Value::Bool(b) => Some(FilterValue::Boolean(*b)),
            Value::Number(n) => n.as_i64().map(|n| FilterValue::Boolean(n != 0)),
            Value::String(s) => Some(FilterValue::Boolean(s.eq_ignore_ascii_case("true"))),
            _ => None,
        },
        FilterValue::Integer(_) => match attribute {
            Value::Number(n) => n.as_i64().map(FilterValue::Integer),
            Value::String(s) => s.parse().ok().map(FilterValue::Integer),
            _ => None,
        },
        FilterValue::Text(_) => match attribute {
            Value::String(s) => Some(FilterValue::Text(s.clone())),
            Value::Number(_) | Value::Bool(_) => Some(FilterValue::Text(attribute.to_string())),
            _ => None,
        },
        FilterValue::Timestamp(_) => {
            let text = attribute.as_str()?;
            NaiveDateTime::parse_from_str(text, DATE_FORMAT)
                .ok()
                .or_else(|| {
                    DateTime::parse_from_rfc3339(text)
                        .ok()
                        .map(|dt| dt.naive_utc())
                })
                .map(FilterValue::Timestamp)
        }
        FilterValue::Uuid(_) => attribute
            .as_str()
            .and_then(|s| ::uuid::Uuid::parse_str(s).ok())
            .map(FilterValue::Uuid),
    }
}

fn compare(attribute: &Value, expected: &FilterValue) -> Option<Ordering> {
    let actual = coerce(attribute, expected)?;
    match (&actual, expected) {
        (FilterValue::Boolean(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
        (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
        (FilterValue::Text(a), FilterValue::Text(b)) => Some(a.cmp(b)),
        (FilterValue::Timestamp(a), FilterValue::Timestamp(b)) => Some(a.cmp(b)),
        (FilterValue::Uuid(a), FilterValue::Uuid(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// SQL LIKE matching: `%` is any sequence, `_` any single character.
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            t += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|c| *c == '%')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TypedFilter;
    use crate::parser::FilterKind;
    use serde_json::json;

    fn field_predicate(name: &str, raw: &str, kind: FilterKind) -> Predicate {
        let mut filter = TypedFilter::new(name, Some(raw.to_string()), kind);
        filter.extract().unwrap();
        filter.to_predicate(&AttributePath::field(name, None)).unwrap()
    }

    #[test]
    fn test_like_matcher() {
        assert!(like("TEST", "T%ES%T"));
        assert!(like("TXXESYYT", "T%ES%T"));
        assert!(!like("TESTS", "T%ES%T"));
        assert!(like("ABC", "A_C"));
        assert!(like("", "%"));
        assert!(like("ABC", "ABC"));
        assert!(!like("ABCD", "ABC"));
        assert!(like("ABCD", "ABC%"));
    }

    #[test]
    fn test_like_is_case_insensitive_on_the_attribute() {
        let predicate = field_predicate("name", "lk_*admin*", FilterKind::Text);
        assert!(predicate.matches(&json!({ "name": "Super Admin" })));
        assert!(!predicate.matches(&json!({ "name": "guest" })));
    }

    #[test]
    fn test_like_matches_on_prefix() {
        let predicate = field_predicate("key", "lk_abc", FilterKind::Text);
        assert!(predicate.matches(&json!({ "key": "abc" })));
        assert!(predicate.matches(&json!({ "key": "Abcdef" })));
        assert!(!predicate.matches(&json!({ "key": "xabc" })));
    }

    #[test]
    fn test_like_case_folding_rules() {
        let predicate = field_predicate("name", "lk_été", FilterKind::Text);
        assert!(predicate.matches(&json!({ "name": "ÉTÉ" })));
        assert!(predicate.matches_with(&json!({ "name": "étés" }), CaseFolding::Ascii));
        assert!(predicate.matches_with(&json!({ "name": "ÉTÉ" }), CaseFolding::Unicode));
        assert!(!predicate.matches_with(&json!({ "name": "ÉTÉ" }), CaseFolding::Ascii));
    }

    #[test]
    fn test_null_comparisons_are_unknown() {
        let predicate = field_predicate("size", "not_1", FilterKind::Number);
        assert_eq!(predicate.evaluate(&json!({ "size": null })), None);
        assert_eq!(predicate.evaluate(&json!({})), None);
        assert!(predicate.matches(&json!({ "size": 2 })));
        assert!(!predicate.matches(&json!({ "size": 1 })));
    }

    #[test]
    fn test_is_null_never_unknown() {
        let predicate = field_predicate("picture", "null", FilterKind::Text);
        assert!(predicate.matches(&json!({ "picture": null })));
        assert!(predicate.matches(&json!({})));
        assert!(!predicate.matches(&json!({ "picture": "x.png" })));

        let predicate = field_predicate("picture", "not_null", FilterKind::Text);
        assert!(predicate.matches(&json!({ "picture": "x.png" })));
    }

    #[test]
    fn test_or_with_unknown_and_true() {
        let predicate = field_predicate("size", "not_1|null", FilterKind::Number);
        assert!(predicate.matches(&json!({ "size": null })));
        assert!(predicate.matches(&json!({ "size": 5 })));
        assert!(!predicate.matches(&json!({ "size": 1 })));
    }

    #[test]
    fn test_date_range() {
        let predicate = field_predicate(
            "insertDate",
            "2018-01-01 00:00:00bt2019-01-01 00:00:00",
            FilterKind::Date,
        );
        assert!(predicate.matches(&json!({ "insertDate": "2018-06-01 12:00:00" })));
        assert!(predicate.matches(&json!({ "insertDate": "2019-01-01 00:00:00" })));
        assert!(predicate.matches(&json!({ "insertDate": "2018-06-01T12:00:00Z" })));
        assert!(!predicate.matches(&json!({ "insertDate": "2020-01-01 00:00:00" })));
    }

    #[test]
    fn test_qualified_lookup() {
        let mut filter = TypedFilter::new("login", Some("admin".to_string()), FilterKind::Token);
        filter.extract().unwrap();
        let context = crate::predicate::AttributeContext::new("user");
        let predicate = filter
            .to_predicate(&AttributePath::new("login", "login", Some(&context)))
            .unwrap();
        assert!(predicate.matches(&json!({ "user": { "login": "admin" } })));
        assert!(!predicate.matches(&json!({ "login": "admin" })));
    }

    #[test]
    fn test_boolean_and_in() {
        let predicate = field_predicate("isDirect", "not_true", FilterKind::Boolean);
        assert!(predicate.matches(&json!({ "isDirect": false })));
        assert!(!predicate.matches(&json!({ "isDirect": true })));

        let predicate = field_predicate("size", "1|2|3", FilterKind::Number);
        assert!(predicate.matches(&json!({ "size": 2 })));
        assert!(predicate.matches(&json!({ "size": "3" })));
        assert!(!predicate.matches(&json!({ "size": 4 })));
    }
}
