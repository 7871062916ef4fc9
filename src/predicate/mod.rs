//! Storage-agnostic query predicates built from extracted filters.

pub mod memory;
pub mod sql;

use crate::filter::{FilterValue, ParsedValue, TypedFilter};
use crate::parser::Operator;
use tracing::debug;

/// Addressing context of the attributes: the alias of the joined entity they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeContext {
    pub qualifier: String,
}

impl AttributeContext {
    pub fn new(qualifier: impl Into<String>) -> Self {
        AttributeContext {
            qualifier: qualifier.into(),
        }
    }
}

/// Location of an entity attribute in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePath {
    pub qualifier: Option<String>,
    /// Public attribute name, as used in filter keys and in-memory records.
    pub field: String,
    /// Storage column.
    pub column: String,
}

impl AttributePath {
    pub fn new(field: impl Into<String>, column: impl Into<String>, context: Option<&AttributeContext>) -> Self {
        AttributePath {
            qualifier: context.map(|ctx| ctx.qualifier.clone()),
            field: field.into(),
            column: column.into(),
        }
    }

    /// Path whose column carries the attribute name.
    pub fn field(name: &str, context: Option<&AttributeContext>) -> Self {
        Self::new(name, name, context)
    }
}

/// Elementary test applied to one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    Equals(FilterValue),
    Superior(FilterValue),
    Inferior(FilterValue),
    /// Inclusive range, lower bound first.
    Between(FilterValue, FilterValue),
    /// Pattern as written, always ending in `%`. Both it and the attribute are case-folded
    /// by the backend applying the test.
    Like(String),
    IsNull,
    In(Vec<FilterValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub attribute: AttributePath,
    pub negated: bool,
    pub test: Test,
}

impl Condition {
    fn from_parsed(attribute: &AttributePath, parsed: &ParsedValue) -> Self {
        let test = match parsed.operator {
            Operator::Equals => Test::Equals(parsed.value.clone()),
            Operator::Superior => Test::Superior(parsed.value.clone()),
            Operator::Inferior => Test::Inferior(parsed.value.clone()),
            Operator::Between => Test::Between(
                parsed.lower.clone().unwrap_or(FilterValue::Null),
                parsed.value.clone(),
            ),
            Operator::Like => {
                let pattern = match &parsed.value {
                    FilterValue::Text(pattern) => pattern.as_str(),
                    _ => parsed.literal.as_str(),
                };
                Test::Like(prefix_pattern(pattern))
            }
            Operator::IsNull => Test::IsNull,
        };
        Condition {
            attribute: attribute.clone(),
            negated: parsed.negated,
            test,
        }
    }
}

/// LIKE patterns match on prefix: a trailing `%` is added unless one is already there.
fn prefix_pattern(pattern: &str) -> String {
    if pattern.ends_with('%') {
        pattern.to_string()
    } else {
        format!("{}%", pattern)
    }
}

/// Case mapping applied to both sides of a LIKE test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseFolding {
    /// Full Unicode upper-casing, as PostgreSQL's `UPPER` on a UTF-8 database.
    #[default]
    Unicode,
    /// ASCII letters only, as SQLite's built-in `upper()`.
    Ascii,
}

impl CaseFolding {
    pub fn fold(self, text: &str) -> String {
        match self {
            CaseFolding::Unicode => text.to_uppercase(),
            CaseFolding::Ascii => text.to_ascii_uppercase(),
        }
    }
}

/// Composed query condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Accepts every row.
    All,
    Condition(Condition),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction of `predicates`; `All` when empty.
    pub fn all_of(mut predicates: Vec<Predicate>) -> Predicate {
        match predicates.len() {
            0 => Predicate::All,
            1 => predicates.remove(0),
            _ => Predicate::And(predicates),
        }
    }

    /// Disjunction of `predicates`. Must not be empty.
    pub fn any_of(mut predicates: Vec<Predicate>) -> Predicate {
        debug_assert!(!predicates.is_empty());
        if predicates.len() == 1 {
            predicates.remove(0)
        } else {
            Predicate::Or(predicates)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Predicate::All)
    }
}

impl TypedFilter {
    /// Builds the OR of one elementary condition per parsed value, each negated on its own.
    ///
    /// Returns `None` when nothing was extracted. A list of at least two plain equalities
    /// becomes a single IN test.
    pub fn to_predicate(&self, attribute: &AttributePath) -> Option<Predicate> {
        let values = self.values();
        if values.is_empty() {
            return None;
        }

        let plain_equalities = values
            .iter()
            .all(|value| value.operator == Operator::Equals && !value.negated);
        let predicate = if values.len() > 1 && plain_equalities {
            Predicate::Condition(Condition {
                attribute: attribute.clone(),
                negated: false,
                test: Test::In(values.iter().map(|value| value.value.clone()).collect()),
            })
        } else {
            Predicate::any_of(
                values
                    .iter()
                    .map(|value| Predicate::Condition(Condition::from_parsed(attribute, value)))
                    .collect(),
            )
        };

        debug!(field = %self.name(), ?predicate, "built field predicate");
        Some(predicate)
    }
}
