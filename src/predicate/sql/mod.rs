pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresRenderer;
pub use sqlite::SqliteRenderer;

use super::{AttributePath, CaseFolding, Condition, Predicate, Test};
use crate::filter::FilterValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL dialects a compiled predicate can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    PostgreSQL,
    SQLite,
}

impl Dialect {
    pub fn renderer(&self) -> Box<dyn PredicateRenderer> {
        match self {
            Dialect::PostgreSQL => Box::new(PostgresRenderer::new()),
            Dialect::SQLite => Box::new(SqliteRenderer::new()),
        }
    }

    /// Case mapping LIKE tests follow on this dialect.
    pub fn case_folding(&self) -> CaseFolding {
        self.renderer().case_folding()
    }

    pub fn from_name(name: &str) -> Option<Dialect> {
        match name.to_lowercase().as_str() {
            "postgresql" | "postgres" => Some(Dialect::PostgreSQL),
            "sqlite" => Some(Dialect::SQLite),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::PostgreSQL => write!(f, "postgresql"),
            Dialect::SQLite => write!(f, "sqlite"),
        }
    }
}

/// Renders predicates as parameterised WHERE clauses.
///
/// Dialects only differ in placeholders and quoting, so the rendering itself lives in the
/// provided methods.
pub trait PredicateRenderer: Send + Sync {
    /// Placeholder of the 1-based parameter `index`.
    fn get_param_placeholder(&self, index: usize) -> String;

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn get_upper_function(&self, expression: &str) -> String {
        format!("UPPER({})", expression)
    }

    /// Case mapping of the dialect's upper function, applied to bound LIKE patterns.
    fn case_folding(&self) -> CaseFolding {
        CaseFolding::Unicode
    }

    /// Returns the WHERE condition and the values to bind, in placeholder order.
    fn to_where_clause(&self, predicate: &Predicate) -> (String, Vec<FilterValue>) {
        let mut params = Vec::new();
        let condition = self.render_predicate(predicate, &mut params);
        (condition, params)
    }

    fn render_predicate(&self, predicate: &Predicate, params: &mut Vec<FilterValue>) -> String {
        match predicate {
            Predicate::All => "1=1".to_string(),
            Predicate::Condition(condition) => self.render_condition(condition, params),
            Predicate::And(items) => self.render_group(items, " AND ", params),
            Predicate::Or(items) => self.render_group(items, " OR ", params),
        }
    }

    fn render_group(&self, items: &[Predicate], separator: &str, params: &mut Vec<FilterValue>) -> String {
        let parts: Vec<String> = items
            .iter()
            .map(|item| self.render_predicate(item, params))
            .collect();
        format!("({})", parts.join(separator))
    }

    fn render_column(&self, attribute: &AttributePath) -> String {
        match &attribute.qualifier {
            Some(qualifier) => format!(
                "{}.{}",
                self.quote_identifier(qualifier),
                self.quote_identifier(&attribute.column)
            ),
            None => self.quote_identifier(&attribute.column),
        }
    }

    fn bind(&self, value: FilterValue, params: &mut Vec<FilterValue>) -> String {
        params.push(value);
        self.get_param_placeholder(params.len())
    }

    fn render_condition(&self, condition: &Condition, params: &mut Vec<FilterValue>) -> String {
        let column = self.render_column(&condition.attribute);
        let negated = condition.negated;
        match &condition.test {
            Test::Equals(value) => {
                let op = if negated { "!=" } else { "=" };
                format!("{} {} {}", column, op, self.bind(value.clone(), params))
            }
            Test::Superior(value) => {
                let op = if negated { "<=" } else { ">" };
                format!("{} {} {}", column, op, self.bind(value.clone(), params))
            }
            Test::Inferior(value) => {
                let op = if negated { ">=" } else { "<" };
                format!("{} {} {}", column, op, self.bind(value.clone(), params))
            }
            Test::Between(lower, upper) => {
                let op = if negated { "NOT BETWEEN" } else { "BETWEEN" };
                let lower = self.bind(lower.clone(), params);
                let upper = self.bind(upper.clone(), params);
                format!("{} {} {} AND {}", column, op, lower, upper)
            }
            Test::Like(pattern) => {
                let op = if negated { "NOT LIKE" } else { "LIKE" };
                let pattern = self.bind(FilterValue::Text(self.case_folding().fold(pattern)), params);
                format!("{} {} {}", self.get_upper_function(&column), op, pattern)
            }
            Test::IsNull => {
                let op = if negated { "IS NOT NULL" } else { "IS NULL" };
                format!("{} {}", column, op)
            }
            Test::In(values) => {
                let op = if negated { "NOT IN" } else { "IN" };
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|value| self.bind(value.clone(), params))
                    .collect();
                format!("{} {} ({})", column, op, placeholders.join(", "))
            }
        }
    }
}
