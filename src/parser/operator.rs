use std::fmt;

/// Comparison operators a filter segment can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    Superior,
    Inferior,
    Between,
    Like,
    IsNull,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Equals,
        Operator::Inferior,
        Operator::Superior,
        Operator::Between,
        Operator::IsNull,
        Operator::Like,
    ];

    /// Lexical token of the operator inside a filter string.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Equals => "eq",
            Operator::Inferior => "lt",
            Operator::Superior => "gt",
            Operator::Between => "bt",
            Operator::IsNull => "null",
            Operator::Like => "lk_",
        }
    }

    /// Case-insensitive lookup of an operator by its token.
    pub fn from_token(token: &str) -> Option<Operator> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.token().eq_ignore_ascii_case(token))
    }

    pub fn is_valid(token: &str) -> bool {
        Operator::from_token(token).is_some()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equals => write!(f, "EQUALS"),
            Operator::Superior => write!(f, "SUPERIOR"),
            Operator::Inferior => write!(f, "INFERIOR"),
            Operator::Between => write!(f, "BETWEEN"),
            Operator::Like => write!(f, "LIKE"),
            Operator::IsNull => write!(f, "IS_NULL"),
        }
    }
}
