use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared filter type of an entity attribute. Drives which extractor reads its filter string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterKind {
    Boolean,
    Date,
    #[serde(alias = "ENUM")]
    Enumerated,
    Number,
    Text,
    Token,
    Uuid,
}

impl FilterKind {
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Boolean,
        FilterKind::Date,
        FilterKind::Enumerated,
        FilterKind::Number,
        FilterKind::Text,
        FilterKind::Token,
        FilterKind::Uuid,
    ];
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Boolean => write!(f, "BOOLEAN"),
            FilterKind::Date => write!(f, "DATE"),
            FilterKind::Enumerated => write!(f, "ENUMERATED"),
            FilterKind::Number => write!(f, "NUMBER"),
            FilterKind::Text => write!(f, "TEXT"),
            FilterKind::Token => write!(f, "TOKEN"),
            FilterKind::Uuid => write!(f, "UUID"),
        }
    }
}
