//! Typed filters: one raw filter string read according to the declared kind of its field.

pub mod boolean;
pub mod date;
pub mod enumerated;
pub mod number;
pub mod text;
pub mod token;
pub mod uuid;

use crate::error::AppResult;
use crate::parser::{split_segments, FilterKind, Operator, Segment};
use chrono::NaiveDateTime;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Textual format of DATE literals (`yyyy-MM-dd HH:mm:ss`).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A literal coerced into the native type of its field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Text(String),
    Timestamp(NaiveDateTime),
    Uuid(::uuid::Uuid),
}

impl FilterValue {
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Null => Value::Null,
            FilterValue::Boolean(b) => Value::Bool(*b),
            FilterValue::Integer(n) => Value::from(*n),
            FilterValue::Text(s) => Value::String(s.clone()),
            FilterValue::Timestamp(_) | FilterValue::Uuid(_) => Value::String(self.to_string()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Null => write!(f, "null"),
            FilterValue::Boolean(b) => write!(f, "{}", b),
            FilterValue::Integer(n) => write!(f, "{}", n),
            FilterValue::Text(s) => write!(f, "{}", s),
            FilterValue::Timestamp(ts) => write!(f, "{}", ts.format(DATE_FORMAT)),
            FilterValue::Uuid(id) => write!(f, "{}", id),
        }
    }
}

/// One decoded segment of a filter string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    pub operator: Operator,
    pub negated: bool,
    /// Literal text after marker and operator removal. For BETWEEN this is the upper bound,
    /// for LIKE the upper-cased pattern.
    pub literal: String,
    /// Typed literal. For LIKE the pattern with its original case.
    pub value: FilterValue,
    /// Lower bound of a BETWEEN segment.
    pub lower: Option<FilterValue>,
}

impl ParsedValue {
    pub fn new(operator: Operator, negated: bool, literal: impl Into<String>, value: FilterValue) -> Self {
        ParsedValue {
            operator,
            negated,
            literal: literal.into(),
            value,
            lower: None,
        }
    }

    pub fn equals(negated: bool, literal: impl Into<String>, value: FilterValue) -> Self {
        Self::new(Operator::Equals, negated, literal, value)
    }

    pub fn between(negated: bool, lower: FilterValue, literal: impl Into<String>, upper: FilterValue) -> Self {
        ParsedValue {
            lower: Some(lower),
            ..Self::new(Operator::Between, negated, literal, upper)
        }
    }

    fn null(segment: &Segment<'_>) -> Self {
        Self::new(Operator::IsNull, segment.negated, segment.body, FilterValue::Null)
    }
}

/// Reads the non-null segments of one filter kind.
pub trait Extractor: Send + Sync {
    fn kind(&self) -> FilterKind;

    /// Decodes one segment whose `null` case has already been handled.
    fn extract_segment(&self, filter: &TypedFilter, segment: &Segment<'_>) -> AppResult<ParsedValue>;
}

/// Extractor registered for each kind.
pub fn extractor_for(kind: FilterKind) -> &'static dyn Extractor {
    match kind {
        FilterKind::Boolean => &boolean::BooleanExtractor,
        FilterKind::Date => &date::DateExtractor,
        FilterKind::Enumerated => &enumerated::EnumeratedExtractor,
        FilterKind::Number => &number::NumberExtractor,
        FilterKind::Text => &text::TextExtractor,
        FilterKind::Token => &token::TokenExtractor,
        FilterKind::Uuid => &uuid::UuidExtractor,
    }
}

/// Extraction state of one field's filter string.
#[derive(Debug, Clone)]
pub struct TypedFilter {
    name: String,
    raw: Option<String>,
    kind: FilterKind,
    allowed_values: Vec<String>,
    values: Vec<ParsedValue>,
    extracted: bool,
}

impl TypedFilter {
    pub fn new(name: impl Into<String>, raw: Option<String>, kind: FilterKind) -> Self {
        TypedFilter {
            name: name.into(),
            raw,
            kind,
            allowed_values: Vec::new(),
            values: Vec::new(),
            extracted: false,
        }
    }

    /// Restricts ENUMERATED literals to a closed set.
    pub fn with_allowed_values(mut self, allowed_values: Vec<String>) -> Self {
        self.allowed_values = allowed_values;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    pub fn values(&self) -> &[ParsedValue] {
        &self.values
    }

    /// Decodes the raw string into parsed values.
    ///
    /// Returns `Ok(false)` when there is no raw string, which means "no filtering on this field".
    /// Malformed segments are errors, never skipped.
    pub fn extract(&mut self) -> AppResult<bool> {
        let raw = match self.raw.as_deref() {
            Some(raw) => raw,
            None => return Ok(false),
        };
        if self.extracted {
            return Ok(true);
        }

        let extractor = extractor_for(self.kind);
        let values = split_segments(raw)
            .map(|segment| {
                if segment.is_null() {
                    Ok(ParsedValue::null(&segment))
                } else {
                    extractor.extract_segment(self, &segment)
                }
            })
            .collect::<AppResult<Vec<_>>>()?;

        debug!(
            field = %self.name,
            kind = %self.kind,
            segments = values.len(),
            "extracted filter"
        );
        self.values = values;
        self.extracted = true;
        Ok(true)
    }
}
