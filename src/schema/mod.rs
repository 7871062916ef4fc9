pub mod definitions;

pub use definitions::{builtin_schemas, get_builtin_schema};

use crate::error::{AppError, AppResult};
use crate::filter::TypedFilter;
use crate::parser::FilterKind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A filterable attribute of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FilterKind,
    /// Storage column; the attribute name when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Closed value set of an ENUMERATED attribute.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, kind: FilterKind) -> Self {
        FieldDefinition {
            name: name.into(),
            kind,
            column: None,
            values: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_values(mut self, values: &[&str]) -> Self {
        self.values = values.iter().map(|value| value.to_string()).collect();
        self
    }

    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    /// Typed filter of this attribute for one raw filter string.
    pub fn typed_filter(&self, raw: Option<String>) -> TypedFilter {
        TypedFilter::new(self.name.clone(), raw, self.kind).with_allowed_values(self.values.clone())
    }
}

/// Declared filter kinds of one entity, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

impl EntitySchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        EntitySchema {
            name: name.into(),
            table: None,
            fields,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fails on the first key that is not a declared attribute.
    pub fn validate_fields<'a, I>(&self, keys: I) -> AppResult<()>
    where
        I: IntoIterator<Item = &'a String>,
    {
        for key in keys {
            if self.field(key).is_none() {
                return Err(AppError::UnknownField {
                    entity: self.name.clone(),
                    field: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Checks the declaration itself: names present and unique, value sets only on ENUMERATED.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Configuration("entity name cannot be empty".to_string()));
        }
        if self.fields.is_empty() {
            return Err(AppError::Configuration(format!(
                "entity {} declares no fields",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(AppError::Configuration(format!(
                    "entity {} has a field without a name",
                    self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(AppError::Configuration(format!(
                    "field {} is declared twice in entity {}",
                    field.name, self.name
                )));
            }
            if !field.values.is_empty() && field.kind != FilterKind::Enumerated {
                return Err(AppError::Configuration(format!(
                    "field {}.{} is {} and cannot declare values",
                    self.name, field.name, field.kind
                )));
            }
        }
        Ok(())
    }
}

/// Entity schemas by name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entities: HashMap<String, EntitySchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in entity.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for schema in builtin_schemas() {
            registry.register(schema.clone());
        }
        registry
    }

    /// Adds a schema, replacing any schema of the same name.
    pub fn register(&mut self, schema: EntitySchema) {
        self.entities.insert(schema.name.clone(), schema);
    }

    pub fn get(&self, name: &str) -> AppResult<&EntitySchema> {
        self.entities
            .get(name)
            .ok_or_else(|| AppError::UnknownEntity(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
