use crate::error::AppResult;
use crate::filter::TypedFilter;
use crate::predicate::{AttributeContext, AttributePath, Predicate};
use crate::schema::EntitySchema;
use std::collections::HashMap;
use tracing::debug;

/// Compiles the raw filter strings of one entity into a single predicate.
///
/// The schema is authoritative: keys it does not declare are ignored here and are expected
/// to be rejected beforehand with [`EntitySchema::validate_fields`] when the caller cares.
#[derive(Debug, Clone)]
pub struct FilterCompiler<'a> {
    schema: &'a EntitySchema,
    context: Option<AttributeContext>,
}

impl<'a> FilterCompiler<'a> {
    pub fn new(schema: &'a EntitySchema) -> Self {
        FilterCompiler {
            schema,
            context: None,
        }
    }

    /// Qualifies every attribute with the alias of the entity.
    pub fn with_context(mut self, context: AttributeContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn schema(&self) -> &EntitySchema {
        self.schema
    }

    /// Extracted filters of the fields that carry a value, in declaration order.
    pub fn typed_filters(&self, filters: &HashMap<String, Option<String>>) -> AppResult<Vec<TypedFilter>> {
        let mut typed = Vec::new();
        for field in &self.schema.fields {
            let raw = match filters.get(&field.name) {
                Some(raw) => raw.clone(),
                None => continue,
            };
            let mut filter = field.typed_filter(raw);
            if filter.extract()? {
                typed.push(filter);
            }
        }
        Ok(typed)
    }

    /// AND of the per-field predicates; [`Predicate::All`] when no field filters anything.
    pub fn compile(&self, filters: &HashMap<String, Option<String>>) -> AppResult<Predicate> {
        let typed = self.typed_filters(filters)?;
        let mut predicates = Vec::with_capacity(typed.len());
        for filter in &typed {
            let column = self
                .schema
                .field(filter.name())
                .map(|field| field.column_name())
                .unwrap_or(filter.name());
            let attribute = AttributePath::new(filter.name(), column, self.context.as_ref());
            if let Some(predicate) = filter.to_predicate(&attribute) {
                predicates.push(predicate);
            }
        }

        let predicate = Predicate::all_of(predicates);
        debug!(
            entity = %self.schema.name,
            fields = typed.len(),
            ?predicate,
            "compiled filters"
        );
        Ok(predicate)
    }
}
