//! HTTP surface over the compiler: one route per entity returning its WHERE clause.

use crate::compiler::FilterCompiler;
use crate::error::AppResult;
use crate::extractors::FilterQuery;
use crate::logging::logging_middleware;
use crate::predicate::sql::Dialect;
use crate::schema::{EntitySchema, SchemaRegistry};
use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SchemaRegistry>,
    pub dialect: Dialect,
}

impl AppState {
    pub fn new(registry: SchemaRegistry, dialect: Dialect) -> Self {
        AppState {
            registry: Arc::new(registry),
            dialect,
        }
    }
}

/// Rendered filter of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhereClause {
    pub entity: String,
    #[serde(rename = "where")]
    pub condition: String,
    pub params: Vec<Value>,
}

/// Compiles `filters` against `schema` and renders the result for `dialect`.
pub fn render_where(
    schema: &EntitySchema,
    dialect: Dialect,
    filters: &HashMap<String, Option<String>>,
) -> AppResult<WhereClause> {
    let predicate = FilterCompiler::new(schema).compile(filters)?;
    let (condition, params) = dialect.renderer().to_where_clause(&predicate);
    Ok(WhereClause {
        entity: schema.name.clone(),
        condition,
        params: params.iter().map(|value| value.to_json()).collect(),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/entities", get(list_entities))
        .route("/entities/{entity}/where", get(entity_where))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn list_entities(State(state): State<AppState>) -> Json<Value> {
    let entities: Vec<Value> = state
        .registry
        .names()
        .into_iter()
        .filter_map(|name| state.registry.get(name).ok())
        .map(|schema| json!(schema))
        .collect();
    Json(json!({ "entities": entities }))
}

async fn entity_where(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    FilterQuery(filters): FilterQuery,
) -> AppResult<Json<WhereClause>> {
    let schema = state.registry.get(&entity)?;
    schema.validate_fields(filters.keys())?;
    debug!(entity = %entity, filters = filters.len(), "compiling request filters");
    Ok(Json(render_where(schema, state.dialect, &filters)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_where_serializes_params() {
        let registry = SchemaRegistry::builtin();
        let schema = registry.get("User").unwrap();
        let filters: HashMap<String, Option<String>> = [
            ("login".to_string(), Some("admin|root".to_string())),
            ("picture".to_string(), None),
        ]
        .into_iter()
        .collect();

        let clause = render_where(schema, Dialect::SQLite, &filters).unwrap();
        assert_eq!(clause.entity, "User");
        assert_eq!(clause.condition, "\"login\" IN (?1, ?2)");
        assert_eq!(clause.params, vec![json!("admin"), json!("root")]);

        let body = serde_json::to_value(&clause).unwrap();
        assert_eq!(body["where"], "\"login\" IN (?1, ?2)");
    }
}
