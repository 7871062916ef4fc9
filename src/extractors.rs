use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;

/// Query keys that drive pagination and sorting rather than filtering.
pub const RESERVED_QUERY_KEYS: &[&str] = &["page", "count", "order", "sort"];

/// Filter strings of a request, keyed by field name.
///
/// Every non-reserved query parameter becomes `Some(raw)`. An empty parameter (`?name=`) stays
/// `Some("")`, an empty literal rather than an absent filter.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery(pub HashMap<String, Option<String>>);

impl FilterQuery {
    pub fn from_pairs(pairs: HashMap<String, String>) -> Self {
        FilterQuery(
            pairs
                .into_iter()
                .filter(|(key, _)| !RESERVED_QUERY_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key, Some(value)))
                .collect(),
        )
    }

    pub fn into_inner(self) -> HashMap<String, Option<String>> {
        self.0
    }
}

impl<S> FromRequestParts<S> for FilterQuery
where
    S: Send + Sync,
{
    type Rejection = FilterQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(FilterQueryRejection)?;
        Ok(FilterQuery::from_pairs(pairs))
    }
}

pub struct FilterQueryRejection(QueryRejection);

impl IntoResponse for FilterQueryRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": 202,
            "message": "Field value is wrong.",
            "field": null,
            "value": null,
            "cause": format!("Invalid query string: {}", self.0)
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
