#![allow(dead_code)]

use axum_test::TestServer;
use query_filter::filter::FilterValue;
use query_filter::parser::FilterKind;
use query_filter::predicate::sql::Dialect;
use query_filter::schema::{EntitySchema, FieldDefinition, SchemaRegistry};
use query_filter::server::{build_router, AppState};
use rusqlite::{types::Value as SqlValue, Connection};
use serde_json::{json, Value};
use std::collections::HashMap;

pub const ALPHA_ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

/// Filter map from `(field, raw)` pairs; `None` is an absent filter.
pub fn filters(pairs: &[(&str, Option<&str>)]) -> HashMap<String, Option<String>> {
    pairs
        .iter()
        .map(|(field, raw)| (field.to_string(), raw.map(str::to_string)))
        .collect()
}

/// Filter map with one raw string per field.
pub fn single(field: &str, raw: &str) -> HashMap<String, Option<String>> {
    filters(&[(field, Some(raw))])
}

/// Entity covering every filter kind, stored in the `settings` table.
pub fn setting_schema() -> EntitySchema {
    EntitySchema::new(
        "Setting",
        vec![
            FieldDefinition::new("id", FilterKind::Uuid),
            FieldDefinition::new("key", FilterKind::Text),
            FieldDefinition::new("value", FilterKind::Text),
            FieldDefinition::new("size", FilterKind::Number),
            FieldDefinition::new("enabled", FilterKind::Boolean),
            FieldDefinition::new("insertDate", FilterKind::Date).with_column("insert_date"),
            FieldDefinition::new("kind", FilterKind::Enumerated).with_values(&["A", "B"]),
            FieldDefinition::new("code", FilterKind::Token),
        ],
    )
    .with_table("settings")
}

pub fn test_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::builtin();
    registry.register(setting_schema());
    registry
}

/// Create test server over the built-in entities plus `Setting`
pub fn setup_test_app(dialect: Dialect) -> TestServer {
    let app = build_router(AppState::new(test_registry(), dialect));
    TestServer::new(app).expect("Failed to create test server")
}

/// Rows of the `settings` table as in-memory records.
pub fn setting_records() -> Vec<Value> {
    vec![
        json!({
            "id": ALPHA_ID, "key": "alpha", "value": "Primary", "size": 1,
            "enabled": true, "insertDate": "2018-03-01 10:00:00", "kind": "A", "code": "x-1"
        }),
        json!({
            "id": "0b6f1c44-9a4e-4d2c-9a60-2f0f0a4b6c11", "key": "beta", "value": null, "size": 5,
            "enabled": false, "insertDate": "2018-09-15 08:30:00", "kind": "B", "code": "x-2"
        }),
        json!({
            "id": "5d0c7a0e-3c9b-4f7e-8d52-0a1b2c3d4e5f", "key": "gamma", "value": "été", "size": null,
            "enabled": true, "insertDate": "2019-02-01 00:00:00", "kind": "A", "code": "y-1"
        }),
        json!({
            "id": "9a8b7c6d-5e4f-4a3b-9c2d-1e0f9a8b7c6d", "key": "AlphaBeta", "value": "primary", "size": 10,
            "enabled": false, "insertDate": "2020-01-01 00:00:00", "kind": "B", "code": "y-2"
        }),
    ]
}

/// In-memory SQLite database holding [`setting_records`].
pub fn setup_sqlite() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to open SQLite database");
    conn.execute_batch(
        r#"CREATE TABLE settings (
            id TEXT PRIMARY KEY,
            "key" TEXT NOT NULL,
            "value" TEXT,
            size INTEGER,
            enabled INTEGER NOT NULL,
            insert_date TEXT NOT NULL,
            kind TEXT NOT NULL,
            code TEXT NOT NULL
        );"#,
    )
    .expect("Failed to create settings table");

    for record in setting_records() {
        conn.execute(
            r#"INSERT INTO settings (id, "key", "value", size, enabled, insert_date, kind, code)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
            rusqlite::params![
                record["id"].as_str(),
                record["key"].as_str(),
                record["value"].as_str(),
                record["size"].as_i64(),
                record["enabled"].as_bool(),
                record["insertDate"].as_str(),
                record["kind"].as_str(),
                record["code"].as_str(),
            ],
        )
        .expect("Failed to insert setting");
    }
    conn
}

/// SQLite binding of a filter value: booleans as integers, timestamps and UUIDs as text.
pub fn to_sql_value(value: &FilterValue) -> SqlValue {
    match value {
        FilterValue::Null => SqlValue::Null,
        FilterValue::Boolean(b) => SqlValue::Integer(i64::from(*b)),
        FilterValue::Integer(n) => SqlValue::Integer(*n),
        FilterValue::Text(s) => SqlValue::Text(s.clone()),
        FilterValue::Timestamp(_) | FilterValue::Uuid(_) => SqlValue::Text(value.to_string()),
    }
}
