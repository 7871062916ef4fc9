//! Built-in entity schemas
//!
//! Filterable attributes of the admin API entities, with their filter kinds and storage columns.
//! Entities loaded from configuration are merged over these.

use super::{EntitySchema, FieldDefinition};
use crate::parser::FilterKind;
use lazy_static::lazy_static;

pub const ACCESS_CONTROL_TYPES: &[&str] = &["ROLE", "GROUP", "SCOPE"];

pub const ENTITY_PERMISSIONS: &[&str] = &[
    "ADMIN",
    "PROJECT",
    "PROJECT_TEMPLATE",
    "DIAGRAM",
    "DIAGRAM_TEMPLATE",
    "COMPONENT",
    "COMPONENT_TEMPLATE",
    "LIBRARY",
];

pub const ACTION_PERMISSIONS: &[&str] = &["ACCESS", "CREATE", "DELETE", "UPDATE"];

pub const LIBRARY_TEMPLATE_TYPES: &[&str] = &["PROJECT", "DIAGRAM", "COMPONENT"];

fn field(name: &str, kind: FilterKind, column: &str) -> FieldDefinition {
    FieldDefinition::new(name, kind).with_column(column)
}

fn enumerated(name: &str, column: &str, values: &[&str]) -> FieldDefinition {
    field(name, FilterKind::Enumerated, column).with_values(values)
}

/// Entity with the insert/update timestamps every audited table carries.
fn audited(name: &str, table: &str, mut fields: Vec<FieldDefinition>) -> EntitySchema {
    fields.push(field("insertDate", FilterKind::Date, "insert_date"));
    fields.push(field("updateDate", FilterKind::Date, "update_date"));
    EntitySchema::new(name, fields).with_table(table)
}

fn view(name: &str, table: &str, fields: Vec<FieldDefinition>) -> EntitySchema {
    EntitySchema::new(name, fields).with_table(table)
}

lazy_static! {
    pub static ref USER_SCHEMA: EntitySchema = audited(
        "User",
        "users",
        vec![
            field("id", FilterKind::Uuid, "usr_id"),
            field("email", FilterKind::Text, "email"),
            field("login", FilterKind::Text, "login"),
            field("name", FilterKind::Text, "name"),
            field("picture", FilterKind::Text, "picture"),
        ],
    );

    pub static ref ACCESS_CONTROL_SCHEMA: EntitySchema = audited(
        "AccessControl",
        "access_controls",
        vec![
            field("id", FilterKind::Uuid, "aco_id"),
            field("name", FilterKind::Text, "name"),
            enumerated("type", "type", ACCESS_CONTROL_TYPES),
        ],
    );

    pub static ref ACCESS_CONTROL_TREE_SCHEMA: EntitySchema = audited(
        "AccessControlTree",
        "access_controls_tree",
        vec![
            field("id", FilterKind::Uuid, "act_id"),
            field("parent", FilterKind::Uuid, "parent"),
            field("current", FilterKind::Uuid, "current"),
        ],
    );

    pub static ref ACCESS_CONTROL_TREE_VIEW_SCHEMA: EntitySchema = view(
        "AccessControlTreeView",
        "access_controls_tree_view",
        vec![
            field("id", FilterKind::Text, "aca_id"),
            field("accessControlId", FilterKind::Number, "aco_id"),
            field("accessControlType", FilterKind::Text, "type"),
            field("accessControlName", FilterKind::Text, "name"),
            field("parentAccessControlId", FilterKind::Number, "parent"),
            field("parentAccessControlName", FilterKind::Text, "parent_name"),
            field("parentAccessControlType", FilterKind::Text, "parent_type"),
            field("isDirect", FilterKind::Boolean, "direct"),
        ],
    );

    pub static ref ACCESS_CONTROL_PERMISSION_SCHEMA: EntitySchema = audited(
        "AccessControlPermission",
        "access_controls_permissions",
        vec![
            field("id", FilterKind::Number, "pac_id"),
            field("accessControlId", FilterKind::Number, "aco_id"),
            field("permissionId", FilterKind::Number, "per_id"),
        ],
    );

    pub static ref ACCESS_CONTROL_PERMISSION_VIEW_SCHEMA: EntitySchema = audited(
        "AccessControlPermissionView",
        "access_controls_permissions_view",
        vec![
            field("id", FilterKind::Text, "acp_id"),
            field("accessControlId", FilterKind::Number, "aco_id"),
            field("permissionId", FilterKind::Number, "per_id"),
            field("entity", FilterKind::Text, "entity"),
            field("action", FilterKind::Text, "action"),
            field("libraryId", FilterKind::Number, "lib_id"),
            field("isDirect", FilterKind::Boolean, "direct"),
        ],
    );

    pub static ref USER_ACCESS_CONTROL_SCHEMA: EntitySchema = audited(
        "UserAccessControl",
        "users_access_controls",
        vec![
            field("id", FilterKind::Number, "uac_id"),
            field("userId", FilterKind::Number, "usr_id"),
            field("accessControlId", FilterKind::Number, "aco_id"),
        ],
    );

    pub static ref USER_ACCESS_CONTROL_VIEW_SCHEMA: EntitySchema = view(
        "UserAccessControlView",
        "users_access_controls_view",
        vec![
            field("id", FilterKind::Text, "usa_id"),
            field("userId", FilterKind::Number, "usr_id"),
            field("email", FilterKind::Text, "email"),
            field("login", FilterKind::Text, "login"),
            field("userName", FilterKind::Text, "user_name"),
            field("accessControlId", FilterKind::Number, "aco_id"),
            field("accessControlName", FilterKind::Text, "access_control_name"),
            field("type", FilterKind::Text, "type"),
        ],
    );

    pub static ref PERMISSION_SCHEMA: EntitySchema = audited(
        "Permission",
        "permissions",
        vec![
            field("id", FilterKind::Uuid, "per_id"),
            enumerated("entity", "entity", ENTITY_PERMISSIONS),
            enumerated("action", "action", ACTION_PERMISSIONS),
            field("libraryId", FilterKind::Uuid, "lib_id"),
        ],
    );

    pub static ref USER_PERMISSION_SCHEMA: EntitySchema = audited(
        "UserPermission",
        "users_permissions_view",
        vec![
            field("id", FilterKind::Text, "usp_id"),
            field("userId", FilterKind::Uuid, "usr_id"),
            field("permissionId", FilterKind::Uuid, "per_id"),
            enumerated("entity", "entity", ENTITY_PERMISSIONS),
            enumerated("action", "action", ACTION_PERMISSIONS),
            field("libraryId", FilterKind::Uuid, "lib_id"),
        ],
    );

    pub static ref LIBRARY_SCHEMA: EntitySchema = audited(
        "Library",
        "libraries",
        vec![
            field("id", FilterKind::Uuid, "lib_id"),
            field("url", FilterKind::Text, "url"),
            field("documentationUrl", FilterKind::Text, "documentation_url"),
            field("name", FilterKind::Text, "name"),
            field("version", FilterKind::Text, "version"),
            field("maintainer", FilterKind::Text, "maintainer"),
            field("description", FilterKind::Text, "description"),
        ],
    );

    pub static ref USER_LIBRARY_VIEW_SCHEMA: EntitySchema = view(
        "UserLibraryView",
        "users_libraries_view",
        vec![
            field("id", FilterKind::Text, "uli_id"),
            field("userId", FilterKind::Uuid, "usr_id"),
            field("libraryId", FilterKind::Uuid, "lib_id"),
            field("url", FilterKind::Text, "url"),
            field("documentationUrl", FilterKind::Text, "documentation_url"),
            field("name", FilterKind::Text, "name"),
            field("version", FilterKind::Text, "version"),
            field("maintainer", FilterKind::Text, "maintainer"),
            field("description", FilterKind::Text, "description"),
        ],
    );

    pub static ref LIBRARY_TEMPLATE_SCHEMA: EntitySchema = audited(
        "LibraryTemplate",
        "library_templates",
        vec![
            field("id", FilterKind::Number, "lit_id"),
            field("libraryId", FilterKind::Number, "lib_id"),
            field("documentationUrl", FilterKind::Text, "documentation_url"),
            field("name", FilterKind::Text, "name"),
            enumerated("type", "type", LIBRARY_TEMPLATE_TYPES),
            field("description", FilterKind::Text, "description"),
            field("plugins", FilterKind::Text, "plugins"),
        ],
    );

    pub static ref USER_LIBRARY_TEMPLATE_VIEW_SCHEMA: EntitySchema = view(
        "UserLibraryTemplateView",
        "users_library_templates_view",
        vec![
            field("id", FilterKind::Text, "ult_id"),
            field("userId", FilterKind::Uuid, "usr_id"),
            field("libraryTemplateId", FilterKind::Uuid, "lit_id"),
            field("libraryId", FilterKind::Uuid, "lib_id"),
            field("documentationUrl", FilterKind::Text, "documentation_url"),
            field("name", FilterKind::Text, "name"),
            field("type", FilterKind::Text, "type"),
            field("description", FilterKind::Text, "description"),
            field("plugins", FilterKind::Text, "plugins"),
        ],
    );

    pub static ref AI_CONFIGURATION_SCHEMA: EntitySchema = audited(
        "AIConfiguration",
        "ai_configurations",
        vec![
            field("id", FilterKind::Uuid, "acf_id"),
            field("handler", FilterKind::Text, "handler"),
            field("key", FilterKind::Text, "key"),
            field("value", FilterKind::Text, "value"),
        ],
    );

    pub static ref AI_SECRET_SCHEMA: EntitySchema = audited(
        "AISecret",
        "ai_secrets",
        vec![
            field("id", FilterKind::Uuid, "ais_id"),
            field("key", FilterKind::Text, "key"),
        ],
    );

    pub static ref AI_CONVERSATION_SCHEMA: EntitySchema = audited(
        "AIConversation",
        "ai_conversations",
        vec![
            field("id", FilterKind::Uuid, "aic_id"),
            field("userId", FilterKind::Uuid, "usr_id"),
            field("key", FilterKind::Text, "key"),
            field("size", FilterKind::Number, "size"),
        ],
    );

    pub static ref AI_MESSAGE_SCHEMA: EntitySchema = audited(
        "AIMessage",
        "ai_messages",
        vec![
            field("id", FilterKind::Uuid, "aim_id"),
            field("aiConversation", FilterKind::Uuid, "aic_id"),
        ],
    );

    pub static ref USER_CSRF_TOKEN_SCHEMA: EntitySchema = audited(
        "UserCsrfToken",
        "csrf_tokens",
        vec![
            field("id", FilterKind::Number, "cst_id"),
            field("login", FilterKind::Text, "login"),
        ],
    );

    static ref BUILTIN_SCHEMAS: Vec<&'static EntitySchema> = vec![
        &*USER_SCHEMA,
        &*ACCESS_CONTROL_SCHEMA,
        &*ACCESS_CONTROL_TREE_SCHEMA,
        &*ACCESS_CONTROL_TREE_VIEW_SCHEMA,
        &*ACCESS_CONTROL_PERMISSION_SCHEMA,
        &*ACCESS_CONTROL_PERMISSION_VIEW_SCHEMA,
        &*USER_ACCESS_CONTROL_SCHEMA,
        &*USER_ACCESS_CONTROL_VIEW_SCHEMA,
        &*PERMISSION_SCHEMA,
        &*USER_PERMISSION_SCHEMA,
        &*LIBRARY_SCHEMA,
        &*USER_LIBRARY_VIEW_SCHEMA,
        &*LIBRARY_TEMPLATE_SCHEMA,
        &*USER_LIBRARY_TEMPLATE_VIEW_SCHEMA,
        &*AI_CONFIGURATION_SCHEMA,
        &*AI_SECRET_SCHEMA,
        &*AI_CONVERSATION_SCHEMA,
        &*AI_MESSAGE_SCHEMA,
        &*USER_CSRF_TOKEN_SCHEMA,
    ];
}

/// Get all built-in entity schemas
pub fn builtin_schemas() -> Vec<&'static EntitySchema> {
    BUILTIN_SCHEMAS.clone()
}

pub fn get_builtin_schema(name: &str) -> Option<&'static EntitySchema> {
    BUILTIN_SCHEMAS
        .iter()
        .copied()
        .find(|schema| schema.name == name)
}
