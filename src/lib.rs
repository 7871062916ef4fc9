pub mod compiler;
pub mod config;
pub mod error;
pub mod extractors;
pub mod filter;
pub mod logging;
pub mod parser;
pub mod predicate;
pub mod schema;
pub mod server;

// Re-export commonly used types for easier access
pub use compiler::FilterCompiler;
pub use error::{AppError, AppResult};
pub use filter::{FilterValue, ParsedValue, TypedFilter};
pub use parser::{FilterKind, Operator};
pub use predicate::sql::{Dialect, PredicateRenderer};
pub use predicate::{AttributeContext, AttributePath, CaseFolding, Predicate};
pub use schema::{EntitySchema, FieldDefinition, SchemaRegistry};
