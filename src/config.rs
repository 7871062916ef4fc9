use crate::error::{AppError, AppResult};
use crate::predicate::sql::Dialect;
use crate::schema::{EntitySchema, SchemaRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Entities declared on top of the built-in ones. A declaration replaces the built-in
    /// entity of the same name.
    #[serde(default)]
    pub entities: Vec<EntitySchema>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> AppResult<Self> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(AppError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text, expanding `${VAR}` references first
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let expanded_content = Self::expand_env_vars(content)?;
        let app_config: AppConfig = serde_yaml::from_str(&expanded_content)?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Configuration used when no file is given: PostgreSQL, info logging, built-in entities only
    pub fn default_config() -> Self {
        AppConfig::default()
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut names = HashSet::new();
        for entity in &self.entities {
            entity.validate()?;
            if !names.insert(entity.name.as_str()) {
                return Err(AppError::Configuration(format!(
                    "entity {} is declared twice",
                    entity.name
                )));
            }
        }
        Ok(())
    }

    /// Built-in entities with the configured ones merged over them
    pub fn schema_registry(&self) -> SchemaRegistry {
        let mut registry = SchemaRegistry::builtin();
        for entity in &self.entities {
            registry.register(entity.clone());
        }
        registry
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> AppResult<String> {
        let mut expanded = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = match after.find('}') {
                Some(end) => end,
                None => {
                    expanded.push_str(&rest[start..]);
                    return Ok(expanded);
                }
            };

            let expression = &after[..end];
            let (var_name, default_value) = match expression.split_once(":-") {
                Some((name, default)) => (name, Some(default)),
                None => (expression, None),
            };

            match (std::env::var(var_name), default_value) {
                (Ok(value), _) => expanded.push_str(&value),
                (Err(_), Some(default)) => expanded.push_str(default),
                (Err(_), None) => {
                    return Err(AppError::Configuration(format!(
                        "Environment variable {} not found and no default provided",
                        var_name
                    )))
                }
            }
            rest = &after[end + 1..];
        }

        expanded.push_str(rest);
        Ok(expanded)
    }
}
