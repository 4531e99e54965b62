//! JSON schema validation of response bodies.
//!
//! Two schema documents ship with the crate: one for a single post and one
//! for a list of posts. Other documents can be loaded from a string or a file.

use jsonschema::JSONSchema;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

const POST_SCHEMA: &str = include_str!("../../schemas/post_schema.json");
const POST_LIST_SCHEMA: &str = include_str!("../../schemas/post_list_schema.json");

/// Errors raised while loading a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {message}")]
    Io { path: String, message: String },

    #[error("schema {name} is not valid JSON: {message}")]
    Parse { name: String, message: String },

    #[error("schema {name} does not compile: {message}")]
    Compile { name: String, message: String },
}

/// A compiled JSON schema together with the name it is reported under.
pub struct JsonSchema {
    name: String,
    compiled: JSONSchema,
}

impl JsonSchema {
    /// Compiles a schema document.
    pub fn from_str(name: impl Into<String>, document: &str) -> Result<Self, SchemaError> {
        let name = name.into();
        let value: Value = serde_json::from_str(document).map_err(|e| SchemaError::Parse {
            name: name.clone(),
            message: e.to_string(),
        })?;
        Self::from_value(name, &value)
    }

    /// Compiles an already parsed schema document.
    pub fn from_value(name: impl Into<String>, document: &Value) -> Result<Self, SchemaError> {
        let name = name.into();
        let compiled = JSONSchema::compile(document).map_err(|e| SchemaError::Compile {
            name: name.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { name, compiled })
    }

    /// Loads and compiles a schema file. The file name becomes the schema name.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let document = fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_str(name, &document)
    }

    /// The bundled schema of a single post.
    pub fn post() -> Result<Self, SchemaError> {
        Self::from_str("post_schema.json", POST_SCHEMA)
    }

    /// The bundled schema of a list of posts.
    pub fn post_list() -> Result<Self, SchemaError> {
        Self::from_str("post_list_schema.json", POST_LIST_SCHEMA)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validates `instance`, returning every violation found.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<String>> {
        self.compiled.validate(instance).map_err(|errors| {
            errors
                .map(|error| {
                    let path = error.instance_path.to_string();
                    if path.is_empty() {
                        format!("{} (at document root)", error)
                    } else {
                        format!("{} (at {})", error, path)
                    }
                })
                .collect()
        })
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema").field("name", &self.name).finish()
    }
}
