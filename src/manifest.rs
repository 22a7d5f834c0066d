//! `package.json` handling
//!
//! The manifest is kept as an ordered JSON object so that rewriting it only
//! changes what was added; every other key keeps its position.

use crate::error::SetupError;
use serde_json::{Map, Value};

pub const MANIFEST_PATH: &str = "package.json";

#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    root: Map<String, Value>,
}

impl PackageManifest {
    pub fn parse(content: &str) -> Result<Self, SetupError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| SetupError::InvalidManifest(e.to_string()))?;

        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(SetupError::InvalidManifest(format!(
                "expected a JSON object at the top level, found {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    /// The `packageManager` field, e.g. `pnpm@9.1.0`
    pub fn package_manager(&self) -> Option<&str> {
        self.root.get("packageManager").and_then(Value::as_str)
    }

    pub fn dependencies(&self) -> Option<&Map<String, Value>> {
        self.root.get("dependencies").and_then(Value::as_object)
    }

    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.dependencies()?.get(name).and_then(Value::as_str)
    }

    /// Sets `dependencies[name] = version`, creating the map when it is missing
    /// or holds an empty value (`null`, `false`, `0`, `""`).
    pub fn add_dependency(&mut self, name: &str, version: &str) -> Result<(), SetupError> {
        let slot = self
            .root
            .entry("dependencies")
            .or_insert_with(|| Value::Object(Map::new()));
        if is_falsy(slot) {
            *slot = Value::Object(Map::new());
        }

        let dependencies = match slot {
            Value::Object(map) => map,
            other => {
                return Err(SetupError::InvalidManifest(format!(
                    "\"dependencies\" must be an object, found {}",
                    json_type_name(other)
                )))
            }
        };
        dependencies.insert(name.to_string(), Value::String(version.to_string()));
        Ok(())
    }

    /// Serializes with two-space indentation and no trailing newline
    pub fn to_json_string(&self) -> Result<String, SetupError> {
        serde_json::to_string_pretty(&self.root)
            .map_err(|e| SetupError::InvalidManifest(e.to_string()))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
