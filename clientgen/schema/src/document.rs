//! The schema document root and its loaders.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace};

use crate::error::SchemaError;
use crate::operation::{HttpMethod, Operation, Parameter, RouteOperation};
use crate::schema::SchemaObject;

/// The `info` block. Only read for the output header.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// One route's entry under `paths`.
///
/// Method keys are kept as raw JSON in input order and parsed on demand by
/// [`PathItem::operations`], so that a malformed operation can be reported
/// with its route and method.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation on this route.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(flatten)]
    pub entries: IndexMap<String, serde_json::Value>,
}

impl PathItem {
    /// Parses the operations declared on this route, in input order.
    ///
    /// Keys that are not HTTP methods (`summary`, `x-*` extensions, ...) are
    /// skipped. Route-level parameters are merged into each operation; an
    /// operation-level parameter with the same name and location wins.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::InvalidOperation`] when a method entry does not
    /// deserialize as an operation.
    pub fn operations(&self, route: &str) -> Result<Vec<RouteOperation>, SchemaError> {
        let mut operations = Vec::new();
        for (key, value) in &self.entries {
            let Ok(method) = HttpMethod::from_str(key) else {
                trace!(route, key = %key, "skipping non-operation path item key");
                continue;
            };
            let mut operation: Operation =
                serde_json::from_value(value.clone()).map_err(|source| {
                    SchemaError::InvalidOperation {
                        route: route.to_string(),
                        method: method.to_string(),
                        source,
                    }
                })?;
            merge_shared_parameters(&mut operation, &self.parameters);
            operations.push(RouteOperation {
                route: route.to_string(),
                method,
                operation,
            });
        }
        Ok(operations)
    }
}

fn merge_shared_parameters(operation: &mut Operation, shared: &[Parameter]) {
    let inherited: Vec<Parameter> = shared
        .iter()
        .filter(|param| {
            !operation
                .parameters
                .iter()
                .any(|own| own.name == param.name && own.location == param.location)
        })
        .cloned()
        .collect();
    if !inherited.is_empty() {
        let own = std::mem::take(&mut operation.parameters);
        operation.parameters = inherited.into_iter().chain(own).collect();
    }
}

/// The root of a Swagger-style schema document.
///
/// ## Examples
///
/// ```
/// use clientgen_schema::SchemaDocument;
///
/// let doc = SchemaDocument::from_json_str(r#"{
///     "basePath": "/api",
///     "definitions": {"Card": {"properties": {"id": {"type": "string"}}}},
///     "paths": {"/cards/{id}": {"get": {"operationId": "getCard"}}}
/// }"#).unwrap();
///
/// assert_eq!(doc.base_path.as_deref(), Some("/api"));
/// assert_eq!(doc.definitions.len(), 1);
/// assert_eq!(doc.operations().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    #[serde(default)]
    pub swagger: Option<String>,
    #[serde(default)]
    pub info: Option<Info>,
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: IndexMap<String, SchemaObject>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: IndexMap<String, PathItem>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SchemaDocument {
    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and parses a document from disk.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
    /// as JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::Read`] when the file cannot be read, and a
    /// parse error when its content is malformed.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let source = fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let doc = if is_yaml {
            Self::from_yaml_str(&source)?
        } else {
            Self::from_json_str(&source)?
        };

        debug!(
            path = %path.display(),
            definitions = doc.definitions.len(),
            routes = doc.paths.len(),
            "loaded schema document"
        );
        Ok(doc)
    }

    /// Every operation in the document, flattened in input order.
    ///
    /// ## Errors
    ///
    /// Fails on the first operation that does not deserialize.
    pub fn operations(&self) -> Result<Vec<RouteOperation>, SchemaError> {
        let mut all = Vec::new();
        for (route, item) in &self.paths {
            all.extend(item.operations(route)?);
        }
        Ok(all)
    }
}
