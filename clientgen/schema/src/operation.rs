//! Operations, parameters and responses found under `paths`.

use indexmap::IndexMap;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::schema::{SchemaKind, SchemaObject};

/// HTTP methods that may key an operation inside a path item.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use clientgen_schema::HttpMethod;
///
/// assert_eq!(HttpMethod::from_str("get").unwrap(), HttpMethod::Get);
/// assert_eq!(HttpMethod::from_str("PATCH").unwrap(), HttpMethod::Patch);
/// assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// Methods whose requests carry a JSON body.
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Lowercase verb, used as the prefix of synthesized function names.
    pub fn verb(self) -> String {
        self.to_string().to_lowercase()
    }
}

/// Where a parameter is bound in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ParamLocation {
    Path,
    Query,
    Body,
    Header,
    FormData,
}

/// A single operation parameter.
///
/// Body parameters carry their shape in `schema`; every other location
/// describes the value inline with `type`, `items` and `enum`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaObject>,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub items: Option<Box<SchemaObject>>,
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// Declared per-parameter collection format. Informational only: the
    /// generator applies one format to the whole run.
    #[serde(default)]
    pub collection_format: Option<String>,
}

impl Parameter {
    /// Creates a parameter with a primitive inline type.
    pub fn new(name: &str, location: ParamLocation, kind: SchemaKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            location,
            required,
            description: None,
            schema: None,
            type_name: Some(kind.to_string()),
            format: None,
            items: None,
            enum_values: None,
            collection_format: None,
        }
    }

    /// Creates a body parameter with the given schema.
    pub fn body(name: &str, schema: SchemaObject, required: bool) -> Self {
        Self {
            schema: Some(schema),
            type_name: None,
            ..Self::new(name, ParamLocation::Body, SchemaKind::Object, required)
        }
    }

    /// Returns the schema describing this parameter's value.
    ///
    /// For body parameters this is the declared `schema`; for the others it
    /// is assembled from the inline keywords.
    pub fn value_schema(&self) -> SchemaObject {
        if let Some(schema) = &self.schema {
            return schema.clone();
        }
        SchemaObject {
            type_name: self.type_name.clone(),
            format: self.format.clone(),
            description: self.description.clone(),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            ..SchemaObject::default()
        }
    }

    /// Path parameters are always required, whatever the document says.
    pub fn is_required(&self) -> bool {
        self.required || self.location == ParamLocation::Path
    }
}

/// One entry of an operation's `responses` map.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaObject>,
}

/// An operation object: one HTTP method at one route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Operation {
    /// The response describing success.
    ///
    /// Picks the lowest declared `2xx` status code; falls back to `default`.
    pub fn success_response(&self) -> Option<&Response> {
        self.responses
            .iter()
            .filter_map(|(code, response)| {
                code.parse::<u16>()
                    .ok()
                    .filter(|status| (200..300).contains(status))
                    .map(|status| (status, response))
            })
            .min_by_key(|(status, _)| *status)
            .map(|(_, response)| response)
            .or_else(|| self.responses.get("default"))
    }
}

/// An operation together with the route and method that identify it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOperation {
    pub route: String,
    pub method: HttpMethod,
    pub operation: Operation,
}
