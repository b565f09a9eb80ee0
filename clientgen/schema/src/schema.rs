//! Schema objects: the shape descriptors used by definitions, parameters
//! and responses.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::error::SchemaError;

/// Prefix every supported `$ref` carries.
pub const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

/// The value of a schema object's `type` keyword.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use clientgen_schema::SchemaKind;
///
/// assert_eq!(SchemaKind::from_str("integer").unwrap(), SchemaKind::Integer);
/// assert_eq!(SchemaKind::Array.to_string(), "array");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    File,
    Null,
}

/// `additionalProperties` is either a flag or a schema for the map values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Flag(bool),
    Schema(Box<SchemaObject>),
}

/// A single schema object as found under `definitions`, in a body
/// parameter, or in a response.
///
/// Only the keywords the generator reads are modelled; everything else is
/// ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaObject {
    /// `$ref`, e.g. `#/definitions/Card`.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    /// Raw `type` keyword. Use [`SchemaObject::kind`] for the parsed form.
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Option<Box<SchemaObject>>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, SchemaObject>>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,
}

impl SchemaObject {
    /// Creates a schema object of the given primitive type.
    pub fn of_type(kind: SchemaKind) -> Self {
        Self {
            type_name: Some(kind.to_string()),
            ..Self::default()
        }
    }

    /// Creates a `$ref` schema pointing at a named definition.
    pub fn reference_to(name: &str) -> Self {
        Self {
            reference: Some(format!("{DEFINITIONS_REF_PREFIX}{name}")),
            ..Self::default()
        }
    }

    /// Parsed `type` keyword. Unknown or missing types yield `None`.
    pub fn kind(&self) -> Option<SchemaKind> {
        self.type_name
            .as_deref()
            .and_then(|t| SchemaKind::from_str(t).ok())
    }

    /// Name of the definition this schema refers to, if it is a `$ref`.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::UnsupportedReference`] for refs outside
    /// `#/definitions/`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use clientgen_schema::SchemaObject;
    ///
    /// let schema = SchemaObject::reference_to("Card");
    /// assert_eq!(schema.ref_name().unwrap(), Some("Card"));
    /// ```
    pub fn ref_name(&self) -> Result<Option<&str>, SchemaError> {
        match &self.reference {
            None => Ok(None),
            Some(reference) => reference
                .strip_prefix(DEFINITIONS_REF_PREFIX)
                .filter(|name| !name.is_empty())
                .map(Some)
                .ok_or_else(|| SchemaError::UnsupportedReference(reference.clone())),
        }
    }

    /// The literal values of a string enumeration.
    ///
    /// Returns `None` when the schema has no `enum`, is not string-typed, or
    /// lists a non-string literal.
    pub fn string_enum(&self) -> Option<Vec<&str>> {
        let values = self.enum_values.as_ref()?;
        if !matches!(self.kind(), None | Some(SchemaKind::String)) {
            return None;
        }
        values.iter().map(serde_json::Value::as_str).collect()
    }

    /// True when this is an inline object shape with its own properties.
    pub fn has_properties(&self) -> bool {
        self.reference.is_none()
            && self.properties.as_ref().is_some_and(|props| !props.is_empty())
    }

    /// True when `name` is listed under this object's `required` keyword.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// The single property of an inline one-property object, if this is one.
    ///
    /// Such objects act as JSON envelopes (`{"card": {...}}`).
    pub fn single_property(&self) -> Option<(&str, &SchemaObject)> {
        if self.reference.is_some() {
            return None;
        }
        let props = self.properties.as_ref()?;
        if props.len() != 1 {
            return None;
        }
        props.iter().next().map(|(k, v)| (k.as_str(), v))
    }
}
