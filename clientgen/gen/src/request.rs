//! Call-plan model of the generated functions.
//!
//! The emitted TypeScript validates parameters, fills the route, assembles
//! the query string and places the body at call time. [`FunctionSpec::prepare`]
//! applies the same rules in Rust, so the wire behavior of a generated
//! client can be checked without a JavaScript runtime.
//!
//! ## Examples
//!
//! ```
//! use clientgen::{ClientConfig, GeneratorConfig, generate_specs};
//! use clientgen_schema::SchemaDocument;
//! use serde_json::json;
//!
//! let doc = SchemaDocument::from_json_str(r#"{
//!     "basePath": "/api",
//!     "paths": {"/cards/{id}": {"get": {
//!         "operationId": "getCard",
//!         "parameters": [{"name": "id", "in": "path", "type": "string"}]
//!     }}}
//! }"#).unwrap();
//! let config = GeneratorConfig::default();
//! let (_, functions) = generate_specs(&doc, &config).unwrap();
//!
//! let args = json!({"id": "c-1"});
//! let request = functions[0]
//!     .prepare(args.as_object().unwrap(), &ClientConfig::for_document(&doc), &config)
//!     .unwrap();
//! assert_eq!(request.url, "/api/cards/c-1");
//! ```

use clientgen_schema::{HttpMethod, SchemaDocument};
use serde_json::{Map, Value};
use thiserror::Error;
use url::form_urlencoded;

use crate::config::{CollectionFormat, GeneratorConfig};
use crate::functions::FunctionSpec;
use crate::parser::substitute_path_params;

/// A required parameter was absent (or `null`) at call time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required parameter '{parameter}' for '{operation}'")]
pub struct ValidationError {
    pub parameter: String,
    pub operation: String,
}

/// Where requests are sent. Mirrors the emitted `ClientConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://example.com`. Empty for same-origin.
    pub base_url: String,
    /// Prefix for every route, e.g. `/api`.
    pub base_path: String,
}

impl ClientConfig {
    /// The default configuration emitted for a document: same origin, the
    /// document's `basePath`.
    pub fn for_document(doc: &SchemaDocument) -> Self {
        Self {
            base_url: String::new(),
            base_path: doc.base_path.clone().unwrap_or_default(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// A request as the generated client would send it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body, for methods that carry one.
    pub body: Option<Value>,
}

impl FunctionSpec {
    /// Builds the request this function sends for `args`.
    ///
    /// ## Arguments
    ///
    /// * `args` - The parameter object, keyed by parameter name
    /// * `client` - Base URL and path
    /// * `config` - The generation options the client was emitted with
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError`] for the first required parameter that is
    /// missing or `null`, checking path, then query, then body parameters.
    pub fn prepare(
        &self,
        args: &Map<String, Value>,
        client: &ClientConfig,
        config: &GeneratorConfig,
    ) -> Result<PreparedRequest, ValidationError> {
        if let Some(missing) = self.params().find(|p| p.required && present(args, &p.name).is_none()) {
            return Err(ValidationError {
                parameter: missing.name.clone(),
                operation: self.name.clone(),
            });
        }

        let values: Vec<(&str, String)> = self
            .path_params
            .iter()
            .filter_map(|p| present(args, &p.name).map(|v| (p.name.as_str(), render(v))))
            .collect();
        let pairs: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let path = substitute_path_params(&self.route, &pairs);

        let query = assemble_query(
            self.query_params.iter().map(|p| (p.name.as_str(), present(args, &p.name))),
            config.collection_format,
        );

        let mut url = format!("{}{}{}", client.base_url, client.base_path, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let body = self.body.as_ref().and_then(|spec| {
            let value = present(args, &spec.param.name)?.clone();
            Some(match &spec.envelope_key {
                Some(key) => {
                    let mut wrapped = Map::new();
                    wrapped.insert(key.clone(), value);
                    Value::Object(wrapped)
                }
                None => value,
            })
        });

        Ok(PreparedRequest {
            method: self.method,
            url,
            body,
        })
    }

    /// The `data` a successful call resolves with, given the decoded body.
    ///
    /// An envelope key selects that member; a missing member yields `null`.
    pub fn extract_data(&self, body: Value) -> Value {
        match (&self.envelope_key, body) {
            (Some(key), Value::Object(mut members)) => members.remove(key).unwrap_or(Value::Null),
            (Some(_), _) => Value::Null,
            (None, body) => body,
        }
    }
}

/// Builds a query string from `(name, value)` pairs.
///
/// Absent and `null` values are omitted, as are arrays with no non-null
/// items. Encoding is `application/x-www-form-urlencoded`.
///
/// ## Examples
///
/// ```
/// use clientgen::CollectionFormat;
/// use clientgen::request::assemble_query;
/// use serde_json::json;
///
/// let tags = json!(["a", "b"]);
/// let page = json!(2);
/// let pairs = [("tags", Some(&tags)), ("page", Some(&page)), ("q", None)];
///
/// assert_eq!(assemble_query(pairs, CollectionFormat::Multi), "tags=a&tags=b&page=2");
/// assert_eq!(assemble_query(pairs, CollectionFormat::Csv), "tags=a%2Cb&page=2");
/// assert_eq!(assemble_query(pairs, CollectionFormat::Brackets), "tags%5B%5D=a&tags%5B%5D=b&page=2");
/// ```
pub fn assemble_query<'a>(
    pairs: impl IntoIterator<Item = (&'a str, Option<&'a Value>)>,
    format: CollectionFormat,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    for (name, value) in pairs {
        match value {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                let items: Vec<String> = items.iter().filter(|v| !v.is_null()).map(render).collect();
                if items.is_empty() {
                    continue;
                }
                match format {
                    CollectionFormat::Multi => {
                        for item in &items {
                            query.append_pair(name, item);
                        }
                    }
                    CollectionFormat::Csv => {
                        query.append_pair(name, &items.join(","));
                    }
                    CollectionFormat::Brackets => {
                        let key = format!("{name}[]");
                        for item in &items {
                            query.append_pair(&key, item);
                        }
                    }
                }
            }
            Some(value) => {
                query.append_pair(name, &render(value));
            }
        }
    }

    query.finish()
}

fn present<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|v| !v.is_null())
}

/// Strings as-is, objects and arrays as JSON, everything else as printed.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{BodySpec, ParamSpec};
    use crate::types::TsType;
    use serde_json::json;

    fn param(name: &str, required: bool) -> ParamSpec {
        ParamSpec {
            name: name.to_string(),
            ty: TsType::String,
            required,
            description: None,
        }
    }

    fn update_card() -> FunctionSpec {
        FunctionSpec {
            name: "updateCard".to_string(),
            summary: None,
            description: None,
            deprecated: false,
            method: HttpMethod::Put,
            route: "/cards/{id}".to_string(),
            path_params: vec![param("id", true)],
            query_params: vec![param("notify", false)],
            body: Some(BodySpec {
                param: param("cardDetails", true),
                envelope_key: Some("card".to_string()),
            }),
            return_type: TsType::Named("Card".to_string()),
            envelope_key: Some("card".to_string()),
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("args must be an object"),
        }
    }

    #[test]
    fn prepares_full_request() {
        let request = update_card()
            .prepare(
                &args(json!({"id": "c 1", "notify": true, "cardDetails": {"uid": "u"}})),
                &ClientConfig::default().with_base_path("/api"),
                &GeneratorConfig::default(),
            )
            .unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "/api/cards/c 1?notify=true");
        assert_eq!(request.body, Some(json!({"card": {"uid": "u"}})));
    }

    #[test]
    fn missing_path_param_is_reported_first() {
        let err = update_card()
            .prepare(&args(json!({"id": null})), &ClientConfig::default(), &GeneratorConfig::default())
            .unwrap_err();
        assert_eq!(err.parameter, "id");
        assert_eq!(err.operation, "updateCard");
        assert_eq!(err.to_string(), "Missing required parameter 'id' for 'updateCard'");
    }

    #[test]
    fn missing_body_is_reported() {
        let err = update_card()
            .prepare(&args(json!({"id": "c1"})), &ClientConfig::default(), &GeneratorConfig::default())
            .unwrap_err();
        assert_eq!(err.parameter, "cardDetails");
    }

    #[test]
    fn base_url_precedes_base_path() {
        let client = ClientConfig::default()
            .with_base_url("https://example.com")
            .with_base_path("/v2");
        let request = update_card()
            .prepare(&args(json!({"id": 7, "cardDetails": {}})), &client, &GeneratorConfig::default())
            .unwrap();
        assert_eq!(request.url, "https://example.com/v2/cards/7");
    }

    #[test]
    fn query_omits_nulls_and_empty_arrays() {
        let empty = json!([]);
        let nulls = json!([null]);
        let null = Value::Null;
        let query = assemble_query(
            [("a", Some(&empty)), ("b", Some(&nulls)), ("c", Some(&null)), ("d", None)],
            CollectionFormat::Multi,
        );
        assert_eq!(query, "");
    }

    #[test]
    fn query_encodes_spaces_and_objects() {
        let search = json!("lost card");
        let filter = json!({"k": 1});
        let query = assemble_query(
            [("search", Some(&search)), ("filter", Some(&filter))],
            CollectionFormat::Multi,
        );
        assert_eq!(query, "search=lost+card&filter=%7B%22k%22%3A1%7D");
    }

    #[test]
    fn extract_data_unwraps_envelope() {
        let spec = update_card();
        assert_eq!(spec.extract_data(json!({"card": {"id": "c1"}})), json!({"id": "c1"}));
        assert_eq!(spec.extract_data(json!({"other": 1})), Value::Null);

        let mut full = update_card();
        full.envelope_key = None;
        assert_eq!(full.extract_data(json!({"card": 1})), json!({"card": 1}));
    }
}
