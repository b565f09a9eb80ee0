//! Function derivation: one [`FunctionSpec`] per operation.
//!
//! A function takes a single parameter object. Path parameters fill the
//! route template, query parameters become the query string, and at most one
//! body parameter becomes the JSON request body. Header and form parameters
//! have no transport in the client prologue and are skipped.

use std::collections::HashSet;

use clientgen_schema::{HttpMethod, ParamLocation, RouteOperation, SchemaObject};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::naming::{function_name, synthesize_function_name};
use crate::parser::extract_path_params;
use crate::types::{DerivedTypes, TsType};

/// One member of a function's parameter object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Wire name, also the key in the parameter object.
    pub name: String,
    pub ty: TsType,
    pub required: bool,
    pub description: Option<String>,
}

/// How the request body is built from the parameter object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySpec {
    pub param: ParamSpec,
    /// When set, the body is `{ <key>: value }` instead of the value itself.
    pub envelope_key: Option<String>,
}

/// Everything needed to emit (or simulate) one client function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub method: HttpMethod,
    pub route: String,
    pub path_params: Vec<ParamSpec>,
    pub query_params: Vec<ParamSpec>,
    pub body: Option<BodySpec>,
    /// Type of `data` on success, after envelope unwrapping.
    pub return_type: TsType,
    /// When set, the success payload is read from this key of the body.
    pub envelope_key: Option<String>,
}

impl FunctionSpec {
    /// All parameters in validation order: path, query, body.
    pub fn params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.path_params
            .iter()
            .chain(self.query_params.iter())
            .chain(self.body.iter().map(|b| &b.param))
    }

    pub fn has_params(&self) -> bool {
        self.params().next().is_some()
    }

    /// True when the caller must pass a parameter object.
    pub fn requires_params(&self) -> bool {
        self.params().any(|p| p.required)
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params().find(|p| p.name == name)
    }

    /// `GET /cards/{id}`, used to identify the operation in messages.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.route)
    }
}

/// Derives the functions for every operation, in document order.
///
/// ## Errors
///
/// Any per-operation error from [`derive_function`], or
/// [`GeneratorError::DuplicateFunctionName`] when two operations produce the
/// same name.
pub fn derive_functions(
    operations: &[RouteOperation],
    types: &DerivedTypes,
    config: &GeneratorConfig,
) -> Result<Vec<FunctionSpec>, GeneratorError> {
    let mut functions: Vec<FunctionSpec> = Vec::with_capacity(operations.len());

    for op in operations {
        let function = derive_function(op, types, config)?;
        if let Some(existing) = functions.iter().find(|f| f.name == function.name) {
            let second = function.label();
            return Err(GeneratorError::DuplicateFunctionName {
                name: function.name,
                first: existing.label(),
                second,
            });
        }
        functions.push(function);
    }

    Ok(functions)
}

/// Derives the function for a single operation.
///
/// ## Errors
///
/// - [`GeneratorError::MultipleBodyParameters`] for more than one body
///   parameter
/// - [`GeneratorError::DuplicateParameter`] when two bound parameters share a
///   name
/// - [`GeneratorError::PathParameterMismatch`] when the route placeholders
///   and path parameters differ
/// - [`GeneratorError::UnresolvedReference`] for a `$ref` to an unknown
///   definition
pub fn derive_function(
    op: &RouteOperation,
    types: &DerivedTypes,
    config: &GeneratorConfig,
) -> Result<FunctionSpec, GeneratorError> {
    let RouteOperation {
        route,
        method,
        operation,
    } = op;
    let method = *method;
    let name = match &operation.operation_id {
        Some(id) => function_name(id),
        None => synthesize_function_name(method, route),
    };
    debug!(function = %name, %method, route = %route, "deriving function");

    let body_count = operation
        .parameters
        .iter()
        .filter(|p| p.location == ParamLocation::Body)
        .count();
    if body_count > 1 {
        return Err(GeneratorError::MultipleBodyParameters { operation: name });
    }

    let mut seen = HashSet::new();
    let mut path_params = Vec::new();
    let mut query_params = Vec::new();
    let mut body = None;

    for param in &operation.parameters {
        match param.location {
            ParamLocation::Header | ParamLocation::FormData => {
                warn!(
                    function = %name,
                    parameter = %param.name,
                    location = %param.location,
                    "parameter location not supported by the client, skipping"
                );
                continue;
            }
            ParamLocation::Body if !method.carries_body() => {
                warn!(function = %name, parameter = %param.name, %method, "ignoring body parameter");
                continue;
            }
            _ => {}
        }

        if !seen.insert(param.name.as_str()) {
            return Err(GeneratorError::DuplicateParameter {
                operation: name,
                name: param.name.clone(),
            });
        }

        let context = format!("parameter '{}' of '{name}'", param.name);
        let schema = param.value_schema();

        match param.location {
            ParamLocation::Path | ParamLocation::Query => {
                let spec = ParamSpec {
                    name: param.name.clone(),
                    ty: types.resolve_inline(&schema, &context)?,
                    required: param.is_required(),
                    description: param.description.clone(),
                };
                if param.location == ParamLocation::Path {
                    path_params.push(spec);
                } else {
                    query_params.push(spec);
                }
            }
            _ => {
                let (ty, envelope_key) = match envelope(&schema, config) {
                    Some((key, inner)) => (types.resolve_inline(inner, &context)?, Some(key.to_string())),
                    None => (types.resolve_inline(&schema, &context)?, None),
                };
                body = Some(BodySpec {
                    param: ParamSpec {
                        name: param.name.clone(),
                        ty,
                        required: param.is_required(),
                        description: param.description.clone(),
                    },
                    envelope_key,
                });
            }
        }
    }

    check_path_params(&name, route, &path_params)?;

    let (return_type, envelope_key) = match operation.success_response().and_then(|r| r.schema.as_ref()) {
        None => (TsType::Void, None),
        Some(schema) => {
            let context = format!("response of '{name}'");
            match envelope(schema, config) {
                Some((key, inner)) => (types.resolve_inline(inner, &context)?, Some(key.to_string())),
                None => (types.resolve_inline(schema, &context)?, None),
            }
        }
    };

    Ok(FunctionSpec {
        name,
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        deprecated: operation.deprecated,
        method,
        route: route.clone(),
        path_params,
        query_params,
        body,
        return_type,
        envelope_key,
    })
}

/// The envelope key and inner schema, when envelopes are unwrapped and the
/// schema is an inline single-property object.
fn envelope<'s>(schema: &'s SchemaObject, config: &GeneratorConfig) -> Option<(&'s str, &'s SchemaObject)> {
    if config.unwraps_envelopes() {
        schema.single_property()
    } else {
        None
    }
}

fn check_path_params(name: &str, route: &str, path_params: &[ParamSpec]) -> Result<(), GeneratorError> {
    let placeholders = extract_path_params(route);
    let declared: HashSet<&str> = path_params.iter().map(|p| p.name.as_str()).collect();
    let expected: HashSet<&str> = placeholders.iter().copied().collect();

    if declared == expected {
        return Ok(());
    }
    Err(GeneratorError::PathParameterMismatch {
        operation: name.to_string(),
        route: route.to_string(),
        placeholders: placeholders.iter().map(|p| p.to_string()).collect(),
        parameters: path_params.iter().map(|p| p.name.clone()).collect(),
    })
}
