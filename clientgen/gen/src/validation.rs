//! Cross-cutting name checks on the derived declarations.
//!
//! Type derivation keeps type names unique and function derivation keeps
//! function names unique. What remains is clashes with the prologue, with
//! the globals the prologue calls, and between the value-level names that
//! share one module scope.

use std::collections::HashSet;

use crate::errors::GeneratorError;
use crate::functions::FunctionSpec;
use crate::types::DerivedTypes;

/// Symbols declared by the client prologue.
pub const PROLOGUE_SYMBOLS: &[&str] = &[
    "ApiDataResponse",
    "ApiError",
    "ApiErrorResponse",
    "ApiResult",
    "ClientConfig",
    "ValidationError",
    "buildQuery",
    "collectionFormat",
    "defaultClientConfig",
    "defaultMessage",
    "fillPath",
    "getCookie",
    "isApiErrorResponse",
    "isObject",
    "makeRequest",
    "render",
    "requireParams",
    "withBasePath",
    "withBaseUrl",
];

/// Globals the prologue and generated code refer to. A module-level
/// declaration with one of these names would shadow it.
pub const RUNTIME_GLOBALS: &[&str] = &[
    "Array",
    "Error",
    "JSON",
    "Object",
    "Promise",
    "Record",
    "Response",
    "String",
    "URLSearchParams",
    "decodeURIComponent",
    "document",
    "fetch",
];

fn is_reserved(name: &str) -> bool {
    PROLOGUE_SYMBOLS.contains(&name) || RUNTIME_GLOBALS.contains(&name)
}

/// Name of the label map emitted for an enum.
pub fn labels_name(enum_name: &str) -> String {
    format!("{enum_name}Labels")
}

/// Checks that no generated name clashes with the prologue, a global it
/// relies on, or another value-level name.
///
/// ## Errors
///
/// Returns [`GeneratorError::NamingCollision`] naming the first clash and a
/// free alternative.
pub fn check_names(types: &DerivedTypes, functions: &[FunctionSpec]) -> Result<(), GeneratorError> {
    let declared: Vec<String> = types
        .declared_names()
        .map(str::to_string)
        .chain(types.enums.iter().map(|e| labels_name(&e.name)))
        .chain(functions.iter().map(|f| f.name.clone()))
        .collect();

    for name in &declared {
        if is_reserved(name) {
            return Err(collision(name, &declared));
        }
    }

    let mut values = HashSet::new();
    let value_names = types
        .enums
        .iter()
        .flat_map(|e| [e.name.clone(), labels_name(&e.name)])
        .chain(functions.iter().map(|f| f.name.clone()));
    for name in value_names {
        if !values.insert(name.clone()) {
            return Err(collision(&name, &declared));
        }
    }

    Ok(())
}

fn collision(name: &str, taken: &[String]) -> GeneratorError {
    let suggestion = (2..)
        .map(|n| format!("{name}{n}"))
        .find(|candidate| {
            !taken.contains(candidate) && !is_reserved(candidate)
        })
        .unwrap_or_else(|| format!("{name}_"));
    GeneratorError::NamingCollision {
        name: name.to_string(),
        suggestion,
    }
}
