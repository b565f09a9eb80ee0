//! Error types for the client generator.

use clientgen_schema::SchemaError;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Every variant except [`GeneratorError::WriteError`] means the schema
/// document is unusable as input; none of them leave a partial output file
/// behind.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The schema document could not be read or parsed.
    #[error("Failed to parse API schema: {0}")]
    ParseError(#[from] SchemaError),

    /// A `$ref` names a definition the document does not contain.
    #[error("Unresolved reference to '{name}' in {context}")]
    UnresolvedReference {
        /// The referenced definition name.
        name: String,
        /// Where the reference was found (e.g. `definition 'Card'`).
        context: String,
    },

    /// The route's `{placeholder}` tokens differ from its path parameters.
    #[error(
        "Path parameters of '{operation}' do not match route '{route}': placeholders [{}], path parameters [{}]",
        .placeholders.join(", "),
        .parameters.join(", ")
    )]
    PathParameterMismatch {
        operation: String,
        route: String,
        placeholders: Vec<String>,
        parameters: Vec<String>,
    },

    /// Two operations map to the same generated function name.
    #[error("Duplicate function name '{name}': generated for both '{first}' and '{second}'")]
    DuplicateFunctionName {
        name: String,
        first: String,
        second: String,
    },

    /// One operation binds the same parameter name twice.
    #[error("Operation '{operation}' declares parameter '{name}' more than once")]
    DuplicateParameter { operation: String, name: String },

    /// An operation declares more than one `in: body` parameter.
    #[error("Operation '{operation}' declares more than one body parameter")]
    MultipleBodyParameters { operation: String },

    /// A generated name clashes with the prologue, a global the prologue
    /// relies on, or another generated value.
    #[error(
        "Naming collision for '{name}': it clashes with an existing declaration. Suggestion: rename it to '{suggestion}'"
    )]
    NamingCollision {
        /// The clashing name.
        name: String,
        /// Suggested alternative name.
        suggestion: String,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_mismatch_message_lists_both_sides() {
        let err = GeneratorError::PathParameterMismatch {
            operation: "getMessage".to_string(),
            route: "/threads/{thread}/messages/{message}".to_string(),
            placeholders: vec!["thread".to_string(), "message".to_string()],
            parameters: vec!["thread".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("placeholders [thread, message]"));
        assert!(message.contains("path parameters [thread]"));
    }

    #[test]
    fn schema_errors_convert_into_parse_errors() {
        let err: GeneratorError = SchemaError::UnsupportedReference("#/x".to_string()).into();
        assert!(matches!(err, GeneratorError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse API schema"));
    }
}
