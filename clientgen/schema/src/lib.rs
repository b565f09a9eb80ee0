//! Schema document model for `clientgen`.
//!
//! This crate deserializes Swagger-style REST API descriptions into typed,
//! order-preserving structures. Input order matters: the generator emits
//! declarations in the order they appear in the document, which keeps its
//! output deterministic.
//!
//! ## Core Types
//!
//! - [`SchemaDocument`] - The root: `basePath`, `definitions` and `paths`
//! - [`SchemaObject`] - A shape descriptor (primitive, `$ref`, array, object, enum)
//! - [`PathItem`] - One route with its per-method operations
//! - [`Operation`] - A single HTTP-method-bound action
//! - [`Parameter`] / [`ParamLocation`] - Operation inputs and where they bind
//! - [`HttpMethod`] - The methods an operation may be keyed by
//!
//! ## Examples
//!
//! ```
//! use clientgen_schema::{HttpMethod, SchemaDocument};
//!
//! let doc = SchemaDocument::from_json_str(r#"{
//!     "paths": {"/cards": {"get": {"operationId": "listCards"}}}
//! }"#).unwrap();
//!
//! let ops = doc.operations().unwrap();
//! assert_eq!(ops[0].method, HttpMethod::Get);
//! assert_eq!(ops[0].operation.operation_id.as_deref(), Some("listCards"));
//! ```

pub mod document;
pub mod error;
pub mod operation;
pub mod schema;

pub use document::{Info, PathItem, SchemaDocument};
pub use error::SchemaError;
pub use operation::{HttpMethod, Operation, ParamLocation, Parameter, Response, RouteOperation};
pub use schema::{AdditionalProperties, DEFINITIONS_REF_PREFIX, SchemaKind, SchemaObject};
