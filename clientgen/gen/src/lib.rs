//! Clientgen code generator library.
//!
//! This crate generates a TypeScript REST client from a Swagger-style schema
//! document loaded with `clientgen-schema`. The generated file contains:
//!
//! - A transport prologue (`makeRequest`, `ClientConfig`, response types)
//! - A `defaultClientConfig` carrying the document's `basePath`
//! - One string enum (plus a label map) per distinct enumeration
//! - One interface or alias per definition and per inline nested object
//! - One function per operation, taking a single parameter object
//!
//! ## Modules
//!
//! - [`types`] - Type derivation from `definitions`
//! - [`functions`] - Function derivation from `paths`
//! - [`request`] - Call-plan model: what a generated function sends
//! - [`validation`] - Name checks against the prologue
//! - [`codegen`] - TypeScript rendering for each declaration kind
//! - [`output`] - Final assembly and atomic file writing
//! - [`naming`] / [`parser`] - Identifier and route helpers
//! - [`config`] - Generation options
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use clientgen::{GeneratorConfig, generate_and_write};
//!
//! let report = generate_and_write(
//!     Path::new("swagger.json"),
//!     Path::new("src/api/client.ts"),
//!     &GeneratorConfig::default(),
//!     false,
//! )
//! .unwrap();
//! println!("{} functions", report.functions);
//! ```
//!
//! ## Generated Code Structure
//!
//! For a document with a `Card` definition and a `getCard` operation:
//!
//! ```text
//! export const defaultClientConfig: ClientConfig = { baseUrl: "", basePath: "/api" };
//!
//! export enum CardValidity { Lost = "lost", Stolen = "stolen" }
//! export const CardValidityLabels: Record<CardValidity, string> = { ... };
//!
//! export interface Card {
//!   id: string;
//!   validity?: CardValidity;
//! }
//!
//! export function getCard(
//!   params: { id: string },
//!   config: ClientConfig = defaultClientConfig,
//! ): ApiResult<Card> { ... }
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod functions;
pub mod naming;
pub mod output;
pub mod parser;
pub mod request;
pub mod types;
pub mod validation;

pub use config::{CollectionFormat, EnvelopeMode, GeneratorConfig};
pub use errors::GeneratorError;
pub use functions::{BodySpec, FunctionSpec, ParamSpec};
pub use output::{GenerationReport, generate, generate_and_write, generate_specs};
pub use request::{ClientConfig, PreparedRequest, ValidationError};
pub use types::{DerivedTypes, EnumDecl, Field, TsType, TypeBody, TypeDecl};
