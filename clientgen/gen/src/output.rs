//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of generation: assembling every
//! rendered piece into one TypeScript file and writing it to disk
//! atomically.
//!
//! ## Output Structure
//!
//! ```text
//! // header comment
//! prologue (transport shim)
//! defaultClientConfig
//! enums + label maps
//! interfaces and aliases
//! functions
//! ```
//!
//! ## Safety Guarantees
//!
//! - **All or nothing**: every derivation and check runs before any byte is
//!   written
//! - **Deterministic**: the same document and options always produce the
//!   same bytes
//! - **Atomic writes**: temp file + rename, so a failed write never leaves a
//!   partial client behind

use std::fs;
use std::path::Path;

use clientgen_schema::SchemaDocument;
use tracing::{debug, info};

use crate::codegen::{render_default_config, render_enum, render_function, render_prologue, render_type};
use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::functions::{FunctionSpec, derive_functions};
use crate::types::{DerivedTypes, derive_types};
use crate::validation::check_names;

/// First line of every generated file.
pub const GENERATED_HEADER: &str =
    "// This code was automatically generated by clientgen. Do not edit manually.";

/// The result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// The complete TypeScript source.
    pub code: String,
    pub types: usize,
    pub enums: usize,
    pub functions: usize,
}

/// Derives and checks every declaration for a document.
///
/// ## Errors
///
/// Returns the first derivation or naming error.
pub fn generate_specs(
    doc: &SchemaDocument,
    config: &GeneratorConfig,
) -> Result<(DerivedTypes, Vec<FunctionSpec>), GeneratorError> {
    let types = derive_types(doc)?;
    let operations = doc.operations()?;
    let functions = derive_functions(&operations, &types, config)?;
    check_names(&types, &functions)?;
    Ok((types, functions))
}

/// Generates the client source for a document.
///
/// ## Examples
///
/// ```
/// use clientgen::{GeneratorConfig, generate};
/// use clientgen_schema::SchemaDocument;
///
/// let doc = SchemaDocument::from_json_str(r#"{"basePath": "/api"}"#).unwrap();
/// let report = generate(&doc, &GeneratorConfig::default()).unwrap();
/// assert!(report.code.contains(r#"basePath: "/api""#));
/// assert_eq!(report.functions, 0);
/// ```
///
/// ## Errors
///
/// Returns an error if any derivation step or naming check fails.
pub fn generate(doc: &SchemaDocument, config: &GeneratorConfig) -> Result<GenerationReport, GeneratorError> {
    let (types, functions) = generate_specs(doc, config)?;

    let mut sections = vec![
        header(doc),
        render_prologue(config).trim_end().to_string(),
        render_default_config(doc.base_path.as_deref().unwrap_or_default())
            .trim_end()
            .to_string(),
    ];
    sections.extend(types.enums.iter().map(|e| render_enum(e).trim_end().to_string()));
    sections.extend(types.types.iter().map(|t| render_type(t).trim_end().to_string()));
    sections.extend(functions.iter().map(|f| render_function(f).trim_end().to_string()));

    let mut code = sections.join("\n\n");
    code.push('\n');

    info!(
        types = types.types.len(),
        enums = types.enums.len(),
        functions = functions.len(),
        "generated client"
    );

    Ok(GenerationReport {
        code,
        types: types.types.len(),
        enums: types.enums.len(),
        functions: functions.len(),
    })
}

/// The header comment, naming the source API when `info` declares it.
fn header(doc: &SchemaDocument) -> String {
    let info = doc.info.as_ref();
    let title = info.and_then(|i| i.title.as_deref());
    let version = info.and_then(|i| i.version.as_deref());
    match (title, version) {
        (Some(title), Some(version)) => format!("{GENERATED_HEADER}\n// Source: {title} {version}"),
        (Some(title), None) => format!("{GENERATED_HEADER}\n// Source: {title}"),
        _ => GENERATED_HEADER.to_string(),
    }
}

/// Writes content to a file atomically.
///
/// Writes to a temporary file first, then renames to the target path.
/// Parent directories are created as needed.
///
/// ## Errors
///
/// Returns [`GeneratorError::WriteError`] if any filesystem step fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(())
}

/// Reads a schema document, generates the client and writes it.
///
/// This is the main entry point used by the CLI.
///
/// ## Arguments
///
/// * `input` - Schema document (JSON, or YAML by extension)
/// * `output` - Path of the TypeScript file to write
/// * `config` - Generation options
/// * `dry_run` - If true, print the code instead of writing it
///
/// ## Errors
///
/// Returns an error if the document cannot be loaded, generation fails, or
/// the file cannot be written. Nothing is written on error.
pub fn generate_and_write(
    input: &Path,
    output: &Path,
    config: &GeneratorConfig,
    dry_run: bool,
) -> Result<GenerationReport, GeneratorError> {
    let doc = SchemaDocument::load(input)?;
    let report = generate(&doc, config)?;

    if dry_run {
        println!("{}", report.code);
    } else {
        write_atomic(output, &report.code)?;
    }

    Ok(report)
}
