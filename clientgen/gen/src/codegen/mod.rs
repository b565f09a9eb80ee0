//! TypeScript emission.
//!
//! Each submodule renders one kind of declaration into a `String`. The
//! renderers are pure: they only read the derived model and never consult
//! the schema document again.
//!
//! ## Submodules
//!
//! - [`prologue`] - Transport shim and default client configuration
//! - [`enums`] - String enums and their label maps
//! - [`interfaces`] - Interfaces and type aliases
//! - [`functions`] - One exported function per operation
//!
//! See [`crate::output`] for the order in which the pieces are assembled.

pub mod enums;
pub mod functions;
pub mod interfaces;
pub mod prologue;

pub use enums::render_enum;
pub use functions::render_function;
pub use interfaces::render_type;
pub use prologue::{render_default_config, render_prologue};

/// Renders a JSDoc block from the non-empty paragraphs, or nothing.
///
/// ## Examples
///
/// ```
/// use clientgen::codegen::doc_comment;
///
/// assert_eq!(doc_comment("", &[Some("Get a card")]), "/** Get a card */\n");
/// assert_eq!(doc_comment("  ", &[None]), "");
/// assert_eq!(
///     doc_comment("", &[Some("Get a card"), Some("By id.")]),
///     "/**\n * Get a card\n *\n * By id.\n */\n"
/// );
/// ```
pub fn doc_comment(indent: &str, paragraphs: &[Option<&str>]) -> String {
    let paragraphs: Vec<String> = paragraphs
        .iter()
        .flatten()
        .map(|p| p.trim().replace("*/", "*\\/"))
        .filter(|p| !p.is_empty())
        .collect();

    match paragraphs.as_slice() {
        [] => String::new(),
        [single] if !single.contains('\n') => format!("{indent}/** {single} */\n"),
        _ => {
            let mut out = format!("{indent}/**\n");
            for (idx, paragraph) in paragraphs.iter().enumerate() {
                if idx > 0 {
                    out.push_str(&format!("{indent} *\n"));
                }
                for line in paragraph.lines() {
                    let line = line.trim_end();
                    if line.is_empty() {
                        out.push_str(&format!("{indent} *\n"));
                    } else {
                        out.push_str(&format!("{indent} * {line}\n"));
                    }
                }
            }
            out.push_str(&format!("{indent} */\n"));
            out
        }
    }
}
