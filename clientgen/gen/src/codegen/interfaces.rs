//! Interfaces and type aliases.

use crate::codegen::doc_comment;
use crate::types::{TypeBody, TypeDecl};

/// Renders one type declaration.
///
/// Interfaces list one field per line, optional fields marked `?`; aliases
/// render as `export type Name = T;`.
pub fn render_type(decl: &TypeDecl) -> String {
    let mut out = doc_comment("", &[decl.description.as_deref()]);

    match &decl.body {
        TypeBody::Interface(fields) if fields.is_empty() => {
            out.push_str(&format!("export interface {} {{}}\n", decl.name));
        }
        TypeBody::Interface(fields) => {
            out.push_str(&format!("export interface {} {{\n", decl.name));
            for field in fields {
                out.push_str(&doc_comment("  ", &[field.description.as_deref()]));
                out.push_str(&format!("  {};\n", field.signature()));
            }
            out.push_str("}\n");
        }
        TypeBody::Alias(ty) => {
            out.push_str(&format!("export type {} = {};\n", decl.name, ty));
        }
    }
    out
}
