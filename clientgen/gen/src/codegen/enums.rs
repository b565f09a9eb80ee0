//! String enums and their human-readable label maps.

use crate::codegen::doc_comment;
use crate::naming::{humanize, quote};
use crate::types::EnumDecl;
use crate::validation::labels_name;

/// Renders an enum followed by its `<Enum>Labels` map.
///
/// ## Examples
///
/// ```text
/// export enum CardValidity {
///   ActiveMember = "activeMember",
///   Lost = "lost",
/// }
///
/// export const CardValidityLabels: Record<CardValidity, string> = {
///   [CardValidity.ActiveMember]: "Active Member",
///   [CardValidity.Lost]: "Lost",
/// };
/// ```
pub fn render_enum(decl: &EnumDecl) -> String {
    let mut out = doc_comment("", &[decl.description.as_deref()]);

    out.push_str(&format!("export enum {} {{\n", decl.name));
    for member in &decl.members {
        out.push_str(&format!("  {} = {},\n", member.label, quote(&member.value)));
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        "export const {}: Record<{}, string> = {{\n",
        labels_name(&decl.name),
        decl.name
    ));
    for member in &decl.members {
        out.push_str(&format!(
            "  [{}.{}]: {},\n",
            decl.name,
            member.label,
            quote(&humanize(&member.value))
        ));
    }
    out.push_str("};\n");
    out
}
