//! The fixed transport shim every generated client starts with.

use crate::config::GeneratorConfig;
use crate::naming::quote;

const PROLOGUE_TEMPLATE: &str = include_str!("../../templates/prologue.ts");

/// Renders the prologue with the run's collection format baked in.
pub fn render_prologue(config: &GeneratorConfig) -> String {
    PROLOGUE_TEMPLATE.replace("{{collection_format}}", &config.collection_format.to_string())
}

/// Renders `defaultClientConfig`, carrying the document's base path.
///
/// ## Examples
///
/// ```
/// use clientgen::codegen::render_default_config;
///
/// assert_eq!(
///     render_default_config("/api"),
///     "export const defaultClientConfig: ClientConfig = {\n  baseUrl: \"\",\n  basePath: \"/api\",\n};\n"
/// );
/// ```
pub fn render_default_config(base_path: &str) -> String {
    format!(
        "export const defaultClientConfig: ClientConfig = {{\n  baseUrl: \"\",\n  basePath: {},\n}};\n",
        quote(base_path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectionFormat;
    use crate::validation::PROLOGUE_SYMBOLS;

    #[test]
    fn collection_format_is_substituted() {
        let prologue = render_prologue(&GeneratorConfig::default().with_collection_format(CollectionFormat::Brackets));
        assert!(prologue.contains(r#"const collectionFormat: "multi" | "csv" | "brackets" = "brackets";"#));
        assert!(!prologue.contains("{{"));
    }

    #[test]
    fn fill_path_substitutes_in_a_single_pass() {
        let prologue = render_prologue(&GeneratorConfig::default());
        assert!(prologue.contains(r"template.replace(/\{([^}]+)\}/g,"));
        assert!(!prologue.contains(".split(`{${name}}`)"));
    }

    #[test]
    fn prologue_declares_reserved_symbols() {
        let prologue = format!("{}{}", render_prologue(&GeneratorConfig::default()), render_default_config(""));
        for symbol in PROLOGUE_SYMBOLS {
            let declared = [
                format!("interface {symbol}"),
                format!("type {symbol}"),
                format!("class {symbol}"),
                format!("const {symbol}"),
            ];
            assert!(
                declared.iter().any(|d| prologue.contains(d.as_str())),
                "prologue does not declare {symbol}"
            );
        }
    }
}
