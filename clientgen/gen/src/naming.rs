//! Name normalization for generated TypeScript identifiers.
//!
//! Every function here is pure: the same input always yields the same name,
//! which is what keeps repeated generation runs byte-identical.

use clientgen_schema::HttpMethod;

use crate::parser::route_segments;

/// Words that cannot be used as TypeScript binding names.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Splits a name into words on separators and case boundaries.
///
/// ## Examples
///
/// ```
/// use clientgen::naming::split_words;
///
/// assert_eq!(split_words("activeMember"), vec!["active", "Member"]);
/// assert_eq!(split_words("settlement_pending"), vec!["settlement", "pending"]);
/// assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
/// assert_eq!(split_words("plan-2-items"), vec!["plan", "2", "items"]);
/// ```
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (idx, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = idx.checked_sub(1).and_then(|i| chars.get(i)) {
            let next = chars.get(idx + 1).copied();
            let lower_to_upper = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase());
            if !current.is_empty() && (lower_to_upper || acronym_end) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `card_location` -> `CardLocation`, `activeMember` -> `ActiveMember`.
pub fn pascal_case(input: &str) -> String {
    split_words(input).iter().map(|w| capitalize(w)).collect()
}

/// `AdminListPlans` -> `adminListPlans`, `list-cards` -> `listCards`.
pub fn camel_case(input: &str) -> String {
    split_words(input)
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            if idx == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

/// `activeMember` -> `Active Member`.
pub fn humanize(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// True for a valid, non-reserved TypeScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&name)
}

/// Renders a property name for use as an object key in a type or literal.
///
/// Names that are not plain identifiers are quoted. Reserved words are fine
/// as property keys.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) || RESERVED_WORDS.contains(&name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Renders `target.name`, or `target["name"]` when the name needs quoting.
pub fn property_access(target: &str, name: &str) -> String {
    if is_identifier(name) || RESERVED_WORDS.contains(&name) {
        format!("{target}.{name}")
    } else {
        format!("{target}[{}]", quote(name))
    }
}

/// A TypeScript string literal for `value`.
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Turns a definition name into a usable type identifier.
///
/// Case is preserved; characters that cannot appear in an identifier become
/// `_`, and a leading digit gets a `_` prefix.
///
/// ## Examples
///
/// ```
/// use clientgen::naming::type_identifier;
///
/// assert_eq!(type_identifier("Card"), "Card");
/// assert_eq!(type_identifier("error"), "error");
/// assert_eq!(type_identifier("api.Card"), "api_Card");
/// assert_eq!(type_identifier("3DSecure"), "_3DSecure");
/// ```
pub fn type_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Member label for an enum literal.
///
/// ## Examples
///
/// ```
/// use clientgen::naming::enum_member_label;
///
/// assert_eq!(enum_member_label("activeMember"), "ActiveMember");
/// assert_eq!(enum_member_label("settlement_declined"), "SettlementDeclined");
/// assert_eq!(enum_member_label("3ds"), "Value3ds");
/// assert_eq!(enum_member_label(""), "Empty");
/// ```
pub fn enum_member_label(value: &str) -> String {
    if value.is_empty() {
        return "Empty".to_string();
    }
    let label = pascal_case(value);
    if label.is_empty() || !label.starts_with(|c: char| c.is_ascii_alphabetic()) {
        format!("Value{label}")
    } else {
        label
    }
}

/// Normalizes a declared `operationId` into a function name.
pub fn function_name(operation_id: &str) -> String {
    to_binding(camel_case(operation_id))
}

/// Synthesizes a function name from the method and route.
///
/// Placeholder segments become `By<Name>`.
///
/// ## Examples
///
/// ```
/// use clientgen_schema::HttpMethod;
/// use clientgen::naming::synthesize_function_name;
///
/// assert_eq!(synthesize_function_name(HttpMethod::Get, "/admin/cards/{id}"), "getAdminCardsById");
/// assert_eq!(synthesize_function_name(HttpMethod::Post, "/billing/payment_methods"), "postBillingPaymentMethods");
/// assert_eq!(synthesize_function_name(HttpMethod::Get, "/"), "getRoot");
/// ```
pub fn synthesize_function_name(method: HttpMethod, route: &str) -> String {
    let mut name = method.verb();
    let segments = route_segments(route);
    if segments.is_empty() {
        name.push_str("Root");
    }
    for segment in segments {
        match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(placeholder) => {
                name.push_str("By");
                name.push_str(&pascal_case(placeholder));
            }
            None => name.push_str(&pascal_case(segment)),
        }
    }
    to_binding(name)
}

fn to_binding(mut name: String) -> String {
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "op");
    }
    if RESERVED_WORDS.contains(&name.as_str()) {
        name.push('_');
    }
    name
}
