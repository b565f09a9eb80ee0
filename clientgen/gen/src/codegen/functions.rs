//! One exported function per operation.
//!
//! ```text
//! /** Get a card */
//! export function getCard(
//!   params: { id: string },
//!   config: ClientConfig = defaultClientConfig,
//! ): ApiResult<Card> {
//!   requireParams("getCard", params, ["id"]);
//!   return makeRequest<Card>(
//!     config,
//!     "GET",
//!     fillPath("/cards/{id}", { id: params.id }),
//!     undefined,
//!     undefined,
//!     (data: { card: Card }) => data.card,
//!   );
//! }
//! ```

use crate::codegen::doc_comment;
use crate::functions::{FunctionSpec, ParamSpec};
use crate::naming::{property_access, property_key, quote};

/// Renders the function for one operation.
pub fn render_function(spec: &FunctionSpec) -> String {
    let deprecated = spec.deprecated.then_some("@deprecated");
    let mut out = doc_comment("", &[spec.summary.as_deref(), spec.description.as_deref(), deprecated]);

    out.push_str(&format!("export function {}(\n", spec.name));
    if spec.has_params() {
        let default = if spec.requires_params() { "" } else { " = {}" };
        out.push_str(&format!("  params: {}{default},\n", params_type(spec)));
    }
    out.push_str("  config: ClientConfig = defaultClientConfig,\n");
    out.push_str(&format!("): ApiResult<{}> {{\n", spec.return_type));

    let required: Vec<String> = spec.params().filter(|p| p.required).map(|p| quote(&p.name)).collect();
    if !required.is_empty() {
        out.push_str(&format!(
            "  requireParams({}, params, [{}]);\n",
            quote(&spec.name),
            required.join(", ")
        ));
    }

    let mut args = vec![
        "config".to_string(),
        quote(&spec.method.to_string()),
        path_expression(spec),
        object_literal(spec.query_params.iter().map(|p| (p.name.as_str(), param_value(p)))),
        body_expression(spec),
        unwrap_accessor(spec),
    ];
    while args.last().is_some_and(|arg| arg == "undefined") {
        args.pop();
    }

    out.push_str(&format!("  return makeRequest<{}>(\n", spec.return_type));
    for arg in &args {
        out.push_str(&format!("    {arg},\n"));
    }
    out.push_str("  );\n}\n");
    out
}

/// `{ id: string; page?: number }`
fn params_type(spec: &FunctionSpec) -> String {
    let members: Vec<String> = spec
        .params()
        .map(|p| {
            let optional = if p.required { "" } else { "?" };
            format!("{}{optional}: {}", property_key(&p.name), p.ty)
        })
        .collect();
    format!("{{ {} }}", members.join("; "))
}

fn param_value(param: &ParamSpec) -> String {
    property_access("params", &param.name)
}

/// `{ a: x, b: y }`, or `undefined` with no entries.
fn object_literal<'a>(entries: impl Iterator<Item = (&'a str, String)>) -> String {
    let rendered: Vec<String> = entries
        .map(|(key, value)| format!("{}: {value}", property_key(key)))
        .collect();
    if rendered.is_empty() {
        "undefined".to_string()
    } else {
        format!("{{ {} }}", rendered.join(", "))
    }
}

fn path_expression(spec: &FunctionSpec) -> String {
    if spec.path_params.is_empty() {
        return quote(&spec.route);
    }
    let values = object_literal(spec.path_params.iter().map(|p| (p.name.as_str(), param_value(p))));
    format!("fillPath({}, {values})", quote(&spec.route))
}

fn body_expression(spec: &FunctionSpec) -> String {
    let Some(body) = &spec.body else {
        return "undefined".to_string();
    };
    let value = param_value(&body.param);
    match &body.envelope_key {
        Some(key) if body.param.required => format!("{{ {}: {value} }}", property_key(key)),
        Some(key) => format!("{value} === undefined || {value} === null ? undefined : {{ {}: {value} }}", property_key(key)),
        None => value,
    }
}

fn unwrap_accessor(spec: &FunctionSpec) -> String {
    match &spec.envelope_key {
        Some(key) => format!(
            "(data: {{ {}: {} }}) => {}",
            property_key(key),
            spec.return_type,
            property_access("data", key)
        ),
        None => "undefined".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::BodySpec;
    use crate::types::TsType;
    use clientgen_schema::HttpMethod;

    fn param(name: &str, ty: TsType, required: bool) -> ParamSpec {
        ParamSpec {
            name: name.to_string(),
            ty,
            required,
            description: None,
        }
    }

    fn spec(name: &str, method: HttpMethod, route: &str) -> FunctionSpec {
        FunctionSpec {
            name: name.to_string(),
            summary: None,
            description: None,
            deprecated: false,
            method,
            route: route.to_string(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            body: None,
            return_type: TsType::Void,
            envelope_key: None,
        }
    }

    #[test]
    fn renders_get_card() {
        let mut get_card = spec("getCard", HttpMethod::Get, "/cards/{id}");
        get_card.summary = Some("Get a card".to_string());
        get_card.path_params.push(param("id", TsType::String, true));
        get_card.return_type = TsType::Named("Card".to_string());
        get_card.envelope_key = Some("card".to_string());

        assert_eq!(
            render_function(&get_card),
            r#"/** Get a card */
export function getCard(
  params: { id: string },
  config: ClientConfig = defaultClientConfig,
): ApiResult<Card> {
  requireParams("getCard", params, ["id"]);
  return makeRequest<Card>(
    config,
    "GET",
    fillPath("/cards/{id}", { id: params.id }),
    undefined,
    undefined,
    (data: { card: Card }) => data.card,
  );
}
"#
        );
    }

    #[test]
    fn no_params_means_no_parameter_object() {
        let ping = spec("ping", HttpMethod::Get, "/ping");
        assert_eq!(
            render_function(&ping),
            r#"export function ping(
  config: ClientConfig = defaultClientConfig,
): ApiResult<void> {
  return makeRequest<void>(
    config,
    "GET",
    "/ping",
  );
}
"#
        );
    }

    #[test]
    fn optional_params_default_to_empty_object() {
        let mut list = spec("listPlans", HttpMethod::Get, "/plans");
        list.query_params.push(param("pageNum", TsType::Number, false));
        list.query_params.push(param("page[size]", TsType::Number, false));
        let rendered = render_function(&list);
        assert!(rendered.contains(r#"  params: { pageNum?: number; "page[size]"?: number } = {},"#));
        assert!(rendered.contains(r#"    { pageNum: params.pageNum, "page[size]": params["page[size]"] },"#));
        assert!(!rendered.contains("requireParams"));
    }

    #[test]
    fn body_envelope_wraps_parameter() {
        let mut create = spec("createCard", HttpMethod::Post, "/cards");
        create.body = Some(BodySpec {
            param: param("cardDetails", TsType::Named("Card".into()), true),
            envelope_key: Some("card".to_string()),
        });
        let rendered = render_function(&create);
        assert!(rendered.contains("    undefined,\n    { card: params.cardDetails },\n  );"));
    }

    #[test]
    fn deprecated_is_documented() {
        let mut old = spec("legacy", HttpMethod::Delete, "/legacy");
        old.deprecated = true;
        assert!(render_function(&old).starts_with("/** @deprecated */\n"));
    }
}
