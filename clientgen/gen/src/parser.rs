//! Route template helpers.
//!
//! Routes use `{param}` placeholders, e.g. `/admin/cards/{id}`.

/// Extracts placeholder names from a route, in order of appearance.
///
/// ## Examples
///
/// ```
/// use clientgen::parser::extract_path_params;
///
/// assert_eq!(extract_path_params("/cards"), vec![] as Vec<&str>);
/// assert_eq!(extract_path_params("/cards/{id}"), vec!["id"]);
/// assert_eq!(
///     extract_path_params("/earned_memberships/{id}/reports/{report_id}"),
///     vec!["id", "report_id"]
/// );
/// ```
pub fn extract_path_params(route: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = None;

    for (idx, c) in route.char_indices() {
        match c {
            '{' => start = Some(idx + 1),
            '}' => {
                if let Some(from) = start.take() {
                    let param = &route[from..idx];
                    if !param.is_empty() && !params.contains(&param) {
                        params.push(param);
                    }
                }
            }
            _ => {}
        }
    }

    params
}

/// Substitutes placeholder values into a route.
///
/// The template is scanned once and each `{name}` token is replaced by its
/// value. Substituted values are never rescanned. A placeholder without a
/// value is left in place.
///
/// ## Examples
///
/// ```
/// use clientgen::parser::substitute_path_params;
///
/// let path = substitute_path_params("/cards/{id}", &[("id", "c-42")]);
/// assert_eq!(path, "/cards/c-42");
/// ```
pub fn substitute_path_params(route: &str, params: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(route.len());
    let mut rest = route;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let token = &rest[open..];
        let Some(close) = token.find('}') else {
            result.push_str(token);
            rest = "";
            break;
        };
        let name = &token[1..close];
        match params.iter().find(|(n, _)| *n == name) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&token[..=close]),
        }
        rest = &token[close + 1..];
    }

    result.push_str(rest);
    result
}

/// Non-empty `/`-separated segments of a route.
pub fn route_segments(route: &str) -> Vec<&str> {
    route.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_no_params() {
        assert_eq!(extract_path_params("/rentals"), Vec::<&str>::new());
        assert_eq!(extract_path_params("/"), Vec::<&str>::new());
        assert_eq!(extract_path_params(""), Vec::<&str>::new());
    }

    #[test]
    fn extract_consecutive_params() {
        assert_eq!(extract_path_params("/{a}/{b}"), vec!["a", "b"]);
    }

    #[test]
    fn extract_deduplicates_repeated_placeholders() {
        assert_eq!(extract_path_params("/{id}/copy/{id}"), vec!["id"]);
    }

    #[test]
    fn extract_ignores_empty_and_unclosed() {
        assert_eq!(extract_path_params("/cards/{}"), Vec::<&str>::new());
        assert_eq!(extract_path_params("/cards/{id"), Vec::<&str>::new());
    }

    #[test]
    fn substitute_multiple_params() {
        assert_eq!(
            substitute_path_params(
                "/earned_memberships/{id}/reports/{report}",
                &[("id", "m1"), ("report", "r9")]
            ),
            "/earned_memberships/m1/reports/r9"
        );
    }

    #[test]
    fn substitute_replaces_every_occurrence() {
        assert_eq!(
            substitute_path_params("/{id}/copy/{id}", &[("id", "x")]),
            "/x/copy/x"
        );
    }

    #[test]
    fn substitute_missing_param_unchanged() {
        assert_eq!(substitute_path_params("/cards/{id}", &[]), "/cards/{id}");
    }

    #[test]
    fn substitute_is_not_prefix_sensitive() {
        assert_eq!(
            substitute_path_params("/{id}/{identity}", &[("id", "1"), ("identity", "2")]),
            "/1/2"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        assert_eq!(
            substitute_path_params("/a/{x}/{y}", &[("x", "{y}"), ("y", "z")]),
            "/a/{y}/z"
        );
    }

    #[test]
    fn substitute_keeps_unclosed_brace() {
        assert_eq!(substitute_path_params("/{id}/{tail", &[("id", "1")]), "/1/{tail");
    }

    #[test]
    fn segments_skip_empty_parts() {
        assert_eq!(route_segments("/admin//cards/"), vec!["admin", "cards"]);
        assert!(route_segments("/").is_empty());
    }
}
