//! Path template parsing.
//!
//! Extracts substitution slot names from URL path templates that use
//! `{param}` syntax.

/// Extracts slot names from a path template, in order.
///
/// ## Examples
///
/// ```
/// use clientsynth_gen::parser::extract_path_params;
///
/// assert_eq!(extract_path_params("/widgets"), vec![] as Vec<&str>);
/// assert_eq!(extract_path_params("/widgets/{id}"), vec!["id"]);
/// assert_eq!(
///     extract_path_params("/orgs/{org}/widgets/{widget_id}"),
///     vec!["org", "widget_id"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut pos = 0;

    for (idx, c) in path.char_indices() {
        if c == '{' {
            pos = idx + 1;
        } else if c == '}' && pos > 0 {
            let param = &path[pos..idx];
            if !param.is_empty() {
                params.push(param);
            }
            pos = 0;
        }
    }

    params
}

/// Returns `true` if `name` is a plain identifier: non-empty, ASCII
/// alphanumeric or underscore, not starting with a digit.
///
/// ## Examples
///
/// ```
/// use clientsynth_gen::parser::is_identifier;
///
/// assert!(is_identifier("respBody"));
/// assert!(is_identifier("_tmp"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("has-dash"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
