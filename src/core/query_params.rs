use std::collections::HashMap;

/// Parse query parameters from a URI string
///
/// Handles URL decoding (including `+` as space) and returns a HashMap of
/// parameter key-value pairs. Multiple values for the same key are not
/// supported (only the last is kept).
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    let query = match uri.find('?') {
        Some(query_start) => &uri[query_start + 1..],
        None if uri.contains('=') => uri,
        None => return params,
    };
    // Fragments never reach a server, drop them if a caller passes a full href.
    let query = query.split('#').next().unwrap_or_default();

    for param in query.split('&').filter(|p| !p.is_empty()) {
        if let Some(eq_idx) = param.find('=') {
            let key = decode(&param[..eq_idx]);
            let value = decode(&param[eq_idx + 1..]);
            params.insert(key, value);
        } else {
            // Flag parameter without value
            params.insert(decode(param), String::new());
        }
    }

    params
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// Get a string parameter, treating an empty value as absent
pub fn get_string(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Get an integer parameter with validation and default.
///
/// Unparseable values fall back to `default`; the result is at least 1.
pub fn get_int(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_decodes_values() {
        let params = parse_query_params("/search?q=rust%20lang&type=posts&sortBy=recent");
        assert_eq!(params.get("q"), Some(&"rust lang".to_string()));
        assert_eq!(params.get("type"), Some(&"posts".to_string()));
        assert_eq!(params.get("sortBy"), Some(&"recent".to_string()));
    }

    #[test]
    fn plus_is_a_space_and_flags_have_empty_values() {
        let params = parse_query_params("/search?q=hello+world&verbose");
        assert_eq!(params.get("q"), Some(&"hello world".to_string()));
        assert_eq!(params.get("verbose"), Some(&String::new()));
        assert_eq!(get_string(&params, "verbose"), None);
    }

    #[test]
    fn bare_query_string_without_path() {
        let params = parse_query_params("page=3&limit=10");
        assert_eq!(get_int(&params, "page", 1), 3);
        assert_eq!(get_int(&params, "limit", 20), 10);
    }

    #[test]
    fn no_query_yields_empty_map() {
        assert!(parse_query_params("/posts").is_empty());
    }

    #[test]
    fn get_int_clamps_and_defaults() {
        let params = parse_query_params("/posts?page=0&limit=abc#top");
        assert_eq!(get_int(&params, "page", 1), 1);
        assert_eq!(get_int(&params, "limit", 20), 20);
        assert_eq!(get_int(&params, "missing", 7), 7);
    }
}
