//! Small string helpers shared by the request builders.

/// True for an empty string. Whitespace-only values count as present.
pub fn is_blank(value: &str) -> bool {
    value.is_empty()
}

/// Append `params` to `path` as a query string, percent-encoding every key
/// and value. An empty parameter list leaves the path untouched.
pub fn append_parameters(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_means_empty() {
        assert!(is_blank(""));
        assert!(!is_blank("test"));
        assert!(!is_blank(" "));
    }

    #[test]
    fn appends_single_parameter() {
        assert_eq!(append_parameters("/example", &[("param", "value")]), "/example?param=value");
    }

    #[test]
    fn appends_parameters_in_order() {
        assert_eq!(
            append_parameters("/example", &[("param1", "value1"), ("param2", "value2")]),
            "/example?param1=value1&param2=value2"
        );
    }

    #[test]
    fn empty_parameters_leave_path_alone() {
        assert_eq!(append_parameters("/example", &[]), "/example");
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(
            append_parameters("/offers", &[("eep", "a b&c=d")]),
            "/offers?eep=a%20b%26c%3Dd"
        );
    }
}
