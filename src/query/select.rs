use regex::Regex;
use std::sync::LazyLock;

/// Names the device reserves for internal attributes; they must be requested
/// with a leading `.` in a projection.
static RESERVED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("id|dead|nextid").expect("reserved-name pattern is valid"));

pub(crate) const FIELD_ESCAPE: char = '.';

pub fn is_reserved(field: &str) -> bool {
    RESERVED.is_match(field)
}

/// Prefix reserved names with `.`; names already escaped are left alone.
pub fn escape_field(field: String) -> String {
    if !field.starts_with(FIELD_ESCAPE) && is_reserved(&field) {
        format!("{FIELD_ESCAPE}{field}")
    } else {
        field
    }
}

pub fn escape_fields(fields: Vec<String>) -> Vec<String> {
    fields.into_iter().map(escape_field).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_are_escaped() {
        let out = escape_fields(vec!["id".into(), "name".into(), "dead".into(), "nextid".into()]);
        assert_eq!(out, vec![".id", "name", ".dead", ".nextid"]);
    }

    #[test]
    fn pattern_matches_anywhere_in_name() {
        assert!(is_reserved("interface-id"));
        assert!(!is_reserved("mtu"));
    }

    #[test]
    fn escaped_names_are_not_escaped_twice() {
        assert_eq!(escape_field(".id".into()), ".id");
    }
}
