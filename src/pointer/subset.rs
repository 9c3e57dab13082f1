//! Structural subset matching used by `~{...}` predicate tokens.

use crate::document::node::{YamlNode, YamlValue};

/// Returns true if `pattern` is a subset of `candidate`.
///
/// - a scalar pattern matches a scalar with the same text (tags are ignored);
/// - a mapping pattern matches a mapping that has, for every pattern key, a key
///   of the same name whose value matches recursively; extra keys are ignored;
/// - a sequence pattern matches a sequence of the same length whose elements
///   match position by position.
///
/// # Example
///
/// ```
/// use yptr::document::parser::parse_yaml;
/// use yptr::pointer::is_subset;
///
/// let pattern = parse_yaml(r#"{"name": "app"}"#).unwrap();
/// let element = parse_yaml("name: app\nimage: nginx\n").unwrap();
/// assert!(is_subset(&pattern, &element));
/// assert!(!is_subset(&element, &pattern));
/// ```
pub fn is_subset(pattern: &YamlNode, candidate: &YamlNode) -> bool {
    let (pattern, candidate) = (pattern.unwrapped(), candidate.unwrapped());
    match (pattern.value(), candidate.value()) {
        (YamlValue::Scalar(a), YamlValue::Scalar(b)) => a == b,
        (YamlValue::Mapping(_), YamlValue::Mapping(_)) => pattern.pairs().all(|(key, value)| {
            candidate
                .pairs()
                .any(|(k, v)| same_key(key, k) && is_subset(value, v))
        }),
        (YamlValue::Sequence(a), YamlValue::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(p, c)| is_subset(p, c))
        }
        _ => false,
    }
}

fn same_key(a: &YamlNode, b: &YamlNode) -> bool {
    match (a.as_scalar(), b.as_scalar()) {
        (Some(a), Some(b)) => a == b,
        _ => is_subset(a, b) && is_subset(b, a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    fn yaml(src: &str) -> YamlNode {
        parse_yaml(src).unwrap()
    }

    #[test]
    fn test_scalar_pattern() {
        assert!(is_subset(&yaml("x"), &yaml("x")));
        assert!(!is_subset(&yaml("x"), &yaml("y")));
        assert!(!is_subset(&yaml("x"), &yaml("[x]")));
    }

    #[test]
    fn test_scalar_compares_text_not_tag() {
        assert!(is_subset(&yaml("\"1\""), &yaml("1")));
    }

    #[test]
    fn test_mapping_pattern_ignores_extra_keys() {
        let element = yaml("name: app\nimage: nginx\n");
        assert!(is_subset(&yaml(r#"{"name":"app"}"#), &element));
        assert!(is_subset(&yaml(r#"{"name":"app","image":"nginx"}"#), &element));
        assert!(!is_subset(&yaml(r#"{"name":"app","image":"redis"}"#), &element));
        assert!(!is_subset(&yaml(r#"{"name":"missing"}"#), &element));
    }

    #[test]
    fn test_empty_mapping_matches_any_mapping() {
        assert!(is_subset(&yaml("{}"), &yaml("a: 1")));
        assert!(!is_subset(&yaml("{}"), &yaml("[1]")));
    }

    #[test]
    fn test_nested_mapping_pattern() {
        let element = yaml("meta:\n  labels:\n    tier: web\n    team: a\n");
        assert!(is_subset(&yaml("{meta: {labels: {tier: web}}}"), &element));
        assert!(!is_subset(&yaml("{meta: {labels: {tier: db}}}"), &element));
    }

    #[test]
    fn test_sequence_pattern_requires_equal_length() {
        assert!(is_subset(&yaml("[a, b]"), &yaml("[a, b]")));
        assert!(!is_subset(&yaml("[a]"), &yaml("[a, b]")));
        assert!(!is_subset(&yaml("[b, a]"), &yaml("[a, b]")));
        assert!(is_subset(&yaml("[{n: 1}]"), &yaml("[{n: 1, m: 2}]")));
    }

    #[test]
    fn test_duplicate_candidate_keys() {
        let candidate = YamlNode::mapping(vec![
            YamlNode::scalar("k"),
            YamlNode::scalar("1"),
            YamlNode::scalar("k"),
            YamlNode::scalar("2"),
        ]);
        assert!(is_subset(&yaml("{k: 2}"), &candidate));
    }
}
