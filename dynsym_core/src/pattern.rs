//! Persisted pattern sets.

use serde::{Deserialize, Serialize};

/// One persisted pattern.
///
/// `ignore_case` and `is_regex` are stored for compatibility; extraction
/// always compiles `pattern` as a case-sensitive regex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDefinition {
    #[serde(default, alias = "ignore_case")]
    pub ignore_case: bool,
    #[serde(default = "default_is_regex", alias = "regular_expression")]
    pub is_regex: bool,
    #[serde(alias = "symbol")]
    pub pattern: String,
}

const fn default_is_regex() -> bool {
    true
}

impl PatternDefinition {
    /// Wrap a pattern with the default flags used when saving.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            ignore_case: false,
            is_regex: true,
            pattern: pattern.into(),
        }
    }
}

/// A user-named snapshot of a pattern list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPatternSet {
    pub id: String,
    #[serde(default, alias = "symbols")]
    pub patterns: Vec<PatternDefinition>,
}

impl NamedPatternSet {
    #[must_use]
    pub fn from_patterns<S: AsRef<str>>(id: impl Into<String>, patterns: &[S]) -> Self {
        Self {
            id: id.into(),
            patterns: patterns
                .iter()
                .map(|p| PatternDefinition::new(p.as_ref()))
                .collect(),
        }
    }

    /// Pattern texts in order, flags dropped.
    #[must_use]
    pub fn pattern_texts(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.pattern.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn serializes_camel_case() {
        let set = NamedPatternSet::from_patterns("py", &["def", "class"]);
        let json = serde_json::to_value(&set).expect("set should serialize");

        assert_eq!(json["id"], "py");
        assert_eq!(json["patterns"][0]["pattern"], "def");
        assert_eq!(json["patterns"][0]["ignoreCase"], false);
        assert_eq!(json["patterns"][1]["isRegex"], true);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn reads_legacy_field_names() {
        let json = r#"{
            "id": "legacy",
            "symbols": [
                { "ignore_case": true, "regular_expression": true, "symbol": "^## " }
            ]
        }"#;
        let set: NamedPatternSet = serde_json::from_str(json).expect("legacy JSON should parse");

        assert_eq!(set.id, "legacy");
        assert_eq!(set.pattern_texts(), vec!["^## ".to_string()]);
        assert!(set.patterns[0].ignore_case);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn missing_flags_take_defaults() {
        let def: PatternDefinition =
            serde_json::from_str(r#"{ "pattern": "x" }"#).expect("minimal JSON should parse");
        assert_eq!(def, PatternDefinition::new("x"));
    }
}
