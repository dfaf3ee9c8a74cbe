//! Anchor-line sectioning.
//!
//! A line matched by any pattern is an *anchor*. Each anchor opens a section
//! that runs through the line before the next anchor, or through the last
//! line of the document. Every match on an anchor line becomes a [`Symbol`]
//! spanning the whole section.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A range in the document (line/col are 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    /// Column unit: Unicode scalar values, so `🎉` is one column.
    pub end_col: usize,
}

/// A named section of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// The matched substring of the anchor line.
    pub name: String,
    pub range: SymbolRange,
}

/// Compiled pattern list, in user order.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regexes: Vec<Regex>,
}

/// Compile every pattern, failing on the first one that is not a valid regex.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<PatternMatcher> {
    let regexes = patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PatternMatcher { regexes })
}

/// Compile `patterns` and extract symbols from `lines`.
///
/// No partial output: one invalid pattern fails the whole call.
pub fn extract<S, L>(patterns: &[S], lines: &[L]) -> Result<Vec<Symbol>>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    Ok(compile_patterns(patterns)?.extract(lines))
}

impl PatternMatcher {
    #[must_use]
    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    /// First match of each pattern on `line`, in pattern order.
    #[must_use]
    pub fn match_set<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.regexes
            .iter()
            .filter_map(|re| re.find(line))
            .map(|m| m.as_str())
            .collect()
    }

    #[must_use]
    pub fn extract<L: AsRef<str>>(&self, lines: &[L]) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        if self.is_empty() {
            return symbols;
        }

        let mut open: Option<(usize, Vec<&str>)> = None;

        for (index, line) in lines.iter().enumerate() {
            let matches = self.match_set(line.as_ref());
            if matches.is_empty() {
                continue;
            }
            if let Some((start, names)) = open.take() {
                let end = index - 1;
                push_section(&mut symbols, start, end, lines[end].as_ref(), &names);
            }
            open = Some((index, matches));
        }

        if let Some((start, names)) = open {
            let end = lines.len() - 1;
            push_section(&mut symbols, start, end, lines[end].as_ref(), &names);
        }

        symbols
    }
}

fn push_section(
    symbols: &mut Vec<Symbol>,
    start_line: usize,
    end_line: usize,
    end_text: &str,
    names: &[&str],
) {
    let range = SymbolRange {
        start_line,
        start_col: 0,
        end_line,
        end_col: end_text.chars().count(),
    };
    symbols.extend(names.iter().map(|name| Symbol {
        name: (*name).to_string(),
        range,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start_line: usize, end_line: usize, end_col: usize) -> SymbolRange {
        SymbolRange {
            start_line,
            start_col: 0,
            end_line,
            end_col,
        }
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let no_patterns: [&str; 0] = [];
        let no_lines: [&str; 0] = [];
        assert!(extract(&no_patterns, &["def foo():"]).is_ok_and(|s| s.is_empty()));
        assert!(extract(&["def"], &no_lines).is_ok_and(|s| s.is_empty()));
    }

    #[test]
    fn no_anchor_yields_nothing() {
        let symbols = extract(&["^class"], &["def foo():", "    pass"]);
        assert!(symbols.is_ok_and(|s| s.is_empty()));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn sections_run_until_next_anchor() {
        let lines = [
            "def foo():",
            "    pass",
            "def bar():",
            "    pass",
            "    return 1",
        ];
        let symbols = extract(&[r"def\s+\w+"], &lines).expect("pattern should compile");

        assert_eq!(
            symbols,
            vec![
                Symbol {
                    name: "def foo".to_string(),
                    range: range(0, 1, 8),
                },
                Symbol {
                    name: "def bar".to_string(),
                    range: range(2, 4, 12),
                },
            ]
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn lines_before_first_anchor_are_uncovered() {
        let lines = ["preamble", "", "# Title", "body"];
        let symbols = extract(&["^# .*"], &lines).expect("pattern should compile");

        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "# Title");
        assert_eq!(symbols[0].range, range(2, 3, 4));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn one_symbol_per_matching_pattern_in_pattern_order() {
        let lines = ["== TODO fix ==", "text", "== done ==", "tail"];
        let symbols = extract(&["TODO", "==", "nothing"], &lines).expect("patterns should compile");

        let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["TODO", "==", "=="]);
        assert_eq!(symbols[0].range, range(0, 1, 4));
        assert_eq!(symbols[1].range, range(0, 1, 4));
        // The final anchor emits every match, not just the first.
        assert_eq!(symbols[2].range, range(2, 3, 4));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn adjacent_anchors_get_single_line_sections() {
        let lines = ["# a", "# b", "# c"];
        let symbols = extract(&["#.*"], &lines).expect("pattern should compile");

        let ranges: Vec<SymbolRange> = symbols.iter().map(|s| s.range).collect();
        assert_eq!(ranges, vec![range(0, 0, 3), range(1, 1, 3), range(2, 2, 3)]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn end_column_counts_characters() {
        let lines = ["## Überschrift", "café"];
        let symbols = extract(&["^## "], &lines).expect("pattern should compile");
        assert_eq!(symbols[0].range.end_col, 4);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn end_column_counts_astral_characters_once() {
        let lines = ["## Party", "🎉 done"];
        let symbols = extract(&["^## "], &lines).expect("pattern should compile");
        assert_eq!(symbols[0].range.end_col, 6);
    }

    #[test]
    fn invalid_pattern_fails_whole_call() {
        let result = extract(&["def", "(unclosed"], &["def foo():"]);
        match result {
            Err(Error::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extraction_is_deterministic() {
        let matcher = compile_patterns(&["^#+ .*", "TODO"]).expect("patterns should compile");
        let lines = ["# one", "TODO later", "## two", "x"];
        assert_eq!(matcher.extract(&lines), matcher.extract(&lines));
    }
}
