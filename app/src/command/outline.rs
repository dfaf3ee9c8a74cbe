//! One-shot outline of a file.

use std::path::PathBuf;

use dynsym_config::JsonSetStore;
use dynsym_core::{DynamicSymbolProvider, NamedSetStore, TextDocument};
use tracing::info;

use super::{format_symbol, read_document};

/// Input parameters for the Outline command strategy.
#[derive(Debug, Clone)]
pub struct OutlineInput {
    pub file: PathBuf,
    /// Patterns given on the command line, appended after the saved set's.
    pub patterns: Vec<String>,
    /// Saved pattern set to start from.
    pub set: Option<String>,
    pub json: bool,
    pub config_path: PathBuf,
}

/// Strategy for printing the outline of a file once.
#[derive(Debug, Clone, Copy)]
pub struct OutlineStrategy;

impl super::CommandStrategy for OutlineStrategy {
    type Input = OutlineInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let store = JsonSetStore::new(&input.config_path);
        let patterns = assemble_patterns(&store, input.set.as_deref(), input.patterns).await?;

        let document = read_document(&input.file).await?;
        info!(
            "Outlining {} with {} patterns",
            input.file.display(),
            patterns.len()
        );

        let rendered = render_outline(&patterns, &document, input.json)?;
        if !rendered.is_empty() {
            println!("{rendered}");
        }
        Ok(())
    }
}

/// The saved set's patterns (if `set` is given) followed by `extra`.
pub(crate) async fn assemble_patterns<S>(
    store: &S,
    set: Option<&str>,
    extra: Vec<String>,
) -> anyhow::Result<Vec<String>>
where
    S: NamedSetStore + ?Sized,
{
    let mut patterns = Vec::new();
    if let Some(id) = set {
        let sets = store.get().await?;
        let Some(set) = sets.iter().find(|set| set.id == id) else {
            anyhow::bail!("No saved pattern set named {id:?}");
        };
        patterns = set.pattern_texts();
    }
    patterns.extend(extra);

    if patterns.is_empty() {
        anyhow::bail!("No patterns given. Use --pattern or --set.");
    }
    Ok(patterns)
}

/// Plain lines or pretty JSON. An invalid pattern is an error, not an empty
/// outline.
pub(crate) fn render_outline(
    patterns: &[String],
    document: &TextDocument,
    json: bool,
) -> anyhow::Result<String> {
    let provider = DynamicSymbolProvider::new(patterns);
    let symbols = provider.provide_document_symbols(document)?;

    if json {
        return Ok(serde_json::to_string_pretty(&symbols)?);
    }
    Ok(symbols
        .iter()
        .map(format_symbol)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynsym_core::{Error, MemorySetStore, NamedPatternSet};

    fn store() -> MemorySetStore {
        MemorySetStore::new(vec![NamedPatternSet::from_patterns(
            "python",
            &["^class \\w+", "^def \\w+"],
        )])
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn set_patterns_come_before_command_line_patterns() {
        let patterns = assemble_patterns(&store(), Some("python"), vec!["TODO".to_string()])
            .await
            .expect("known set");

        assert_eq!(patterns, vec!["^class \\w+", "^def \\w+", "TODO"]);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn command_line_patterns_alone() {
        let patterns = assemble_patterns(&store(), None, vec!["^#".to_string()])
            .await
            .expect("patterns given");

        assert_eq!(patterns, vec!["^#"]);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn unknown_set_is_an_error() {
        let err = assemble_patterns(&store(), Some("rust"), vec!["x".to_string()])
            .await
            .expect_err("unknown set");

        assert!(err.to_string().contains("\"rust\""));
    }

    #[tokio::test]
    async fn no_patterns_is_an_error() {
        assert!(assemble_patterns(&store(), None, Vec::new()).await.is_err());
    }

    #[tokio::test]
    async fn empty_saved_set_without_extra_is_an_error() {
        let none: [&str; 0] = [];
        let store = MemorySetStore::new(vec![NamedPatternSet::from_patterns("empty", &none)]);
        assert!(
            assemble_patterns(&store, Some("empty"), Vec::new())
                .await
                .is_err()
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn renders_plain_lines() {
        let document = TextDocument::new("untitled:1", "def foo\n  x\ndef bar\n");
        let rendered =
            render_outline(&["^def \\w+".to_string()], &document, false).expect("valid pattern");

        assert_eq!(rendered, "1:0-2:3  def foo\n3:0-4:0  def bar");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn renders_json() {
        let document = TextDocument::new("untitled:1", "# A\n");
        let rendered = render_outline(&["^# .*".to_string()], &document, true).expect("valid");

        let value: serde_json::Value = serde_json::from_str(&rendered).expect("JSON output");
        assert_eq!(value[0]["name"], "# A");
        assert_eq!(value[0]["kind"], "string");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn invalid_pattern_fails() {
        let document = TextDocument::new("untitled:1", "( a\n");
        let err = render_outline(&["(".to_string()], &document, false)
            .expect_err("invalid pattern should fail");

        let err = err.downcast::<Error>().expect("core error");
        assert!(err.is_invalid_pattern());
    }
}
