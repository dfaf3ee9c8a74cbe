//! Documents as the host hands them to a symbol provider.

use serde::{Deserialize, Serialize};

/// A document identity plus its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    pub uri: String,
    pub text: String,
}

impl TextDocument {
    #[must_use]
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
        }
    }

    /// Document backed by a file on disk, addressed with a `file:` URI.
    #[must_use]
    pub fn from_path(path: &std::path::Path, text: impl Into<String>) -> Self {
        Self::new(format!("file://{}", path.display()), text)
    }

    /// URI scheme, i.e. everything before the first `:`.
    ///
    /// A URI without a scheme is treated as `untitled`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.uri
            .split_once(':')
            .map_or("untitled", |(scheme, _)| scheme)
    }

    /// Line-indexed view of the text.
    ///
    /// Splits on `\n` and drops one trailing `\r`, so a trailing newline yields
    /// a final empty line and an empty document still has one line.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// The set of URI schemes a provider is registered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSelector {
    pub schemes: Vec<String>,
}

impl DocumentSelector {
    #[must_use]
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: schemes.into_iter().map(Into::into).collect(),
        }
    }

    /// Saved files and unsaved buffers.
    #[must_use]
    pub fn files_and_untitled() -> Self {
        Self::new(["file", "untitled"])
    }

    #[must_use]
    pub fn matches(&self, document: &TextDocument) -> bool {
        let scheme = document.scheme();
        self.schemes.iter().any(|s| s == scheme)
    }
}

impl Default for DocumentSelector {
    fn default() -> Self {
        Self::files_and_untitled()
    }
}
