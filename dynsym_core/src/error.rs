use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),

    #[error("Host UI error: {0}")]
    Host(#[source] anyhow::Error),
}

impl Error {
    /// Whether this error came from compiling a user pattern.
    #[must_use]
    pub const fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}
