//! Error types for declaration generation.
//!
//! Every variant carries the offending path, URL or value so the message can be
//! shown to the user verbatim.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("version error: {0}")]
    Version(#[from] VersionError),

    #[error("fetch error: request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("corpus integrity error: {reason}: {}", path.display())]
    CorpusIntegrity { path: PathBuf, reason: String },

    #[error("corpus metadata error: {}: {reason}", path.display())]
    CorpusMetadata { path: PathBuf, reason: String },

    #[error("descriptor parse error: could not parse {}: {reason}", path.display())]
    DescriptorParse { path: PathBuf, reason: String },

    #[error("output write error: {}: {reason}", path.display())]
    OutputWrite { path: PathBuf, reason: String },

    #[error("config error: {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("\"{0}\" is not a valid version (expected dot-separated non-negative integers)")]
    Malformed(String),

    #[error("\"{version}\" is below the minimum supported version {minimum}")]
    BelowMinimum { version: String, minimum: String },
}

impl Error {
    pub(crate) fn integrity(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::CorpusIntegrity {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn metadata(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::CorpusMetadata {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::DescriptorParse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Error::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_kind_and_path() {
        let err = Error::integrity("/tmp/corpus/wrapper/symbols", "symbols directory not found");
        assert_eq!(
            err.to_string(),
            "corpus integrity error: symbols directory not found: /tmp/corpus/wrapper/symbols"
        );

        let err: Error = VersionError::Malformed("abc".into()).into();
        assert!(err.to_string().starts_with("version error: \"abc\""));
    }
}
