use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Download of {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: DownloadCause,
    },

    #[error("Failed to parse baseline {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern for category '{category}': {reason}")]
    Pattern { category: String, reason: String },

    #[error("Invalid baseline profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown baseline '{0}'. Run 'baseline-split list' to see available baselines")]
    UnknownBaseline(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Underlying reason a template download failed
#[derive(Error, Debug)]
pub enum DownloadCause {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("could not save template: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SplitError>;

pub use SplitError as Error;

impl SplitError {
    pub fn download(url: &str, cause: impl Into<DownloadCause>) -> Self {
        SplitError::Download {
            url: url.to_string(),
            source: cause.into(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SplitError::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_path_and_reason() {
        let err = SplitError::parse("Template/Edge.json", "expected value at line 1 column 1");
        let msg = err.to_string();
        assert!(msg.contains("Template/Edge.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_download_error_includes_status() {
        let err = SplitError::download(
            "https://example.invalid/baseline.json",
            DownloadCause::Status(reqwest::StatusCode::NOT_FOUND),
        );
        let msg = err.to_string();
        assert!(msg.contains("https://example.invalid/baseline.json"));
        assert!(msg.contains("404"));
    }
}
