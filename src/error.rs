//! Crate-level error types.

use thiserror::Error;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"refresh.interval_ms"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    /// Creates a new error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the dashboard binary and its export paths.
#[derive(Debug, Error)]
pub enum DashError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration ({} problem(s))", .0.len())]
    Invalid(Vec<ConfigError>),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DashResult<T> = Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_names_field() {
        let e = ConfigError::new("refresh.interval_ms", "must be a multiple of 5000");
        let s = e.to_string();
        assert!(s.contains("refresh.interval_ms"));
        assert!(s.contains("multiple of 5000"));
    }

    #[test]
    fn invalid_counts_problems() {
        let e = DashError::Invalid(vec![
            ConfigError::new("a", "x"),
            ConfigError::new("b", "y"),
        ]);
        assert_eq!(e.to_string(), "invalid configuration (2 problem(s))");
    }
}
