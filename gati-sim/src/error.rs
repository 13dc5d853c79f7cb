//! Error types for GatiSim

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// GatiSim error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration (durations, rates, scenario kinds, noise levels)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Physically meaningless scenario parameter (e.g. zero corner radius)
    #[error("Domain error: {0}")]
    Domain(String),

    /// Malformed CSV input
    #[error("Parse error: {0}")]
    Parse(String),

    /// CSV reader failure outside a data row (e.g. unreadable header)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject durations that are not strictly positive and finite.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("{} must be > 0, got {}", name, value)))
    }
}
