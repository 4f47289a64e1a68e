use thiserror::Error;

/// Errors produced by the sampler, the MOA converter and the output writers.
#[derive(Debug, Error)]
pub enum BallisticsError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("drop data is misaligned: {distances} distances but {drops} drops")]
    MismatchedSamples { distances: usize, drops: usize },

    #[error("drop data contains no samples")]
    EmptyData,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

impl BallisticsError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Fails with `InvalidArgument` unless `value` is a finite number.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, BallisticsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BallisticsError::invalid(
            name,
            format!("must be a finite number, got {value}"),
        ))
    }
}
