//! Crate-level error type.

use crate::config::ConfigError;
use crate::metrics::MetricsError;
use crate::primitives::PrimitiveError;
use crate::storage::StoreError;
use thiserror::Error;

/// Errors returned by the generator facade and its components.
#[derive(Debug, Error)]
pub enum FortunaError {
    /// A hash or cipher backend failed.
    #[error("cryptographic primitive failed: {0}")]
    Primitive(#[from] PrimitiveError),
    /// The seed could not be read, written or synthesized.
    #[error("seed store error: {0}")]
    Store(#[from] StoreError),
    /// The configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Metrics could not be registered, encoded or served.
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),
    /// The 64-bit block counter would wrap.
    #[error("generator counter exhausted")]
    CounterExhausted,
    /// A thread panicked while holding the shared generator.
    #[error("generator lock poisoned by a panicked holder")]
    Poisoned,
}

/// Convenience alias for results carrying [`FortunaError`].
pub type Result<T, E = FortunaError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_errors_fold_into_fortuna_error() {
        let err: FortunaError = PrimitiveError::Unavailable("aes".into()).into();
        assert!(matches!(err, FortunaError::Primitive(_)));

        let utf8 = String::from_utf8(vec![0xff]).unwrap_err();
        let err: FortunaError = MetricsError::from(utf8).into();
        assert!(matches!(err, FortunaError::Metrics(MetricsError::Encoding(_))));
        assert_eq!(
            err.to_string(),
            "metrics error: metrics output is not valid UTF-8"
        );
    }
}
