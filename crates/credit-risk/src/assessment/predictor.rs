use super::vector::FeatureVector;

/// Binary classifier consumed by the assessor.
///
/// Implementations are loaded once and shared read-only between submissions.
pub trait CreditRiskPredictor: Send + Sync {
    /// Raw class label for `features`; `1` is the creditworthy class.
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictionError>;
}

/// Failure while producing a label for a well-formed vector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error("feature at position {index} is not a finite number")]
    NonFiniteFeature { index: usize },
    #[error("model produced a non-finite score")]
    NonFiniteScore,
    #[error("malformed model: {0}")]
    Malformed(String),
    #[error("predictor unavailable: {0}")]
    Unavailable(String),
}
