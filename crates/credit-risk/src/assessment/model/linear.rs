use serde::{Deserialize, Serialize};

use super::super::predictor::PredictionError;
use super::super::vector::FeatureVector;
use crate::schema::FEATURE_COUNT;

fn default_threshold() -> f64 {
    0.5
}

/// Logistic regression over (optionally standardized) features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Per-feature centring and scaling applied before the linear term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl LogisticRegression {
    pub(super) fn validate(&self) -> Result<(), String> {
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        expect_len("coefficients", &self.coefficients)?;
        if self.coefficients.iter().any(|value| !value.is_finite()) {
            return Err("coefficients must be finite".to_string());
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(format!(
                "threshold {} must lie strictly between 0 and 1",
                self.threshold
            ));
        }

        if let Some(scaler) = &self.scaler {
            expect_len("scaler.mean", &scaler.mean)?;
            expect_len("scaler.scale", &scaler.scale)?;
            if scaler.mean.iter().any(|value| !value.is_finite()) {
                return Err("scaler.mean must be finite".to_string());
            }
            if scaler
                .scale
                .iter()
                .any(|value| !value.is_finite() || *value == 0.0)
            {
                return Err("scaler.scale must be finite and non-zero".to_string());
            }
        }

        Ok(())
    }

    /// Probability of the creditworthy class.
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(PredictionError::Malformed(format!(
                "expected {FEATURE_COUNT} coefficients, found {}",
                self.coefficients.len()
            )));
        }

        let mut z = self.intercept;
        for (index, (value, weight)) in features.iter().zip(&self.coefficients).enumerate() {
            let value = match &self.scaler {
                Some(scaler) => {
                    let mean = scaler.mean.get(index).copied().unwrap_or(0.0);
                    let scale = scaler.scale.get(index).copied().unwrap_or(1.0);
                    (value - mean) / scale
                }
                None => value,
            };
            z += weight * value;
        }

        if !z.is_finite() {
            return Err(PredictionError::NonFiniteScore);
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<i64, PredictionError> {
        let probability = self.probability(features)?;
        Ok(i64::from(probability >= self.threshold))
    }
}

fn expect_len(name: &str, values: &[f64]) -> Result<(), String> {
    if values.len() != FEATURE_COUNT {
        return Err(format!(
            "{name} has {} entries, expected {FEATURE_COUNT}",
            values.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(intercept: f64) -> LogisticRegression {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[16] = 0.01;
        LogisticRegression {
            intercept,
            coefficients,
            scaler: None,
            threshold: 0.5,
        }
    }

    fn with_credit_score(score: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[16] = score;
        FeatureVector::new(values)
    }

    #[test]
    fn score_above_threshold_predicts_good() {
        let model = model(-6.0);
        assert_eq!(model.predict(&with_credit_score(700.0)), Ok(1));
        assert_eq!(model.predict(&with_credit_score(500.0)), Ok(0));
    }

    #[test]
    fn scaler_centres_features() {
        let mut model = model(0.0);
        model.scaler = Some(StandardScaler {
            mean: vec![650.0; FEATURE_COUNT],
            scale: vec![100.0; FEATURE_COUNT],
        });
        model.coefficients[16] = 2.0;

        let probability = model
            .probability(&with_credit_score(650.0))
            .expect("finite score");
        assert!((probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_short_coefficients() {
        let mut model = model(0.0);
        model.coefficients.pop();
        let err = model.validate().expect_err("19 coefficients");
        assert!(err.contains("coefficients has 19 entries"));
    }

    #[test]
    fn validate_rejects_zero_scale() {
        let mut model = model(0.0);
        model.scaler = Some(StandardScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![0.0; FEATURE_COUNT],
        });
        assert!(model.validate().is_err());
    }

    #[test]
    fn overflowing_score_is_an_error() {
        let mut model = model(0.0);
        model.coefficients[16] = f64::MAX;
        assert_eq!(
            model.predict(&with_credit_score(f64::MAX)),
            Err(PredictionError::NonFiniteScore)
        );
    }
}
