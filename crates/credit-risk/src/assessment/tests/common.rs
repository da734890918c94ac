use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;

use crate::assessment::model::{
    ClassifierSpec, LogisticRegression, ModelArtifact, StandardScaler,
};
use crate::assessment::predictor::{CreditRiskPredictor, PredictionError};
use crate::assessment::router::AssessmentApp;
use crate::assessment::service::CreditRiskAssessor;
use crate::assessment::vector::FeatureVector;
use crate::assessment::verdict::ResultPresenter;
use crate::schema::{FeatureSchema, FEATURE_COUNT, SCHEMA_VERSION};

/// Always answers with the same label.
pub(super) struct FixedPredictor(pub(super) i64);

impl CreditRiskPredictor for FixedPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<i64, PredictionError> {
        Ok(self.0)
    }
}

/// Fails on the first call, then answers `1`.
#[derive(Default)]
pub(super) struct FlakyPredictor {
    calls: AtomicUsize,
}

impl CreditRiskPredictor for FlakyPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<i64, PredictionError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(PredictionError::Unavailable("injected fault".to_string()))
        } else {
            Ok(1)
        }
    }
}

/// Records every vector it receives.
#[derive(Default)]
pub(super) struct RecordingPredictor {
    pub(super) seen: Mutex<Vec<FeatureVector>>,
}

impl CreditRiskPredictor for RecordingPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictionError> {
        self.seen
            .lock()
            .expect("recording mutex poisoned")
            .push(*features);
        Ok(0)
    }
}

pub(super) fn assessor<P: CreditRiskPredictor + 'static>(predictor: P) -> CreditRiskAssessor<P> {
    CreditRiskAssessor::new(Arc::new(predictor))
}

pub(super) fn app<P: CreditRiskPredictor + 'static>(predictor: P) -> Arc<AssessmentApp<P>> {
    Arc::new(
        AssessmentApp::new(Arc::new(predictor), ResultPresenter::new(false))
            .expect("form page compiles"),
    )
}

/// Logistic model centred on the catalog defaults: defaults score `sigmoid(0.85)`.
pub(super) fn centred_artifact() -> ModelArtifact {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[4] = 1.1;
    coefficients[16] = 0.8;
    coefficients[18] = -0.9;

    let mean = vec![
        30.0, 3000.0, 10000.0, 12.0, 1.0, 1.0, 1.0, 30.0, 2.0, 5000.0, 0.0, 0.0, 0.0, 1.0, 5.0,
        1.0, 650.0, 0.0, 0.0, 0.0,
    ];
    let mut scale = vec![1.0; FEATURE_COUNT];
    scale[4] = 0.5;
    scale[16] = 100.0;
    scale[18] = 0.7;

    ModelArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        feature_names: FeatureSchema::credit_risk()
            .feature_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
        classifier: ClassifierSpec::LogisticRegression(LogisticRegression {
            intercept: 0.85,
            coefficients,
            scaler: Some(StandardScaler { mean, scale }),
            threshold: 0.5,
        }),
    }
}

pub(super) async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
