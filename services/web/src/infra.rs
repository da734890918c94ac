use credit_risk::assessment::TrainedClassifier;
use credit_risk::config::{AppConfig, ModelConfig};
use credit_risk::error::AppError;
use credit_risk::schema::FeatureSchema;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applies a command-line override to the configured artifact path.
pub(crate) fn model_config(
    config: &AppConfig,
    override_path: Option<PathBuf>,
) -> Result<ModelConfig, AppError> {
    match override_path {
        Some(path) => Ok(ModelConfig::new(path)?),
        None => Ok(config.model.clone()),
    }
}

/// Validates the schema and loads the classifier once for the process lifetime.
pub(crate) fn load_predictor(model: &ModelConfig) -> Result<Arc<TrainedClassifier>, AppError> {
    let schema = FeatureSchema::credit_risk();
    schema.validate()?;
    let classifier = TrainedClassifier::load(&model.artifact_path, schema)?;
    Ok(Arc::new(classifier))
}
