//! Trained classifier artifacts.
//!
//! An artifact is a JSON document naming the schema version and the ordered
//! feature names the model was trained with, followed by the classifier itself.
//! Loading refuses any artifact whose feature contract differs from the running
//! schema, so a model trained on a different column order never serves a verdict.

mod linear;
mod tree;

pub use linear::{LogisticRegression, StandardScaler};
pub use tree::{DecisionTree, RandomForest, TreeNode};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::predictor::{CreditRiskPredictor, PredictionError};
use super::vector::FeatureVector;
use crate::schema::{FeatureSchema, FEATURE_COUNT};

/// Serialized form of a trained classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: String,
    pub feature_names: Vec<String>,
    pub classifier: ClassifierSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl ClassifierSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierSpec::LogisticRegression(_) => "logistic_regression",
            ClassifierSpec::DecisionTree(_) => "decision_tree",
            ClassifierSpec::RandomForest(_) => "random_forest",
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            ClassifierSpec::LogisticRegression(model) => model.validate(),
            ClassifierSpec::DecisionTree(model) => model.validate(),
            ClassifierSpec::RandomForest(model) => model.validate(),
        }
    }
}

/// Reasons an artifact cannot back the service.
#[derive(Debug, thiserror::Error)]
pub enum PredictorLoadError {
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model was trained on schema `{found}`, service runs `{expected}`")]
    SchemaVersion {
        expected: &'static str,
        found: String,
    },
    #[error("model declares {found} features, schema has {expected}")]
    FeatureCount { expected: usize, found: usize },
    #[error("feature {position} is `{found}` in the model but `{expected}` in the schema")]
    SchemaMismatch {
        position: usize,
        expected: &'static str,
        found: String,
    },
    #[error("invalid {kind} model: {reason}")]
    InvalidModel { kind: &'static str, reason: String },
}

/// Classifier restored from an artifact and checked against the schema.
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    schema_version: String,
    classifier: ClassifierSpec,
}

impl TrainedClassifier {
    pub fn load<P: AsRef<Path>>(
        path: P,
        schema: &FeatureSchema,
    ) -> Result<Self, PredictorLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PredictorLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_reader(BufReader::new(file), schema)?;

        info!(
            path = %path.display(),
            kind = model.kind(),
            schema_version = model.schema_version(),
            "loaded credit risk model"
        );
        Ok(model)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        schema: &FeatureSchema,
    ) -> Result<Self, PredictorLoadError> {
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        Self::from_artifact(artifact, schema)
    }

    pub fn from_artifact(
        artifact: ModelArtifact,
        schema: &FeatureSchema,
    ) -> Result<Self, PredictorLoadError> {
        check_schema(&artifact, schema)?;
        artifact
            .classifier
            .validate()
            .map_err(|reason| PredictorLoadError::InvalidModel {
                kind: artifact.classifier.kind(),
                reason,
            })?;

        Ok(Self {
            schema_version: artifact.schema_version,
            classifier: artifact.classifier,
        })
    }

    pub fn kind(&self) -> &'static str {
        self.classifier.kind()
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }
}

fn check_schema(artifact: &ModelArtifact, schema: &FeatureSchema) -> Result<(), PredictorLoadError> {
    if artifact.schema_version != schema.version() {
        return Err(PredictorLoadError::SchemaVersion {
            expected: schema.version(),
            found: artifact.schema_version.clone(),
        });
    }

    if artifact.feature_names.len() != FEATURE_COUNT {
        return Err(PredictorLoadError::FeatureCount {
            expected: FEATURE_COUNT,
            found: artifact.feature_names.len(),
        });
    }

    for (position, (expected, found)) in schema
        .feature_names()
        .iter()
        .zip(&artifact.feature_names)
        .enumerate()
    {
        if *expected != found.as_str() {
            return Err(PredictorLoadError::SchemaMismatch {
                position,
                expected: *expected,
                found: found.clone(),
            });
        }
    }

    Ok(())
}

impl CreditRiskPredictor for TrainedClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, PredictionError> {
        if let Some(index) = features.iter().position(|value| !value.is_finite()) {
            return Err(PredictionError::NonFiniteFeature { index });
        }

        match &self.classifier {
            ClassifierSpec::LogisticRegression(model) => model.predict(features),
            ClassifierSpec::DecisionTree(model) => model.predict(features),
            ClassifierSpec::RandomForest(model) => model.predict(features),
        }
    }
}
