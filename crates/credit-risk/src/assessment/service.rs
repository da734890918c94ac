use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::form::{FormError, FormValues};
use super::predictor::{CreditRiskPredictor, PredictionError};
use super::vector::FeatureVector;
use super::verdict::Verdict;
use crate::schema::{EncodingError, FeatureSchema};

/// Result of one submission. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub label: i64,
    pub message: &'static str,
    pub schema_version: &'static str,
    pub features: FeatureVector,
    pub assessed_at: DateTime<Utc>,
}

/// Service composing the schema, the encoder, and the injected predictor.
pub struct CreditRiskAssessor<P> {
    schema: &'static FeatureSchema,
    predictor: Arc<P>,
}

impl<P> CreditRiskAssessor<P>
where
    P: CreditRiskPredictor + 'static,
{
    pub fn new(predictor: Arc<P>) -> Self {
        Self::with_schema(FeatureSchema::credit_risk(), predictor)
    }

    pub fn with_schema(schema: &'static FeatureSchema, predictor: Arc<P>) -> Self {
        Self { schema, predictor }
    }

    pub fn schema(&self) -> &'static FeatureSchema {
        self.schema
    }

    pub fn predictor(&self) -> &Arc<P> {
        &self.predictor
    }

    /// Encode, predict, and derive the verdict for one set of form values.
    pub fn assess(&self, form: &FormValues) -> Result<Assessment, AssessmentError> {
        let features = FeatureVector::assemble(form).map_err(|err| {
            error!(error = %err, "form values do not match the feature schema");
            err
        })?;

        let label = self.predictor.predict(&features).map_err(|err| {
            warn!(error = %err, "prediction failed");
            err
        })?;

        let verdict = Verdict::from_label(label);
        info!(verdict = verdict.label(), label, "credit risk assessed");

        Ok(Assessment {
            verdict,
            label,
            message: verdict.message(),
            schema_version: self.schema.version(),
            features,
            assessed_at: Utc::now(),
        })
    }

    /// Parse text entries (HTML form, CSV row) and assess them.
    pub fn assess_text<'a, I>(&self, entries: I) -> Result<Assessment, AssessmentError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let form = FormValues::from_text(self.schema, entries)?;
        self.assess(&form)
    }
}

/// Error raised at the submission boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}
