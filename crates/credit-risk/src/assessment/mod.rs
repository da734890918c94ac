//! Applicant assessment: form values in, verdict out.
//!
//! Values are validated against the feature schema, assembled into the fixed
//! order vector, handed to an injected [`CreditRiskPredictor`], and turned into
//! a verdict banner. Nothing is kept between submissions.

pub mod batch;
pub mod form;
pub mod model;
pub mod page;
pub mod predictor;
pub mod router;
pub mod service;
pub mod vector;
pub mod verdict;

#[cfg(test)]
mod tests;

pub use batch::{read_applicants, ApplicantRow, BatchError};
pub use form::{FieldValue, FormError, FormValues};
pub use model::{ClassifierSpec, ModelArtifact, PredictorLoadError, TrainedClassifier};
pub use page::{FormPage, PageError};
pub use predictor::{CreditRiskPredictor, PredictionError};
pub use router::{assessment_router, AssessmentApp};
pub use service::{Assessment, AssessmentError, CreditRiskAssessor};
pub use vector::FeatureVector;
pub use verdict::{Banner, ResultPresenter, Verdict};
