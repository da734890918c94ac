use serde::Serialize;

use super::service::AssessmentError;
use super::Assessment;
use crate::config::AppEnvironment;

pub const GOOD_MESSAGE: &str = "Congratulations! Your credit risk is predicted to be GOOD. ✅";
pub const BAD_MESSAGE: &str = "Bad luck! Your credit risk is predicted to be BAD. ❌";
const GENERIC_FAILURE: &str =
    "The form could not be prepared for prediction. Please try again later.";

/// Credit risk outcome derived from the classifier's raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Good,
    Bad,
}

impl Verdict {
    /// `1` is creditworthy; every other label is treated as bad risk.
    pub fn from_label(label: i64) -> Self {
        if label == 1 {
            Verdict::Good
        } else {
            Verdict::Bad
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Good => "GOOD",
            Verdict::Bad => "BAD",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Good => GOOD_MESSAGE,
            Verdict::Bad => BAD_MESSAGE,
        }
    }
}

/// What the applicant sees after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Success(message) | Banner::Error(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Banner::Success(_))
    }
}

/// Maps assessment outcomes to banners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultPresenter {
    expose_internal_errors: bool,
}

impl ResultPresenter {
    pub fn new(expose_internal_errors: bool) -> Self {
        Self {
            expose_internal_errors,
        }
    }

    /// Encoding invariant failures are only spelled out while developing.
    pub fn for_environment(environment: AppEnvironment) -> Self {
        Self::new(environment == AppEnvironment::Development)
    }

    pub fn verdict(&self, verdict: Verdict) -> Banner {
        match verdict {
            Verdict::Good => Banner::Success(verdict.message().to_string()),
            Verdict::Bad => Banner::Error(verdict.message().to_string()),
        }
    }

    pub fn failure(&self, error: &AssessmentError) -> Banner {
        let message = match error {
            AssessmentError::Form(err) => format!("Invalid input: {err}"),
            AssessmentError::Prediction(err) => format!("Error during prediction: {err}"),
            AssessmentError::Encoding(err) if self.expose_internal_errors => {
                format!("Encoding failed: {err}")
            }
            AssessmentError::Encoding(_) => GENERIC_FAILURE.to_string(),
        };
        Banner::Error(message)
    }

    pub fn present(&self, outcome: &Result<Assessment, AssessmentError>) -> Banner {
        match outcome {
            Ok(assessment) => self.verdict(assessment.verdict),
            Err(error) => self.failure(error),
        }
    }
}
