use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::form::{FieldValue, FormValues};
use super::page::{FormPage, PageError};
use super::predictor::CreditRiskPredictor;
use super::service::{AssessmentError, CreditRiskAssessor};
use super::verdict::ResultPresenter;

/// Everything the form and API handlers share.
pub struct AssessmentApp<P> {
    pub assessor: CreditRiskAssessor<P>,
    pub page: FormPage,
    pub presenter: ResultPresenter,
}

impl<P> AssessmentApp<P>
where
    P: CreditRiskPredictor + 'static,
{
    pub fn new(predictor: Arc<P>, presenter: ResultPresenter) -> Result<Self, PageError> {
        Ok(Self {
            assessor: CreditRiskAssessor::new(predictor),
            page: FormPage::new()?,
            presenter,
        })
    }
}

/// Router builder exposing the HTML form and the JSON assessment API.
pub fn assessment_router<P>(app: Arc<AssessmentApp<P>>) -> Router
where
    P: CreditRiskPredictor + 'static,
{
    Router::new()
        .route("/", get(form_handler::<P>).post(submit_form_handler::<P>))
        .route("/api/v1/schema", get(schema_handler::<P>))
        .route("/api/v1/assessments", post(assess_handler::<P>))
        .with_state(app)
}

pub(crate) async fn form_handler<P>(State(app): State<Arc<AssessmentApp<P>>>) -> Response
where
    P: CreditRiskPredictor + 'static,
{
    let page = app
        .page
        .render(app.assessor.schema(), &BTreeMap::new(), None);
    html_response(page)
}

pub(crate) async fn submit_form_handler<P>(
    State(app): State<Arc<AssessmentApp<P>>>,
    Form(entries): Form<HashMap<String, String>>,
) -> Response
where
    P: CreditRiskPredictor + 'static,
{
    let outcome = app
        .assessor
        .assess_text(entries.iter().map(|(name, value)| (name.as_str(), value.as_str())));
    let banner = app.presenter.present(&outcome);

    let submitted: BTreeMap<String, String> = entries.into_iter().collect();
    let page = app
        .page
        .render(app.assessor.schema(), &submitted, Some(&banner));
    html_response(page)
}

pub(crate) async fn schema_handler<P>(State(app): State<Arc<AssessmentApp<P>>>) -> Response
where
    P: CreditRiskPredictor + 'static,
{
    (StatusCode::OK, Json(app.assessor.schema().export())).into_response()
}

pub(crate) async fn assess_handler<P>(
    State(app): State<Arc<AssessmentApp<P>>>,
    Json(payload): Json<BTreeMap<String, FieldValue>>,
) -> Response
where
    P: CreditRiskPredictor + 'static,
{
    let outcome = FormValues::from_values(app.assessor.schema(), payload)
        .map_err(AssessmentError::from)
        .and_then(|form| app.assessor.assess(&form));

    match outcome {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(err) => {
            let status = match err {
                AssessmentError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AssessmentError::Encoding(_) | AssessmentError::Prediction(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let banner = app.presenter.failure(&err);
            let payload = json!({
                "error": banner.message(),
            });
            (status, Json(payload)).into_response()
        }
    }
}

fn html_response(page: Result<String, PageError>) -> Response {
    match page {
        Ok(body) => (StatusCode::OK, Html(body)).into_response(),
        Err(err) => {
            error!(error = %err, "form page failed to render");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
