use crate::infra::{load_predictor, model_config};
use clap::Args;
use credit_risk::assessment::{
    read_applicants, ApplicantRow, AssessmentError, CreditRiskAssessor, CreditRiskPredictor,
    ResultPresenter,
};
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::schema::FeatureSchema;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file whose header row names schema fields
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let model = model_config(&config, args.model)?;
    let predictor = load_predictor(&model)?;
    let assessor = CreditRiskAssessor::new(predictor);
    let presenter = ResultPresenter::for_environment(config.environment);

    let rows = read_applicants(File::open(&args.csv)?, FeatureSchema::credit_risk())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in rows {
        writeln!(out, "{}", assess_row(&assessor, &presenter, row))?;
    }
    Ok(())
}

pub(crate) fn print_schema() -> Result<(), AppError> {
    let schema = FeatureSchema::credit_risk();
    schema.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &schema.export()).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

/// One output line per applicant; a failing row reports its error and the batch continues.
fn assess_row<P>(
    assessor: &CreditRiskAssessor<P>,
    presenter: &ResultPresenter,
    row: ApplicantRow,
) -> String
where
    P: CreditRiskPredictor + 'static,
{
    let outcome = row
        .values
        .map_err(AssessmentError::from)
        .and_then(|form| assessor.assess(&form));

    match &outcome {
        Ok(assessment) => format!(
            "line {}: {} {}",
            row.line,
            assessment.verdict.label(),
            assessment.message
        ),
        Err(_) => format!("line {}: {}", row.line, presenter.present(&outcome).message()),
    }
}
