use std::io::Read;

use super::form::{FormError, FormValues};
use crate::schema::FeatureSchema;

/// Applicant row read from a CSV export, paired with its source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRow {
    pub line: u64,
    pub values: Result<FormValues, FormError>,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("invalid applicant CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("column `{column}` is not a field of schema {schema}")]
    UnknownColumn {
        column: String,
        schema: &'static str,
    },
}

/// Reads applicants from CSV whose header names schema fields.
///
/// Missing columns and blank cells take catalog defaults. A row with an invalid
/// value is returned with its error so the remaining rows can still be assessed.
pub fn read_applicants<R: Read>(
    reader: R,
    schema: &'static FeatureSchema,
) -> Result<Vec<ApplicantRow>, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if let Some(column) = headers.iter().find(|column| schema.field(column).is_none()) {
        return Err(BatchError::UnknownColumn {
            column: column.to_string(),
            schema: schema.version(),
        });
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(index as u64 + 2);
        let values = FormValues::from_text(schema, headers.iter().zip(record.iter()));
        rows.push(ApplicantRow { line, values });
    }

    Ok(rows)
}
