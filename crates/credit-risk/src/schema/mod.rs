//! Versioned declaration of the applicant features.
//!
//! The field catalog and the categorical encoding table live in one place: every
//! enumerated field declares its options as `(label, code)` pairs, so the form and
//! the vector fed to the classifier can never disagree about a code. The same
//! declaration is exported as JSON for whoever trains the model.

mod catalog;
mod encoding;
mod field;

pub use encoding::EncodingError;
pub use field::{EnumOption, FieldDefinition, FieldKind};

use serde::Serialize;

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 20;

/// Version tag carried by the schema and by every compatible model artifact.
pub const SCHEMA_VERSION: &str = "credit-risk/v1";

static CREDIT_RISK_SCHEMA: FeatureSchema = FeatureSchema {
    version: SCHEMA_VERSION,
    fields: &catalog::CREDIT_RISK_FIELDS,
};

/// Ordered field catalog plus encoding table, shared by the form and the model.
#[derive(Debug, PartialEq)]
pub struct FeatureSchema {
    version: &'static str,
    fields: &'static [FieldDefinition; FEATURE_COUNT],
}

impl FeatureSchema {
    /// The schema the shipped classifier was trained on.
    pub fn credit_risk() -> &'static FeatureSchema {
        &CREDIT_RISK_SCHEMA
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn fields(&self) -> &'static [FieldDefinition; FEATURE_COUNT] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Feature names in vector order.
    pub fn feature_names(&self) -> [&'static str; FEATURE_COUNT] {
        self.fields.map(|field| field.name)
    }

    /// Runs every field's catalog checks and rejects duplicate field names.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index]
                .iter()
                .any(|earlier| earlier.name == field.name)
            {
                return Err(SchemaError::DuplicateField { field: field.name });
            }
            field.validate()?;
        }
        Ok(())
    }

    /// Serializable description of the schema, used by `/api/v1/schema` and the CLI.
    pub fn export(&self) -> SchemaExport {
        SchemaExport {
            version: self.version,
            feature_count: FEATURE_COUNT,
            feature_order: self.feature_names().to_vec(),
            fields: self.fields.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaExport {
    pub version: &'static str,
    pub feature_count: usize,
    pub feature_order: Vec<&'static str>,
    pub fields: Vec<FieldDefinition>,
}

/// Catalog invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field `{field}` is declared more than once")]
    DuplicateField { field: &'static str },
    #[error("default for `{field}` lies outside its bounds")]
    DefaultOutOfRange { field: &'static str },
    #[error("enumerated field `{field}` declares no options")]
    NoOptions { field: &'static str },
    #[error("label `{label}` appears twice in `{field}`")]
    DuplicateLabel {
        field: &'static str,
        label: &'static str,
    },
    #[error("codes for `{field}` are not contiguous from 0")]
    NonContiguousCodes { field: &'static str },
    #[error("default `{default}` is not an option of `{field}`")]
    DefaultNotAnOption {
        field: &'static str,
        default: &'static str,
    },
}
