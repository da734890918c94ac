use serde::{Deserialize, Serialize};

use super::form::{FieldValue, FormValues};
use crate::schema::{EncodingError, FieldKind, FEATURE_COUNT};

/// Model input in schema order. The length is fixed by the type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub const LEN: usize = FEATURE_COUNT;

    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Builds the vector from validated form values: numeric fields pass
    /// through, enumerated fields go through the schema's encoding table.
    pub fn assemble(form: &FormValues) -> Result<Self, EncodingError> {
        let schema = form.schema();
        let mut values = [0.0; FEATURE_COUNT];

        for (slot, field) in values.iter_mut().zip(schema.fields()) {
            let value = form
                .get(field.name)
                .ok_or_else(|| EncodingError::MissingField {
                    field: field.name.to_string(),
                })?;

            *slot = match (&field.kind, value) {
                (FieldKind::Integer { .. }, FieldValue::Integer(number)) => *number as f64,
                (FieldKind::Float { .. }, FieldValue::Float(number)) => *number,
                (FieldKind::Float { .. }, FieldValue::Integer(number)) => *number as f64,
                (FieldKind::Enum { .. }, FieldValue::Label(label)) => {
                    schema.encode(field.name, label)? as f64
                }
                _ => {
                    return Err(EncodingError::KindMismatch {
                        field: field.name.to_string(),
                    })
                }
            };
        }

        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}
