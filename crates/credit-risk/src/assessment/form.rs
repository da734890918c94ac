use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{FeatureSchema, FieldDefinition, FieldKind};

/// 2^63: whole floats at or beyond this magnitude do not fit in an `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A single submitted value before encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Label(String),
}

impl FieldValue {
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Float(value) => value.to_string(),
            FieldValue::Label(label) => label.clone(),
        }
    }
}

/// Input rejected before it reaches the encoder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field `{field}`")]
    UnknownField { field: String },
    #[error("{field} must be a number, got `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be a whole number, got `{value}`")]
    NotInteger { field: &'static str, value: String },
    #[error("{field} must be {bounds}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        bounds: String,
    },
    #[error("`{value}` is not an option for {field} (expected one of: {expected})")]
    InvalidOption {
        field: &'static str,
        value: String,
        expected: String,
    },
}

/// Validated values for every field of a schema.
///
/// Construction fills any field the caller leaves out with its catalog default,
/// the same way an untouched widget would submit it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    schema: &'static FeatureSchema,
    values: BTreeMap<&'static str, FieldValue>,
}

impl FormValues {
    pub fn defaults(schema: &'static FeatureSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| (field.name, default_value(field)))
            .collect();
        Self { schema, values }
    }

    /// Parses text entries as submitted by an HTML form or a CSV row. Blank
    /// entries keep the default.
    pub fn from_text<'a, I>(schema: &'static FeatureSchema, entries: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut form = Self::defaults(schema);
        for (name, raw) in entries {
            let field = lookup(schema, name)?;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let value = parse_text(field, raw)?;
            form.values.insert(field.name, value);
        }
        Ok(form)
    }

    /// Accepts already typed values, as decoded from a JSON request body.
    pub fn from_values<I>(schema: &'static FeatureSchema, entries: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        let mut form = Self::defaults(schema);
        for (name, value) in entries {
            form.set(&name, value)?;
        }
        Ok(form)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let field = lookup(self.schema, name)?;
        let value = normalize(field, value)?;
        self.values.insert(field.name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn schema(&self) -> &'static FeatureSchema {
        self.schema
    }
}

fn lookup(schema: &FeatureSchema, name: &str) -> Result<&'static FieldDefinition, FormError> {
    schema.field(name).ok_or_else(|| FormError::UnknownField {
        field: name.to_string(),
    })
}

fn default_value(field: &FieldDefinition) -> FieldValue {
    match field.kind {
        FieldKind::Integer { default, .. } => FieldValue::Integer(default),
        FieldKind::Float { default, .. } => FieldValue::Float(default),
        FieldKind::Enum { default, .. } => FieldValue::Label(default.to_string()),
    }
}

fn parse_text(field: &'static FieldDefinition, raw: &str) -> Result<FieldValue, FormError> {
    let invalid = || FormError::InvalidNumber {
        field: field.name,
        value: raw.to_string(),
    };

    let value = match field.kind {
        FieldKind::Integer { .. } => match raw.parse::<i64>() {
            Ok(value) => FieldValue::Integer(value),
            Err(_) => FieldValue::Float(raw.parse::<f64>().map_err(|_| invalid())?),
        },
        FieldKind::Float { .. } => FieldValue::Float(raw.parse::<f64>().map_err(|_| invalid())?),
        FieldKind::Enum { .. } => FieldValue::Label(raw.to_string()),
    };

    normalize(field, value)
}

fn normalize(field: &'static FieldDefinition, value: FieldValue) -> Result<FieldValue, FormError> {
    match field.kind {
        FieldKind::Integer { min, max, .. } => {
            let number = match value {
                FieldValue::Integer(number) => number,
                FieldValue::Float(number) if number.is_finite() && number.fract() == 0.0 => {
                    if !(-I64_LIMIT..I64_LIMIT).contains(&number) {
                        return Err(FormError::OutOfRange {
                            field: field.name,
                            value: number.to_string(),
                            bounds: describe_bounds(min, Some(max.unwrap_or(i64::MAX))),
                        });
                    }
                    number as i64
                }
                FieldValue::Float(number) => {
                    return Err(FormError::NotInteger {
                        field: field.name,
                        value: number.to_string(),
                    })
                }
                FieldValue::Label(label) => {
                    return Err(FormError::InvalidNumber {
                        field: field.name,
                        value: label,
                    })
                }
            };

            if number < min || max.is_some_and(|max| number > max) {
                return Err(FormError::OutOfRange {
                    field: field.name,
                    value: number.to_string(),
                    bounds: describe_bounds(min, max),
                });
            }
            Ok(FieldValue::Integer(number))
        }
        FieldKind::Float { min, max, .. } => {
            let number = match value {
                FieldValue::Integer(number) => number as f64,
                FieldValue::Float(number) => number,
                FieldValue::Label(label) => {
                    return Err(FormError::InvalidNumber {
                        field: field.name,
                        value: label,
                    })
                }
            };

            if !number.is_finite() {
                return Err(FormError::InvalidNumber {
                    field: field.name,
                    value: number.to_string(),
                });
            }
            if number < min || max.is_some_and(|max| number > max) {
                return Err(FormError::OutOfRange {
                    field: field.name,
                    value: number.to_string(),
                    bounds: describe_bounds(min, max),
                });
            }
            Ok(FieldValue::Float(number))
        }
        FieldKind::Enum { .. } => {
            let label = value.as_text();
            if field.code_for(&label).is_none() {
                return Err(FormError::InvalidOption {
                    field: field.name,
                    value: label,
                    expected: field.labels().collect::<Vec<_>>().join(", "),
                });
            }
            Ok(FieldValue::Label(label))
        }
    }
}

fn describe_bounds<T: std::fmt::Display>(min: T, max: Option<T>) -> String {
    match max {
        Some(max) => format!("between {min} and {max}"),
        None => format!("at least {min}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> &'static FeatureSchema {
        FeatureSchema::credit_risk()
    }

    #[test]
    fn defaults_cover_every_field() {
        let form = FormValues::defaults(schema());
        for field in schema().fields() {
            assert!(form.get(field.name).is_some(), "missing {}", field.name);
        }
        assert_eq!(form.get("age"), Some(&FieldValue::Integer(30)));
        assert_eq!(
            form.get("loan_default_history"),
            Some(&FieldValue::Label("None".to_string()))
        );
    }

    #[test]
    fn text_entries_are_parsed_per_kind() {
        let form = FormValues::from_text(
            schema(),
            [
                ("age", "42"),
                ("debt_to_income_ratio", "12.5"),
                ("income", "4500.0"),
                ("marital_status", "Married"),
            ],
        )
        .expect("valid entries");

        assert_eq!(form.get("age"), Some(&FieldValue::Integer(42)));
        assert_eq!(
            form.get("debt_to_income_ratio"),
            Some(&FieldValue::Float(12.5))
        );
        assert_eq!(form.get("income"), Some(&FieldValue::Integer(4500)));
        assert_eq!(
            form.get("marital_status"),
            Some(&FieldValue::Label("Married".to_string()))
        );
    }

    #[test]
    fn blank_text_keeps_default() {
        let form = FormValues::from_text(schema(), [("age", "  ")]).expect("blank is allowed");
        assert_eq!(form.get("age"), Some(&FieldValue::Integer(30)));
    }

    #[test]
    fn rejects_values_outside_bounds() {
        let err = FormValues::from_text(schema(), [("age", "17")]).expect_err("below minimum");
        assert_eq!(
            err,
            FormError::OutOfRange {
                field: "age",
                value: "17".to_string(),
                bounds: "between 18 and 100".to_string(),
            }
        );

        let err = FormValues::from_text(schema(), [("loan_duration", "0")])
            .expect_err("below minimum");
        assert_eq!(err.to_string(), "loan_duration must be at least 1, got 0");

        let err = FormValues::from_text(schema(), [("debt_to_income_ratio", "100.5")])
            .expect_err("above maximum");
        assert!(matches!(err, FormError::OutOfRange { field: "debt_to_income_ratio", .. }));
    }

    #[test]
    fn rejects_fractional_integers_and_garbage() {
        let err = FormValues::from_text(schema(), [("num_credit_cards", "2.5")])
            .expect_err("fractional count");
        assert!(matches!(err, FormError::NotInteger { .. }));

        let err = FormValues::from_text(schema(), [("income", "lots")]).expect_err("not a number");
        assert!(matches!(err, FormError::InvalidNumber { field: "income", .. }));

        let err = FormValues::from_text(schema(), [("debt_to_income_ratio", "NaN")])
            .expect_err("not finite");
        assert!(matches!(err, FormError::InvalidNumber { .. }));
    }

    #[test]
    fn rejects_whole_numbers_too_large_for_an_integer() {
        let err = FormValues::from_text(schema(), [("income", "1e20")])
            .expect_err("does not fit in i64");
        assert_eq!(
            err,
            FormError::OutOfRange {
                field: "income",
                value: "100000000000000000000".to_string(),
                bounds: "between 0 and 9223372036854775807".to_string(),
            }
        );

        let payload: BTreeMap<String, FieldValue> =
            serde_json::from_str(r#"{"income": 18446744073709551615}"#).expect("valid json");
        let err = FormValues::from_values(schema(), payload).expect_err("u64::MAX is too large");
        assert!(matches!(err, FormError::OutOfRange { field: "income", .. }));

        let err = FormValues::from_text(schema(), [("age", "-1e19")])
            .expect_err("too small for i64");
        assert!(matches!(err, FormError::OutOfRange { field: "age", .. }));
    }

    #[test]
    fn rejects_labels_outside_options() {
        let err = FormValues::from_values(
            schema(),
            [(
                "credit_history".to_string(),
                FieldValue::Label("Excellent".to_string()),
            )],
        )
        .expect_err("label is not an option");

        assert_eq!(
            err.to_string(),
            "`Excellent` is not an option for credit_history (expected one of: Good, Bad)"
        );
    }

    #[test]
    fn rejects_unknown_field_names() {
        let err = FormValues::from_values(schema(), [("salary".to_string(), FieldValue::Integer(1))])
            .expect_err("not a schema field");
        assert_eq!(
            err,
            FormError::UnknownField {
                field: "salary".to_string()
            }
        );
    }

    #[test]
    fn float_fields_accept_integers() {
        let form = FormValues::from_values(
            schema(),
            [("debt_to_income_ratio".to_string(), FieldValue::Integer(45))],
        )
        .expect("integer widens to float");
        assert_eq!(
            form.get("debt_to_income_ratio"),
            Some(&FieldValue::Float(45.0))
        );
    }
}
