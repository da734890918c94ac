use super::FeatureSchema;

/// Failures while turning form values into classifier codes.
///
/// None of these are reachable through the form layer: they mean the value
/// source and the schema disagree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("label `{label}` has no code for field `{field}`")]
    UnknownLabel { field: String, label: String },
    #[error("`{field}` is not an enumerated field of the schema")]
    UnknownField { field: String },
    #[error("no value supplied for `{field}`")]
    MissingField { field: String },
    #[error("value supplied for `{field}` does not match its declared kind")]
    KindMismatch { field: String },
}

impl FeatureSchema {
    /// Trained integer code for `label` of the enumerated field `field`.
    pub fn encode(&self, field: &str, label: &str) -> Result<i64, EncodingError> {
        let definition = self
            .field(field)
            .filter(|definition| definition.is_enum())
            .ok_or_else(|| EncodingError::UnknownField {
                field: field.to_string(),
            })?;

        definition
            .code_for(label)
            .ok_or_else(|| EncodingError::UnknownLabel {
                field: field.to_string(),
                label: label.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(field: &str, label: &str) -> i64 {
        FeatureSchema::credit_risk()
            .encode(field, label)
            .expect("declared label encodes")
    }

    #[test]
    fn encodes_trained_codebook() {
        assert_eq!(encode("credit_history", "Good"), 1);
        assert_eq!(encode("credit_history", "Bad"), 0);

        assert_eq!(encode("employment_status", "Employed"), 1);
        assert_eq!(encode("employment_status", "Unemployed"), 0);
        assert_eq!(encode("employment_status", "Self-employed"), 2);
        assert_eq!(encode("employment_status", "Retired"), 3);

        assert_eq!(encode("home_ownership", "Owned"), 1);
        assert_eq!(encode("home_ownership", "Rented"), 0);
        assert_eq!(encode("home_ownership", "Mortgaged"), 2);
        assert_eq!(encode("home_ownership", "Other"), 3);

        assert_eq!(encode("loan_purpose", "Personal"), 0);
        assert_eq!(encode("loan_purpose", "Business"), 1);
        assert_eq!(encode("loan_purpose", "Education"), 2);
        assert_eq!(encode("loan_purpose", "Home Improvement"), 3);
        assert_eq!(encode("loan_purpose", "Medical"), 4);

        assert_eq!(encode("marital_status", "Single"), 0);
        assert_eq!(encode("marital_status", "Married"), 1);
        assert_eq!(encode("marital_status", "Divorced"), 2);
        assert_eq!(encode("marital_status", "Widowed"), 3);

        assert_eq!(encode("education_level", "High School"), 0);
        assert_eq!(encode("education_level", "Bachelor's"), 1);
        assert_eq!(encode("education_level", "Master's"), 2);
        assert_eq!(encode("education_level", "Doctorate"), 3);
        assert_eq!(encode("education_level", "Other"), 4);

        assert_eq!(encode("location_type", "Urban"), 0);
        assert_eq!(encode("location_type", "Suburban"), 1);
        assert_eq!(encode("location_type", "Rural"), 2);

        assert_eq!(encode("loan_default_history", "None"), 0);
        assert_eq!(encode("loan_default_history", "1-2 Defaults"), 1);
        assert_eq!(encode("loan_default_history", "3+ Defaults"), 2);
    }

    #[test]
    fn encoding_is_deterministic_for_every_option() {
        let schema = FeatureSchema::credit_risk();
        for field in schema.fields().iter().filter(|field| field.is_enum()) {
            for label in field.labels() {
                let first = schema.encode(field.name, label);
                let second = schema.encode(field.name, label);
                assert!(first.is_ok(), "{} / {label} has no code", field.name);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = FeatureSchema::credit_risk()
            .encode("credit_history", "Excellent")
            .expect_err("label is not declared");
        assert_eq!(
            err,
            EncodingError::UnknownLabel {
                field: "credit_history".to_string(),
                label: "Excellent".to_string(),
            }
        );
    }

    #[test]
    fn numeric_fields_have_no_encoding() {
        let err = FeatureSchema::credit_risk()
            .encode("age", "30")
            .expect_err("age is numeric");
        assert!(matches!(err, EncodingError::UnknownField { .. }));
    }
}
