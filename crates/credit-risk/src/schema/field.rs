use serde::Serialize;

use super::SchemaError;

/// One input collected by the applicant form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub prompt: &'static str,
    pub help: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Semantic type of a field together with its widget constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Integer {
        min: i64,
        max: Option<i64>,
        default: i64,
    },
    Float {
        min: f64,
        max: Option<f64>,
        default: f64,
    },
    Enum {
        options: &'static [EnumOption],
        default: &'static str,
    },
}

/// Display label paired with the integer code the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub label: &'static str,
    pub code: i64,
}

impl FieldDefinition {
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, FieldKind::Enum { .. })
    }

    pub fn options(&self) -> &'static [EnumOption] {
        match self.kind {
            FieldKind::Enum { options, .. } => options,
            _ => &[],
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.options().iter().map(|option| option.label)
    }

    /// Widget value shown before the applicant edits the field.
    pub fn default_text(&self) -> String {
        match self.kind {
            FieldKind::Integer { default, .. } => default.to_string(),
            FieldKind::Float { default, .. } => format!("{default:.1}"),
            FieldKind::Enum { default, .. } => default.to_string(),
        }
    }

    /// Code for `label`, or `None` when the label is not one of the options.
    pub fn code_for(&self, label: &str) -> Option<i64> {
        self.options()
            .iter()
            .find(|option| option.label == label)
            .map(|option| option.code)
    }

    /// Checks the catalog invariants for this field.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let out_of_range = || SchemaError::DefaultOutOfRange { field: self.name };

        match self.kind {
            FieldKind::Integer { min, max, default } => {
                if default < min || max.is_some_and(|max| default > max) {
                    return Err(out_of_range());
                }
            }
            FieldKind::Float { min, max, default } => {
                if !default.is_finite()
                    || default < min
                    || max.is_some_and(|max| default > max)
                {
                    return Err(out_of_range());
                }
            }
            FieldKind::Enum { options, default } => {
                if options.is_empty() {
                    return Err(SchemaError::NoOptions { field: self.name });
                }

                for (index, option) in options.iter().enumerate() {
                    if options[..index]
                        .iter()
                        .any(|earlier| earlier.label == option.label)
                    {
                        return Err(SchemaError::DuplicateLabel {
                            field: self.name,
                            label: option.label,
                        });
                    }
                }

                let mut codes: Vec<i64> = options.iter().map(|option| option.code).collect();
                codes.sort_unstable();
                if codes
                    .iter()
                    .enumerate()
                    .any(|(expected, code)| *code != expected as i64)
                {
                    return Err(SchemaError::NonContiguousCodes { field: self.name });
                }

                if self.code_for(default).is_none() {
                    return Err(SchemaError::DefaultNotAnOption {
                        field: self.name,
                        default,
                    });
                }
            }
        }

        Ok(())
    }
}
