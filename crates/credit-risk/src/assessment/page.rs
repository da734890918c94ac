use std::collections::BTreeMap;

use minijinja::Environment;
use serde::Serialize;

use super::verdict::Banner;
use crate::schema::{FeatureSchema, FieldDefinition, FieldKind};

const FORM_TEMPLATE: &str = include_str!("../../templates/form.html");
const PAGE_TITLE: &str = "Credit Risk Prediction";

/// Server-side renderer for the applicant form.
pub struct FormPage {
    env: Environment<'static>,
}

impl std::fmt::Debug for FormPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormPage").finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("failed to render form page: {0}")]
    Template(#[from] minijinja::Error),
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'static str,
    schema_version: &'static str,
    fields: Vec<FieldView>,
    banner: Option<&'a Banner>,
}

#[derive(Serialize)]
struct FieldView {
    name: &'static str,
    prompt: &'static str,
    help: &'static str,
    control: &'static str,
    step: &'static str,
    min: Option<String>,
    max: Option<String>,
    value: String,
    options: Vec<OptionView>,
}

#[derive(Serialize)]
struct OptionView {
    label: &'static str,
    selected: bool,
}

impl FormPage {
    pub fn new() -> Result<Self, PageError> {
        let mut env = Environment::new();
        env.add_template("form.html", FORM_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders the form. `current` holds submitted text by field name; fields
    /// without an entry show their catalog default.
    pub fn render(
        &self,
        schema: &FeatureSchema,
        current: &BTreeMap<String, String>,
        banner: Option<&Banner>,
    ) -> Result<String, PageError> {
        let fields = schema
            .fields()
            .iter()
            .map(|field| {
                let value = current
                    .get(field.name)
                    .cloned()
                    .unwrap_or_else(|| field.default_text());
                field_view(field, value)
            })
            .collect();

        let context = PageContext {
            title: PAGE_TITLE,
            schema_version: schema.version(),
            fields,
            banner,
        };

        let template = self.env.get_template("form.html")?;
        Ok(template.render(context)?)
    }
}

fn field_view(field: &FieldDefinition, value: String) -> FieldView {
    let (control, step, min, max) = match field.kind {
        FieldKind::Integer { min, max, .. } => (
            "number",
            "1",
            Some(min.to_string()),
            max.map(|max| max.to_string()),
        ),
        FieldKind::Float { min, max, .. } => (
            "number",
            "0.1",
            Some(min.to_string()),
            max.map(|max| max.to_string()),
        ),
        FieldKind::Enum { .. } => ("select", "", None, None),
    };

    let options = field
        .labels()
        .map(|label| OptionView {
            label,
            selected: label == value,
        })
        .collect();

    FieldView {
        name: field.name,
        prompt: field.prompt,
        help: field.help,
        control,
        step,
        min,
        max,
        value,
        options,
    }
}
