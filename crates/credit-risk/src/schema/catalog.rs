use super::field::{EnumOption, FieldDefinition, FieldKind};
use super::FEATURE_COUNT;

const CREDIT_HISTORY: &[EnumOption] = &[
    EnumOption { label: "Good", code: 1 },
    EnumOption { label: "Bad", code: 0 },
];

const EMPLOYMENT_STATUS: &[EnumOption] = &[
    EnumOption { label: "Employed", code: 1 },
    EnumOption { label: "Unemployed", code: 0 },
    EnumOption { label: "Self-employed", code: 2 },
    EnumOption { label: "Retired", code: 3 },
];

const HOME_OWNERSHIP: &[EnumOption] = &[
    EnumOption { label: "Owned", code: 1 },
    EnumOption { label: "Rented", code: 0 },
    EnumOption { label: "Mortgaged", code: 2 },
    EnumOption { label: "Other", code: 3 },
];

const LOAN_PURPOSE: &[EnumOption] = &[
    EnumOption { label: "Personal", code: 0 },
    EnumOption { label: "Business", code: 1 },
    EnumOption { label: "Education", code: 2 },
    EnumOption { label: "Home Improvement", code: 3 },
    EnumOption { label: "Medical", code: 4 },
];

const MARITAL_STATUS: &[EnumOption] = &[
    EnumOption { label: "Single", code: 0 },
    EnumOption { label: "Married", code: 1 },
    EnumOption { label: "Divorced", code: 2 },
    EnumOption { label: "Widowed", code: 3 },
];

const EDUCATION_LEVEL: &[EnumOption] = &[
    EnumOption { label: "High School", code: 0 },
    EnumOption { label: "Bachelor's", code: 1 },
    EnumOption { label: "Master's", code: 2 },
    EnumOption { label: "Doctorate", code: 3 },
    EnumOption { label: "Other", code: 4 },
];

const LOCATION_TYPE: &[EnumOption] = &[
    EnumOption { label: "Urban", code: 0 },
    EnumOption { label: "Suburban", code: 1 },
    EnumOption { label: "Rural", code: 2 },
];

const LOAN_DEFAULT_HISTORY: &[EnumOption] = &[
    EnumOption { label: "None", code: 0 },
    EnumOption { label: "1-2 Defaults", code: 1 },
    EnumOption { label: "3+ Defaults", code: 2 },
];

const fn count(min: i64, default: i64) -> FieldKind {
    FieldKind::Integer {
        min,
        max: None,
        default,
    }
}

const fn choice(options: &'static [EnumOption]) -> FieldKind {
    FieldKind::Enum {
        options,
        default: options[0].label,
    }
}

/// Applicant fields in the order the classifier consumes them.
pub(super) const CREDIT_RISK_FIELDS: [FieldDefinition; FEATURE_COUNT] = [
    FieldDefinition {
        name: "age",
        prompt: "Enter age:",
        help: "The age of the applicant. Older age might imply more financial stability but could also indicate reduced earning potential.",
        kind: FieldKind::Integer {
            min: 18,
            max: Some(100),
            default: 30,
        },
    },
    FieldDefinition {
        name: "income",
        prompt: "Enter monthly income (in $):",
        help: "The applicant's monthly income. Higher income often correlates with better creditworthiness.",
        kind: count(0, 3000),
    },
    FieldDefinition {
        name: "loan_amount",
        prompt: "Enter loan amount (in $):",
        help: "The total loan amount the applicant is requesting.",
        kind: count(0, 10000),
    },
    FieldDefinition {
        name: "loan_duration",
        prompt: "Enter loan duration (in months):",
        help: "The length of time (in months) for which the loan is requested.",
        kind: count(1, 12),
    },
    FieldDefinition {
        name: "credit_history",
        prompt: "Credit history:",
        help: "The applicant's credit history, indicating past repayment behavior. 'Good' often reduces risk.",
        kind: choice(CREDIT_HISTORY),
    },
    FieldDefinition {
        name: "employment_status",
        prompt: "Employment Status:",
        help: "The applicant's employment status, which is a key factor in assessing repayment ability.",
        kind: choice(EMPLOYMENT_STATUS),
    },
    FieldDefinition {
        name: "home_ownership",
        prompt: "Home Ownership Status:",
        help: "The applicant's home ownership status, which can indicate asset stability.",
        kind: choice(HOME_OWNERSHIP),
    },
    FieldDefinition {
        name: "debt_to_income_ratio",
        prompt: "Debt-to-Income Ratio (in %):",
        help: "The percentage of monthly income used for debt repayment. Lower values are better.",
        kind: FieldKind::Float {
            min: 0.0,
            max: Some(100.0),
            default: 30.0,
        },
    },
    FieldDefinition {
        name: "num_credit_cards",
        prompt: "Number of Credit Cards:",
        help: "The number of credit cards the applicant holds. Excessive cards may indicate financial stress.",
        kind: count(0, 2),
    },
    FieldDefinition {
        name: "outstanding_debt",
        prompt: "Outstanding Debt (in $):",
        help: "The total unpaid debt of the applicant.",
        kind: count(0, 5000),
    },
    FieldDefinition {
        name: "loan_purpose",
        prompt: "Purpose of Loan:",
        help: "The reason for requesting the loan. Certain purposes might be riskier than others.",
        kind: choice(LOAN_PURPOSE),
    },
    FieldDefinition {
        name: "marital_status",
        prompt: "Marital Status:",
        help: "The applicant's marital status, which can affect financial obligations and stability.",
        kind: choice(MARITAL_STATUS),
    },
    FieldDefinition {
        name: "education_level",
        prompt: "Education Level:",
        help: "The highest level of education completed by the applicant. Higher education levels may imply better earning potential.",
        kind: choice(EDUCATION_LEVEL),
    },
    FieldDefinition {
        name: "financial_dependents",
        prompt: "Number of Financial Dependents:",
        help: "The number of people financially dependent on the applicant. Higher values may increase financial strain.",
        kind: count(0, 1),
    },
    FieldDefinition {
        name: "employment_duration",
        prompt: "Employment Duration (in years):",
        help: "The number of years the applicant has been employed. Longer duration often indicates job stability.",
        kind: count(0, 5),
    },
    FieldDefinition {
        name: "num_previous_loans",
        prompt: "Number of Previous Loans Taken:",
        help: "The number of loans the applicant has previously taken. More loans may imply financial burden.",
        kind: count(0, 1),
    },
    FieldDefinition {
        name: "existing_credit_score",
        prompt: "Existing Credit Score:",
        help: "The applicant's existing credit score. Higher scores usually indicate better creditworthiness.",
        kind: FieldKind::Integer {
            min: 0,
            max: Some(850),
            default: 650,
        },
    },
    FieldDefinition {
        name: "location_type",
        prompt: "Location Type:",
        help: "The location of the applicant's residence. Urban areas often have more financial opportunities.",
        kind: choice(LOCATION_TYPE),
    },
    FieldDefinition {
        name: "loan_default_history",
        prompt: "Loan Default History:",
        help: "The applicant's previous loan default history. More defaults indicate higher credit risk.",
        kind: choice(LOAN_DEFAULT_HISTORY),
    },
    FieldDefinition {
        name: "previous_default_count",
        prompt: "Previous Default Count:",
        help: "The number of defaults the applicant has previously had. Higher counts indicate higher risk.",
        kind: count(0, 0),
    },
];
