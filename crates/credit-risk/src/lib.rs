//! Credit risk assessment core: the versioned applicant feature schema, the
//! encoding contract that turns form input into a model-ready vector, and the
//! boundary to the trained classifier.

pub mod assessment;
pub mod config;
pub mod error;
pub mod schema;
pub mod telemetry;
