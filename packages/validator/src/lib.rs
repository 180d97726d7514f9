//! # SchemaForm Validator
//!
//! Two independent checks over a parsed schema document:
//!
//! 1. **Shape rules**: hand-written structural checks collected by a
//!    recursive walker into errors and warnings
//! 2. **Compile check**: the document is compiled with `jsonschema` for the
//!    configured draft
//!
//! A [`ValidationReport`] is valid iff it has no errors.

mod compile;
mod diagnostic;
mod error;
mod report;
mod rules;
mod shape;

pub use compile::{compile_check, Draft};
pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use error::ValidatorError;
pub use report::{validate, SchemaValidator, ValidationReport, ValidatorOptions};
pub use rules::{NodeContext, RuleRegistry, ShapeRule};
pub use shape::check_shape;
