use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidatorError {
    #[error("Unknown JSON Schema draft: {0}")]
    UnknownDraft(String),
}
