use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagWeaveError {
    #[error("validation error at record {index}, field {field}: {reason}")]
    Validation {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("malformed input batch: {0}")]
    Input(String),
}
