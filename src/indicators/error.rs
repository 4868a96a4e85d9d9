use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("invalid numeric format: {0}")]
    InvalidNumericFormat(String),
    #[error("insufficient data: need {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}
