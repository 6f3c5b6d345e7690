#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {0} is not a date field")]
    NotADateField(String),
    #[error("required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
