/// Reasons a submit attempt never reaches the network.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
    #[error("a submission is already in progress")]
    SubmissionInFlight,
}

pub type FormResult<T> = std::result::Result<T, FormError>;
