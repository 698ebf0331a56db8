use thiserror::Error;

/// Message shown to the user whenever generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate quiz. Please check your API key or try a different topic.";

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Please enter a topic before starting a quiz.")]
    EmptyTopic,
    #[error("A quiz is already in progress.")]
    Busy,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl QuizError {
    /// Text for the message line of the UI.
    pub fn user_message(&self) -> String {
        match self {
            QuizError::Generation(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no API key configured for the question service")]
    MissingApiKey,
    #[error("could not reach the question service: {0}")]
    Transport(String),
    #[error("question service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("question service returned no text")]
    EmptyResponse,
    #[error("question service returned unparsable data: {0}")]
    Malformed(String),
    #[error("question {number} is invalid: {reason}")]
    InvalidQuestion { number: usize, reason: String },
    #[error("expected {expected} questions, got {received}")]
    WrongCount { expected: usize, received: usize },
}

impl GenerationError {
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Please enter a Razorpay Key ID to test the payment flow.")]
    MissingKey,
    #[error("Checkout is only available in the browser build.")]
    Unavailable,
    #[error("Could not open checkout: {0}")]
    Widget(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}
