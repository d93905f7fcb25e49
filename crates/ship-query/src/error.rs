//! Error types for the language model collaborator.

use thiserror::Error;

/// Errors from asking the language model.
///
/// The direct statistical path never fails; these only surface when a
/// question falls through to the model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// The request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("language model API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The API answered without any choices.
    #[error("language model returned no answer")]
    EmptyResponse,

    /// No API key was configured.
    #[error("no API key configured; set OPENAI_API_KEY")]
    MissingApiKey,

    /// No model is configured and the question needs one.
    #[error("no language model available to answer: {question}")]
    ModelUnavailable {
        /// The question that could not be answered directly.
        question: String,
    },
}

impl QueryError {
    /// Returns a short message suitable for showing next to a question.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Http(_) => "Could not reach the language model. Check your connection.",
            Self::Api { .. } | Self::EmptyResponse => "The language model could not answer.",
            Self::MissingApiKey | Self::ModelUnavailable { .. } => {
                "This question needs a language model. Configure an API key."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
