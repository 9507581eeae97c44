//! Clients for external behavior judges.

pub mod gemini;

pub use gemini::GeminiJudge;

use thiserror::Error;

/// Why a judge request produced no usable decision
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("No API key configured for the behavior judge")]
    MissingApiKey,

    #[error("API key contains invalid header characters")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiResponse { status: u16, message: String },

    #[error("Judge returned an empty response")]
    EmptyResponse,

    #[error("Malformed judge decision: {0}")]
    Malformed(String),
}
