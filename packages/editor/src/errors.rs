//! Error types for the editor

use crate::store::ApiError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EditorError {
    fn from(e: serde_json::Error) -> Self {
        EditorError::Serialization(e.to_string())
    }
}

impl EditorError {
    /// Message fit for a notification shown to the creator
    pub fn user_message(&self) -> String {
        match self {
            EditorError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
