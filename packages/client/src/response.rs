use potatopay_editor::ApiError;
use serde::{Deserialize, Serialize};

/// `{ success, data, message? }` envelope of every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// `success: false` is a rejection regardless of `data`
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected { message: self.message });
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful response without data".to_string()))
    }

    /// For writes, where `data` carries nothing of interest
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected { message: self.message })
        }
    }
}
