use serde::Serialize;

pub(crate) mod auth_provider_controller;
pub(crate) mod auth_status_controller;
pub(crate) mod health_check_controller;
pub(crate) mod oauth_controller;
pub(crate) mod supabase_controller;

/// The JSON envelope every endpoint answers with:
/// `{"success": bool, "data"?: ..., "message"?: ...}`.
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
