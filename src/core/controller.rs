use std::sync::Arc;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::{ErrorCode, LibraryError};
use crate::users::domain::UserService;

#[derive(Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) catalog_service: Arc<dyn CatalogService>,
    pub(crate) user_service: Arc<dyn UserService>,
}

impl AppState {
    pub fn new(config: Configuration,
               catalog_service: Arc<dyn CatalogService>,
               user_service: Arc<dyn UserService>) -> AppState {
        AppState {
            config,
            catalog_service,
            user_service,
        }
    }
}

// ApiResponse is the uniform envelope wrapped around every response body
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        ApiResponse {
            success: true,
            code: None,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn empty(message: &str) -> Self {
        ApiResponse {
            success: true,
            code: None,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn failure(code: ErrorCode, message: &str) -> Self {
        ApiResponse {
            success: false,
            code: Some(code.code().to_string()),
            message: message.to_string(),
            data: None,
        }
    }
}

pub(crate) type ApiResult<T> = Result<Json<ApiResponse<T>>, ServerError>;

#[derive(Debug)]
pub struct ServerError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ServerError {
    pub fn new(code: ErrorCode, message: &str) -> Self {
        ServerError {
            status: code.status(),
            code,
            message: message.to_string(),
        }
    }

    pub fn invalid_request(message: &str) -> Self {
        ServerError::new(ErrorCode::InvalidRequest, message)
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::invalid_request(format!("{}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let code = err.error_code();
        if code.status().is_server_error() {
            tracing::error!(code = code.code(), error = ?err, "request failed");
        } else {
            tracing::debug!(code = code.code(), error = ?err, "request rejected");
        }
        let message = err.detail().unwrap_or_else(|| code.message()).to_string();
        ServerError {
            status: code.status(),
            code,
            message,
        }
    }
}

impl From<LibraryError> for ServerError {
    fn from(err: LibraryError) -> Self {
        ServerError::from(CommandError::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::failure(self.code, self.message.as_str()))).into_response()
    }
}
