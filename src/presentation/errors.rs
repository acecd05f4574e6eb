// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::services::tool_service::ToolServiceError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<ValidationErrors>().is_some() {
            return StatusCode::BAD_REQUEST;
        }

        match self.0.downcast_ref::<ToolServiceError>() {
            Some(ToolServiceError::AlreadyExists) | Some(ToolServiceError::Unreachable(_)) => {
                StatusCode::BAD_REQUEST
            }
            Some(ToolServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(ToolServiceError::Repository(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", error_message);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::tool_repository::RepositoryError;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(ToolServiceError::AlreadyExists).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ToolServiceError::Unreachable("https://x.test/".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ToolServiceError::NotFound(Uuid::nil())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ToolServiceError::Repository(RepositoryError::Internal(
                "boom".into()
            )))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ValidationErrors::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("other")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
