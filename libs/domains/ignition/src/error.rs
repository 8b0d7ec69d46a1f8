use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IgnitionError {
    #[error("No engine configured for variant: {0}")]
    UnknownEngine(String),
}

pub type IgnitionResult<T> = Result<T, IgnitionError>;

impl From<IgnitionError> for AppError {
    fn from(err: IgnitionError) -> Self {
        match err {
            err @ IgnitionError::UnknownEngine(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for IgnitionError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_unknown_engine_is_not_found() {
        let err = IgnitionError::UnknownEngine("diesel".to_string());
        assert_eq!(err.to_string(), "No engine configured for variant: diesel");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
