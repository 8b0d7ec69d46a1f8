use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Integer `{id}` path parameter. Anything that is not an `i32` is a 400.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product {id}")
/// }
///
/// let app = Router::new().route("/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        raw.trim()
            .parse::<i32>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    async fn echo(IdPath(id): IdPath) -> String {
        id.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/{id}", get(echo));
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_integer_ids_are_accepted() {
        assert_eq!(status_for("/42").await, StatusCode::OK);
        assert_eq!(status_for("/-1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_integer_ids_are_rejected() {
        assert_eq!(status_for("/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/1.5").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/99999999999").await, StatusCode::BAD_REQUEST);
    }
}
