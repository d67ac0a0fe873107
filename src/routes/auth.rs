use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the calling user, read from the `X-User-Id` header.
///
/// The header is issued by the frontend's sign-in flow; this backend only
/// requires it to be present and non-blank.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub String);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| AppError::Unauthorized("missing user id header `X-User-Id`".into()))?;

        Ok(Self(user_id))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Result<CallerIdentity, AppError> {
        let (mut parts, ()) = request.into_parts();
        CallerIdentity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_the_user_id_header() {
        let request = Request::builder()
            .header("x-user-id", " alice ")
            .body(())
            .unwrap();

        let caller = extract(request).await.unwrap();

        assert_eq!(caller.0, "alice");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();

        let err = extract(request).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn blank_header_is_unauthorized() {
        let request = Request::builder()
            .header("x-user-id", "   ")
            .body(())
            .unwrap();

        let err = extract(request).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
