use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    dao::{room_store::RoomId, storage::StorageError},
    feed::FeedError,
    room::RoomError,
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// No room exists under the requested id.
    #[error("room `{0}` does not exist")]
    RoomNotFound(RoomId),
    /// A room rule rejected the requested change.
    #[error(transparent)]
    Room(#[from] RoomError),
    /// The question feed could not satisfy the request.
    #[error("question feed unavailable")]
    ContentUnavailable(#[source] FeedError),
    /// Concurrent writers kept invalidating the commit.
    #[error("room `{room_id}` is under contention, gave up after {attempts} attempts")]
    Contention {
        /// The contended room.
        room_id: RoomId,
        /// How many commits were attempted.
        attempts: u32,
    },
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request payload or parameters were invalid.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The caller did not identify themselves.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request lost against the room's current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
            ServiceError::Degraded => AppError::ServiceUnavailable("degraded mode".into()),
            ServiceError::RoomNotFound(id) => {
                AppError::NotFound(format!("room `{id}` does not exist"))
            }
            ServiceError::Room(rule) => {
                let message = rule.to_string();
                match rule {
                    RoomError::QuestionOutOfRange { .. } => AppError::BadRequest(message),
                    _ => AppError::Conflict(message),
                }
            }
            ServiceError::ContentUnavailable(source) => {
                AppError::ServiceUnavailable(source.to_string())
            }
            contention @ ServiceError::Contention { .. } => {
                AppError::Conflict(contention.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_rule_violations_map_to_conflict() {
        let err = ServiceError::Room(RoomError::AlreadyJoined {
            user_id: "alice".into(),
        });

        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    #[test]
    fn out_of_range_questions_map_to_bad_request() {
        let err = ServiceError::Room(RoomError::QuestionOutOfRange { index: 9, count: 5 });

        assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
    }

    #[test]
    fn contention_maps_to_conflict() {
        let err = ServiceError::Contention {
            room_id: uuid::Uuid::new_v4(),
            attempts: 5,
        };

        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }
}
