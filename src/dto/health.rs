use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Either `ok` or `degraded`.
    pub status: String,
}

impl HealthResponse {
    /// Storage is reachable and the service is fully operational.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }

    /// The service is running without its storage backend.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_owned(),
        }
    }
}
