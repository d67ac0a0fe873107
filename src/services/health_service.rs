use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Build the health payload, logging connectivity issues along the way.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let Ok(store) = state.require_room_store().await else {
        warn!("storage unavailable (degraded mode)");
        return HealthResponse::degraded();
    };

    if let Err(err) = store.health_check().await {
        warn!(error = %err, "storage health check failed");
    }

    HealthResponse::ok()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        clock::SystemClock, dao::room_store::memory::MemoryRoomStore, feed::StaticQuestionSource,
        state::AppState,
    };

    fn state() -> SharedState {
        AppState::new(
            Arc::new(StaticQuestionSource::new(Vec::new())),
            Arc::new(SystemClock),
        )
    }

    #[tokio::test]
    async fn reports_degraded_without_a_store() {
        let state = state();

        let status = health_status(&state).await;

        assert_eq!(status.status, "degraded");
    }

    #[tokio::test]
    async fn reports_ok_with_a_store_installed() {
        let state = state();
        state
            .install_room_store(Arc::new(MemoryRoomStore::new()))
            .await;

        let status = health_status(&state).await;

        assert_eq!(status.status, "ok");
    }
}
