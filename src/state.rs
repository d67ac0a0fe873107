//! Central application state shared across handlers and background tasks.

use std::{sync::Arc, time::SystemTime};

use tokio::sync::RwLock;

use crate::{
    clock::Clock, dao::room_store::RoomStore, error::ServiceError, feed::QuestionSource,
};

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state storing the storage handle and shared services.
pub struct AppState {
    room_store: RwLock<Option<Arc<dyn RoomStore>>>,
    questions: Arc<dyn QuestionSource>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(questions: Arc<dyn QuestionSource>, clock: Arc<dyn Clock>) -> SharedState {
        Arc::new(Self {
            room_store: RwLock::new(None),
            questions,
            clock,
        })
    }

    /// Obtain a handle to the current room store, if one is installed.
    pub async fn room_store(&self) -> Option<Arc<dyn RoomStore>> {
        let guard = self.room_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain a handle to the current room store, or fail as degraded.
    pub async fn require_room_store(&self) -> Result<Arc<dyn RoomStore>, ServiceError> {
        self.room_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new room store implementation and leave degraded mode.
    pub async fn install_room_store(&self, store: Arc<dyn RoomStore>) {
        let mut guard = self.room_store.write().await;
        *guard = Some(store);
    }

    /// Remove the current room store and enter degraded mode.
    pub async fn clear_room_store(&self) {
        let mut guard = self.room_store.write().await;
        guard.take();
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.room_store.read().await;
        guard.is_none()
    }

    /// Source of quiz questions for new games.
    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.questions)
    }

    /// Current wall-clock instant as seen by the application.
    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        clock::SystemClock, dao::room_store::memory::MemoryRoomStore, feed::StaticQuestionSource,
    };

    fn state() -> SharedState {
        AppState::new(
            Arc::new(StaticQuestionSource::new(Vec::new())),
            Arc::new(SystemClock),
        )
    }

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = state();
        assert!(state.is_degraded().await);
        assert!(matches!(
            state.require_room_store().await,
            Err(ServiceError::Degraded)
        ));

        state
            .install_room_store(Arc::new(MemoryRoomStore::new()))
            .await;

        assert!(!state.is_degraded().await);
        assert!(state.require_room_store().await.is_ok());
    }

    #[tokio::test]
    async fn clearing_the_store_returns_to_degraded_mode() {
        let state = state();
        state
            .install_room_store(Arc::new(MemoryRoomStore::new()))
            .await;

        state.clear_room_store().await;

        assert!(state.is_degraded().await);
    }
}
