use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{room_store::RoomStore, storage::StorageError},
    state::SharedState,
};

const BASE_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Connect to the storage backend and keep the shared state in degraded mode
/// while it is unavailable.
///
/// The supervisor owns the whole storage lifecycle: it dials the backend with
/// `connect`, installs the store into `state` once it answers, then watches
/// its health until the connection is lost for good and the cycle restarts.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn RoomStore>, StorageError>> + Send,
{
    let mut delay = BASE_DELAY;

    loop {
        let store = match connect().await {
            Ok(store) => store,
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
                continue;
            }
        };

        state.install_room_store(store.clone()).await;
        info!("storage connection established; leaving degraded mode");
        delay = BASE_DELAY;

        watch(&state, &store).await;

        sleep(delay).await;
        delay = (delay * 2).min(MAX_DELAY);
    }
}

/// Poll the store's health until its reconnect attempts run out.
async fn watch(state: &SharedState, store: &Arc<dyn RoomStore>) {
    loop {
        if store.health_check().await.is_ok() {
            if state.is_degraded().await {
                info!("storage healthy again; leaving degraded mode");
                state.install_room_store(store.clone()).await;
            }
            sleep(HEALTH_POLL_INTERVAL).await;
            continue;
        }

        if recover(state, store).await {
            state.install_room_store(store.clone()).await;
            sleep(HEALTH_POLL_INTERVAL).await;
        } else {
            warn!("exhausted storage reconnect attempts; staying in degraded mode");
            return;
        }
    }
}

/// Run a bounded series of reconnect attempts after a failed health check.
///
/// The service degrades as soon as the first attempt fails, so requests stop
/// hitting a store that is known to be down. Returns whether the connection
/// came back.
async fn recover(state: &SharedState, store: &Arc<dyn RoomStore>) -> bool {
    let mut backoff = BASE_DELAY;

    for attempt in 0..MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => {
                info!("storage reconnection succeeded after health check failure");
                return true;
            }
            Err(err) if attempt == 0 => {
                warn!(
                    attempt, error = %err,
                    "storage reconnect first attempt failed; entering degraded mode"
                );
                state.clear_room_store().await;
            }
            Err(err) => {
                warn!(attempt, error = %err, "storage reconnect attempt failed");
            }
        }

        sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_DELAY);
    }

    false
}
