//! Optimistic concurrency control for room mutations.
//!
//! Every mutation follows the same cycle: read the room document, apply a
//! pure function to it, then commit the result conditioned on the revision
//! that was read. A concurrent writer invalidates the commit, in which case
//! the cycle restarts against the fresh document.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use crate::{
    dao::room_store::{CommitOutcome, RoomId, RoomStore},
    error::ServiceError,
    room::Room,
};

/// How many commit attempts are made before giving up on a contended room.
pub const MAX_COMMIT_ATTEMPTS: u32 = 5;

const BACKOFF_BASE: Duration = Duration::from_millis(10);
const BACKOFF_CAP: Duration = Duration::from_millis(80);

#[cfg(test)]
pub use self::contention::ContendingStore;

/// Run `apply` against the current room value and commit the result.
///
/// The room is read fresh on every attempt, so `apply` may run several times
/// and must derive everything from the room value it is handed plus its
/// captured inputs. Errors returned by `apply` abort the cycle without
/// committing anything.
pub async fn with_room<T, F, Fut>(
    store: &dyn RoomStore,
    room_id: RoomId,
    apply: F,
) -> Result<T, ServiceError>
where
    F: Fn(Room) -> Fut,
    Fut: std::future::Future<Output = Result<(Room, T), ServiceError>>,
{
    let mut attempt = 1;

    loop {
        let snapshot = store
            .read_room(room_id)
            .await?
            .ok_or(ServiceError::RoomNotFound(room_id))?;

        let (next, value) = apply(snapshot.room).await?;

        match store.commit_room(room_id, snapshot.version, next).await? {
            CommitOutcome::Committed => return Ok(value),
            CommitOutcome::Conflict => {
                if attempt >= MAX_COMMIT_ATTEMPTS {
                    return Err(ServiceError::Contention {
                        room_id,
                        attempts: attempt,
                    });
                }

                let backoff = commit_backoff(attempt);
                debug!(
                    room_id = %room_id,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    "room commit conflicted; retrying"
                );
                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}

/// Capped exponential backoff plus an equal-sized random extra, so
/// contending writers spread out instead of retrying in lockstep.
fn commit_backoff(attempt: u32) -> Duration {
    let doubled = BACKOFF_BASE.saturating_mul(1 << attempt.saturating_sub(1).min(8));
    let capped = doubled.min(BACKOFF_CAP);
    let jitter = rand::rng().random_range(0..=capped.as_millis() as u64);
    capped + Duration::from_millis(jitter)
}
