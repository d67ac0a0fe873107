use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::room_store::{CommitOutcome, RoomId, RoomSnapshot, RoomStore};
use crate::dao::storage::StorageResult;
use crate::room::Room;

/// In-memory room store backing tests and builds without a database.
///
/// Each room lives under its own map key; the commit path holds that key's
/// shard lock while comparing revisions, which gives the same conditional
/// replace semantics the database backends provide.
#[derive(Clone, Default)]
pub struct MemoryRoomStore {
    rooms: Arc<DashMap<RoomId, VersionedRoom>>,
}

#[derive(Debug, Clone)]
struct VersionedRoom {
    version: u64,
    room: Room,
}

impl MemoryRoomStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_room(&self, room: Room) -> RoomId {
        let id = Uuid::new_v4();
        self.rooms.insert(id, VersionedRoom { version: 1, room });
        id
    }

    fn snapshot(&self, id: RoomId) -> Option<RoomSnapshot> {
        self.rooms.get(&id).map(|entry| RoomSnapshot {
            version: entry.version,
            room: entry.room.clone(),
        })
    }

    fn conditional_replace(&self, id: RoomId, expected_version: u64, room: Room) -> CommitOutcome {
        match self.rooms.entry(id) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().version != expected_version {
                    return CommitOutcome::Conflict;
                }
                occupied.insert(VersionedRoom {
                    version: expected_version + 1,
                    room,
                });
                CommitOutcome::Committed
            }
            // A commit against a missing room reports Conflict; the caller's
            // next read resolves it to a not-found error.
            Entry::Vacant(_) => CommitOutcome::Conflict,
        }
    }
}

impl RoomStore for MemoryRoomStore {
    fn create_room(&self, room: Room) -> BoxFuture<'static, StorageResult<RoomId>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.insert_room(room)) })
    }

    fn read_room(&self, id: RoomId) -> BoxFuture<'static, StorageResult<Option<RoomSnapshot>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.snapshot(id)) })
    }

    fn commit_room(
        &self,
        id: RoomId,
        expected_version: u64,
        room: Room,
    ) -> BoxFuture<'static, StorageResult<CommitOutcome>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.conditional_replace(id, expected_version, room)) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
