pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::storage::StorageResult;
use crate::room::Room;

/// Identifier a store assigns to a room when it is first persisted.
pub type RoomId = Uuid;

/// A room value together with the revision it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    /// Revision the room value was read at; passed back on commit.
    pub version: u64,
    /// The whole room document.
    pub room: Room,
}

/// Outcome of a conditional commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The store accepted the write and bumped the revision.
    Committed,
    /// Another writer committed since the snapshot was read; the caller must
    /// retry from a fresh read.
    Conflict,
}

/// Abstraction over the persistence layer for room documents.
///
/// A room is stored as one whole document; `read_room` returns it with its
/// revision and `commit_room` replaces it only when the revision is still the
/// one that was read. A read/commit pair therefore forms an optimistic
/// transaction, and the document is the consistency boundary: backends never
/// update sub-fields independently.
pub trait RoomStore: Send + Sync {
    /// Persist a fresh room and return its generated identifier.
    fn create_room(&self, room: Room) -> BoxFuture<'static, StorageResult<RoomId>>;
    /// Read the current snapshot of a room, or `None` when it does not exist.
    fn read_room(&self, id: RoomId) -> BoxFuture<'static, StorageResult<Option<RoomSnapshot>>>;
    /// Replace the room document if its revision still equals
    /// `expected_version`.
    fn commit_room(
        &self,
        id: RoomId,
        expected_version: u64,
        room: Room,
    ) -> BoxFuture<'static, StorageResult<CommitOutcome>>;
    /// Cheap liveness probe against the backend.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Drop and re-establish the backend connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
