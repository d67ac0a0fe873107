use std::sync::Arc;

use futures::future::BoxFuture;
use mongodb::{Collection, Database, bson::doc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::connect_with_retry,
    error::{MongoDaoError, MongoResult},
    models::{MongoRoomDocument, doc_id, uuid_as_binary},
};
use crate::dao::{
    room_store::{CommitOutcome, RoomId, RoomSnapshot, RoomStore},
    storage::StorageResult,
};
use crate::room::Room;

const ROOM_COLLECTION_NAME: &str = "rooms";

/// Room store backed by a MongoDB collection, one document per room.
#[derive(Clone)]
pub struct MongoRoomStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let database =
            connect_with_retry(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.database = database;
        Ok(())
    }
}

impl MongoRoomStore {
    /// Establish a connection to MongoDB.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let database = connect_with_retry(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { database }),
            config,
        });

        Ok(Self { inner })
    }

    async fn collection(&self) -> Collection<MongoRoomDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoRoomDocument>(ROOM_COLLECTION_NAME)
    }

    async fn insert_room(&self, room: Room) -> MongoResult<RoomId> {
        let id = Uuid::new_v4();
        let document = MongoRoomDocument::from_room(id, 1, room);
        let collection = self.collection().await;

        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::CreateRoom { id, source })?;

        Ok(id)
    }

    async fn find_room(&self, id: RoomId) -> MongoResult<Option<RoomSnapshot>> {
        let collection = self.collection().await;

        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadRoom { id, source })?;

        match document {
            Some(document) => {
                let snapshot = document
                    .into_snapshot()
                    .map_err(|source| MongoDaoError::DecodeRoom { id, source })?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    async fn replace_room(
        &self,
        id: RoomId,
        expected_version: u64,
        room: Room,
    ) -> MongoResult<CommitOutcome> {
        let document = MongoRoomDocument::from_room(id, expected_version + 1, room);
        let collection = self.collection().await;

        // The filter pins both id and revision, so a concurrent commit
        // leaves matched_count at zero. No upsert: a vanished document must
        // surface as a conflict rather than be resurrected.
        let filter = doc! {
            "_id": uuid_as_binary(id),
            "version": expected_version as i64,
        };
        let result = collection
            .replace_one(filter, &document)
            .await
            .map_err(|source| MongoDaoError::CommitRoom { id, source })?;

        if result.matched_count == 0 {
            Ok(CommitOutcome::Conflict)
        } else {
            Ok(CommitOutcome::Committed)
        }
    }
}

impl RoomStore for MongoRoomStore {
    fn create_room(&self, room: Room) -> BoxFuture<'static, StorageResult<RoomId>> {
        let store = self.clone();
        Box::pin(async move { store.insert_room(room).await.map_err(Into::into) })
    }

    fn read_room(&self, id: RoomId) -> BoxFuture<'static, StorageResult<Option<RoomSnapshot>>> {
        let store = self.clone();
        Box::pin(async move { store.find_room(id).await.map_err(Into::into) })
    }

    fn commit_room(
        &self,
        id: RoomId,
        expected_version: u64,
        room: Room,
    ) -> BoxFuture<'static, StorageResult<CommitOutcome>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .replace_room(id, expected_version, room)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
