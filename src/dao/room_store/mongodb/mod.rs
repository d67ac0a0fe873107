mod config;
mod connection;
mod error;
mod models;
/// MongoDB-backed room store implementation.
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoRoomStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        let message = err.to_string();
        match err {
            err @ MongoDaoError::DecodeRoom { .. } => StorageError::corrupted(message, err),
            err => StorageError::unavailable(message, err),
        }
    }
}
