use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

use super::models::DocumentShapeError;

/// Result alias for MongoDB room-store operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures specific to the MongoDB backend.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection URI did not parse.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// The URI that was rejected.
        uri: String,
        #[source]
        /// Driver error describing the problem.
        source: MongoError,
    },
    /// Client construction from parsed options failed.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        /// Driver error describing the problem.
        source: MongoError,
    },
    /// The server never answered the initial ping.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Number of pings sent before giving up.
        attempts: u32,
        #[source]
        /// Last ping failure.
        source: MongoError,
    },
    /// A routine health ping failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        /// Driver error describing the problem.
        source: MongoError,
    },
    /// Inserting a fresh room document failed.
    #[error("failed to create room `{id}`")]
    CreateRoom {
        /// Identifier assigned to the room.
        id: Uuid,
        #[source]
        /// Driver error describing the problem.
        source: MongoError,
    },
    /// Reading a room document failed.
    #[error("failed to load room `{id}`")]
    LoadRoom {
        /// Identifier of the room.
        id: Uuid,
        #[source]
        /// Driver error describing the problem.
        source: MongoError,
    },
    /// The conditional replace of a room document failed.
    #[error("failed to commit room `{id}`")]
    CommitRoom {
        /// Identifier of the room.
        id: Uuid,
        #[source]
        /// Driver error describing the problem.
        source: MongoError,
    },
    /// A stored document does not map back to a room value.
    #[error("room `{id}` has an unreadable document")]
    DecodeRoom {
        /// Identifier of the room.
        id: Uuid,
        #[source]
        /// What part of the document was malformed.
        source: DocumentShapeError,
    },
}
