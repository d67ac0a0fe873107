use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Database this backend uses when none is configured.
const DEFAULT_DATABASE: &str = "price_quiz";

/// Parsed MongoDB connection settings.
#[derive(Clone)]
pub struct MongoConfig {
    /// Driver options parsed from the connection URI.
    pub options: ClientOptions,
    /// Database holding the room collection.
    pub database_name: String,
}

impl MongoConfig {
    /// Parse `uri` into client options, using `db_name` (or the built-in
    /// default) as the target database.
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let database_name = db_name.unwrap_or(DEFAULT_DATABASE).to_owned();
        let options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;

        Ok(Self {
            options,
            database_name,
        })
    }
}
