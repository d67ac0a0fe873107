//! Application-level configuration loaded from the environment.

use std::{env, time::Duration};

use tracing::warn;

/// Port the HTTP server binds when none is configured.
const DEFAULT_PORT: u16 = 8080;
/// MongoDB instance used when `MONGO_URI` is absent.
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
/// Product feed queried for quiz questions when `QUESTION_FEED_URL` is absent.
const DEFAULT_FEED_URL: &str = "https://seaffood.com/quizlake";
/// Upper bound on a single feed request when `QUESTION_FEED_TIMEOUT_MS` is absent.
const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Port the HTTP server listens on.
    pub port: u16,
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Database name override; the storage backend falls back to its own default.
    pub mongo_db: Option<String>,
    /// Base URL of the question feed.
    pub feed_url: String,
    /// Timeout applied to each feed request.
    pub feed_timeout: Duration,
}

impl AppConfig {
    /// Read the configuration from the environment, keeping built-in defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| match value.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!(value = %value, "ignoring unparsable server port");
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.into());
        let mongo_db = env::var("MONGO_DB").ok().filter(|name| !name.is_empty());

        let feed_url = env::var("QUESTION_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.into());
        let feed_timeout = env::var("QUESTION_FEED_TIMEOUT_MS")
            .ok()
            .and_then(|value| match value.parse::<u64>() {
                Ok(millis) => Some(Duration::from_millis(millis)),
                Err(_) => {
                    warn!(value = %value, "ignoring unparsable feed timeout");
                    None
                }
            })
            .unwrap_or(DEFAULT_FEED_TIMEOUT);

        Self {
            port,
            mongo_uri,
            mongo_db,
            feed_url,
            feed_timeout,
        }
    }
}
