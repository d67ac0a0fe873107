use std::time::Duration;

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tokio::time::sleep;
use tracing::warn;

use super::error::{MongoDaoError, MongoResult};

const PING_ATTEMPTS: u32 = 10;
const PING_INITIAL_BACKOFF: Duration = Duration::from_millis(250);
const PING_MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Build a client from `options` and ping `database_name` until it answers.
///
/// The server may still be warming up when the process starts, so the first
/// pings are retried with a doubling backoff before the connection is
/// declared dead.
pub async fn connect_with_retry(
    options: &ClientOptions,
    database_name: &str,
) -> MongoResult<Database> {
    let client = Client::with_options(options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(database_name);

    let mut backoff = PING_INITIAL_BACKOFF;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => return Ok(database),
            Err(source) if attempt >= PING_ATTEMPTS => {
                return Err(MongoDaoError::InitialPing {
                    attempts: attempt,
                    source,
                });
            }
            Err(_) => {
                warn!(
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    "mongodb ping failed, retrying"
                );
                sleep(backoff).await;
                backoff = (backoff * 2).min(PING_MAX_BACKOFF);
            }
        }
    }
}
