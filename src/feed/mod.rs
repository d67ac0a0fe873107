//! Question sourcing from the affiliate product feed.

/// HTTP client for the product feed.
pub mod http;

use futures::future::BoxFuture;
use reqwest::StatusCode;
use thiserror::Error;

pub use http::HttpQuestionSource;

use crate::room::Question;

#[cfg(test)]
pub use self::doubles::{FailingQuestionSource, StaticQuestionSource};

/// Convenient result alias returning [`FeedError`] failures.
pub type FeedResult<T> = Result<T, FeedError>;

/// Failures that can occur while fetching questions from the feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP client could not be constructed (TLS setup, proxy, etc).
    #[error("failed to build question feed client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request never reached the feed.
    #[error("failed to request the question feed")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    /// The feed answered with a non-success status.
    #[error("unexpected question feed response status {status}")]
    Status {
        /// The status the feed answered with.
        status: StatusCode,
    },
    /// Response payload could not be parsed.
    #[error("failed to decode the question feed response")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
    /// The feed served fewer items than requested.
    #[error("question feed served {got} items, wanted {want}")]
    NotEnough {
        /// How many items were requested.
        want: u32,
        /// How many items arrived.
        got: usize,
    },
}

/// Provider of priced quiz questions.
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `count` questions from the backing feed.
    fn fetch_questions(&self, count: u32) -> BoxFuture<'static, FeedResult<Vec<Question>>>;
}

/// Fetch exactly `count` questions, trimming surplus and rejecting shortfall.
pub async fn fetch_exactly(source: &dyn QuestionSource, count: u32) -> FeedResult<Vec<Question>> {
    let mut questions = source.fetch_questions(count).await?;
    if questions.len() < count as usize {
        return Err(FeedError::NotEnough {
            want: count,
            got: questions.len(),
        });
    }
    questions.truncate(count as usize);
    Ok(questions)
}

#[cfg(test)]
mod doubles {
    use super::*;

    /// Feed double serving its whole pool regardless of the requested count.
    pub struct StaticQuestionSource {
        pool: Vec<Question>,
    }

    impl StaticQuestionSource {
        pub fn new(pool: Vec<Question>) -> Self {
            Self { pool }
        }
    }

    impl QuestionSource for StaticQuestionSource {
        fn fetch_questions(&self, _count: u32) -> BoxFuture<'static, FeedResult<Vec<Question>>> {
            let served = self.pool.clone();
            Box::pin(async move { Ok(served) })
        }
    }

    /// Feed double that always reports an upstream failure.
    pub struct FailingQuestionSource;

    impl QuestionSource for FailingQuestionSource {
        fn fetch_questions(&self, _count: u32) -> BoxFuture<'static, FeedResult<Vec<Question>>> {
            Box::pin(async move {
                Err(FeedError::Status {
                    status: StatusCode::BAD_GATEWAY,
                })
            })
        }
    }
}
