use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;

use super::{FeedError, FeedResult, QuestionSource};
use crate::room::Question;

/// One feed item as served on the wire.
#[derive(Debug, Deserialize)]
struct FeedItem {
    quiz: String,
    answer: i64,
    #[serde(default)]
    images: Vec<FeedImage>,
    #[serde(default)]
    affiliatelink: String,
}

#[derive(Debug, Deserialize)]
struct FeedImage {
    #[serde(rename = "imageUrl")]
    image_url: String,
}

impl From<FeedItem> for Question {
    fn from(item: FeedItem) -> Self {
        Question {
            title: item.quiz,
            price: item.answer,
            image_url: item
                .images
                .into_iter()
                .next()
                .map(|image| image.image_url)
                .unwrap_or_default(),
            link_url: item.affiliatelink,
        }
    }
}

/// Question source talking to the product feed over HTTP.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    base_url: Arc<str>,
}

impl HttpQuestionSource {
    /// Build a client for the feed at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FeedError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    async fn fetch(&self, count: u32) -> FeedResult<Vec<Question>> {
        let response = self
            .client
            .get(self.base_url.as_ref())
            .query(&[("hits", count)])
            .send()
            .await
            .map_err(|source| FeedError::Request { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status { status });
        }

        let items = response
            .json::<Vec<FeedItem>>()
            .await
            .map_err(|source| FeedError::Decode { source })?;

        Ok(items.into_iter().map(Question::from).collect())
    }
}

impl QuestionSource for HttpQuestionSource {
    fn fetch_questions(&self, count: u32) -> BoxFuture<'static, FeedResult<Vec<Question>>> {
        let source = self.clone();
        Box::pin(async move { source.fetch(count).await })
    }
}
