use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::room::Question;

/// A priced product question as served to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionDto {
    pub title: String,
    pub price: i64,
    pub image_url: String,
    pub link_url: String,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        Self {
            title: question.title,
            price: question.price,
            image_url: question.image_url,
            link_url: question.link_url,
        }
    }
}

/// Query parameters for the solo questions endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct SoloQuestionsQuery {
    /// How many questions to fetch.
    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 50))]
    pub count: u32,
}

fn default_count() -> u32 {
    5
}
