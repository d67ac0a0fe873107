use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::questions::{QuestionDto, SoloQuestionsQuery},
    error::AppError,
    services::question_service,
    state::SharedState,
};

/// Routes serving quiz questions outside of any room, for solo play.
pub fn router() -> Router<SharedState> {
    Router::new().route("/questions", get(solo_questions))
}

/// Fetch a batch of questions straight from the feed.
#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(("count" = u32, Query, description = "Number of questions to fetch, 1 to 50")),
    responses((status = 200, description = "Questions ready to play", body = [QuestionDto]),
    (status = 503, description = "Question feed unreachable"))
)]
pub async fn solo_questions(
    State(state): State<SharedState>,
    Valid(Query(query)): Valid<Query<SoloQuestionsQuery>>,
) -> Result<Json<Vec<QuestionDto>>, AppError> {
    let questions = question_service::solo_questions(&state, query.count).await?;
    Ok(Json(questions.into_iter().map(QuestionDto::from).collect()))
}
