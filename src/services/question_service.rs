use crate::{error::ServiceError, feed::fetch_exactly, room::Question, state::SharedState};

/// Fetch `count` questions for a solo practice session.
///
/// Solo play never touches a room document; the questions go straight from
/// the feed to the caller.
pub async fn solo_questions(
    state: &SharedState,
    count: u32,
) -> Result<Vec<Question>, ServiceError> {
    fetch_exactly(state.question_source().as_ref(), count)
        .await
        .map_err(ServiceError::ContentUnavailable)
}
