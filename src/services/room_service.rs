use std::sync::Arc;

use tracing::info;

use crate::{
    dao::room_store::RoomId,
    dto::rooms::RoomView,
    error::ServiceError,
    feed::fetch_exactly,
    room::{ReadyUpdate, Room, RoomMember},
    services::transaction::with_room,
    state::SharedState,
};

/// Open a fresh room with `creator` as its only member.
pub async fn create_room(
    state: &SharedState,
    creator: RoomMember,
    time_limit_seconds: u32,
    question_count: u32,
) -> Result<RoomId, ServiceError> {
    let store = state.require_room_store().await?;
    let room = Room::open(creator, time_limit_seconds, question_count, state.now());

    let room_id = store.create_room(room).await?;
    info!(room_id = %room_id, "room created");
    Ok(room_id)
}

/// Project the current state of a room for a client.
pub async fn room_view(state: &SharedState, room_id: RoomId) -> Result<RoomView, ServiceError> {
    let store = state.require_room_store().await?;
    let snapshot = store
        .read_room(room_id)
        .await?
        .ok_or(ServiceError::RoomNotFound(room_id))?;

    Ok(RoomView::project(room_id, &snapshot.room, state.now()))
}

/// Add `member` to a room that is still recruiting.
pub async fn join_room(
    state: &SharedState,
    room_id: RoomId,
    member: RoomMember,
) -> Result<(), ServiceError> {
    let store = state.require_room_store().await?;
    let user_id = member.user_id.clone();

    with_room(store.as_ref(), room_id, |room| {
        let member = member.clone();
        async move { Ok((room.join(member)?, ())) }
    })
    .await?;

    info!(room_id = %room_id, user_id = %user_id, "member joined");
    Ok(())
}

/// Remove a member from a room that is still recruiting.
pub async fn leave_room(
    state: &SharedState,
    room_id: RoomId,
    user_id: &str,
) -> Result<(), ServiceError> {
    let store = state.require_room_store().await?;

    with_room(store.as_ref(), room_id, |room| {
        let user_id = user_id.to_owned();
        async move { Ok((room.leave(&user_id)?, ())) }
    })
    .await?;

    info!(room_id = %room_id, user_id = %user_id, "member left");
    Ok(())
}

/// Flip a member's ready marker, starting the game once everyone is ready.
///
/// The final ready mark fetches questions from the feed and commits the
/// started room in the same cycle, so either the whole transition lands or
/// none of it does.
pub async fn set_ready(
    state: &SharedState,
    room_id: RoomId,
    user_id: &str,
    ready: bool,
) -> Result<(), ServiceError> {
    let store = state.require_room_store().await?;

    let started = with_room(store.as_ref(), room_id, |room| {
        let state = Arc::clone(state);
        let user_id = user_id.to_owned();
        async move {
            match room.set_ready(&user_id, ready)? {
                ReadyUpdate::Updated(next) => Ok((next, false)),
                ReadyUpdate::AllReady(inviting) => {
                    let questions =
                        fetch_exactly(state.question_source().as_ref(), inviting.question_count())
                            .await
                            .map_err(ServiceError::ContentUnavailable)?;
                    let next = inviting.start(questions, state.now());
                    Ok((next, true))
                }
            }
        }
    })
    .await?;

    if started {
        info!(room_id = %room_id, "all members ready; game started");
    }
    Ok(())
}

/// Record a member's price guess for the currently open question.
pub async fn submit_answer(
    state: &SharedState,
    room_id: RoomId,
    user_id: &str,
    question_index: u32,
    price: i64,
) -> Result<(), ServiceError> {
    let store = state.require_room_store().await?;

    let all_answered = with_room(store.as_ref(), room_id, |room| {
        let state = Arc::clone(state);
        let user_id = user_id.to_owned();
        async move {
            let recorded = room.submit_answer(&user_id, question_index, price, state.now())?;
            Ok((recorded.room, recorded.all_answered))
        }
    })
    .await?;

    if all_answered {
        info!(
            room_id = %room_id,
            question_index,
            "every member answered; schedule pulled forward"
        );
    }
    Ok(())
}
