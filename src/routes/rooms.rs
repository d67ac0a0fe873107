use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::rooms::{
        CreateRoomRequest, CreateRoomResponse, JoinRoomRequest, RoomView, SetReadyRequest,
        SubmitAnswerRequest,
    },
    error::AppError,
    room::RoomMember,
    routes::auth::CallerIdentity,
    services::room_service,
    state::SharedState,
};

/// Routes handling room lifecycle: creation, membership, readiness and answers.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms/{id}", get(get_room))
        .route("/rooms/{id}/join", post(join_room))
        .route("/rooms/{id}/leave", post(leave_room))
        .route("/rooms/{id}/ready", put(set_ready))
        .route("/rooms/{id}/answers", post(submit_answer))
}

/// Open a new room with the caller as its first member.
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    params(("X-User-Id" = String, Header, description = "Identifier of the calling user")),
    request_body = CreateRoomRequest,
    responses((status = 200, description = "Room created", body = CreateRoomResponse))
)]
pub async fn create_room(
    State(state): State<SharedState>,
    caller: CallerIdentity,
    Valid(Json(payload)): Valid<Json<CreateRoomRequest>>,
) -> Result<Json<CreateRoomResponse>, AppError> {
    let creator = RoomMember {
        user_id: caller.0,
        display_name: payload.display_name,
    };
    let room_id = room_service::create_room(
        &state,
        creator,
        payload.time_limit_seconds,
        payload.question_count,
    )
    .await?;

    Ok(Json(CreateRoomResponse { room_id }))
}

/// Retrieve the current view of a room, including the scene active right now.
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "rooms",
    params(("id" = String, Path, description = "Identifier of the room to retrieve")),
    responses((status = 200, description = "Room state", body = RoomView),
    (status = 404, description = "Unknown room"))
)]
pub async fn get_room(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomView>, AppError> {
    Ok(Json(room_service::room_view(&state, id).await?))
}

/// Join a room that is still recruiting members.
#[utoipa::path(
    post,
    path = "/rooms/{id}/join",
    tag = "rooms",
    params(("X-User-Id" = String, Header, description = "Identifier of the calling user"),
    ("id" = String, Path, description = "Identifier of the room to join")),
    request_body = JoinRoomRequest,
    responses((status = 204, description = "Joined the room"))
)]
pub async fn join_room(
    State(state): State<SharedState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<JoinRoomRequest>>,
) -> Result<StatusCode, AppError> {
    let member = RoomMember {
        user_id: caller.0,
        display_name: payload.display_name,
    };
    room_service::join_room(&state, id, member).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Leave a room. Departure never starts the game, even if everyone left is ready.
#[utoipa::path(
    post,
    path = "/rooms/{id}/leave",
    tag = "rooms",
    params(("X-User-Id" = String, Header, description = "Identifier of the calling user"),
    ("id" = String, Path, description = "Identifier of the room to leave")),
    responses((status = 204, description = "Left the room"))
)]
pub async fn leave_room(
    State(state): State<SharedState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    room_service::leave_room(&state, id, &caller.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark the caller ready or not. The last member to become ready starts the game.
#[utoipa::path(
    put,
    path = "/rooms/{id}/ready",
    tag = "rooms",
    params(("X-User-Id" = String, Header, description = "Identifier of the calling user"),
    ("id" = String, Path, description = "Identifier of the room")),
    request_body = SetReadyRequest,
    responses((status = 204, description = "Readiness recorded"))
)]
pub async fn set_ready(
    State(state): State<SharedState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetReadyRequest>,
) -> Result<StatusCode, AppError> {
    room_service::set_ready(&state, id, &caller.0, payload.ready).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record the caller's price guess for one question of a running game.
#[utoipa::path(
    post,
    path = "/rooms/{id}/answers",
    tag = "rooms",
    params(("X-User-Id" = String, Header, description = "Identifier of the calling user"),
    ("id" = String, Path, description = "Identifier of the room")),
    request_body = SubmitAnswerRequest,
    responses((status = 204, description = "Answer recorded"))
)]
pub async fn submit_answer(
    State(state): State<SharedState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<SubmitAnswerRequest>>,
) -> Result<StatusCode, AppError> {
    room_service::submit_answer(
        &state,
        id,
        &caller.0,
        payload.question_index,
        payload.price_as_i64(),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
