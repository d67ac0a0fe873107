use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the price quiz backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::rooms::create_room,
        crate::routes::rooms::get_room,
        crate::routes::rooms::join_room,
        crate::routes::rooms::leave_room,
        crate::routes::rooms::set_ready,
        crate::routes::rooms::submit_answer,
        crate::routes::questions::solo_questions,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::rooms::CreateRoomRequest,
            crate::dto::rooms::CreateRoomResponse,
            crate::dto::rooms::JoinRoomRequest,
            crate::dto::rooms::SetReadyRequest,
            crate::dto::rooms::SubmitAnswerRequest,
            crate::dto::rooms::RoomView,
            crate::dto::rooms::MemberView,
            crate::dto::rooms::ScheduleEntryView,
            crate::dto::rooms::MemberAnswersView,
            crate::dto::scene::SceneDto,
            crate::dto::questions::QuestionDto,
        )
    ),
    tags(
        (name = "rooms", description = "Multiplayer room lifecycle"),
        (name = "questions", description = "Solo practice questions"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
