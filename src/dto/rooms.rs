use std::{collections::BTreeMap, time::SystemTime};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        format_system_time, questions::QuestionDto, scene::SceneDto,
        validation::validate_integral_price,
    },
    room::Room,
};

/// Payload used to open a new room.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRoomRequest {
    /// Name shown to other members.
    #[serde(default = "default_display_name")]
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
    /// Seconds each question stays open for guesses.
    #[serde(default = "default_time_limit_seconds")]
    #[validate(range(min = 1, max = 600))]
    pub time_limit_seconds: u32,
    /// How many questions the game runs.
    #[serde(default = "default_question_count")]
    #[validate(range(min = 1, max = 50))]
    pub question_count: u32,
}

fn default_display_name() -> String {
    "default".to_owned()
}

fn default_time_limit_seconds() -> u32 {
    30
}

fn default_question_count() -> u32 {
    5
}

/// Identifier of a freshly created room.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRoomResponse {
    pub room_id: Uuid,
}

/// Payload for joining an open room.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct JoinRoomRequest {
    /// Name shown to other members.
    #[serde(default = "default_display_name")]
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
}

/// Payload flipping the caller's ready marker.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetReadyRequest {
    pub ready: bool,
}

/// Payload recording a price guess.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAnswerRequest {
    /// Zero-based index of the question being answered.
    pub question_index: u32,
    /// Guessed price; must be a whole number.
    pub price: f64,
}

impl Validate for SubmitAnswerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(err) = validate_integral_price(self.price) {
            errors.add("price", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl SubmitAnswerRequest {
    /// The guess as the integer it was validated to be.
    pub fn price_as_i64(&self) -> i64 {
        self.price as i64
    }
}

/// Full projection of a room document returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomView {
    pub room_id: Uuid,
    /// Lifecycle phase, `inviting_members` or `game_started`.
    pub status: String,
    pub members: Vec<MemberView>,
    pub time_limit_seconds: u32,
    pub question_count: u32,
    /// Forward plan of scenes with their start instants.
    pub schedule: Vec<ScheduleEntryView>,
    /// Scene on display right now, if the schedule has begun.
    pub current_scene: Option<SceneDto>,
    /// Whether the game has reached its final scene.
    pub ended: bool,
    /// Questions of a started game, empty while recruiting.
    pub questions: Vec<QuestionDto>,
    /// Recorded guesses of a started game, empty while recruiting.
    pub answers: Vec<MemberAnswersView>,
}

/// A member plus their ready marker.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberView {
    pub user_id: String,
    pub display_name: String,
    pub ready: bool,
}

/// One schedule slot on the wire.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleEntryView {
    pub scene: SceneDto,
    /// RFC 3339 instant at which the scene starts.
    pub starts_at: String,
}

/// Guesses one member has recorded so far, keyed by question index.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberAnswersView {
    pub user_id: String,
    pub answers: BTreeMap<u32, i64>,
}

impl RoomView {
    /// Project `room` as of `now`.
    pub fn project(room_id: Uuid, room: &Room, now: SystemTime) -> Self {
        let schedule = room.schedule();

        let members = room
            .members()
            .iter()
            .map(|member| MemberView {
                user_id: member.user_id.clone(),
                display_name: member.display_name.clone(),
                ready: room.is_member_ready(&member.user_id),
            })
            .collect();

        let (status, questions, answers) = match room {
            Room::InvitingMembers(_) => ("inviting_members", Vec::new(), Vec::new()),
            Room::GameStarted(game) => (
                "game_started",
                game.questions()
                    .iter()
                    .cloned()
                    .map(QuestionDto::from)
                    .collect(),
                game.answers()
                    .iter()
                    .map(|(user_id, answers)| MemberAnswersView {
                        user_id: user_id.to_owned(),
                        answers: answers.clone(),
                    })
                    .collect(),
            ),
        };

        Self {
            room_id,
            status: status.to_owned(),
            members,
            time_limit_seconds: room.time_limit_seconds(),
            question_count: room.question_count(),
            schedule: schedule
                .entries()
                .iter()
                .map(|entry| ScheduleEntryView {
                    scene: SceneDto::from(entry.scene),
                    starts_at: format_system_time(entry.starts_at),
                })
                .collect(),
            current_scene: schedule.current_scene(now).map(SceneDto::from),
            ended: schedule.ended(now),
            questions,
            answers,
        }
    }
}
