use std::collections::{BTreeMap, BTreeSet};

use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::dao::room_store::RoomSnapshot;
use crate::room::{
    AnswerLedger, GameStarted, InvitingMembers, Question, Room, RoomMember, Scene, Schedule,
    ScheduleEntry,
};

/// A persisted document that cannot be mapped back to a room value.
#[derive(Debug, Error)]
pub enum DocumentShapeError {
    /// A question scene entry lost its index.
    #[error("schedule entry of kind `{kind}` is missing its question index")]
    MissingQuestionIndex {
        /// The scene kind of the offending entry.
        kind: &'static str,
    },
    /// The revision counter is outside the representable range.
    #[error("document carries negative version {version}")]
    NegativeVersion {
        /// The stored value.
        version: i64,
    },
}

/// Whole-room document stored in the rooms collection.
///
/// Both lifecycle phases share one shape discriminated by `status`; the
/// phase-specific fields default to empty so inviting-phase documents stay
/// small.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoRoomDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    version: i64,
    status: RoomStatus,
    members: Vec<MemberDocument>,
    #[serde(default)]
    ready: Vec<String>,
    time_limit_seconds: u32,
    question_count: u32,
    schedule: Vec<ScheduleEntryDocument>,
    #[serde(default)]
    questions: Vec<QuestionDocument>,
    #[serde(default)]
    answers: Vec<AnswerDocument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RoomStatus {
    InvitingMembers,
    GameStarted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemberDocument {
    user_id: String,
    display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduleEntryDocument {
    scene: SceneKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    question_index: Option<u32>,
    starts_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SceneKind {
    Lobby,
    QuizSubmit,
    QuizAnswer,
    GameResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuestionDocument {
    title: String,
    price: i64,
    image_url: String,
    link_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnswerDocument {
    user_id: String,
    question_index: u32,
    price: i64,
}

impl MongoRoomDocument {
    /// Flatten a room value into its document form at `version`.
    pub fn from_room(id: Uuid, version: u64, room: Room) -> Self {
        let time_limit_seconds = room.time_limit_seconds();
        let question_count = room.question_count();

        match room {
            Room::InvitingMembers(inviting) => Self {
                id,
                version: version as i64,
                status: RoomStatus::InvitingMembers,
                members: member_documents(inviting.members()),
                ready: inviting.ready_ids().map(str::to_owned).collect(),
                time_limit_seconds,
                question_count,
                schedule: schedule_documents(inviting.schedule()),
                questions: Vec::new(),
                answers: Vec::new(),
            },
            Room::GameStarted(game) => Self {
                id,
                version: version as i64,
                status: RoomStatus::GameStarted,
                members: member_documents(game.members()),
                ready: Vec::new(),
                time_limit_seconds,
                question_count,
                schedule: schedule_documents(game.schedule()),
                questions: game
                    .questions()
                    .iter()
                    .map(|question| QuestionDocument {
                        title: question.title.clone(),
                        price: question.price,
                        image_url: question.image_url.clone(),
                        link_url: question.link_url.clone(),
                    })
                    .collect(),
                answers: game
                    .answers()
                    .iter()
                    .flat_map(|(user_id, answers)| {
                        answers.iter().map(move |(&question_index, &price)| {
                            AnswerDocument {
                                user_id: user_id.to_owned(),
                                question_index,
                                price,
                            }
                        })
                    })
                    .collect(),
            },
        }
    }

    /// Rebuild the room value and its revision from this document.
    pub fn into_snapshot(self) -> Result<RoomSnapshot, DocumentShapeError> {
        let version = u64::try_from(self.version).map_err(|_| {
            DocumentShapeError::NegativeVersion {
                version: self.version,
            }
        })?;
        let schedule = decode_schedule(self.schedule)?;
        let members: Vec<RoomMember> = self
            .members
            .into_iter()
            .map(|member| RoomMember {
                user_id: member.user_id,
                display_name: member.display_name,
            })
            .collect();

        let room = match self.status {
            RoomStatus::InvitingMembers => Room::InvitingMembers(InvitingMembers::from_parts(
                members,
                self.ready.into_iter().collect::<BTreeSet<_>>(),
                self.time_limit_seconds,
                self.question_count,
                schedule,
            )),
            RoomStatus::GameStarted => {
                let questions = self
                    .questions
                    .into_iter()
                    .map(|question| Question {
                        title: question.title,
                        price: question.price,
                        image_url: question.image_url,
                        link_url: question.link_url,
                    })
                    .collect();

                let mut entries: BTreeMap<String, BTreeMap<u32, i64>> = BTreeMap::new();
                for answer in self.answers {
                    entries
                        .entry(answer.user_id)
                        .or_default()
                        .insert(answer.question_index, answer.price);
                }

                Room::GameStarted(GameStarted::from_parts(
                    members,
                    self.time_limit_seconds,
                    self.question_count,
                    questions,
                    AnswerLedger::from_entries(entries),
                    schedule,
                ))
            }
        };

        Ok(RoomSnapshot { version, room })
    }
}

fn member_documents(members: &[RoomMember]) -> Vec<MemberDocument> {
    members
        .iter()
        .map(|member| MemberDocument {
            user_id: member.user_id.clone(),
            display_name: member.display_name.clone(),
        })
        .collect()
}

fn schedule_documents(schedule: &Schedule) -> Vec<ScheduleEntryDocument> {
    schedule
        .entries()
        .iter()
        .map(|entry| {
            let (scene, question_index) = match entry.scene {
                Scene::Lobby => (SceneKind::Lobby, None),
                Scene::QuizSubmit { question_index } => {
                    (SceneKind::QuizSubmit, Some(question_index))
                }
                Scene::QuizAnswer { question_index } => {
                    (SceneKind::QuizAnswer, Some(question_index))
                }
                Scene::GameResult => (SceneKind::GameResult, None),
            };
            ScheduleEntryDocument {
                scene,
                question_index,
                starts_at: DateTime::from_system_time(entry.starts_at),
            }
        })
        .collect()
}

fn decode_schedule(
    entries: Vec<ScheduleEntryDocument>,
) -> Result<Schedule, DocumentShapeError> {
    let decoded = entries
        .into_iter()
        .map(|entry| {
            let scene = match (entry.scene, entry.question_index) {
                (SceneKind::Lobby, _) => Scene::Lobby,
                (SceneKind::GameResult, _) => Scene::GameResult,
                (SceneKind::QuizSubmit, Some(question_index)) => {
                    Scene::QuizSubmit { question_index }
                }
                (SceneKind::QuizAnswer, Some(question_index)) => {
                    Scene::QuizAnswer { question_index }
                }
                (SceneKind::QuizSubmit, None) => {
                    return Err(DocumentShapeError::MissingQuestionIndex {
                        kind: "quiz_submit",
                    });
                }
                (SceneKind::QuizAnswer, None) => {
                    return Err(DocumentShapeError::MissingQuestionIndex {
                        kind: "quiz_answer",
                    });
                }
            };
            Ok(ScheduleEntry {
                scene,
                starts_at: entry.starts_at.to_system_time(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Schedule::from_entries(decoded))
}

/// BSON binary rendering of a room id, used in filters.
pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

/// Filter selecting a room document by id.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}
