//! Room aggregate: the session entity, its lifecycle phases, and the rules
//! governing membership, readiness, and answer submission.
//!
//! A room moves through exactly two phases. It opens as
//! [`InvitingMembers`], where players join, leave, and toggle readiness; the
//! moment every member is ready it transitions, once and irreversibly, to
//! [`GameStarted`], where the only remaining mutation is answer submission.
//! Every operation consumes the current room value and returns the next one,
//! so callers commit whole-room snapshots and never mutate shared state in
//! place.

pub mod answers;
pub mod schedule;

use std::collections::BTreeSet;
use std::time::{Duration, SystemTime};

use thiserror::Error;

pub use answers::AnswerLedger;
pub use schedule::{Scene, Schedule, ScheduleEntry};

/// One player inside a room, identified by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    /// Verified identity of the player; unique within a room.
    pub user_id: String,
    /// Name shown to the other players.
    pub display_name: String,
}

/// One quiz item: a product and the price to guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Product title shown during the submit window.
    pub title: String,
    /// The price to guess.
    pub price: i64,
    /// Product image, empty when the feed supplied none.
    pub image_url: String,
    /// Affiliate link revealed with the answer.
    pub link_url: String,
}

/// Rejected room operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The operation is not valid for the room's current lifecycle phase.
    #[error("`{operation}` cannot be applied while the room is in the {phase} phase")]
    WrongPhase {
        /// Operation that was attempted.
        operation: &'static str,
        /// Phase the room was in.
        phase: &'static str,
    },
    /// The caller is already a member of the room.
    #[error("user `{user_id}` already joined this room")]
    AlreadyJoined {
        /// Identity that attempted to join twice.
        user_id: String,
    },
    /// The caller is not a member of the room.
    #[error("user `{user_id}` is not a member of this room")]
    NotJoined {
        /// Identity that is not in the member list.
        user_id: String,
    },
    /// The question index does not exist in this game.
    #[error("question index {index} is out of range ({count} questions in this game)")]
    QuestionOutOfRange {
        /// Index the caller submitted for.
        index: u32,
        /// Number of questions in the game.
        count: u32,
    },
    /// The question exists but its submit window is not the current scene.
    #[error("question {index} is not accepting answers right now")]
    NotCurrentQuestion {
        /// Index the caller submitted for.
        index: u32,
    },
}

/// Room payload while members gather and ready up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitingMembers {
    members: Vec<RoomMember>,
    ready: BTreeSet<String>,
    time_limit_seconds: u32,
    question_count: u32,
    schedule: Schedule,
}

/// Room payload once the game is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStarted {
    members: Vec<RoomMember>,
    time_limit_seconds: u32,
    question_count: u32,
    questions: Vec<Question>,
    answers: AnswerLedger,
    schedule: Schedule,
}

/// The session aggregate, tagged by lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Room {
    /// Players are still gathering; joins/leaves/readiness are legal.
    InvitingMembers(InvitingMembers),
    /// The game is running; only answer submission mutates the room.
    GameStarted(GameStarted),
}

/// Result of a readiness update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyUpdate {
    /// Readiness changed; the room keeps waiting for the rest.
    Updated(Room),
    /// Every member is now ready. The caller must stock the returned payload
    /// with questions via [`InvitingMembers::start`] and commit the started
    /// room, making the transition and the readiness flip one atomic write.
    AllReady(InvitingMembers),
}

/// Result of a successful answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecorded {
    /// The room with the answer recorded (and the schedule advanced when the
    /// question completed early).
    pub room: Room,
    /// Whether this submission completed the question for every member.
    pub all_answered: bool,
}

impl Room {
    /// Open a fresh room in the inviting phase with `creator` as its first
    /// member. The timeline starts with a single lobby entry at `now`.
    pub fn open(
        creator: RoomMember,
        time_limit_seconds: u32,
        question_count: u32,
        now: SystemTime,
    ) -> Self {
        Room::InvitingMembers(InvitingMembers {
            members: vec![creator],
            ready: BTreeSet::new(),
            time_limit_seconds,
            question_count,
            schedule: Schedule::lobby(now),
        })
    }

    /// Add `member` to an inviting room, preserving join order.
    pub fn join(self, member: RoomMember) -> Result<Room, RoomError> {
        let mut inviting = self.into_inviting("join")?;
        if inviting.contains(&member.user_id) {
            return Err(RoomError::AlreadyJoined {
                user_id: member.user_id,
            });
        }
        inviting.members.push(member);
        Ok(Room::InvitingMembers(inviting))
    }

    /// Remove `user_id` from an inviting room, pruning their ready marker.
    ///
    /// Leaving never starts the game, even when everyone remaining is ready;
    /// only [`Room::set_ready`] evaluates the all-ready rule.
    pub fn leave(self, user_id: &str) -> Result<Room, RoomError> {
        let mut inviting = self.into_inviting("leave")?;
        if !inviting.contains(user_id) {
            return Err(RoomError::NotJoined {
                user_id: user_id.to_owned(),
            });
        }
        inviting.members.retain(|member| member.user_id != user_id);
        inviting.ready.remove(user_id);
        Ok(Room::InvitingMembers(inviting))
    }

    /// Set or clear `user_id`'s ready marker.
    ///
    /// Once the update leaves every member ready (and the room non-empty),
    /// the returned [`ReadyUpdate::AllReady`] hands the caller the payload to
    /// start the game with.
    pub fn set_ready(self, user_id: &str, ready: bool) -> Result<ReadyUpdate, RoomError> {
        let mut inviting = self.into_inviting("set_ready")?;
        if !inviting.contains(user_id) {
            return Err(RoomError::NotJoined {
                user_id: user_id.to_owned(),
            });
        }

        if ready {
            inviting.ready.insert(user_id.to_owned());
        } else {
            inviting.ready.remove(user_id);
        }

        if inviting.all_ready() {
            Ok(ReadyUpdate::AllReady(inviting))
        } else {
            Ok(ReadyUpdate::Updated(Room::InvitingMembers(inviting)))
        }
    }

    /// Record `user_id`'s price guess for `question_index`.
    ///
    /// The submission is only accepted while the question's submit window is
    /// the current scene at `now`; the window is end-exclusive, so a guess
    /// arriving at the reveal instant is already too late. When the guess
    /// completes the question for every member the schedule is pulled
    /// forward so the reveal happens immediately.
    pub fn submit_answer(
        self,
        user_id: &str,
        question_index: u32,
        price: i64,
        now: SystemTime,
    ) -> Result<AnswerRecorded, RoomError> {
        let mut game = self.into_started("submit_answer")?;
        if !game.members.iter().any(|m| m.user_id == user_id) {
            return Err(RoomError::NotJoined {
                user_id: user_id.to_owned(),
            });
        }
        if question_index >= game.question_count {
            return Err(RoomError::QuestionOutOfRange {
                index: question_index,
                count: game.question_count,
            });
        }
        match game.schedule.current_scene(now) {
            Some(Scene::QuizSubmit {
                question_index: current,
            }) if current == question_index => {}
            _ => {
                return Err(RoomError::NotCurrentQuestion {
                    index: question_index,
                });
            }
        }

        game.answers.record(user_id, question_index, price);
        let all_answered = game.answers.all_answered(&game.members, question_index);
        if all_answered {
            game.schedule = game
                .schedule
                .fast_forward(question_index, game.time_limit(), now);
        }

        Ok(AnswerRecorded {
            room: Room::GameStarted(game),
            all_answered,
        })
    }

    /// Members in join order.
    pub fn members(&self) -> &[RoomMember] {
        match self {
            Room::InvitingMembers(inviting) => &inviting.members,
            Room::GameStarted(game) => &game.members,
        }
    }

    /// The room's scene timeline.
    pub fn schedule(&self) -> &Schedule {
        match self {
            Room::InvitingMembers(inviting) => &inviting.schedule,
            Room::GameStarted(game) => &game.schedule,
        }
    }

    /// Per-question submit window length, in seconds.
    pub fn time_limit_seconds(&self) -> u32 {
        match self {
            Room::InvitingMembers(inviting) => inviting.time_limit_seconds,
            Room::GameStarted(game) => game.time_limit_seconds,
        }
    }

    /// Number of questions the game runs (or will run) with.
    pub fn question_count(&self) -> u32 {
        match self {
            Room::InvitingMembers(inviting) => inviting.question_count,
            Room::GameStarted(game) => game.question_count,
        }
    }

    /// Whether `user_id` counts as ready. Trivially true once started.
    pub fn is_member_ready(&self, user_id: &str) -> bool {
        match self {
            Room::InvitingMembers(inviting) => inviting.ready.contains(user_id),
            Room::GameStarted(_) => true,
        }
    }

    /// Human-readable phase label used in error messages.
    pub fn phase_name(&self) -> &'static str {
        match self {
            Room::InvitingMembers(_) => "inviting members",
            Room::GameStarted(_) => "game started",
        }
    }

    fn into_inviting(self, operation: &'static str) -> Result<InvitingMembers, RoomError> {
        match self {
            Room::InvitingMembers(inviting) => Ok(inviting),
            other => Err(RoomError::WrongPhase {
                operation,
                phase: other.phase_name(),
            }),
        }
    }

    fn into_started(self, operation: &'static str) -> Result<GameStarted, RoomError> {
        match self {
            Room::GameStarted(game) => Ok(game),
            other => Err(RoomError::WrongPhase {
                operation,
                phase: other.phase_name(),
            }),
        }
    }
}

impl InvitingMembers {
    /// Consume the all-ready payload and start the game at `now`.
    ///
    /// `questions` must hold exactly [`InvitingMembers::question_count`]
    /// items; the question service guarantees that before calling.
    pub fn start(self, questions: Vec<Question>, now: SystemTime) -> Room {
        let schedule = Schedule::for_game(self.question_count, self.time_limit(), now);
        Room::GameStarted(GameStarted {
            members: self.members,
            time_limit_seconds: self.time_limit_seconds,
            question_count: self.question_count,
            questions,
            answers: AnswerLedger::new(),
            schedule,
        })
    }

    /// Members in join order.
    pub fn members(&self) -> &[RoomMember] {
        &self.members
    }

    /// User ids currently marked ready, in stable order.
    pub fn ready_ids(&self) -> impl Iterator<Item = &str> {
        self.ready.iter().map(String::as_str)
    }

    /// Number of questions the game will be stocked with.
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    /// Per-question submit window length, in seconds.
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    /// The lobby timeline carried while inviting.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Restore an inviting room from persistence without revalidation.
    pub fn from_parts(
        members: Vec<RoomMember>,
        ready: BTreeSet<String>,
        time_limit_seconds: u32,
        question_count: u32,
        schedule: Schedule,
    ) -> Self {
        Self {
            members,
            ready,
            time_limit_seconds,
            question_count,
            schedule,
        }
    }

    fn contains(&self, user_id: &str) -> bool {
        self.members.iter().any(|member| member.user_id == user_id)
    }

    /// All-ready rule: a non-empty member list where every member carries a
    /// ready marker. The non-empty guard keeps a deserted room from starting
    /// a game with nobody in it.
    fn all_ready(&self) -> bool {
        !self.members.is_empty()
            && self
                .members
                .iter()
                .all(|member| self.ready.contains(&member.user_id))
    }

    fn time_limit(&self) -> Duration {
        Duration::from_secs(u64::from(self.time_limit_seconds))
    }
}

impl GameStarted {
    /// The questions the game was stocked with, in play order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// All recorded answers.
    pub fn answers(&self) -> &AnswerLedger {
        &self.answers
    }

    /// Members in join order.
    pub fn members(&self) -> &[RoomMember] {
        &self.members
    }

    /// The game timeline.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Restore a started room from persistence without revalidation.
    pub fn from_parts(
        members: Vec<RoomMember>,
        time_limit_seconds: u32,
        question_count: u32,
        questions: Vec<Question>,
        answers: AnswerLedger,
        schedule: Schedule,
    ) -> Self {
        Self {
            members,
            time_limit_seconds,
            question_count,
            questions,
            answers,
            schedule,
        }
    }

    fn time_limit(&self) -> Duration {
        Duration::from_secs(u64::from(self.time_limit_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::schedule::INTER_QUESTION_GAP;
    use super::*;

    const LIMIT_SECONDS: u32 = 30;
    const LIMIT: Duration = Duration::from_secs(30);

    fn t0() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn member(user_id: &str) -> RoomMember {
        RoomMember {
            user_id: user_id.to_owned(),
            display_name: user_id.to_uppercase(),
        }
    }

    fn question(index: u32) -> Question {
        Question {
            title: format!("item {index}"),
            price: 1_000 + i64::from(index),
            image_url: String::new(),
            link_url: String::new(),
        }
    }

    fn questions(count: u32) -> Vec<Question> {
        (0..count).map(question).collect()
    }

    /// Room with both members ready, started at `t0()` with two questions.
    fn started_room() -> Room {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 2, t0());
        let room = room.join(member("bob")).unwrap();
        let room = match room.set_ready("alice", true).unwrap() {
            ReadyUpdate::Updated(room) => room,
            other => panic!("unexpected ready update: {other:?}"),
        };
        match room.set_ready("bob", true).unwrap() {
            ReadyUpdate::AllReady(inviting) => inviting.start(questions(2), t0()),
            other => panic!("unexpected ready update: {other:?}"),
        }
    }

    #[test]
    fn open_room_waits_in_lobby_with_creator() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 5, t0());

        assert_eq!(room.members().len(), 1);
        assert_eq!(room.members()[0].user_id, "alice");
        assert!(!room.is_member_ready("alice"));
        assert_eq!(room.schedule().current_scene(t0()), Some(Scene::Lobby));
        assert_eq!(room.question_count(), 5);
    }

    #[test]
    fn join_appends_in_order_and_rejects_duplicates() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 5, t0());
        let room = room.join(member("bob")).unwrap();
        let room = room.join(member("carol")).unwrap();

        let ids: Vec<_> = room.members().iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, ["alice", "bob", "carol"]);

        let err = room.join(member("bob")).unwrap_err();
        assert_eq!(
            err,
            RoomError::AlreadyJoined {
                user_id: "bob".into()
            }
        );
    }

    #[test]
    fn join_then_leave_restores_the_member_list() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 5, t0());
        let before = room.clone();

        let room = room.join(member("bob")).unwrap();
        let room = room.leave("bob").unwrap();

        assert_eq!(room, before);
    }

    #[test]
    fn leave_prunes_the_ready_marker() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 5, t0());
        let room = room.join(member("bob")).unwrap();
        let room = match room.set_ready("bob", true).unwrap() {
            ReadyUpdate::Updated(room) => room,
            other => panic!("unexpected ready update: {other:?}"),
        };
        assert!(room.is_member_ready("bob"));

        let room = room.leave("bob").unwrap();
        // Rejoining starts over without the stale marker.
        let room = room.join(member("bob")).unwrap();
        assert!(!room.is_member_ready("bob"));
    }

    #[test]
    fn leave_of_unknown_member_fails() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 5, t0());
        let err = room.leave("bob").unwrap_err();
        assert_eq!(
            err,
            RoomError::NotJoined {
                user_id: "bob".into()
            }
        );
    }

    #[test]
    fn leaving_never_starts_the_game() {
        // Alice is ready, Bob is not; Bob leaving makes "everyone remaining"
        // ready but must not trigger the transition.
        let room = Room::open(member("alice"), LIMIT_SECONDS, 5, t0());
        let room = room.join(member("bob")).unwrap();
        let room = match room.set_ready("alice", true).unwrap() {
            ReadyUpdate::Updated(room) => room,
            other => panic!("unexpected ready update: {other:?}"),
        };

        let room = room.leave("bob").unwrap();
        assert!(matches!(room, Room::InvitingMembers(_)));
    }

    #[test]
    fn set_ready_for_unknown_member_fails() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 5, t0());
        let err = room.set_ready("mallory", true).unwrap_err();
        assert_eq!(
            err,
            RoomError::NotJoined {
                user_id: "mallory".into()
            }
        );
    }

    #[test]
    fn last_ready_member_triggers_all_ready() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 2, t0());
        let room = room.join(member("bob")).unwrap();

        let room = match room.set_ready("alice", true).unwrap() {
            ReadyUpdate::Updated(room) => room,
            other => panic!("expected the room to keep waiting, got {other:?}"),
        };

        match room.set_ready("bob", true).unwrap() {
            ReadyUpdate::AllReady(inviting) => {
                let ready: Vec<_> = inviting.ready_ids().collect();
                assert_eq!(ready, ["alice", "bob"]);
            }
            other => panic!("expected all members ready, got {other:?}"),
        }
    }

    #[test]
    fn unready_reverses_a_ready_marker() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 2, t0());
        let room = room.join(member("bob")).unwrap();
        let room = match room.set_ready("alice", true).unwrap() {
            ReadyUpdate::Updated(room) => room,
            other => panic!("unexpected ready update: {other:?}"),
        };

        let room = match room.set_ready("alice", false).unwrap() {
            ReadyUpdate::Updated(room) => room,
            other => panic!("unexpected ready update: {other:?}"),
        };
        assert!(!room.is_member_ready("alice"));

        // Bob alone being ready no longer completes the set.
        match room.set_ready("bob", true).unwrap() {
            ReadyUpdate::Updated(_) => {}
            other => panic!("unexpected ready update: {other:?}"),
        }
    }

    #[test]
    fn sole_member_ready_starts_immediately() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 3, t0());
        match room.set_ready("alice", true).unwrap() {
            ReadyUpdate::AllReady(_) => {}
            other => panic!("expected all ready, got {other:?}"),
        }
    }

    #[test]
    fn start_builds_the_game_timeline_and_stores_questions() {
        let room = started_room();
        let Room::GameStarted(game) = &room else {
            panic!("expected a started room");
        };

        assert_eq!(game.questions().len(), 2);
        assert_eq!(game.questions()[0].title, "item 0");
        assert_eq!(
            room.schedule().current_scene(t0()),
            Some(Scene::QuizSubmit { question_index: 0 })
        );
        assert_eq!(room.schedule().entries().len(), 5);
        assert!(!room.schedule().ended(t0()));
    }

    #[test]
    fn inviting_operations_fail_once_started() {
        let room = started_room();

        let err = room.clone().join(member("late")).unwrap_err();
        assert_eq!(
            err,
            RoomError::WrongPhase {
                operation: "join",
                phase: "game started"
            }
        );

        let err = room.clone().leave("alice").unwrap_err();
        assert!(matches!(err, RoomError::WrongPhase { .. }));

        let err = room.set_ready("alice", true).unwrap_err();
        assert!(matches!(err, RoomError::WrongPhase { .. }));
    }

    #[test]
    fn submit_answer_requires_a_started_room() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 2, t0());
        let err = room.submit_answer("alice", 0, 100, t0()).unwrap_err();
        assert_eq!(
            err,
            RoomError::WrongPhase {
                operation: "submit_answer",
                phase: "inviting members"
            }
        );
    }

    #[test]
    fn submit_answer_records_within_the_window() {
        let room = started_room();
        let now = t0() + Duration::from_secs(5);

        let recorded = room.submit_answer("alice", 0, 1_980, now).unwrap();
        assert!(!recorded.all_answered);

        let Room::GameStarted(game) = &recorded.room else {
            panic!("expected a started room");
        };
        assert_eq!(game.answers().answer_of("alice", 0), Some(1_980));
        // Schedule untouched while Bob is still thinking.
        assert_eq!(game.schedule().entries().len(), 5);
        assert_eq!(
            game.schedule().entries()[1].starts_at,
            t0() + LIMIT
        );
    }

    #[test]
    fn submit_answer_rejects_non_members_and_bad_indexes() {
        let room = started_room();
        let now = t0() + Duration::from_secs(5);

        let err = room
            .clone()
            .submit_answer("mallory", 0, 100, now)
            .unwrap_err();
        assert_eq!(
            err,
            RoomError::NotJoined {
                user_id: "mallory".into()
            }
        );

        let err = room.clone().submit_answer("alice", 9, 100, now).unwrap_err();
        assert_eq!(err, RoomError::QuestionOutOfRange { index: 9, count: 2 });
    }

    #[test]
    fn submit_answer_outside_the_window_fails() {
        let room = started_room();

        // Question 1's window has not opened yet.
        let err = room
            .clone()
            .submit_answer("alice", 1, 100, t0() + Duration::from_secs(5))
            .unwrap_err();
        assert_eq!(err, RoomError::NotCurrentQuestion { index: 1 });

        // The reveal instant itself is too late: the window is end-exclusive.
        let err = room
            .clone()
            .submit_answer("alice", 0, 100, t0() + LIMIT)
            .unwrap_err();
        assert_eq!(err, RoomError::NotCurrentQuestion { index: 0 });

        // And question 0 cannot be answered once question 1 is current.
        let err = room
            .submit_answer("alice", 0, 100, t0() + LIMIT + INTER_QUESTION_GAP)
            .unwrap_err();
        assert_eq!(err, RoomError::NotCurrentQuestion { index: 0 });
    }

    #[test]
    fn resubmission_overwrites_the_previous_guess() {
        let room = started_room();
        let now = t0() + Duration::from_secs(5);

        let recorded = room.submit_answer("alice", 0, 500, now).unwrap();
        let recorded = recorded
            .room
            .submit_answer("alice", 0, 800, now + Duration::from_secs(1))
            .unwrap();
        assert!(!recorded.all_answered);

        let Room::GameStarted(game) = &recorded.room else {
            panic!("expected a started room");
        };
        assert_eq!(game.answers().answer_of("alice", 0), Some(800));
        assert_eq!(game.answers().answered_count(0), 1);
    }

    #[test]
    fn final_answer_fast_forwards_the_schedule() {
        let room = started_room();
        let now = t0() + Duration::from_secs(12);

        let recorded = room.submit_answer("alice", 0, 1_000, now).unwrap();
        let recorded = recorded.room.submit_answer("bob", 0, 2_000, now).unwrap();
        assert!(recorded.all_answered);

        let schedule = recorded.room.schedule();
        // Reveal happens immediately and question 1 opens after the gap.
        assert_eq!(
            schedule.current_scene(now),
            Some(Scene::QuizAnswer { question_index: 0 })
        );
        assert_eq!(
            schedule.current_scene(now + INTER_QUESTION_GAP),
            Some(Scene::QuizSubmit { question_index: 1 })
        );
        assert_eq!(
            schedule.entries().last().map(|entry| entry.starts_at),
            Some(now + INTER_QUESTION_GAP + LIMIT + INTER_QUESTION_GAP)
        );
    }

    #[test]
    fn deserted_room_cannot_reach_all_ready() {
        let room = Room::open(member("alice"), LIMIT_SECONDS, 2, t0());
        let room = room.leave("alice").unwrap();
        assert!(room.members().is_empty());

        // The departed creator can no longer flip readiness, so the vacuous
        // "everyone is ready" case is unreachable through operations.
        let err = room.set_ready("alice", true).unwrap_err();
        assert_eq!(
            err,
            RoomError::NotJoined {
                user_id: "alice".into()
            }
        );
    }
}
