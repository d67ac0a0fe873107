use serde::Serialize;
use utoipa::ToSchema;

use crate::room::Scene;

/// Wire rendering of a schedule scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneDto {
    /// Waiting for members before the game starts.
    Lobby,
    /// A question is open for guesses.
    QuizSubmit {
        /// Index of the open question.
        question_index: u32,
    },
    /// The answer for a question is on display.
    QuizAnswer {
        /// Index of the revealed question.
        question_index: u32,
    },
    /// Final results are on display.
    GameResult,
}

impl From<Scene> for SceneDto {
    fn from(scene: Scene) -> Self {
        match scene {
            Scene::Lobby => SceneDto::Lobby,
            Scene::QuizSubmit { question_index } => SceneDto::QuizSubmit { question_index },
            Scene::QuizAnswer { question_index } => SceneDto::QuizAnswer { question_index },
            Scene::GameResult => SceneDto::GameResult,
        }
    }
}
