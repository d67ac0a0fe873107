use std::time::{Duration, SystemTime};

/// Pause between a question's answer reveal and the next submit window.
pub const INTER_QUESTION_GAP: Duration = Duration::from_secs(10);

/// Nudge applied when a reveal would collide with the entry before it.
const MONOTONIC_NUDGE: Duration = Duration::from_millis(1);

/// The portion of the game currently visible to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Waiting room shown while members gather and ready up.
    Lobby,
    /// Submit window for one question: members may answer it.
    QuizSubmit {
        /// Index of the question accepting answers.
        question_index: u32,
    },
    /// Answer reveal for one question: submissions are closed.
    QuizAnswer {
        /// Index of the question being revealed.
        question_index: u32,
    },
    /// Final results screen; the game is over.
    GameResult,
}

/// One scene together with the absolute instant it becomes current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Scene that starts at [`ScheduleEntry::starts_at`].
    pub scene: Scene,
    /// Instant this scene becomes the current one.
    pub starts_at: SystemTime,
}

/// Ordered, time-ascending timeline of scenes.
///
/// The current scene is always derived from the wall clock: it is the entry
/// with the greatest `starts_at` that is not in the future. Nothing in the
/// room ever stores "which scene we are in" as a pointer, so clients and the
/// backend agree on the current scene without coordination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Timeline of a room that has not started yet: a single lobby entry.
    pub fn lobby(created_at: SystemTime) -> Self {
        Self {
            entries: vec![ScheduleEntry {
                scene: Scene::Lobby,
                starts_at: created_at,
            }],
        }
    }

    /// Build the full game timeline anchored at `start`.
    ///
    /// Question `i` opens at `start + i * (time_limit + gap)` and is revealed
    /// `time_limit` later; one trailing [`Scene::GameResult`] entry sits where
    /// the next submit window would have begun. A zero-question game degrades
    /// to a lone result entry at `start`.
    pub fn for_game(question_count: u32, time_limit: Duration, start: SystemTime) -> Self {
        let slot = time_limit + INTER_QUESTION_GAP;
        let mut entries = Vec::with_capacity(question_count as usize * 2 + 1);

        for index in 0..question_count {
            let opens_at = start + slot * index;
            entries.push(ScheduleEntry {
                scene: Scene::QuizSubmit {
                    question_index: index,
                },
                starts_at: opens_at,
            });
            entries.push(ScheduleEntry {
                scene: Scene::QuizAnswer {
                    question_index: index,
                },
                starts_at: opens_at + time_limit,
            });
        }

        entries.push(ScheduleEntry {
            scene: Scene::GameResult,
            starts_at: start + slot * question_count,
        });

        Self { entries }
    }

    /// Rewrite the timeline after every member answered question
    /// `completed_index` before its window closed.
    ///
    /// Entries up to and including that question's submit window are kept
    /// untouched; its reveal is moved to `now` and every later question is
    /// re-derived back-to-back with the original per-question duration and
    /// gap, ending in a recomputed result entry. When `now` does not fall
    /// strictly after the kept prefix the reveal is nudged forward so the
    /// timeline stays strictly increasing.
    pub fn fast_forward(
        &self,
        completed_index: u32,
        time_limit: Duration,
        now: SystemTime,
    ) -> Self {
        let mut entries: Vec<ScheduleEntry> = self
            .entries
            .iter()
            .take_while(|entry| {
                !matches!(
                    entry.scene,
                    Scene::QuizAnswer { question_index } if question_index == completed_index
                )
            })
            .copied()
            .collect();

        let reveal_at = match entries.last() {
            Some(last) if now <= last.starts_at => last.starts_at + MONOTONIC_NUDGE,
            _ => now,
        };
        entries.push(ScheduleEntry {
            scene: Scene::QuizAnswer {
                question_index: completed_index,
            },
            starts_at: reveal_at,
        });

        let mut cursor = reveal_at + INTER_QUESTION_GAP;
        for index in self.question_indexes_after(completed_index) {
            entries.push(ScheduleEntry {
                scene: Scene::QuizSubmit {
                    question_index: index,
                },
                starts_at: cursor,
            });
            entries.push(ScheduleEntry {
                scene: Scene::QuizAnswer {
                    question_index: index,
                },
                starts_at: cursor + time_limit,
            });
            cursor += time_limit + INTER_QUESTION_GAP;
        }

        entries.push(ScheduleEntry {
            scene: Scene::GameResult,
            starts_at: cursor,
        });

        Self { entries }
    }

    /// Scene in effect at `now`, or `None` before the first entry.
    pub fn current_scene(&self, now: SystemTime) -> Option<Scene> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.starts_at <= now)
            .map(|entry| entry.scene)
    }

    /// Whether the timeline has reached its result entry at `now`.
    pub fn ended(&self, now: SystemTime) -> bool {
        matches!(self.current_scene(now), Some(Scene::GameResult))
    }

    /// All entries in timeline order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Restore a schedule from persisted entries without revalidation.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Question indexes whose submit window sits after `completed_index`,
    /// in timeline order.
    fn question_indexes_after(&self, completed_index: u32) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().filter_map(move |entry| match entry.scene {
            Scene::QuizSubmit { question_index } if question_index > completed_index => {
                Some(question_index)
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Duration = Duration::from_secs(30);

    fn start() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn assert_strictly_increasing(schedule: &Schedule) {
        let entries = schedule.entries();
        for pair in entries.windows(2) {
            assert!(
                pair[0].starts_at < pair[1].starts_at,
                "entries out of order: {pair:?}"
            );
        }
    }

    #[test]
    fn lobby_schedule_has_single_entry() {
        let schedule = Schedule::lobby(start());
        assert_eq!(
            schedule.entries(),
            &[ScheduleEntry {
                scene: Scene::Lobby,
                starts_at: start(),
            }]
        );
        assert_eq!(schedule.current_scene(start()), Some(Scene::Lobby));
        assert_eq!(
            schedule.current_scene(start() - Duration::from_secs(1)),
            None
        );
    }

    #[test]
    fn game_schedule_matches_expected_timeline() {
        let schedule = Schedule::for_game(2, LIMIT, start());
        let gap = INTER_QUESTION_GAP;

        assert_eq!(
            schedule.entries(),
            &[
                ScheduleEntry {
                    scene: Scene::QuizSubmit { question_index: 0 },
                    starts_at: start(),
                },
                ScheduleEntry {
                    scene: Scene::QuizAnswer { question_index: 0 },
                    starts_at: start() + LIMIT,
                },
                ScheduleEntry {
                    scene: Scene::QuizSubmit { question_index: 1 },
                    starts_at: start() + LIMIT + gap,
                },
                ScheduleEntry {
                    scene: Scene::QuizAnswer { question_index: 1 },
                    starts_at: start() + LIMIT * 2 + gap,
                },
                ScheduleEntry {
                    scene: Scene::GameResult,
                    starts_at: start() + (LIMIT + gap) * 2,
                },
            ]
        );
    }

    #[test]
    fn game_schedule_is_strictly_increasing_with_one_window_per_question() {
        for count in [1u32, 3, 7] {
            let schedule = Schedule::for_game(count, LIMIT, start());
            assert_strictly_increasing(&schedule);

            for index in 0..count {
                let submits = schedule
                    .entries()
                    .iter()
                    .filter(|e| e.scene == Scene::QuizSubmit { question_index: index })
                    .count();
                let answers = schedule
                    .entries()
                    .iter()
                    .filter(|e| e.scene == Scene::QuizAnswer { question_index: index })
                    .count();
                assert_eq!((submits, answers), (1, 1), "question {index}");
            }

            let results = schedule
                .entries()
                .iter()
                .filter(|e| e.scene == Scene::GameResult)
                .count();
            assert_eq!(results, 1);
        }
    }

    #[test]
    fn zero_question_game_is_only_a_result() {
        let schedule = Schedule::for_game(0, LIMIT, start());
        assert_eq!(
            schedule.entries(),
            &[ScheduleEntry {
                scene: Scene::GameResult,
                starts_at: start(),
            }]
        );
    }

    #[test]
    fn current_scene_picks_latest_started_entry() {
        let schedule = Schedule::for_game(2, LIMIT, start());

        assert_eq!(
            schedule.current_scene(start()),
            Some(Scene::QuizSubmit { question_index: 0 })
        );
        assert_eq!(
            schedule.current_scene(start() + Duration::from_secs(29)),
            Some(Scene::QuizSubmit { question_index: 0 })
        );
        assert_eq!(
            schedule.current_scene(start() + LIMIT),
            Some(Scene::QuizAnswer { question_index: 0 })
        );
        assert_eq!(
            schedule.current_scene(start() + LIMIT + INTER_QUESTION_GAP),
            Some(Scene::QuizSubmit { question_index: 1 })
        );

        let result_at = start() + (LIMIT + INTER_QUESTION_GAP) * 2;
        assert!(!schedule.ended(result_at - Duration::from_secs(1)));
        assert!(schedule.ended(result_at));
        assert!(schedule.ended(result_at + Duration::from_secs(3600)));
    }

    #[test]
    fn fast_forward_keeps_prefix_and_pulls_tail_earlier() {
        let schedule = Schedule::for_game(3, LIMIT, start());
        let now = start() + Duration::from_secs(12);
        let advanced = schedule.fast_forward(0, LIMIT, now);

        assert_strictly_increasing(&advanced);
        assert_eq!(advanced.entries()[0], schedule.entries()[0]);
        assert_eq!(
            advanced.entries()[1],
            ScheduleEntry {
                scene: Scene::QuizAnswer { question_index: 0 },
                starts_at: now,
            }
        );
        assert_eq!(
            advanced.entries()[2],
            ScheduleEntry {
                scene: Scene::QuizSubmit { question_index: 1 },
                starts_at: now + INTER_QUESTION_GAP,
            }
        );
        assert_eq!(
            advanced.entries()[3],
            ScheduleEntry {
                scene: Scene::QuizAnswer { question_index: 1 },
                starts_at: now + INTER_QUESTION_GAP + LIMIT,
            }
        );
        assert_eq!(
            advanced.entries()[6],
            ScheduleEntry {
                scene: Scene::GameResult,
                starts_at: now + (INTER_QUESTION_GAP + LIMIT) * 2 + INTER_QUESTION_GAP,
            }
        );
    }

    #[test]
    fn fast_forward_preserves_duration_and_gap_for_middle_question() {
        let schedule = Schedule::for_game(3, LIMIT, start());
        let now = start() + LIMIT + INTER_QUESTION_GAP + Duration::from_secs(4);
        let advanced = schedule.fast_forward(1, LIMIT, now);

        assert_strictly_increasing(&advanced);
        // Question 0's pair and question 1's submit are untouched.
        assert_eq!(&advanced.entries()[..3], &schedule.entries()[..3]);
        assert_eq!(
            advanced.entries()[3],
            ScheduleEntry {
                scene: Scene::QuizAnswer { question_index: 1 },
                starts_at: now,
            }
        );
        // Question 2 keeps a full window after the usual gap.
        let reopened = advanced.entries()[4];
        assert_eq!(
            reopened.scene,
            Scene::QuizSubmit { question_index: 2 }
        );
        assert_eq!(reopened.starts_at, now + INTER_QUESTION_GAP);
        assert_eq!(
            advanced.entries()[5].starts_at,
            now + INTER_QUESTION_GAP + LIMIT
        );
    }

    #[test]
    fn fast_forward_on_last_question_moves_result_after_gap() {
        let schedule = Schedule::for_game(2, LIMIT, start());
        let now = start() + LIMIT + INTER_QUESTION_GAP + Duration::from_secs(2);
        let advanced = schedule.fast_forward(1, LIMIT, now);

        assert_strictly_increasing(&advanced);
        let last = advanced.entries().last().copied();
        assert_eq!(
            last,
            Some(ScheduleEntry {
                scene: Scene::GameResult,
                starts_at: now + INTER_QUESTION_GAP,
            })
        );
    }

    #[test]
    fn fast_forward_at_window_open_instant_stays_monotonic() {
        let schedule = Schedule::for_game(2, LIMIT, start());
        // Everyone answered within the instant the window opened.
        let advanced = schedule.fast_forward(0, LIMIT, start());

        assert_strictly_increasing(&advanced);
        assert_eq!(
            advanced.entries()[1].starts_at,
            start() + Duration::from_millis(1)
        );
    }
}
