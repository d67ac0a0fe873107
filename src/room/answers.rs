use std::collections::BTreeMap;

use super::RoomMember;

/// Per-member record of submitted prices, keyed by question index.
///
/// A member holds at most one answer per question; submitting again for the
/// same index overwrites the previous value. Entries survive a member leaving
/// the room, but completeness checks only consider current members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLedger {
    entries: BTreeMap<String, BTreeMap<u32, i64>>,
}

impl AnswerLedger {
    /// Empty ledger for a freshly started game.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) `user_id`'s answer for `question_index`.
    pub fn record(&mut self, user_id: &str, question_index: u32, price: i64) {
        self.entries
            .entry(user_id.to_owned())
            .or_default()
            .insert(question_index, price);
    }

    /// Price `user_id` submitted for `question_index`, if any.
    pub fn answer_of(&self, user_id: &str, question_index: u32) -> Option<i64> {
        self.entries
            .get(user_id)
            .and_then(|answers| answers.get(&question_index))
            .copied()
    }

    /// Whether every listed member has answered `question_index`.
    ///
    /// Vacuously true for an empty member list; callers guard against that
    /// where it matters.
    pub fn all_answered(&self, members: &[RoomMember], question_index: u32) -> bool {
        members
            .iter()
            .all(|member| self.answer_of(&member.user_id, question_index).is_some())
    }

    /// Number of members that answered `question_index`.
    pub fn answered_count(&self, question_index: u32) -> usize {
        self.entries
            .values()
            .filter(|answers| answers.contains_key(&question_index))
            .count()
    }

    /// Iterate members and their answers in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<u32, i64>)> {
        self.entries
            .iter()
            .map(|(user_id, answers)| (user_id.as_str(), answers))
    }

    /// Restore a ledger from persisted entries.
    pub fn from_entries(entries: BTreeMap<String, BTreeMap<u32, i64>>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(user_id: &str) -> RoomMember {
        RoomMember {
            user_id: user_id.to_owned(),
            display_name: user_id.to_uppercase(),
        }
    }

    #[test]
    fn record_and_read_back() {
        let mut ledger = AnswerLedger::new();
        ledger.record("alice", 0, 1980);

        assert_eq!(ledger.answer_of("alice", 0), Some(1980));
        assert_eq!(ledger.answer_of("alice", 1), None);
        assert_eq!(ledger.answer_of("bob", 0), None);
    }

    #[test]
    fn later_submission_overwrites() {
        let mut ledger = AnswerLedger::new();
        ledger.record("alice", 2, 500);
        ledger.record("alice", 2, 750);

        assert_eq!(ledger.answer_of("alice", 2), Some(750));
        assert_eq!(ledger.answered_count(2), 1);
    }

    #[test]
    fn all_answered_tracks_current_members_only() {
        let mut ledger = AnswerLedger::new();
        let members = vec![member("alice"), member("bob")];

        ledger.record("alice", 0, 100);
        assert!(!ledger.all_answered(&members, 0));

        ledger.record("bob", 0, 200);
        assert!(ledger.all_answered(&members, 0));

        // A departed member's missing answer no longer blocks completion.
        ledger.record("alice", 1, 300);
        let remaining = vec![member("alice")];
        assert!(ledger.all_answered(&remaining, 1));
    }

    #[test]
    fn answered_count_is_per_question() {
        let mut ledger = AnswerLedger::new();
        ledger.record("alice", 0, 1);
        ledger.record("bob", 0, 2);
        ledger.record("bob", 1, 3);

        assert_eq!(ledger.answered_count(0), 2);
        assert_eq!(ledger.answered_count(1), 1);
        assert_eq!(ledger.answered_count(2), 0);
    }
}
