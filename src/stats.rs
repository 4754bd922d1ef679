use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

use crate::{error::CollaboratorError, level::LevelId};

/// Words needed before the store starts promoting levels.
const PROMOTION_MIN_WORDS: u32 = 10;
/// Accuracy that must be exceeded for a promotion.
const PROMOTION_MIN_ACCURACY: f64 = 80.0;

/// Aggregate progress, as served by a [`ProgressStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub words_completed: u32,
    pub letters_typed: u32,
    pub accuracy: f64,
    pub level: LevelId,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            words_completed: 0,
            letters_typed: 0,
            accuracy: 100.0,
            level: LevelId::Letters,
        }
    }
}

impl Stats {
    /// Accuracy rounded for display, e.g. `"97%"`.
    pub fn accuracy_display(&self) -> String {
        format!("{}%", self.accuracy.clamp(0.0, 100.0).round() as u32)
    }

    fn apply(&mut self, attempt: &Attempt) {
        self.level = attempt.level.clone();
        self.words_completed += 1;
        self.letters_typed += attempt.word_length as u32;

        self.accuracy = if attempt.correct {
            (self.accuracy * 0.9 + 100.0 * 0.1).min(100.0)
        } else {
            (self.accuracy * 0.95).max(0.0)
        };

        if self.words_completed >= PROMOTION_MIN_WORDS && self.accuracy > PROMOTION_MIN_ACCURACY {
            let next = match self.level {
                LevelId::Letters => Some(LevelId::Easy),
                LevelId::Easy => Some(LevelId::Animals),
                _ => None,
            };
            if let Some(next) = next {
                debug!(from = %self.level, to = %next, "promoting level");
                self.level = next;
            }
        }
    }
}

/// One submitted word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub correct: bool,
    pub word_length: usize,
    pub level: LevelId,
}

/// Authoritative record of learner progress.
pub trait ProgressStore: Send + Sync {
    fn report_attempt(&self, attempt: &Attempt) -> Result<Stats, CollaboratorError>;
    fn fetch_stats(&self) -> Result<Stats, CollaboratorError>;
}

/// Progress kept in process memory for the lifetime of the app.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    stats: Mutex<Stats>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(stats: Stats) -> Self {
        Self {
            stats: Mutex::new(stats),
        }
    }
}

impl ProgressStore for MemoryProgressStore {
    fn report_attempt(&self, attempt: &Attempt) -> Result<Stats, CollaboratorError> {
        let mut stats = self
            .stats
            .lock()
            .map_err(|_| CollaboratorError::Unreachable("progress store lock poisoned".into()))?;
        stats.apply(attempt);
        Ok(stats.clone())
    }

    fn fetch_stats(&self) -> Result<Stats, CollaboratorError> {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .map_err(|_| CollaboratorError::Unreachable("progress store lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(correct: bool, word_length: usize, level: LevelId) -> Attempt {
        Attempt {
            correct,
            word_length,
            level,
        }
    }

    #[test]
    fn test_default_stats() {
        let stats = Stats::default();
        assert_eq!(stats.words_completed, 0);
        assert_eq!(stats.letters_typed, 0);
        assert_eq!(stats.accuracy, 100.0);
        assert_eq!(stats.level, LevelId::Letters);
        assert_eq!(stats.accuracy_display(), "100%");
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"words_completed":3,"letters_typed":9,"accuracy":95.5,"level":"animals"}"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.words_completed, 3);
        assert_eq!(stats.letters_typed, 9);
        assert_eq!(stats.level, LevelId::Animals);
        assert_eq!(stats.accuracy_display(), "96%");
    }

    #[test]
    fn test_every_attempt_counts_words_and_letters() {
        let store = MemoryProgressStore::new();
        store
            .report_attempt(&attempt(true, 3, LevelId::Easy))
            .unwrap();
        let stats = store
            .report_attempt(&attempt(false, 5, LevelId::Easy))
            .unwrap();
        assert_eq!(stats.words_completed, 2);
        assert_eq!(stats.letters_typed, 8);
    }

    #[test]
    fn test_accuracy_moves_with_outcomes() {
        let store = MemoryProgressStore::with_stats(Stats {
            accuracy: 50.0,
            ..Stats::default()
        });

        let stats = store
            .report_attempt(&attempt(true, 1, LevelId::Letters))
            .unwrap();
        assert!((stats.accuracy - 55.0).abs() < 1e-9);

        let stats = store
            .report_attempt(&attempt(false, 1, LevelId::Letters))
            .unwrap();
        assert!((stats.accuracy - 52.25).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_stays_capped() {
        let store = MemoryProgressStore::new();
        for _ in 0..5 {
            let stats = store
                .report_attempt(&attempt(true, 1, LevelId::Colors))
                .unwrap();
            assert!(stats.accuracy <= 100.0);
        }
    }

    #[test]
    fn test_attempt_level_becomes_store_level() {
        let store = MemoryProgressStore::new();
        let stats = store
            .report_attempt(&attempt(true, 4, LevelId::Numbers))
            .unwrap();
        assert_eq!(stats.level, LevelId::Numbers);
        assert_eq!(store.fetch_stats().unwrap().level, LevelId::Numbers);
    }

    #[test]
    fn test_promotion_after_ten_good_words() {
        let store = MemoryProgressStore::new();
        let mut last = Stats::default();
        for _ in 0..9 {
            last = store
                .report_attempt(&attempt(true, 1, LevelId::Letters))
                .unwrap();
        }
        assert_eq!(last.level, LevelId::Letters);

        let stats = store
            .report_attempt(&attempt(true, 1, LevelId::Letters))
            .unwrap();
        assert_eq!(stats.level, LevelId::Easy);

        let stats = store
            .report_attempt(&attempt(true, 3, LevelId::Easy))
            .unwrap();
        assert_eq!(stats.level, LevelId::Animals);

        // no promotion beyond animals
        let stats = store
            .report_attempt(&attempt(true, 3, LevelId::Animals))
            .unwrap();
        assert_eq!(stats.level, LevelId::Animals);
    }

    #[test]
    fn test_no_promotion_with_low_accuracy() {
        let store = MemoryProgressStore::with_stats(Stats {
            words_completed: 20,
            accuracy: 40.0,
            ..Stats::default()
        });
        let stats = store
            .report_attempt(&attempt(true, 1, LevelId::Letters))
            .unwrap();
        assert_eq!(stats.level, LevelId::Letters);
    }
}
