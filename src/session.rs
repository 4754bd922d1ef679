use std::time::Duration;

use crate::{guidance::KeyboardLayout, level::LevelId};

pub const DEFAULT_FALLBACK_WORD: &str = "cat";
pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Delay between a correct submit and the next word.
    pub auto_advance: Duration,
    /// Served when the word source cannot be reached.
    pub fallback_word: String,
    pub finger_guidance: bool,
    pub layout: KeyboardLayout,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_advance: DEFAULT_AUTO_ADVANCE,
            fallback_word: DEFAULT_FALLBACK_WORD.to_string(),
            finger_guidance: true,
            layout: KeyboardLayout::qwerty(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Input is ignored until the learner presses start
    #[default]
    Idle,
    Active,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub target_word: String,
    pub level: LevelId,
    pub phase: Phase,
}

impl Session {
    pub fn new(level: LevelId) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn has_target(&self) -> bool {
        !self.target_word.is_empty()
    }
}
