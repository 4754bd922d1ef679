use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

pub const ENCOURAGEMENTS: [&str; 10] = [
    "You're doing amazing! 🌟",
    "Keep going, superstar! ⭐",
    "Fantastic typing! 🎉",
    "You're getting better! 🚀",
    "Great job, keep it up! 👏",
    "You're a typing champion! 🏆",
    "Wonderful work! 🌈",
    "Keep practicing! 💪",
    "You're so good at this! 😊",
    "Amazing progress! 🎯",
];

pub const START_MESSAGE: &str = "Let's start typing! 🚀";
pub const RETRY_MESSAGE: &str = "No worries! Keep trying! 💪";

pub fn random_encouragement() -> &'static str {
    let mut rng = rand::thread_rng();
    ENCOURAGEMENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(ENCOURAGEMENTS[0])
}

pub fn level_switched_message(label: &str) -> String {
    format!("🎨 Switched to {label}! Have fun!")
}

pub fn level_up_message(label: &str) -> String {
    format!("🎉 Level up! Now playing: {label}!")
}

/// Short bounce shown on the target word after a correct submit.
#[derive(Debug, Clone)]
pub struct Celebration {
    started_at: Option<Instant>,
    duration: Duration,
}

impl Celebration {
    pub fn new(duration: Duration) -> Self {
        Self {
            started_at: None,
            duration,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    pub fn is_active(&self) -> bool {
        self.started_at
            .map(|t| t.elapsed() < self.duration)
            .unwrap_or(false)
    }

    /// Drop the pulse once it has run its course; returns true if it just ended.
    pub fn update(&mut self) -> bool {
        if self.started_at.is_some() && !self.is_active() {
            self.started_at = None;
            return true;
        }
        false
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new(Duration::from_millis(600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_encouragement_comes_from_pool() {
        for _ in 0..50 {
            assert!(ENCOURAGEMENTS.contains(&random_encouragement()));
        }
    }

    #[test]
    fn test_level_messages() {
        assert_eq!(
            level_switched_message("Animals 🐾"),
            "🎨 Switched to Animals 🐾! Have fun!"
        );
        assert_eq!(
            level_up_message("Easy Words 😊"),
            "🎉 Level up! Now playing: Easy Words 😊!"
        );
    }

    #[test]
    fn test_celebration_inactive_by_default() {
        let celebration = Celebration::default();
        assert!(!celebration.is_active());
    }

    #[test]
    fn test_celebration_runs_for_its_duration() {
        let mut celebration = Celebration::new(Duration::from_millis(20));
        celebration.start();
        assert!(celebration.is_active());
        assert!(!celebration.update());

        std::thread::sleep(Duration::from_millis(40));
        assert!(!celebration.is_active());
        assert!(celebration.update());
        // already cleared
        assert!(!celebration.update());
    }
}
