//! The typing session controller.
//!
//! `Tutor` is a plain state machine: every input is a [`TutorEvent`] passed to
//! [`Tutor::handle`], and every side effect it wants (fetching a word,
//! reporting an attempt, starting a timer) comes back as an [`Effect`]. The
//! caller performs the effects and feeds their completions back in as events.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    celebration::{
        level_switched_message, level_up_message, random_encouragement, RETRY_MESSAGE,
        START_MESSAGE,
    },
    error::CollaboratorError,
    feedback::{evaluate, normalize_input, normalize_target, Feedback, Status},
    guidance::KeyHighlight,
    level::LevelId,
    session::{Phase, Session, SessionConfig},
    stats::{Attempt, Stats},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    AutoAdvance,
}

/// Work requested by the tutor.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchWord(LevelId),
    ReportAttempt(Attempt),
    FetchStats,
    Schedule { timer: Timer, after: Duration },
    /// Play the completion bounce
    Celebrate,
    FocusInput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TutorEvent {
    Start,
    Stop,
    /// Replace the whole input buffer
    Input(String),
    Char(char),
    Backspace,
    Submit,
    NextWord,
    ChangeLevel(LevelId),
    WordLoaded(Result<String, CollaboratorError>),
    AttemptReported {
        attempt: Attempt,
        result: Result<Stats, CollaboratorError>,
    },
    StatsLoaded(Result<Stats, CollaboratorError>),
    TimerFired(Timer),
}

#[derive(Debug)]
pub struct Tutor {
    pub session: Session,
    pub session_config: SessionConfig,
    stats: Stats,
    input: String,
    status: Option<Status>,
    message: String,
    highlight: KeyHighlight,
}

impl Tutor {
    pub fn new(session_config: SessionConfig, level: LevelId) -> Self {
        Self {
            session: Session::new(level.clone()),
            session_config,
            stats: Stats {
                level,
                ..Stats::default()
            },
            input: String::new(),
            status: None,
            message: String::new(),
            highlight: KeyHighlight::default(),
        }
    }

    pub fn handle(&mut self, event: TutorEvent) -> Vec<Effect> {
        match event {
            TutorEvent::Start => self.start(),
            TutorEvent::Stop => self.stop(),
            TutorEvent::Input(text) => self.set_input(text),
            TutorEvent::Char(c) => self.push_char(c),
            TutorEvent::Backspace => self.backspace(),
            TutorEvent::Submit => self.submit(),
            TutorEvent::NextWord => self.advance_word(),
            TutorEvent::ChangeLevel(level) => self.change_level(level),
            TutorEvent::WordLoaded(result) => self.on_word_loaded(result),
            TutorEvent::AttemptReported { attempt, result } => {
                self.on_attempt_reported(attempt, result)
            }
            TutorEvent::StatsLoaded(result) => self.on_stats_loaded(result),
            TutorEvent::TimerFired(Timer::AutoAdvance) => self.advance_word(),
        }
    }

    /// Seed the displayed stats from the store.
    pub fn initialize(&mut self) -> Vec<Effect> {
        vec![Effect::FetchStats]
    }

    pub fn start(&mut self) -> Vec<Effect> {
        if self.session.is_active() {
            debug!("start ignored, session already active");
            return vec![];
        }

        info!(level = %self.session.level, "session started");
        self.session.phase = Phase::Active;
        self.clear_input();
        self.message = START_MESSAGE.to_string();
        vec![
            Effect::FetchWord(self.session.level.clone()),
            Effect::FocusInput,
        ]
    }

    pub fn stop(&mut self) -> Vec<Effect> {
        if self.session.is_active() {
            info!("session stopped");
            self.session.phase = Phase::Idle;
            self.clear_input();
        }
        vec![]
    }

    pub fn set_input(&mut self, text: String) -> Vec<Effect> {
        if self.session.is_active() {
            self.input = text;
            self.refresh_feedback();
        }
        vec![]
    }

    pub fn push_char(&mut self, c: char) -> Vec<Effect> {
        if self.session.is_active() {
            self.input.push(c);
            self.refresh_feedback();
        }
        vec![]
    }

    pub fn backspace(&mut self) -> Vec<Effect> {
        if self.session.is_active() && self.input.pop().is_some() {
            self.refresh_feedback();
        }
        vec![]
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        if !self.session.is_active() || !self.session.has_target() {
            debug!("submit ignored, no word in play");
            return vec![];
        }
        if self.status == Some(Status::Success) {
            debug!("submit ignored, word already solved");
            return vec![];
        }

        let typed = normalize_input(&self.input);
        let target = normalize_target(&self.session.target_word);
        let attempt = Attempt {
            correct: typed == target,
            word_length: target.chars().count(),
            level: self.session.level.clone(),
        };

        if attempt.correct {
            info!(word = %target, "word completed");
            self.status = Some(Status::Success);
            self.stats.words_completed += 1;
            self.message = random_encouragement().to_string();
            vec![
                Effect::ReportAttempt(attempt),
                Effect::Celebrate,
                Effect::Schedule {
                    timer: Timer::AutoAdvance,
                    after: self.session_config.auto_advance,
                },
            ]
        } else {
            debug!(typed = %typed, word = %target, "word missed");
            self.status = Some(Status::Failure);
            self.message = RETRY_MESSAGE.to_string();
            vec![Effect::ReportAttempt(attempt)]
        }
    }

    pub fn advance_word(&mut self) -> Vec<Effect> {
        if !self.session.is_active() {
            debug!("advance ignored, session idle");
            return vec![];
        }

        self.clear_input();
        vec![
            Effect::FetchWord(self.session.level.clone()),
            Effect::FocusInput,
        ]
    }

    pub fn change_level(&mut self, level: LevelId) -> Vec<Effect> {
        info!(from = %self.session.level, to = %level, "level changed");
        self.session.level = level.clone();
        self.stats.level = level;
        self.message = level_switched_message(self.session.level.label());

        if self.session.is_active() {
            self.clear_input();
            vec![
                Effect::FetchWord(self.session.level.clone()),
                Effect::FocusInput,
            ]
        } else {
            vec![]
        }
    }

    fn on_word_loaded(&mut self, result: Result<String, CollaboratorError>) -> Vec<Effect> {
        let word = match result {
            Ok(word) if !word.trim().is_empty() => word,
            Ok(_) => {
                warn!("word source returned an empty word, using fallback");
                self.session_config.fallback_word.clone()
            }
            Err(err) => {
                warn!(error = %err, "word fetch failed, using fallback");
                self.session_config.fallback_word.clone()
            }
        };

        debug!(word = %word, "new target word");
        self.session.target_word = word;
        self.clear_input();
        if self.session.is_active() {
            let first = normalize_target(&self.session.target_word).chars().next();
            self.update_highlight(first);
        }
        vec![]
    }

    fn on_attempt_reported(
        &mut self,
        attempt: Attempt,
        result: Result<Stats, CollaboratorError>,
    ) -> Vec<Effect> {
        match result {
            Ok(stats) => {
                // only a level the store moved the attempt to counts as a level up;
                // anything else is a report from before a level change
                let promoted =
                    stats.level != attempt.level && attempt.level == self.session.level;
                self.adopt_stats(stats);
                if promoted {
                    self.session.level = self.stats.level.clone();
                    info!(level = %self.session.level, "level up");
                    self.message = level_up_message(self.session.level.label());
                } else {
                    self.stats.level = self.session.level.clone();
                }
            }
            Err(err) if err.is_unreachable() => {
                warn!(error = %err, "progress store unreachable, updating locally");
                // correct attempts were already counted on submit
                if !attempt.correct {
                    self.stats.words_completed += 1;
                }
                self.stats.letters_typed += attempt.word_length as u32;
            }
            Err(err) => warn!(error = %err, "progress report rejected"),
        }
        vec![]
    }

    fn on_stats_loaded(&mut self, result: Result<Stats, CollaboratorError>) -> Vec<Effect> {
        match result {
            Ok(stats) => {
                self.adopt_stats(stats);
                self.session.level = self.stats.level.clone();
            }
            Err(err) => warn!(error = %err, "could not load stats"),
        }
        vec![]
    }

    fn adopt_stats(&mut self, stats: Stats) {
        let shown_words = self.stats.words_completed;
        self.stats = stats;
        self.stats.words_completed = self.stats.words_completed.max(shown_words);
    }

    fn refresh_feedback(&mut self) {
        if !self.session.has_target() {
            return;
        }
        let feedback = self.feedback();
        self.status = Some(Status::Live(feedback.state));
        self.update_highlight(feedback.next_key);
    }

    fn update_highlight(&mut self, next_key: Option<char>) {
        match next_key {
            Some(key) => self.highlight.show(key, &self.session_config.layout),
            None => self.highlight.clear(),
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.status = None;
        self.highlight.clear();
    }

    pub fn feedback(&self) -> Feedback {
        evaluate(&self.input, &self.session.target_word)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn highlighted_key(&self) -> Option<char> {
        self.highlight.key()
    }

    pub fn guidance(&self) -> Option<&'static str> {
        if self.session_config.finger_guidance {
            self.highlight.guidance()
        } else {
            None
        }
    }

    pub fn level_label(&self) -> &str {
        self.session.level.label()
    }
}
