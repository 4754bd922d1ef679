use std::collections::VecDeque;
use std::time::Duration;

use crate::{
    stats::ProgressStore,
    tutor::{Effect, Timer, Tutor, TutorEvent},
    word_source::WordSource,
};

/// Runs a [`Tutor`] with collaborators called synchronously.
///
/// Collaborator effects complete immediately and their results are fed back
/// before `dispatch` returns. Timers are queued and only fire when
/// [`InlineDriver::fire_timers`] is called, so tests decide when time passes.
pub struct InlineDriver<W: WordSource, P: ProgressStore> {
    pub tutor: Tutor,
    words: W,
    progress: P,
    timers: VecDeque<(Timer, Duration)>,
    celebrations: usize,
    focus_requests: usize,
}

impl<W: WordSource, P: ProgressStore> InlineDriver<W, P> {
    pub fn new(tutor: Tutor, words: W, progress: P) -> Self {
        Self {
            tutor,
            words,
            progress,
            timers: VecDeque::new(),
            celebrations: 0,
            focus_requests: 0,
        }
    }

    /// Initialize the tutor (loads stats) and return the driver.
    pub fn initialized(mut self) -> Self {
        let effects = self.tutor.initialize();
        self.run(effects);
        self
    }

    pub fn dispatch(&mut self, event: TutorEvent) {
        let effects = self.tutor.handle(event);
        self.run(effects);
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.dispatch(TutorEvent::Char(c));
        }
    }

    /// Fire every timer queued so far; returns how many fired.
    pub fn fire_timers(&mut self) -> usize {
        let due: Vec<_> = self.timers.drain(..).collect();
        for (timer, _) in &due {
            self.dispatch(TutorEvent::TimerFired(*timer));
        }
        due.len()
    }

    pub fn pending_timers(&self) -> impl Iterator<Item = &(Timer, Duration)> {
        self.timers.iter()
    }

    pub fn celebrations(&self) -> usize {
        self.celebrations
    }

    pub fn focus_requests(&self) -> usize {
        self.focus_requests
    }

    pub fn words(&self) -> &W {
        &self.words
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    fn run(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            let followups = match effect {
                Effect::FetchWord(level) => {
                    let result = self.words.random_word(&level);
                    self.tutor.handle(TutorEvent::WordLoaded(result))
                }
                Effect::ReportAttempt(attempt) => {
                    let result = self.progress.report_attempt(&attempt);
                    self.tutor
                        .handle(TutorEvent::AttemptReported { attempt, result })
                }
                Effect::FetchStats => {
                    let result = self.progress.fetch_stats();
                    self.tutor.handle(TutorEvent::StatsLoaded(result))
                }
                Effect::Schedule { timer, after } => {
                    self.timers.push_back((timer, after));
                    vec![]
                }
                Effect::Celebrate => {
                    self.celebrations += 1;
                    vec![]
                }
                Effect::FocusInput => {
                    self.focus_requests += 1;
                    vec![]
                }
            };
            queue.extend(followups);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        level::LevelId,
        session::SessionConfig,
        stats::{MemoryProgressStore, Stats},
        word_source::WordBank,
    };

    fn driver() -> InlineDriver<WordBank, MemoryProgressStore> {
        let bank = WordBank::from_collections([(LevelId::Easy, vec!["sun".to_string()])]);
        InlineDriver::new(
            Tutor::new(SessionConfig::default(), LevelId::Easy),
            bank,
            MemoryProgressStore::with_stats(Stats {
                level: LevelId::Easy,
                ..Stats::default()
            }),
        )
        .initialized()
    }

    #[test]
    fn test_start_loads_word_synchronously() {
        let mut driver = driver();
        driver.dispatch(TutorEvent::Start);
        assert_eq!(driver.tutor.session.target_word, "sun");
        assert_eq!(driver.focus_requests(), 1);
    }

    #[test]
    fn test_timers_wait_for_fire() {
        let mut driver = driver();
        driver.dispatch(TutorEvent::Start);
        driver.type_text("sun");
        driver.dispatch(TutorEvent::Submit);

        assert_eq!(driver.celebrations(), 1);
        assert_eq!(driver.pending_timers().count(), 1);
        assert_eq!(driver.progress().fetch_stats().unwrap().words_completed, 1);

        assert_eq!(driver.fire_timers(), 1);
        assert_eq!(driver.pending_timers().count(), 0);
        assert_eq!(driver.tutor.input(), "");
        assert_eq!(driver.focus_requests(), 2);
    }
}
