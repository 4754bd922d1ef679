//! Pure typing feedback: how the typed buffer compares to the target word.
//!
//! Everything here is a function of `(typed, target)` only, so the terminal
//! host and the tests see exactly the same classification.

/// Live classification of the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum TypingState {
    Perfect,
    OnTrack,
    OffTrack,
}

impl TypingState {
    pub fn message(&self) -> &'static str {
        match self {
            TypingState::Perfect => "✅ Perfect!",
            TypingState::OnTrack => "👍 Keep going!",
            TypingState::OffTrack => "🤔 Try again!",
        }
    }
}

/// Per-letter highlight of the target word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterMark {
    Correct,
    Incorrect,
    /// The next key to press
    Current,
    Pending,
}

/// Status line under the input; `None` means cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Live(TypingState),
    Success,
    Failure,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Status::Live(state) => state.message(),
            Status::Success => "🎉 Excellent! Well done!",
            Status::Failure => "💭 Try again! You can do it!",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            Status::Success | Status::Live(TypingState::Perfect | TypingState::OnTrack)
        )
    }
}

/// Full feedback for one buffer state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub state: TypingState,
    pub letters: Vec<(char, LetterMark)>,
    pub next_key: Option<char>,
}

/// Case-fold and trim outer whitespace, as applied to typed input.
pub fn normalize_input(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-fold only; targets keep their inner and outer characters.
pub fn normalize_target(raw: &str) -> String {
    raw.to_lowercase()
}

pub fn classify(typed: &str, target: &str) -> TypingState {
    if typed == target {
        TypingState::Perfect
    } else if target.starts_with(typed) {
        TypingState::OnTrack
    } else {
        TypingState::OffTrack
    }
}

pub fn letter_marks(typed: &str, target: &str) -> Vec<(char, LetterMark)> {
    let typed: Vec<char> = typed.chars().collect();

    target
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let mark = match typed.get(idx) {
                Some(&c) if c == expected => LetterMark::Correct,
                Some(_) => LetterMark::Incorrect,
                None if idx == typed.len() => LetterMark::Current,
                None => LetterMark::Pending,
            };
            (expected, mark)
        })
        .collect()
}

/// Next key to press, or `None` once the typed length reaches the target's.
pub fn next_key(typed: &str, target: &str) -> Option<char> {
    target.chars().nth(typed.chars().count())
}

/// Feedback for raw input against a raw target word.
pub fn evaluate(raw_input: &str, raw_target: &str) -> Feedback {
    let typed = normalize_input(raw_input);
    let target = normalize_target(raw_target);

    Feedback {
        state: classify(&typed, &target),
        letters: letter_marks(&typed, &target),
        next_key: next_key(&typed, &target),
    }
}
