use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty bucket controlling which words are served.
///
/// The six known levels form a closed set, but ids coming from a store or the
/// command line are never rejected: anything unrecognised is kept verbatim in
/// `Other` and rendered as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LevelId {
    #[default]
    Letters,
    Easy,
    Animals,
    Colors,
    Numbers,
    Family,
    Other(String),
}

impl LevelId {
    /// Known levels in menu order.
    pub const KNOWN: [LevelId; 6] = [
        LevelId::Letters,
        LevelId::Easy,
        LevelId::Animals,
        LevelId::Colors,
        LevelId::Numbers,
        LevelId::Family,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "letters" => LevelId::Letters,
            "easy" => LevelId::Easy,
            "animals" => LevelId::Animals,
            "colors" => LevelId::Colors,
            "numbers" => LevelId::Numbers,
            "family" => LevelId::Family,
            _ => LevelId::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LevelId::Letters => "letters",
            LevelId::Easy => "easy",
            LevelId::Animals => "animals",
            LevelId::Colors => "colors",
            LevelId::Numbers => "numbers",
            LevelId::Family => "family",
            LevelId::Other(raw) => raw,
        }
    }

    /// Label shown to the learner. Unknown ids fall back to the raw id.
    pub fn label(&self) -> &str {
        match self {
            LevelId::Letters => "Letters 🔤",
            LevelId::Easy => "Easy Words 😊",
            LevelId::Animals => "Animals 🐾",
            LevelId::Colors => "Colors 🌈",
            LevelId::Numbers => "Numbers 🔢",
            LevelId::Family => "Family 👨‍👩‍👧‍👦",
            LevelId::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LevelId::Other(_))
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LevelId {
    fn from(raw: &str) -> Self {
        LevelId::parse(raw)
    }
}

impl From<String> for LevelId {
    fn from(raw: String) -> Self {
        LevelId::parse(&raw)
    }
}

impl From<LevelId> for String {
    fn from(level: LevelId) -> Self {
        level.as_str().to_string()
    }
}
