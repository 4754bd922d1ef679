use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::{error::CollaboratorError, level::LevelId};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// Supplies target words for a level.
pub trait WordSource: Send + Sync {
    fn random_word(&self, level: &LevelId) -> Result<String, CollaboratorError>;
}

#[derive(Deserialize, Clone, Debug)]
struct WordCollection {
    level: LevelId,
    words: Vec<String>,
}

/// Word collections bundled into the binary, one JSON file per level.
#[derive(Debug, Clone)]
pub struct WordBank {
    collections: BTreeMap<LevelId, Vec<String>>,
}

impl WordBank {
    pub fn builtin() -> Result<Self, serde_json::Error> {
        let mut collections = BTreeMap::new();

        for file in WORDS_DIR.files() {
            let Some(contents) = file.contents_utf8() else {
                warn!(path = %file.path().display(), "skipping non utf-8 word file");
                continue;
            };
            let collection: WordCollection = serde_json::from_str(contents)?;
            collections.insert(collection.level, collection.words);
        }

        Ok(Self { collections })
    }

    pub fn from_collections<I>(collections: I) -> Self
    where
        I: IntoIterator<Item = (LevelId, Vec<String>)>,
    {
        Self {
            collections: collections.into_iter().collect(),
        }
    }

    pub fn words(&self, level: &LevelId) -> Option<&[String]> {
        self.collections.get(level).map(Vec::as_slice)
    }

    pub fn levels(&self) -> impl Iterator<Item = &LevelId> {
        self.collections.keys()
    }
}

impl WordSource for WordBank {
    fn random_word(&self, level: &LevelId) -> Result<String, CollaboratorError> {
        let words = self
            .words(level)
            .ok_or_else(|| CollaboratorError::Rejected(format!("no words for level '{level}'")))?;

        words
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| CollaboratorError::Rejected(format!("level '{level}' has no words")))
    }
}
