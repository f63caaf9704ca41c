use crate::difficulty::Difficulty;
use crate::leaderboard::ScoreRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Backing storage for recorded scores.
///
/// The boards for the three difficulties and the all-time high score are
/// loaded & saved independently so that sessions only rewrite what they
/// change.
pub(crate) trait ScoreStore: fmt::Debug {
    fn load(&self, difficulty: Difficulty) -> Result<Vec<ScoreRecord>, LoadError>;
    fn save(&self, difficulty: Difficulty, records: &[ScoreRecord]) -> Result<(), SaveError>;
    fn load_high_score(&self) -> Result<u32, LoadError>;
    fn save_high_score(&self, score: u32) -> Result<(), SaveError>;
}

/// A [`ScoreStore`] kept in a single JSON file on disk
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: PathBuf) -> JsonFileStore {
        JsonFileStore { path }
    }

    /// Returns the default path for the scores file: `scores.json` in a
    /// program-specific subdirectory of the local data directory
    pub(crate) fn default_path() -> Option<PathBuf> {
        Some(dirs::data_local_dir()?.join("boomsnake").join("scores.json"))
    }

    /// Read the whole scores file.  A file that does not exist yet reads as
    /// an empty document.
    fn read_document(&self) -> Result<Document, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    fn write_document(&self, document: &Document) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(document).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self, difficulty: Difficulty) -> Result<Vec<ScoreRecord>, LoadError> {
        let mut document = self.read_document()?;
        Ok(std::mem::take(document.slot_mut(difficulty)))
    }

    fn save(&self, difficulty: Difficulty, records: &[ScoreRecord]) -> Result<(), SaveError> {
        // An unreadable document is dropped and rebuilt rather than blocking
        // every future save.
        let mut document = self.read_document().unwrap_or_default();
        *document.slot_mut(difficulty) = records.to_vec();
        self.write_document(&document)
    }

    fn load_high_score(&self) -> Result<u32, LoadError> {
        Ok(self.read_document()?.high_score)
    }

    fn save_high_score(&self, score: u32) -> Result<(), SaveError> {
        let mut document = self.read_document().unwrap_or_default();
        document.high_score = score;
        self.write_document(&document)
    }
}

/// A [`ScoreStore`] used when persistence is disabled: loads nothing, saves
/// nowhere, and never fails
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct NullStore;

impl ScoreStore for NullStore {
    fn load(&self, _difficulty: Difficulty) -> Result<Vec<ScoreRecord>, LoadError> {
        Ok(Vec::new())
    }

    fn save(&self, _difficulty: Difficulty, _records: &[ScoreRecord]) -> Result<(), SaveError> {
        Ok(())
    }

    fn load_high_score(&self) -> Result<u32, LoadError> {
        Ok(0)
    }

    fn save_high_score(&self, _score: u32) -> Result<(), SaveError> {
        Ok(())
    }
}

/// The on-disk layout of the scores file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
struct Document {
    high_score: u32,
    easy: Vec<ScoreRecord>,
    normal: Vec<ScoreRecord>,
    hard: Vec<ScoreRecord>,
}

impl Document {
    fn slot_mut(&mut self, difficulty: Difficulty) -> &mut Vec<ScoreRecord> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Normal => &mut self.normal,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write scores file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize scores")]
    Deserialize(#[source] serde_json::Error),
}

/// An in-memory [`ScoreStore`] for exercising the rest of the app without
/// touching the filesystem
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    boards: std::cell::RefCell<enum_map::EnumMap<Difficulty, Vec<ScoreRecord>>>,
    high_score: std::cell::Cell<u32>,
    fail_saves: std::cell::Cell<bool>,
}

#[cfg(test)]
impl MemoryStore {
    /// A store whose save methods always fail
    pub(crate) fn fail_saves() -> MemoryStore {
        let store = MemoryStore::default();
        store.fail_saves.set(true);
        store
    }

    pub(crate) fn saved(&self, difficulty: Difficulty) -> Vec<ScoreRecord> {
        self.boards.borrow()[difficulty].clone()
    }

    pub(crate) fn saved_high_score(&self) -> u32 {
        self.high_score.get()
    }
}

#[cfg(test)]
impl ScoreStore for MemoryStore {
    fn load(&self, difficulty: Difficulty) -> Result<Vec<ScoreRecord>, LoadError> {
        Ok(self.boards.borrow()[difficulty].clone())
    }

    fn save(&self, difficulty: Difficulty, records: &[ScoreRecord]) -> Result<(), SaveError> {
        if self.fail_saves.get() {
            return Err(SaveError::write(std::io::Error::other(
                "memory store set to fail",
            )));
        }
        self.boards.borrow_mut()[difficulty] = records.to_vec();
        Ok(())
    }

    fn load_high_score(&self) -> Result<u32, LoadError> {
        Ok(self.high_score.get())
    }

    fn save_high_score(&self, score: u32) -> Result<(), SaveError> {
        if self.fail_saves.get() {
            return Err(SaveError::write(std::io::Error::other(
                "memory store set to fail",
            )));
        }
        self.high_score.set(score);
        Ok(())
    }
}
