use crate::difficulty::Difficulty;
use crate::storage::{LoadError, SaveError, ScoreStore};
use crate::util::EnumExt;
use chrono::NaiveDate;
use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

/// The maximum number of records kept per difficulty
const MAX_RECORDS: usize = 10;

/// One finished game on a leaderboard
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreRecord {
    /// Points scored
    pub(crate) score: u32,

    /// Whole seconds between the first move and the crash
    pub(crate) seconds: u64,

    /// The day the game was played
    pub(crate) date: NaiveDate,
}

/// The top scores for each difficulty plus the all-time high score, mirrored
/// to a [`ScoreStore`] whenever a game ends
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Leaderboards {
    boards: EnumMap<Difficulty, Vec<ScoreRecord>>,
    high_score: u32,
}

impl Leaderboards {
    /// Read all stored records from `store`
    pub(crate) fn load(store: &dyn ScoreStore) -> Result<Leaderboards, LoadError> {
        let mut boards = EnumMap::default();
        for difficulty in Difficulty::iter() {
            boards[difficulty] = store.load(difficulty)?;
        }
        let high_score = store.load_high_score()?;
        Ok(Leaderboards { boards, high_score })
    }

    /// The all-time high score across every difficulty
    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The recorded games for `difficulty`, best first
    pub(crate) fn records(&self, difficulty: Difficulty) -> &[ScoreRecord] {
        &self.boards[difficulty]
    }

    /// Enter a finished game on the board for `difficulty` and persist the
    /// result to `store`.  The in-memory boards are updated even when
    /// persisting fails.
    pub(crate) fn record(
        &mut self,
        difficulty: Difficulty,
        record: ScoreRecord,
        store: &dyn ScoreStore,
    ) -> Result<(), SaveError> {
        let board = &mut self.boards[difficulty];
        board.push(record);
        // A stable sort keeps earlier games ahead of later ones on a tie.
        board.sort_by(|a, b| b.score.cmp(&a.score));
        board.truncate(MAX_RECORDS);
        let mut result = store.save(difficulty, board);
        if record.score > self.high_score {
            self.high_score = record.score;
            result = result.and(store.save_high_score(record.score));
        }
        result
    }
}
