use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::GameLogError;
use crate::record::{self, GameLog};

// The in-memory game-log store. Owns every record in insertion order, plus a
// date index mapping each date to the positions of that date's records. The
// index is only ever touched by `bulk_insert`.
#[derive(Default)]
pub struct GameLogStore {
    games: Vec<GameLog>,
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
}

impl GameLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Append a parsed batch in input order, extending the date index.
    pub fn bulk_insert(&mut self, batch: Vec<GameLog>) {
        for game in batch {
            self.by_date
                .entry(game.date_of_game)
                .or_default()
                .push(self.games.len());
            self.games.push(game);
        }
    }

    // Parse a log file and commit it, returning the committed count. A parse
    // failure on any line means nothing reaches the store.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize, GameLogError> {
        let batch = record::load_file(path)?;
        let count = batch.len();
        self.bulk_insert(batch);
        info!(records = count, total = self.games.len(), "game log loaded");
        Ok(count)
    }

    pub fn all(&self) -> &[GameLog] {
        &self.games
    }

    // Records on exactly this date, insertion order preserved.
    pub fn by_date(&self, date: NaiveDate) -> Vec<&GameLog> {
        self.by_date
            .get(&date)
            .map(|ids| ids.iter().map(|&i| &self.games[i]).collect())
            .unwrap_or_default()
    }

    // Inclusive date-range scan: date ascending, insertion order within a
    // date. Inverted bounds yield an empty result, never an error.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&GameLog> {
        if start > end {
            return Vec::new();
        }
        self.by_date
            .range(start..=end)
            .flat_map(|(_, ids)| ids.iter().map(|&i| &self.games[i]))
            .collect()
    }
}
