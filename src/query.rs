use chrono::NaiveDate;
use tracing::debug;

use crate::record::GameLog;
use crate::store::GameLogStore;

// Inclusive date window for range queries. The default covers the 2017
// season's calendar year, used whenever a caller leaves a bound out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2017, 12, 31).unwrap(),
        }
    }
}

// The four query shapes. All return records ordered by date ascending, ties
// broken by insertion order, and none mutate the store.

pub fn games_on(store: &GameLogStore, date: NaiveDate) -> Vec<&GameLog> {
    let hits = store.by_date(date);
    debug!(%date, matches = hits.len(), "games-on");
    hits
}

pub fn games_between(store: &GameLogStore, range: DateRange) -> Vec<&GameLog> {
    let hits = in_window(store, range, |_| true);
    debug!(?range, matches = hits.len(), "games-between");
    hits
}

pub fn team_games<'a>(store: &'a GameLogStore, team: &str, range: DateRange) -> Vec<&'a GameLog> {
    let hits = in_window(store, range, |g| {
        g.home_team == team || g.visiting_team == team
    });
    debug!(team, ?range, matches = hits.len(), "team-games");
    hits
}

pub fn home_team_games<'a>(
    store: &'a GameLogStore,
    team: &str,
    range: DateRange,
) -> Vec<&'a GameLog> {
    let hits = in_window(store, range, |g| g.home_team == team);
    debug!(team, ?range, matches = hits.len(), "home-team-games");
    hits
}

// Shared execution path: the store's ordered range scan, narrowed by a
// per-shape predicate.
fn in_window<'a>(
    store: &'a GameLogStore,
    range: DateRange,
    keep: impl Fn(&GameLog) -> bool,
) -> Vec<&'a GameLog> {
    store
        .in_range(range.start, range.end)
        .into_iter()
        .filter(|g| keep(g))
        .collect()
}
