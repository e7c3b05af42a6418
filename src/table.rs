use crate::fields::format_date;
use crate::record::GameLog;

const BORDER: &str = "+--------------------------------+";

// Render query results as the fixed-width bordered table: date, visiting
// team, visiting league, visiting score, home team, home league, home score,
// scores right-aligned to width 3. An empty result still gets both borders.
pub fn render(games: &[&GameLog]) -> String {
    let mut out = String::from(BORDER);
    for game in games {
        out.push('\n');
        out.push_str(&format!(
            "|{}|{}|{}|{:>3}|{}|{}|{:>3}|",
            format_date(game.date_of_game),
            game.visiting_team,
            game.visiting_team_league,
            game.visiting_team_score,
            game.home_team,
            game.home_team_league,
            game.home_team_score,
        ));
    }
    out.push('\n');
    out.push_str(BORDER);
    out
}
