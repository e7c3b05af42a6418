use chrono::NaiveDate;

use crate::error::GameLogError;

// Log lines carry dates as yyyyMMdd; query input and display use MM-dd-yyyy.
const LOG_DATE: &str = "%Y%m%d";
const DISPLAY_DATE: &str = "%m-%d-%Y";

// Strip every double quote, wherever it appears in the token. The log format
// quotes some fields but supports no escaping.
pub fn unquote(token: &str) -> String {
    token.replace('"', "")
}

// Parse the date field of a raw log line, e.g. `20170704`.
pub fn parse_log_date(token: &str) -> Result<NaiveDate, GameLogError> {
    parse_date(token, LOG_DATE, "yyyyMMdd")
}

// Parse a date as typed at the query prompt, e.g. `07-04-2017`.
pub fn parse_display_date(token: &str) -> Result<NaiveDate, GameLogError> {
    parse_date(token, DISPLAY_DATE, "MM-dd-yyyy")
}

fn parse_date(
    token: &str,
    pattern: &str,
    expected: &'static str,
) -> Result<NaiveDate, GameLogError> {
    NaiveDate::parse_from_str(&unquote(token), pattern).map_err(|_| {
        GameLogError::MalformedDate {
            token: token.to_owned(),
            expected,
        }
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE).to_string()
}

// The game-number field is a single character: '0' for no doubleheader,
// '1' or '2' for doubleheader games.
pub fn parse_game_number(token: &str) -> Result<char, GameLogError> {
    let unquoted = unquote(token);
    let mut chars = unquoted.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(GameLogError::InvalidField {
            token: token.to_owned(),
            expected: "a single character",
        }),
    }
}

// Numeric fields are unquoted in the log format, so no quote stripping here.
pub fn parse_num(token: &str) -> Result<i32, GameLogError> {
    token.parse().map_err(|_| GameLogError::InvalidField {
        token: token.to_owned(),
        expected: "a base-10 integer",
    })
}
