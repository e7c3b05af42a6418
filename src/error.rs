use thiserror::Error;

// Everything that can go wrong between a raw log file and a query result.
// Queries never produce a "no results" error; an empty match is an empty Vec.
#[derive(Debug, Error)]
pub enum GameLogError {
    #[error("cannot read game log: {0}")]
    Io(#[from] std::io::Error),

    // Wrong field count or an unparseable field. Aborts the whole load.
    #[error("line {line}: {reason}")]
    RecordFormat { line: u64, reason: String },

    #[error("malformed date {token:?}: expected {expected}")]
    MalformedDate { token: String, expected: &'static str },

    #[error("invalid field {token:?}: expected {expected}")]
    InvalidField { token: String, expected: &'static str },
}
