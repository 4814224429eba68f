pub mod client;
pub mod clock;
pub mod live;
pub mod scoreboard;

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the live-data wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    pub game_date: Option<NaiveDate>,
    pub league_name: Option<String>,
    pub rows: Vec<ScoreboardRow>,
}

/// One game, flattened for tabular display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreboardRow {
    pub home_team: String, // "Lakers (LAL)"
    pub home_score: Option<Number>,
    pub away_team: String,
    pub away_score: Option<Number>,
    pub period: Option<Number>,
    pub time_remaining: String, // "4:03"
    pub game_status: Option<Number>,
    pub game_status_text: String, // "4th Qtr", "Final", "7:30 pm ET"
    pub secs_left: u64,
    pub score_diff: u64,
}

/// A normalized numeric cell. Absent cells are `None`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            // keep a trailing ".0" so float columns read as floats
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}
