/// NBA live-data CDN raw wire types.
/// Endpoint: https://cdn.nba.com/static/json/liveData/scoreboard/todaysScoreboard_00.json
///
/// The feed is loosely typed: scores arrive as numbers on some days and as strings on others,
/// and any field may be missing or `null`. Every leaf we read is therefore a `LooseValue`.
use crate::Number;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub meta: Option<serde_json::Value>,
    pub scoreboard: Option<LiveScoreboard>,
}

impl ScoreboardResponse {
    /// Games on the scoreboard; a missing `scoreboard` or `games` is an empty slate.
    pub fn games(&self) -> &[LiveGame] {
        self.scoreboard.as_ref().map(|s| s.games.as_slice()).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LiveScoreboard {
    pub game_date: Option<String>, // "2024-01-15"
    pub league_id: Option<String>,
    pub league_name: Option<String>,
    #[serde(default)]
    pub games: Vec<LiveGame>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveGame {
    pub game_id: Option<LooseValue>,
    pub game_status: Option<LooseValue>, // 1 = scheduled, 2 = live, 3 = final
    pub game_status_text: Option<LooseValue>,
    pub period: Option<LooseValue>,
    pub game_clock: Option<LooseValue>, // "PT04M03.00S"
    #[serde(default, deserialize_with = "team_or_none")]
    pub home_team: Option<LiveTeam>,
    #[serde(default, deserialize_with = "team_or_none")]
    pub away_team: Option<LiveTeam>,
}

/// Anything that isn't a team object (`""`, `0`, `false`, `[]`, ...) counts as no team.
fn team_or_none<'de, D>(deserializer: D) -> Result<Option<LiveTeam>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        team @ serde_json::Value::Object(_) => LiveTeam::deserialize(team)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveTeam {
    pub team_name: Option<LooseValue>,
    pub team_tricode: Option<LooseValue>,
    pub score: Option<LooseValue>,
}

/// A JSON leaf of unknown type. `null` never reaches this type: optional fields map it to `None`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LooseValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LooseValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Empty text, zero, `false` and empty containers are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            LooseValue::Bool(b) => *b,
            LooseValue::Int(i) => *i != 0,
            LooseValue::Float(f) => *f != 0.0,
            LooseValue::Text(s) => !s.is_empty(),
            LooseValue::Other(v) => match v {
                serde_json::Value::Null => false,
                serde_json::Value::Array(a) => !a.is_empty(),
                serde_json::Value::Object(o) => !o.is_empty(),
                _ => true,
            },
        }
    }

    /// Strict integer conversion: floats truncate, text must be a whole decimal number.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            LooseValue::Bool(b) => Some(i64::from(*b)),
            LooseValue::Int(i) => Some(*i),
            LooseValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            LooseValue::Float(_) => None,
            LooseValue::Text(s) => s.trim().parse::<i64>().ok(),
            LooseValue::Other(_) => None,
        }
    }

    /// Lenient numeric conversion used by the column normalization pass.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            LooseValue::Bool(b) => Some(Number::Int(i64::from(*b))),
            LooseValue::Int(i) => Some(Number::Int(*i)),
            LooseValue::Float(f) if f.is_nan() => None,
            LooseValue::Float(f) => Some(Number::Float(*f)),
            LooseValue::Text(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    return Some(Number::Int(i));
                }
                s.parse::<f64>()
                    .ok()
                    .filter(|f| !f.is_nan())
                    .map(Number::Float)
            }
            LooseValue::Other(_) => None,
        }
    }
}

impl fmt::Display for LooseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseValue::Bool(b) => write!(f, "{b}"),
            LooseValue::Int(i) => write!(f, "{i}"),
            LooseValue::Float(x) => write!(f, "{}", Number::Float(*x)),
            LooseValue::Text(s) => f.write_str(s),
            LooseValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for LooseValue {
    fn from(s: &str) -> Self {
        LooseValue::Text(s.to_owned())
    }
}

impl From<i64> for LooseValue {
    fn from(i: i64) -> Self {
        LooseValue::Int(i)
    }
}

impl From<f64> for LooseValue {
    fn from(f: f64) -> Self {
        LooseValue::Float(f)
    }
}
