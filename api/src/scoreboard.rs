use crate::clock::{parse_game_clock, parse_game_clock_to_seconds};
use crate::live::{LiveGame, LiveTeam, LooseValue};
use crate::{Number, ScoreboardRow};
use log::debug;

// ---------------------------------------------------------------------------
// Row assembly: live wire games → flat scoreboard rows
// ---------------------------------------------------------------------------

/// Absolute score differential. Scores that aren't whole numbers count as a tie.
pub fn compute_score_diff(home: Option<&LooseValue>, away: Option<&LooseValue>) -> u64 {
    match (home.and_then(LooseValue::to_int), away.and_then(LooseValue::to_int)) {
        (Some(h), Some(a)) => h.abs_diff(a),
        _ => 0,
    }
}

/// `"Lakers (LAL)"`. Missing parts render empty.
pub fn format_team_name(team: &LiveTeam) -> String {
    let part = |v: &Option<LooseValue>| v.as_ref().map(ToString::to_string).unwrap_or_default();
    format!("{} ({})", part(&team.team_name), part(&team.team_tricode))
        .trim()
        .to_owned()
}

/// Build one row per game, in feed order, then coerce the numeric columns.
pub fn build_scoreboard_rows(games: &[LiveGame]) -> Vec<ScoreboardRow> {
    let drafts: Vec<DraftRow> = games.iter().map(draft_row).collect();
    normalize_numeric_columns(drafts)
}

/// A row before numeric normalization; score, period and status are still raw.
#[derive(Debug, Clone)]
struct DraftRow {
    home_team: String,
    home_score: Option<LooseValue>,
    away_team: String,
    away_score: Option<LooseValue>,
    period: Option<LooseValue>,
    time_remaining: String,
    game_status: Option<LooseValue>,
    game_status_text: String,
    secs_left: u64,
    score_diff: u64,
}

fn draft_row(game: &LiveGame) -> DraftRow {
    let empty = LiveTeam::default();
    let home = game.home_team.as_ref().unwrap_or(&empty);
    let away = game.away_team.as_ref().unwrap_or(&empty);

    let clock = game.game_clock.as_ref();
    let clock_text = clock.filter(|c| c.is_truthy()).map(ToString::to_string);
    let time_remaining = parse_game_clock(clock_text.as_deref());
    let secs_left = parse_game_clock_to_seconds(clock.and_then(LooseValue::as_str));
    if let Some(raw) = clock_text.as_deref()
        && secs_left == 0
        && time_remaining == raw
    {
        debug!("unparseable game clock {raw:?}, treating as 0 seconds left");
    }

    DraftRow {
        home_team: format_team_name(home),
        home_score: home.score.clone(),
        away_team: format_team_name(away),
        away_score: away.score.clone(),
        period: game.period.clone(),
        time_remaining,
        game_status: game.game_status.clone(),
        game_status_text: game
            .game_status_text
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        secs_left,
        score_diff: compute_score_diff(home.score.as_ref(), away.score.as_ref()),
    }
}

fn normalize_numeric_columns(drafts: Vec<DraftRow>) -> Vec<ScoreboardRow> {
    let home_scores = coerce_column("home_score", drafts.iter().map(|d| d.home_score.as_ref()));
    let away_scores = coerce_column("away_score", drafts.iter().map(|d| d.away_score.as_ref()));
    let periods = coerce_column("period", drafts.iter().map(|d| d.period.as_ref()));
    let statuses = coerce_column("game_status", drafts.iter().map(|d| d.game_status.as_ref()));

    drafts
        .into_iter()
        .enumerate()
        .map(|(i, d)| ScoreboardRow {
            home_team: d.home_team,
            home_score: home_scores[i],
            away_team: d.away_team,
            away_score: away_scores[i],
            period: periods[i],
            time_remaining: d.time_remaining,
            game_status: statuses[i],
            game_status_text: d.game_status_text,
            secs_left: d.secs_left,
            score_diff: d.score_diff,
        })
        .collect()
}

/// Coerce one column to numbers. A column with any float in it becomes all floats.
fn coerce_column<'a>(
    name: &str,
    values: impl Iterator<Item = Option<&'a LooseValue>>,
) -> Vec<Option<Number>> {
    let mut cells: Vec<Option<Number>> = values
        .map(|v| {
            let n = v.and_then(LooseValue::to_number);
            if let (Some(raw), None) = (v, n) {
                debug!("{name}: {raw} is not numeric, leaving it empty");
            }
            n
        })
        .collect();

    if cells.iter().flatten().any(Number::is_float) {
        for cell in cells.iter_mut().flatten() {
            *cell = Number::Float(cell.as_f64());
        }
    }
    cells
}
