//! Game clock parsing.
//!
//! The live feed reports time left in the period as an ISO-8601-ish duration:
//! `PT04M03.00S`, `PT00M43.00S`, `PT0M7.00S`. Either group may be omitted, and
//! the pattern only has to match a prefix of the input.
use regex::Regex;
use std::sync::LazyLock;

static GAME_CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:([0-9]+)M)?(?:([0-9]+(?:\.[0-9]+)?)S)?").expect("valid game clock regex")
});

#[derive(Debug, Clone, Copy, PartialEq)]
struct ClockParts {
    minutes: u64,
    seconds: f64,
}

impl ClockParts {
    fn whole_seconds(&self) -> u64 {
        self.seconds.trunc() as u64
    }

    fn total_seconds(&self) -> u64 {
        self.minutes
            .saturating_mul(60)
            .saturating_add(self.whole_seconds())
    }
}

fn match_clock(clock: &str) -> Option<ClockParts> {
    let caps = GAME_CLOCK_RE.captures(clock)?;
    let minutes = match caps.get(1) {
        // only digits can match, so a parse failure means overflow
        Some(m) => m.as_str().parse::<u64>().unwrap_or(u64::MAX),
        None => 0,
    };
    let seconds = match caps.get(2) {
        Some(s) => s.as_str().parse::<f64>().ok()?,
        None => 0.0,
    };
    Some(ClockParts { minutes, seconds })
}

/// Seconds left on the game clock. Anything unparseable counts as 0.
///
/// ```
/// use nba_api::clock::parse_game_clock_to_seconds;
/// assert_eq!(parse_game_clock_to_seconds(Some("PT04M03.00S")), 243);
/// assert_eq!(parse_game_clock_to_seconds(None), 0);
/// ```
pub fn parse_game_clock_to_seconds(clock: Option<&str>) -> u64 {
    let Some(clock) = clock.filter(|c| !c.is_empty()) else {
        return 0;
    };
    match_clock(clock).map(|p| p.total_seconds()).unwrap_or(0)
}

/// Game clock as `M:SS`.
///
/// Blank input gives an empty string; input that doesn't look like a duration is
/// returned unchanged so the display still shows whatever the feed sent.
pub fn parse_game_clock(clock: Option<&str>) -> String {
    let Some(clock) = clock.filter(|c| !c.is_empty()) else {
        return String::new();
    };
    match match_clock(clock.trim()) {
        Some(parts) => format!("{}:{:02}", parts.minutes, parts.whole_seconds()),
        None => clock.to_owned(),
    }
}
