use crate::Scoreboard;
use crate::live::ScoreboardResponse;
use crate::scoreboard::build_scoreboard_rows;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const NBA_CDN: &str = "https://cdn.nba.com";
const TODAYS_SCOREBOARD: &str = "/static/json/liveData/scoreboard/todaysScoreboard_00.json";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) nbatui/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the NBA live-data CDN.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    base_url: String,
    timeout: Duration,
    snapshot: Option<PathBuf>,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .default_headers(cdn_headers())
                .build()
                .unwrap_or_default(),
            base_url: NBA_CDN.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            snapshot: None,
        }
    }
}

/// The CDN rejects requests that don't look like they came from nba.com.
fn cdn_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    headers
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Snapshot(std::io::Error, PathBuf),
    SnapshotJson(serde_json::Error, PathBuf),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Snapshot(e, path) => {
                write!(f, "Could not read scoreboard snapshot {}: {e}", path.display())
            }
            ApiError::SnapshotJson(e, path) => {
                write!(f, "Invalid scoreboard snapshot {}: {e}", path.display())
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::Snapshot(e, _) => Some(e),
            ApiError::SnapshotJson(e, _) => Some(e),
        }
    }
}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host serving the same paths (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the scoreboard payload from a local JSON file instead of the network.
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    /// Fetch today's scoreboard and flatten it into rows.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Scoreboard> {
        let raw = self.fetch_live_scoreboard().await?;
        Ok(map_scoreboard(raw))
    }

    /// Fetch today's scoreboard payload as sent by the CDN.
    ///
    /// Source order:
    /// 1) the snapshot file, when one is configured.
    /// 2) `todaysScoreboard_00.json` on the CDN.
    ///
    /// There is no fallback between the two: whichever is used, its failure is returned.
    pub async fn fetch_live_scoreboard(&self) -> ApiResult<ScoreboardResponse> {
        if let Some(path) = &self.snapshot {
            return load_snapshot(path);
        }
        let url = format!("{}{TODAYS_SCOREBOARD}", self.base_url);
        self.get(&url).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

fn load_snapshot(path: &Path) -> ApiResult<ScoreboardResponse> {
    debug!("loading scoreboard snapshot from {}", path.display());
    let content =
        std::fs::read_to_string(path).map_err(|e| ApiError::Snapshot(e, path.to_owned()))?;
    serde_json::from_str(&content).map_err(|e| ApiError::SnapshotJson(e, path.to_owned()))
}

// ---------------------------------------------------------------------------
// Mapping: live wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_scoreboard(raw: ScoreboardResponse) -> Scoreboard {
    let rows = build_scoreboard_rows(raw.games());
    debug!("built {} scoreboard rows", rows.len());

    let scoreboard = raw.scoreboard.unwrap_or_default();
    let game_date = scoreboard
        .game_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

    Scoreboard {
        game_date,
        league_name: scoreboard.league_name.filter(|n| !n.trim().is_empty()),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "meta": {"version": 1, "code": 200},
        "scoreboard": {
            "gameDate": "2024-01-15",
            "leagueId": "00",
            "leagueName": "National Basketball Association",
            "games": [
                {
                    "gameId": "0022300555",
                    "gameStatus": 2,
                    "gameStatusText": "4th Qtr",
                    "period": 4,
                    "gameClock": "PT00M43.00S",
                    "homeTeam": {"teamId": 1610612747, "teamName": "Lakers", "teamTricode": "LAL", "score": "100"},
                    "awayTeam": {"teamId": 1610612738, "teamName": "Celtics", "teamTricode": "BOS", "score": "98"}
                },
                {
                    "gameId": "0022300556",
                    "gameStatus": 1,
                    "gameStatusText": "7:30 pm ET",
                    "period": 0,
                    "gameClock": "",
                    "homeTeam": {"teamName": "Knicks", "teamTricode": "NYK", "score": 0},
                    "awayTeam": {"teamName": "Heat", "teamTricode": "MIA", "score": 0}
                }
            ]
        }
    }"#;

    #[test]
    fn maps_sample_payload() {
        let raw: ScoreboardResponse = serde_json::from_str(SAMPLE).unwrap();
        let scoreboard = map_scoreboard(raw);
        assert_eq!(scoreboard.game_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(scoreboard.league_name.as_deref(), Some("National Basketball Association"));
        assert_eq!(scoreboard.rows.len(), 2);
        assert_eq!(scoreboard.rows[0].home_team, "Lakers (LAL)");
        assert_eq!(scoreboard.rows[0].score_diff, 2);
        assert_eq!(scoreboard.rows[1].time_remaining, "");
        assert_eq!(scoreboard.rows[1].game_status, Some(Number::Int(1)));
    }

    #[test]
    fn unparseable_game_date_is_dropped() {
        let raw: ScoreboardResponse =
            serde_json::from_str(r#"{"scoreboard":{"gameDate":"Jan 15","games":[]}}"#).unwrap();
        let scoreboard = map_scoreboard(raw);
        assert!(scoreboard.game_date.is_none());
        assert!(scoreboard.rows.is_empty());
    }

    #[tokio::test]
    async fn fetches_todays_scoreboard() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", TODAYS_SCOREBOARD)
            .match_header("referer", "https://www.nba.com/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let api = NbaApi::new().with_base_url(server.url());
        let scoreboard = api.fetch_scoreboard().await.expect("scoreboard should load");

        mock.assert_async().await;
        assert_eq!(scoreboard.rows.len(), 2);
        assert_eq!(scoreboard.rows[0].away_team, "Celtics (BOS)");
        assert_eq!(scoreboard.rows[0].secs_left, 43);
    }

    #[tokio::test]
    async fn server_errors_are_fatal() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", TODAYS_SCOREBOARD)
            .with_status(503)
            .create_async()
            .await;

        let api = NbaApi::new().with_base_url(server.url());
        let err = api.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Api(_, _)), "got {err}");
    }

    #[tokio::test]
    async fn not_found_is_not_treated_as_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", TODAYS_SCOREBOARD)
            .with_status(404)
            .create_async()
            .await;

        let api = NbaApi::new().with_base_url(format!("{}/", server.url()));
        let err = api.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Api(_, _)), "got {err}");
    }

    #[tokio::test]
    async fn malformed_payload_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", TODAYS_SCOREBOARD)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let api = NbaApi::new().with_base_url(server.url());
        let err = api.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(_, _)), "got {err}");
    }

    #[tokio::test]
    async fn loads_snapshot_instead_of_network() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        // unroutable base url: the snapshot must short-circuit the request
        let api = NbaApi::new()
            .with_base_url("http://127.0.0.1:9")
            .with_snapshot(file.path());
        let scoreboard = api.fetch_scoreboard().await.expect("snapshot should load");
        assert_eq!(scoreboard.rows[1].home_team, "Knicks (NYK)");
    }

    #[tokio::test]
    async fn snapshot_failures_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = NbaApi::new().with_snapshot(&missing).fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Snapshot(_, _)), "got {err}");

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        let err = NbaApi::new().with_snapshot(&bad).fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, ApiError::SnapshotJson(_, _)), "got {err}");
    }
}
