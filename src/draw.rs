use chrono::NaiveDate;
use nba_api::{Number, Scoreboard, ScoreboardRow};
use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::{Modifier, Style};
use tui::text::Line;
use tui::widgets::{Cell, Row, Table, Widget};

const COLUMN_SPACING: u16 = 2;
const MISSING: &str = "-";

/// (header, right aligned)
static COLUMNS: &[(&str, bool); 10] = &[
    ("home_team", false),
    ("home_score", true),
    ("away_team", false),
    ("away_score", true),
    ("period", true),
    ("time_remaining", true),
    ("game_status", true),
    ("game_status_text", false),
    ("secs_left", true),
    ("score_diff", true),
];

/// Render the scoreboard as plain text lines, at most `max_width` columns wide.
pub fn render_scoreboard(scoreboard: &Scoreboard, max_width: u16) -> String {
    let league = scoreboard.league_name.as_deref().unwrap_or("NBA");
    let mut out = header_line(league, scoreboard.game_date);
    out.push('\n');

    if scoreboard.rows.is_empty() {
        out.push_str("No games on the scoreboard.\n");
        return out;
    }

    for line in render_table(&scoreboard.rows, max_width) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn header_line(league: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{league} scoreboard for {}", d.format("%a %b %-d, %Y")),
        None => format!("{league} scoreboard for today"),
    }
}

fn row_cells(row: &ScoreboardRow) -> [String; 10] {
    let num = |n: Option<Number>| n.map(|n| n.to_string()).unwrap_or_else(|| MISSING.into());
    [
        row.home_team.clone(),
        num(row.home_score),
        row.away_team.clone(),
        num(row.away_score),
        num(row.period),
        row.time_remaining.clone(),
        num(row.game_status),
        row.game_status_text.clone(),
        row.secs_left.to_string(),
        row.score_diff.to_string(),
    ]
}

fn render_table(rows: &[ScoreboardRow], max_width: u16) -> Vec<String> {
    let body: Vec<[String; 10]> = rows.iter().map(row_cells).collect();

    // Each column is as wide as its widest cell, header included.
    let widths: Vec<u16> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            body.iter()
                .map(|cells| Line::from(cells[i].as_str()).width())
                .chain(std::iter::once(header.len()))
                .max()
                .map(|w| u16::try_from(w).unwrap_or(u16::MAX))
                .unwrap_or_default()
        })
        .collect();
    let full_width = widths
        .iter()
        .fold(COLUMN_SPACING * (COLUMNS.len() as u16 - 1), |acc, w| acc.saturating_add(*w));
    let height = u16::try_from(body.len() + 1).unwrap_or(u16::MAX);
    // Lay out at full width so no column gets squeezed; clipping happens per line.
    let area = Rect::new(0, 0, full_width, height);

    let align = |text: String, right: bool| {
        let line = Line::from(text);
        Cell::from(if right { line.right_aligned() } else { line })
    };
    let header = Row::new(
        COLUMNS
            .iter()
            .map(|(name, right)| align(name.to_string(), *right)),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));
    let table_rows = body.into_iter().map(|cells| {
        Row::new(
            cells
                .into_iter()
                .zip(COLUMNS.iter())
                .map(|(text, (_, right))| align(text, *right)),
        )
    });

    let table = Table::new(table_rows, widths.iter().map(|w| Constraint::Length(*w)))
        .header(header)
        .column_spacing(COLUMN_SPACING);

    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf);
    buffer_lines(&buf, max_width)
}

/// Buffer rows as text, each cut off after `max_width` columns.
fn buffer_lines(buf: &Buffer, max_width: u16) -> Vec<String> {
    let area = buf.area;
    let right = area.right().min(area.left().saturating_add(max_width));
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..right)
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.trim_end().to_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ScoreboardRow {
        ScoreboardRow {
            home_team: "Lakers (LAL)".into(),
            home_score: Some(Number::Int(100)),
            away_team: "Celtics (BOS)".into(),
            away_score: Some(Number::Int(98)),
            period: Some(Number::Int(4)),
            time_remaining: "0:43".into(),
            game_status: Some(Number::Int(2)),
            game_status_text: "4th Qtr".into(),
            secs_left: 43,
            score_diff: 2,
        }
    }

    #[test]
    fn renders_header_and_rows() {
        let scoreboard = Scoreboard {
            game_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            league_name: None,
            rows: vec![sample_row()],
        };
        let text = render_scoreboard(&scoreboard, 500);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "NBA scoreboard for Mon Jan 15, 2024");
        assert!(lines[1].starts_with("home_team"), "{}", lines[1]);
        assert!(lines[1].ends_with("score_diff"), "{}", lines[1]);
        assert!(lines[2].starts_with("Lakers (LAL)"), "{}", lines[2]);
        assert!(lines[2].contains("Celtics (BOS)"));
        assert!(lines[2].contains("4th Qtr"));
        assert!(lines[2].contains("0:43"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn missing_numbers_render_as_dash() {
        let row = ScoreboardRow { home_score: None, ..sample_row() };
        let lines = render_table(&[row], 500);
        let cells: Vec<&str> = lines[1].split_whitespace().collect();
        // "Lakers" "(LAL)" then the home score
        assert_eq!(cells[2], MISSING);
    }

    #[test]
    fn numbers_are_right_aligned() {
        let mut wide = sample_row();
        wide.home_score = Some(Number::Int(1));
        let lines = render_table(&[sample_row(), wide], 500);
        let hundred = lines[1].find("100").unwrap();
        let one = lines[2][hundred..].find('1').unwrap();
        assert_eq!(one, 2, "single digit should line up with the last digit of 100");
    }

    #[test]
    fn clipped_to_max_width() {
        for line in render_table(&[sample_row()], 40) {
            assert!(line.chars().count() <= 40, "{line}");
        }
    }

    #[test]
    fn narrow_terminal_cuts_trailing_columns_not_names() {
        let row = ScoreboardRow {
            home_team: "Philadelphia 76ers (PHI)".into(),
            away_team: "Minnesota Timberwolves (MIN)".into(),
            ..sample_row()
        };
        let lines = render_table(&[sample_row(), row], 80);
        for line in &lines {
            assert!(line.chars().count() <= 80, "{line}");
        }
        let header: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(&header[..4], ["home_team", "home_score", "away_team", "away_score"]);
        assert!(lines[1].starts_with("Lakers (LAL)"), "{}", lines[1]);
        assert!(lines[1].contains("Celtics (BOS)"), "{}", lines[1]);
        assert!(lines[2].starts_with("Philadelphia 76ers (PHI)"), "{}", lines[2]);
        assert!(lines[2].contains("Minnesota Timberwolves (MIN)"), "{}", lines[2]);
    }

    #[test]
    fn very_long_cells_do_not_overflow_widths() {
        let row = ScoreboardRow { time_remaining: "x".repeat(70_000), ..sample_row() };
        let lines = render_table(&[row], 120);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.chars().count() <= 120, "{line}");
        }
    }

    #[test]
    fn empty_scoreboard() {
        let scoreboard = Scoreboard { league_name: Some("NBA".into()), ..Default::default() };
        assert_eq!(
            render_scoreboard(&scoreboard, 80),
            "NBA scoreboard for today\nNo games on the scoreboard.\n"
        );
    }
}
