use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::session::Session;
use crate::tui::draw::{get_intensity_color, intensity_bar};

use super::header_cell;

/// Render the full language breakdown table, scoped to the brush selection
/// when one is active.
pub fn draw_languages_view(f: &mut Frame, area: Rect, session: &Session) {
    let title = if session.selection_count() > 0 {
        format!(
            "Language Breakdown ({} commits selected)",
            session.selection_count()
        )
    } else {
        "Language Breakdown (all commits)".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let breakdown = session.breakdown();
    if breakdown.is_empty() {
        let empty = Paragraph::new("No data to display")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Entries are sorted by line count, so the first one carries the max.
    let max = breakdown[0].lines;
    let rows: Vec<Row> = breakdown
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.language.clone()).style(Style::default().fg(Color::White)),
                Cell::from(format!("{:>8}", entry.lines)).style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{:>7}", entry.percent))
                    .style(Style::default().fg(Color::Green)),
                Cell::from(intensity_bar(entry.lines, max, 20))
                    .style(get_intensity_color(entry.lines, max)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Percentage(100),
        ],
    )
    .header(Row::new([
        header_cell("Language", Color::Yellow),
        header_cell("Lines", Color::Cyan),
        header_cell("Share", Color::Green),
        header_cell("Activity", Color::Magenta),
    ]))
    .block(block);
    f.render_widget(table, area);
}
