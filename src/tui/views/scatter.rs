use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::session::Session;
use crate::tui::draw::{get_intensity_color, intensity_bar};
use crate::tui::layout::plot_viewport;
use crate::tui::state::TuiState;

use super::truncate;

/// Render the scatterplot view: the punchcard plot on the left, selection
/// summary, language breakdown, and hover details on the right.
pub fn draw_scatter_view(f: &mut Frame, area: Rect, session: &mut Session, state: &mut TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = if session.selection_count() > 0 {
        format!(
            "Commits by time of day | {} selected | Esc to clear",
            session.selection_count()
        )
    } else {
        "Commits by time of day | drag to select".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    if inner.width < 12 || inner.height < 6 {
        return;
    }
    state.plot_area = Some(inner);
    session.resize(plot_viewport(inner));

    let lines = render_plot_cells(session, inner);
    f.render_widget(Paragraph::new(lines), inner);

    draw_side_panel(f, chunks[1], session);
}

fn render_plot_cells(session: &Session, inner: Rect) -> Vec<Line<'static>> {
    let width = inner.width as usize;
    let height = inner.height as usize;
    let mut cells: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); width]; height];

    let mapper = session.mapper();
    let axis_style = Style::default().fg(Color::DarkGray);

    for tick in mapper.y_ticks() {
        let row = tick.offset.round();
        if row >= 0.0 && (row as usize) < height {
            put_text(&mut cells[row as usize], 0, &tick.label, axis_style);
        }
    }
    let axis_row = height - 1;
    for tick in mapper.x_ticks() {
        let half = (tick.label.chars().count() / 2) as f64;
        let col = (tick.offset.round() - half).max(0.0) as usize;
        if col + tick.label.chars().count() <= width {
            put_text(&mut cells[axis_row], col, &tick.label, axis_style);
        }
    }

    let commits = session.commits();
    let max_lines = commits.iter().map(|c| c.total_lines).max().unwrap_or(0);
    for &i in session.draw_order() {
        let commit = &commits[i];
        let (cx, cy) = mapper.position(commit);
        let r = mapper.radius(commit);
        let mut style = get_intensity_color(commit.total_lines, max_lines);
        if session.is_selected(i) {
            style = Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        if session.hover() == Some(i) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let glyph = if r >= 1.75 {
            '●'
        } else if r >= 1.0 {
            '•'
        } else {
            '·'
        };
        paint_dot(&mut cells, cx, cy, r, glyph, style);
    }

    if let Some(rect) = session.selection() {
        let x0 = rect.x0.round().max(0.0) as usize;
        let y0 = rect.y0.round().max(0.0) as usize;
        let x1 = (rect.x1.round() as usize).min(width.saturating_sub(1));
        let y1 = (rect.y1.round() as usize).min(height.saturating_sub(1));
        for row in cells.iter_mut().take(y1 + 1).skip(y0) {
            for cell in row.iter_mut().take(x1 + 1).skip(x0) {
                cell.1 = cell.1.bg(Color::DarkGray);
            }
        }
    }

    cells.into_iter().map(row_to_line).collect()
}

fn paint_dot(cells: &mut [Vec<(char, Style)>], cx: f64, cy: f64, r: f64, glyph: char, style: Style) {
    let height = cells.len() as isize;
    let width = if height > 0 { cells[0].len() as isize } else { 0 };
    let reach = r.ceil() as isize;
    let (col, row) = (cx.round() as isize, cy.round() as isize);
    for y in (row - reach)..=(row + reach) {
        for x in (col - reach)..=(col + reach) {
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            if dx * dx + dy * dy <= r * r || (x == col && y == row) {
                cells[y as usize][x as usize] = (glyph, style);
            }
        }
    }
}

fn put_text(row: &mut [(char, Style)], col: usize, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = row.get_mut(col + i) {
            *cell = (ch, style);
        }
    }
}

fn row_to_line(row: Vec<(char, Style)>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style = Style::default();
    for (ch, cell_style) in row {
        if cell_style != style && !text.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut text), style));
        }
        style = cell_style;
        text.push(ch);
    }
    if !text.is_empty() {
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

/// Render the right-hand panel with selection totals, the language
/// breakdown for the active subset, and the hovered commit.
fn draw_side_panel(f: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(7),
        ])
        .split(area);

    let commits = session.commits();
    let count = session.selection_count();
    let selected_lines: usize = session
        .selected()
        .iter()
        .map(|&i| commits[i].total_lines)
        .sum();

    let selection_text = vec![
        Line::from(vec![
            Span::styled("Commits: ", Style::default().fg(Color::White)),
            if count == 0 {
                Span::styled("none selected", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(
                    format!("{count} of {}", commits.len()),
                    Style::default().fg(Color::Green),
                )
            },
        ]),
        Line::from(vec![
            Span::styled("Lines: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{selected_lines}"),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    let selection_panel = Paragraph::new(selection_text).block(
        Block::default()
            .title("Selection")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(selection_panel, chunks[0]);

    let breakdown = session.breakdown();
    let max = breakdown.iter().map(|e| e.lines).max().unwrap_or(0);
    let mut lang_lines: Vec<Line> = breakdown
        .iter()
        .take(chunks[1].height.saturating_sub(2) as usize)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", truncate(&entry.language, 12)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(format!("{:>7} ", entry.lines), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:>6} ", entry.percent), Style::default().fg(Color::Green)),
                Span::styled(
                    intensity_bar(entry.lines, max, 8),
                    get_intensity_color(entry.lines, max),
                ),
            ])
        })
        .collect();
    if lang_lines.is_empty() {
        lang_lines.push(Line::from(Span::styled(
            "No data to display",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let lang_title = if count == 0 { "Languages (all commits)" } else { "Languages (selection)" };
    let lang_panel = Paragraph::new(lang_lines).block(
        Block::default()
            .title(lang_title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(lang_panel, chunks[1]);

    let tooltip_lines = match session.tooltip() {
        Some(tip) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Commit: ", Style::default().fg(Color::White)),
                    Span::styled(tip.short_id, Style::default().fg(Color::Yellow)),
                ]),
                Line::from(vec![
                    Span::styled("Date: ", Style::default().fg(Color::White)),
                    Span::styled(tip.date_label, Style::default().fg(Color::Cyan)),
                ]),
                Line::from(vec![
                    Span::styled("Author: ", Style::default().fg(Color::White)),
                    Span::styled(tip.author, Style::default().fg(Color::Magenta)),
                ]),
                Line::from(vec![
                    Span::styled("Lines: ", Style::default().fg(Color::White)),
                    Span::styled(tip.total_lines.to_string(), Style::default().fg(Color::Green)),
                ]),
            ];
            if let Some(url) = tip.url {
                let max_width = area.width.saturating_sub(2) as usize;
                lines.push(Line::from(Span::styled(
                    truncate(&url, max_width),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "Hover a commit for details",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    let tooltip_panel = Paragraph::new(tooltip_lines).block(
        Block::default()
            .title("Commit")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(tooltip_panel, chunks[2]);
}
