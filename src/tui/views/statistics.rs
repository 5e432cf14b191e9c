use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Sparkline};
use ratatui::Frame;

use crate::session::Session;

/// Render the aggregate repository statistics view with a busiest-period
/// gauge and an hourly activity sparkline.
pub fn draw_statistics_view(f: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
        ])
        .split(area);

    let stats = session.stats();

    let mut stats_text = vec![
        Line::from(vec![Span::styled(
            "Repository Statistics",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    for (label, value) in stats.entries() {
        stats_text.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::White)),
            Span::styled(value, Style::default().fg(Color::Cyan)),
        ]));
    }

    let stats_para = Paragraph::new(stats_text).block(
        Block::default()
            .title("Overall Statistics")
            .borders(Borders::ALL),
    );
    f.render_widget(stats_para, chunks[0]);

    if let Some(period) = stats.busiest_period {
        let total: usize = stats.period_counts.iter().sum();
        let share = if total > 0 {
            stats.period_counts[period.index()] * 100 / total
        } else {
            0
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Most Active Period")
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .percent(share as u16)
            .label(format!("{} ({share}% of line changes)", period.label()));
        f.render_widget(gauge, chunks[1]);
    }

    let hourly: Vec<u64> = stats.hourly_counts.iter().map(|&c| c as u64).collect();
    if hourly.iter().any(|&c| c > 0) {
        let sparkline = Sparkline::default()
            .block(
                Block::default()
                    .title("Line Changes by Hour (00-23)")
                    .borders(Borders::ALL),
            )
            .data(&hourly)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(sparkline, chunks[2]);
    }
}
