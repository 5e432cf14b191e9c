use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod help;
mod languages;
mod scatter;
mod statistics;

pub use help::draw_help_overlay;
pub use languages::draw_languages_view;
pub use scatter::draw_scatter_view;
pub use statistics::draw_statistics_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}
