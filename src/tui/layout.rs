use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::plot::scales::{Margins, Viewport};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Viewport in cell units for a plot drawn inside `inner`. The left margin
/// leaves room for hour labels, the bottom one for the date axis.
pub fn plot_viewport(inner: Rect) -> Viewport {
    Viewport::new(
        f64::from(inner.width),
        f64::from(inner.height),
        Margins { top: 1.0, right: 1.0, bottom: 2.0, left: 7.0 },
        (0.5, 2.5),
    )
}
