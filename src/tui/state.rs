use ratatui::layout::Rect;

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Plot,
    Statistics,
    Languages,
}

pub struct TuiState {
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    /// Inner rect of the plot block from the last draw, in screen cells.
    /// Mouse events are translated against it; `None` while another view
    /// is frontmost.
    pub plot_area: Option<Rect>,
    pub status_message: Option<(String, std::time::Instant)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Plot,
            tab_index: 0,
            show_help: false,
            plot_area: None,
            status_message: None,
        }
    }
}

impl TuiState {
    /// Screen cell to plot-local coordinates, if inside the plot area.
    pub fn plot_point(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let area = self.plot_area?;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        Some((f64::from(column - area.x), f64::from(row - area.y)))
    }

    /// Plot-local coordinates without the containment check, for drags that
    /// wander outside the plot block.
    pub fn plot_point_unclamped(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let area = self.plot_area?;
        Some((
            f64::from(column) - f64::from(area.x),
            f64::from(row) - f64::from(area.y),
        ))
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), std::time::Instant::now()));
    }
}
