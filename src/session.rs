use crate::breakdown::language_breakdown;
use crate::cli::CommonArgs;
use crate::commits;
use crate::error::Result;
use crate::loader;
use crate::model::{BreakdownEntry, Commit, LineRecord};
use crate::plot::brush::{self, BrushRect};
use crate::plot::scales::{draw_order, PlotMapper, Viewport};
use crate::stats::{self, RepoStats};
use crate::util;

/// Pointer state for the brush gesture. A press anchors a drag; everything
/// between press and release redraws against the live rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { anchor: (f64, f64) },
}

/// Hover payload for the tooltip surface.
#[derive(Debug, Clone)]
pub struct Tooltip {
    pub id: String,
    pub short_id: String,
    pub url: Option<String>,
    pub date_label: String,
    pub author: String,
    pub total_lines: usize,
}

/// One loaded log plus all interactive state derived from it: the commit
/// set, repo statistics, the coordinate mapper for the current viewport,
/// and the brush/hover machine. Renderer-agnostic; the TUI drives it with
/// cell coordinates, tests drive it directly.
pub struct Session {
    store: Vec<LineRecord>,
    commits: Vec<Commit>,
    stats: RepoStats,
    mapper: PlotMapper,
    draw_order: Vec<usize>,
    drag: DragState,
    selection: Option<BrushRect>,
    selected: Vec<usize>,
    hover: Option<usize>,
    repo_url: Option<String>,
}

impl Session {
    pub fn load(common: &CommonArgs, viewport: Viewport) -> Result<Self> {
        let range = loader::resolve_range(common.since.as_deref(), common.until.as_deref())?;
        let report = loader::load_log(&common.log, &range, common.strict, false)?;
        Ok(Self::from_records(
            report.records,
            report.skipped.len(),
            viewport,
            common.repo_url.clone(),
        ))
    }

    pub fn from_records(
        records: Vec<LineRecord>,
        skipped_rows: usize,
        viewport: Viewport,
        repo_url: Option<String>,
    ) -> Self {
        let commits = commits::aggregate(&records);
        let stats = stats::compute(&records, &commits, skipped_rows);
        let mapper = PlotMapper::new(&commits, viewport);
        let order = draw_order(&commits);
        Self {
            store: records,
            commits,
            stats,
            mapper,
            draw_order: order,
            drag: DragState::Idle,
            selection: None,
            selected: Vec::new(),
            hover: None,
            repo_url,
        }
    }

    /// Re-reads the log and resets all interaction state, keeping the
    /// current viewport.
    pub fn reload(&mut self, common: &CommonArgs) -> Result<()> {
        let fresh = Session::load(common, self.mapper.viewport)?;
        *self = fresh;
        Ok(())
    }

    /// Rebuilds the mapper when the drawing area changes, then re-resolves
    /// the selection against the new coordinates. No-op for an unchanged
    /// viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.mapper.viewport {
            return;
        }
        self.mapper = PlotMapper::new(&self.commits, viewport);
        self.hover = None;
        self.resolve_selection();
    }

    pub fn drag_start(&mut self, x: f64, y: f64) {
        let anchor = self.clamp(x, y);
        self.drag = DragState::Dragging { anchor };
        self.hover = None;
        self.selection = Some(BrushRect::from_corners(anchor, anchor));
        self.resolve_selection();
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        let DragState::Dragging { anchor } = self.drag else {
            return;
        };
        let point = self.clamp(x, y);
        self.selection = Some(BrushRect::from_corners(anchor, point));
        self.resolve_selection();
    }

    pub fn drag_end(&mut self, x: f64, y: f64) {
        let DragState::Dragging { anchor } = self.drag else {
            return;
        };
        self.drag = DragState::Idle;
        let rect = BrushRect::from_corners(anchor, self.clamp(x, y));
        if rect.is_click() {
            self.selection = None;
        } else {
            self.selection = Some(rect);
        }
        self.resolve_selection();
    }

    pub fn clear_selection(&mut self) {
        self.drag = DragState::Idle;
        self.selection = None;
        self.selected.clear();
    }

    /// Moves the hover to the topmost dot under the pointer, if any. Dots
    /// are painted largest-first, so the last hit in draw order is on top.
    pub fn hover_at(&mut self, x: f64, y: f64) {
        if matches!(self.drag, DragState::Dragging { .. }) {
            return;
        }
        let mut hit = None;
        for &i in &self.draw_order {
            let (cx, cy) = self.mapper.position(&self.commits[i]);
            let r = self.mapper.radius(&self.commits[i]);
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                hit = Some(i);
            }
        }
        self.hover = hit;
    }

    pub fn hover_clear(&mut self) {
        self.hover = None;
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let commit = &self.commits[self.hover?];
        Some(Tooltip {
            id: commit.id.clone(),
            short_id: util::short_id(&commit.id).to_string(),
            url: self.repo_url.as_deref().map(|base| util::commit_url(base, &commit.id)),
            date_label: util::full_date_label(&commit.datetime),
            author: commit.author.clone(),
            total_lines: commit.total_lines,
        })
    }

    /// Language totals for the panel: the selected subset when a brush is
    /// active and caught something, otherwise the whole commit set.
    pub fn breakdown(&self) -> Vec<BreakdownEntry> {
        if self.selected.is_empty() {
            let all: Vec<usize> = (0..self.commits.len()).collect();
            language_breakdown(&self.store, &self.commits, &all)
        } else {
            language_breakdown(&self.store, &self.commits, &self.selected)
        }
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.store
    }

    pub fn stats(&self) -> &RepoStats {
        &self.stats
    }

    pub fn mapper(&self) -> &PlotMapper {
        &self.mapper
    }

    pub fn draw_order(&self) -> &[usize] {
        &self.draw_order
    }

    pub fn selection(&self) -> Option<&BrushRect> {
        self.selection.as_ref()
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    fn resolve_selection(&mut self) {
        self.selected = brush::resolve(&self.mapper, &self.commits, self.selection.as_ref());
    }

    fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        let usable = self.mapper.viewport.usable();
        (x.clamp(usable.left, usable.right), y.clamp(usable.top, usable.bottom))
    }
}
