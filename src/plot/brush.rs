use crate::model::Commit;
use crate::plot::scales::PlotMapper;

/// Normalized selection rectangle in viewport coordinates. `x0 <= x1` and
/// `y0 <= y1` always hold, whichever way the drag ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    /// Boundary containment is inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// A press released without movement, which clears any selection.
    pub fn is_click(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Indices of commits whose dot centers fall inside the selection, in commit
/// order. No selection resolves to no commits, never to all of them.
pub fn resolve(
    mapper: &PlotMapper,
    commits: &[Commit],
    selection: Option<&BrushRect>,
) -> Vec<usize> {
    let Some(rect) = selection else {
        return Vec::new();
    };
    commits
        .iter()
        .enumerate()
        .filter(|(_, commit)| {
            let (x, y) = mapper.position(commit);
            rect.contains(x, y)
        })
        .map(|(i, _)| i)
        .collect()
}
