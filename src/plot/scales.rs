use crate::model::{AxisTick, Commit, DotSpec};
use chrono::{DateTime, FixedOffset, Utc};

/// Fill opacity for scatterplot dots; hovered dots are rendered opaque.
pub const DOT_OPACITY: f64 = 0.7;

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Target drawing area. `page()` is the dimension set external SVG-style
/// renderers expect; the TUI builds cell-unit viewports from its layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub radius_range: (f64, f64),
}

#[derive(Debug, Clone, Copy)]
pub struct UsableArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, margins: Margins, radius_range: (f64, f64)) -> Self {
        Self { width, height, margins, radius_range }
    }

    pub fn page() -> Self {
        Self::new(
            1000.0,
            600.0,
            Margins { top: 50.0, right: 10.0, bottom: 30.0, left: 50.0 },
            (2.0, 30.0),
        )
    }

    pub fn usable(&self) -> UsableArea {
        UsableArea {
            left: self.margins.left,
            right: self.width - self.margins.right,
            top: self.margins.top,
            bottom: self.height - self.margins.bottom,
            width: self.width - self.margins.left - self.margins.right,
            height: self.height - self.margins.top - self.margins.bottom,
        }
    }
}

/// Linear scale over absolute instants, widened to round day-grained tick
/// boundaries. A degenerate domain maps everything to the range midpoint.
#[derive(Debug, Clone)]
pub struct TimeScale {
    d0: i64,
    d1: i64,
    r0: f64,
    r1: f64,
    step_secs: i64,
}

impl TimeScale {
    pub fn new(commits: &[Commit], range: (f64, f64)) -> Self {
        let (r0, r1) = range;
        let extent = commits
            .iter()
            .map(|c| c.datetime.timestamp())
            .fold(None, |acc: Option<(i64, i64)>, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            });

        let Some((lo, hi)) = extent else {
            return Self { d0: 0, d1: 0, r0, r1, step_secs: SECS_PER_DAY };
        };

        let step_secs = choose_step(hi - lo);
        let d0 = lo.div_euclid(step_secs) * step_secs;
        let mut d1 = hi.div_euclid(step_secs) * step_secs;
        if d1 < hi {
            d1 += step_secs;
        }
        if d1 <= d0 {
            d1 = d0 + step_secs;
        }
        debug_assert!(d0 <= lo && hi <= d1);

        Self { d0, d1, r0, r1, step_secs }
    }

    pub fn map(&self, instant: DateTime<FixedOffset>) -> f64 {
        self.map_timestamp(instant.timestamp())
    }

    fn map_timestamp(&self, t: i64) -> f64 {
        if self.d1 <= self.d0 {
            return (self.r0 + self.r1) / 2.0;
        }
        let frac = (t - self.d0) as f64 / (self.d1 - self.d0) as f64;
        self.r0 + frac * (self.r1 - self.r0)
    }

    pub fn ticks(&self) -> Vec<AxisTick> {
        if self.d1 <= self.d0 {
            return Vec::new();
        }
        let format = if self.step_secs >= 365 * SECS_PER_DAY {
            "%Y"
        } else if self.step_secs >= 30 * SECS_PER_DAY {
            "%Y-%m"
        } else {
            "%m-%d"
        };

        let mut ticks = Vec::new();
        let mut t = self.d0;
        while t <= self.d1 {
            if let Some(dt) = DateTime::<Utc>::from_timestamp(t, 0) {
                ticks.push(AxisTick {
                    offset: self.map_timestamp(t),
                    label: dt.format(format).to_string(),
                });
            }
            t += self.step_secs;
        }
        ticks
    }
}

fn choose_step(span_secs: i64) -> i64 {
    const STEP_DAYS: [i64; 7] = [1, 2, 7, 14, 30, 90, 365];
    let span_days = (span_secs.max(0) / SECS_PER_DAY) + 1;
    for days in STEP_DAYS {
        if span_days / days <= 10 {
            return days * SECS_PER_DAY;
        }
    }
    // Decade-plus histories step in whole-year multiples.
    let years = (span_days as f64 / 365.0 / 10.0).ceil().max(1.0) as i64;
    years * 365 * SECS_PER_DAY
}

/// Fixed [0,24] hour-of-day scale, inverted so hour 0 sits at the bottom of
/// the drawing area (screen y grows downward).
#[derive(Debug, Clone)]
pub struct HourScale {
    bottom: f64,
    top: f64,
}

impl HourScale {
    pub fn new(usable: &UsableArea) -> Self {
        Self { bottom: usable.bottom, top: usable.top }
    }

    pub fn map(&self, hour_frac: f64) -> f64 {
        self.bottom + hour_frac / 24.0 * (self.top - self.bottom)
    }

    pub fn ticks(&self) -> Vec<AxisTick> {
        (0..=24u32)
            .step_by(6)
            .map(|hour| AxisTick {
                offset: self.map(f64::from(hour)),
                label: format!("{:02}:00", hour % 24),
            })
            .collect()
    }
}

/// Square-root radius encoding: the scale is affine over the square roots of
/// the observed line totals, so dot *area* tracks lines changed. Equal
/// totals get equal radii; a single-valued domain maps to the midpoint of
/// the radius range.
#[derive(Debug, Clone)]
pub struct RadiusScale {
    s0: f64,
    s1: f64,
    r0: f64,
    r1: f64,
}

impl RadiusScale {
    pub fn new(commits: &[Commit], range: (f64, f64)) -> Self {
        let (r0, r1) = range;
        let min = commits.iter().map(|c| c.total_lines).min().unwrap_or(0);
        let max = commits.iter().map(|c| c.total_lines).max().unwrap_or(0);
        Self {
            s0: (min as f64).sqrt(),
            s1: (max as f64).sqrt(),
            r0,
            r1,
        }
    }

    pub fn map(&self, total_lines: usize) -> f64 {
        if self.s1 <= self.s0 {
            return (self.r0 + self.r1) / 2.0;
        }
        let s = (total_lines as f64).sqrt();
        self.r0 + (s - self.s0) / (self.s1 - self.s0) * (self.r1 - self.r0)
    }
}

/// The three scales for one commit set and drawing area, built once per load
/// or resize and borrowed by both rendering and selection resolution.
#[derive(Debug, Clone)]
pub struct PlotMapper {
    pub viewport: Viewport,
    pub x: TimeScale,
    pub y: HourScale,
    pub r: RadiusScale,
}

impl PlotMapper {
    pub fn new(commits: &[Commit], viewport: Viewport) -> Self {
        let usable = viewport.usable();
        Self {
            x: TimeScale::new(commits, (usable.left, usable.right)),
            y: HourScale::new(&usable),
            r: RadiusScale::new(commits, viewport.radius_range),
            viewport,
        }
    }

    pub fn position(&self, commit: &Commit) -> (f64, f64) {
        (self.x.map(commit.datetime), self.y.map(commit.hour_frac))
    }

    pub fn radius(&self, commit: &Commit) -> f64 {
        self.r.map(commit.total_lines)
    }

    /// Dot specs in recommended draw order (largest first, so small dots
    /// stay visible and hoverable on top).
    pub fn dots(&self, commits: &[Commit]) -> Vec<DotSpec> {
        draw_order(commits)
            .into_iter()
            .map(|i| {
                let commit = &commits[i];
                let (x, y) = self.position(commit);
                DotSpec {
                    commit: commit.id.clone(),
                    x,
                    y,
                    r: self.radius(commit),
                    opacity: DOT_OPACITY,
                }
            })
            .collect()
    }

    pub fn x_ticks(&self) -> Vec<AxisTick> {
        self.x.ticks()
    }

    pub fn y_ticks(&self) -> Vec<AxisTick> {
        self.y.ticks()
    }
}

/// Indices sorted by descending line total; ties keep commit order.
pub fn draw_order(commits: &[Commit]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..commits.len()).collect();
    order.sort_by(|&a, &b| commits[b].total_lines.cmp(&commits[a].total_lines));
    order
}
