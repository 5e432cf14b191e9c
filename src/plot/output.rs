use crate::cli::CommonArgs;
use crate::model::{Commit, PlotOutput, SCHEMA_VERSION};
use crate::plot::scales::PlotMapper;
use chrono::{Datelike, Timelike, Utc};
use console::style;

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub(crate) fn output_json(
    commits: &[Commit],
    mapper: &PlotMapper,
    common: &CommonArgs,
) -> anyhow::Result<()> {
    let out = PlotOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log: common.log.display().to_string(),
        width: mapper.viewport.width,
        height: mapper.viewport.height,
        dots: mapper.dots(commits),
        x_ticks: mapper.x_ticks(),
        y_ticks: mapper.y_ticks(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub(crate) fn output_ndjson(commits: &[Commit], mapper: &PlotMapper) -> anyhow::Result<()> {
    for dot in mapper.dots(commits) {
        println!("{}", serde_json::to_string(&dot)?);
    }
    Ok(())
}

/// Weekday-by-hour commit counts for the plain punchcard table.
pub(crate) fn weekday_grid(commits: &[Commit]) -> [[usize; 24]; 7] {
    let mut grid = [[0usize; 24]; 7];
    for commit in commits {
        let day = commit.datetime.weekday().num_days_from_monday() as usize;
        let hour = commit.datetime.hour() as usize;
        grid[day][hour] += 1;
    }
    grid
}

pub(crate) fn output_punchcard(commits: &[Commit], common: &CommonArgs) {
    println!("{}", style("Commit punchcard").bold());
    println!("{}", "─".repeat(40));
    if common.since.is_some() || common.until.is_some() {
        let since = common.since.as_deref().unwrap_or("beginning");
        let until = common.until.as_deref().unwrap_or("now");
        println!("{}", style(format!("Range: {since} to {until}")).dim());
    }

    if commits.is_empty() {
        println!("No commits to display");
        return;
    }

    let grid = weekday_grid(commits);
    let max = grid.iter().flatten().copied().max().unwrap_or(0);

    println!("{:<6}{:<6}{:<6}{:<6}{:<6}", "", "00:00", "06:00", "12:00", "18:00");
    for (day, counts) in grid.iter().enumerate() {
        let cells: String = counts.iter().map(|&count| shade(count, max)).collect();
        println!("{:<6}{}", DAY_LABELS[day], style(cells).cyan());
    }

    println!();
    println!("{} commits (max {} in one hour cell)", commits.len(), max);
}

fn shade(count: usize, max: usize) -> char {
    if count == 0 || max == 0 {
        return ' ';
    }
    const LEVELS: [char; 4] = ['░', '▒', '▓', '█'];
    let idx = (count * LEVELS.len() + max - 1) / max;
    LEVELS[(idx - 1).min(LEVELS.len() - 1)]
}
