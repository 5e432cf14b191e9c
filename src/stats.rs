use crate::cli::CommonArgs;
use crate::commits;
use crate::loader::{self, LoadReport};
use crate::model::{Commit, LineRecord, StatsOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::{Timelike, Utc};
use console::style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse time-of-day buckets. The partition is fixed and covers the whole
/// day: night [0,6), morning [6,12), afternoon [12,18), evening [18,24).
/// `ALL` doubles as the canonical order used to break count ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Night,
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
    ];

    pub fn of_hour(hour: u32) -> Self {
        match hour {
            0..=5 => DayPeriod::Night,
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn index(self) -> usize {
        match self {
            DayPeriod::Night => 0,
            DayPeriod::Morning => 1,
            DayPeriod::Afternoon => 2,
            DayPeriod::Evening => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Night => "night",
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}

/// Scalar and grouped summaries over the whole record store. Everything is
/// recomputed from scratch on load; an empty store yields zero counts and
/// NaN means rather than errors.
#[derive(Debug, Clone)]
pub struct RepoStats {
    pub total_lines: usize,
    pub total_commits: usize,
    pub file_count: usize,
    pub max_file_length: u32,
    pub avg_file_length: f64,
    pub longest_line: u32,
    pub avg_depth: f64,
    pub busiest_period: Option<DayPeriod>,
    pub period_counts: [usize; 4],
    pub hourly_counts: [usize; 24],
    pub skipped_rows: usize,
}

pub fn compute(records: &[LineRecord], commits: &[Commit], skipped_rows: usize) -> RepoStats {
    let mut file_max: HashMap<&str, u32> = HashMap::new();
    for record in records {
        let entry = file_max.entry(record.file.as_str()).or_insert(0);
        if record.line > *entry {
            *entry = record.line;
        }
    }

    let max_file_length = file_max.values().copied().max().unwrap_or(0);
    let avg_file_length = if file_max.is_empty() {
        f64::NAN
    } else {
        file_max.values().map(|&v| f64::from(v)).sum::<f64>() / file_max.len() as f64
    };

    let longest_line = records.iter().map(|r| r.length).max().unwrap_or(0);
    let avg_depth = if records.is_empty() {
        f64::NAN
    } else {
        records.iter().map(|r| f64::from(r.depth)).sum::<f64>() / records.len() as f64
    };

    let mut period_counts = [0usize; 4];
    let mut hourly_counts = [0usize; 24];
    for record in records {
        let hour = record.datetime.hour();
        period_counts[DayPeriod::of_hour(hour).index()] += 1;
        hourly_counts[hour as usize] += 1;
    }

    // Highest count wins; a tie goes to the earliest bucket in ALL order.
    let busiest_period = if records.is_empty() {
        None
    } else {
        let mut best = DayPeriod::ALL[0];
        for period in DayPeriod::ALL {
            if period_counts[period.index()] > period_counts[best.index()] {
                best = period;
            }
        }
        Some(best)
    };

    RepoStats {
        total_lines: records.len(),
        total_commits: commits.len(),
        file_count: file_max.len(),
        max_file_length,
        avg_file_length,
        longest_line,
        avg_depth,
        busiest_period,
        period_counts,
        hourly_counts,
        skipped_rows,
    }
}

impl RepoStats {
    /// Ordered label/value pairs for the stats surfaces.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("Total LOC", self.total_lines.to_string()),
            ("Total commits", self.total_commits.to_string()),
            ("Files", self.file_count.to_string()),
            ("Max file length (lines)", self.max_file_length.to_string()),
            ("Avg file length (lines)", fmt_mean(self.avg_file_length)),
            ("Longest line (chars)", self.longest_line.to_string()),
            ("Avg depth", fmt_mean(self.avg_depth)),
            (
                "Most active period",
                self.busiest_period
                    .map_or_else(|| "n/a".to_string(), |p| p.label().to_string()),
            ),
        ];
        if self.skipped_rows > 0 {
            entries.push(("Skipped rows", self.skipped_rows.to_string()));
        }
        entries
    }

    pub fn to_output(&self, common: &CommonArgs) -> StatsOutput {
        StatsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            log: common.log.display().to_string(),
            since: common.since.clone(),
            until: common.until.clone(),
            total_lines: self.total_lines,
            total_commits: self.total_commits,
            file_count: self.file_count,
            max_file_length: self.max_file_length,
            avg_file_length: self.avg_file_length,
            longest_line: self.longest_line,
            avg_depth: self.avg_depth,
            busiest_period: self.busiest_period.map(|p| p.label().to_string()),
            skipped_rows: self.skipped_rows,
        }
    }
}

fn fmt_mean(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.1}")
    }
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let quiet = json || ndjson;
    let range = loader::resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;
    let report = loader::load_log(&common.log, &range, common.strict, !quiet)
        .context("Failed to read line-history log")?;
    warn_skipped(&report);

    let commits = commits::aggregate(&report.records);
    let stats = compute(&report.records, &commits, report.skipped.len());

    if json {
        output_json(&stats, &common)?;
    } else if ndjson {
        output_ndjson(&stats)?;
    } else {
        output_table(&stats)?;
    }

    Ok(())
}

pub(crate) fn warn_skipped(report: &LoadReport) {
    if report.skipped.is_empty() {
        return;
    }
    eprintln!(
        "{} skipped {} malformed row(s); first: line {}: {}",
        style("warning:").yellow().bold(),
        report.skipped.len(),
        report.skipped[0].line,
        report.skipped[0].reason
    );
}

fn output_json(stats: &RepoStats, common: &CommonArgs) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&stats.to_output(common))?);
    Ok(())
}

fn output_ndjson(stats: &RepoStats) -> anyhow::Result<()> {
    for (label, value) in stats.entries() {
        println!("{}", serde_json::to_string(&serde_json::json!({ "label": label, "value": value }))?);
    }
    Ok(())
}

fn output_table(stats: &RepoStats) -> anyhow::Result<()> {
    println!("{}", style("Repository Statistics").bold());
    println!("{}", "─".repeat(40));
    for (label, value) in stats.entries() {
        println!("{:<26} {}", label, style(value).cyan());
    }
    Ok(())
}
