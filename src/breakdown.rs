use crate::cli::CommonArgs;
use crate::commits;
use crate::loader;
use crate::model::{BreakdownEntry, BreakdownOutput, Commit, LineRecord, SCHEMA_VERSION};
use crate::stats::warn_skipped;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::HashMap;

/// Per-language line counts over the given commits (by index into the commit
/// sequence). Percentages are shares of the covered line total, one decimal.
/// Ordering is by descending count, then ascending language name.
pub fn language_breakdown(
    store: &[LineRecord],
    commits: &[Commit],
    indices: &[usize],
) -> Vec<BreakdownEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for &index in indices {
        for record in commits[index].lines(store) {
            *counts.entry(record.language.as_str()).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .map(|(language, lines)| BreakdownEntry {
            language: language.to_string(),
            lines,
            percent: format!("{:.1}%", lines as f64 / total as f64 * 100.0),
        })
        .collect()
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let quiet = json || ndjson;
    let range = loader::resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;
    let report = loader::load_log(&common.log, &range, common.strict, !quiet)
        .context("Failed to read line-history log")?;
    warn_skipped(&report);

    let commits = commits::aggregate(&report.records);
    let all: Vec<usize> = (0..commits.len()).collect();
    let entries = language_breakdown(&report.records, &commits, &all);

    if json {
        output_json(&entries, &common)?;
    } else if ndjson {
        output_ndjson(&entries)?;
    } else {
        output_table(&entries)?;
    }

    Ok(())
}

fn output_json(entries: &[BreakdownEntry], common: &CommonArgs) -> anyhow::Result<()> {
    let output = BreakdownOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log: common.log.display().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: entries.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(entries: &[BreakdownEntry]) -> anyhow::Result<()> {
    for entry in entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}

fn output_table(entries: &[BreakdownEntry]) -> anyhow::Result<()> {
    if entries.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!(
        "{:<16} {:>8} {:>8}",
        style("Language").bold(),
        style("Lines").bold(),
        style("Share").bold()
    );
    println!("{}", "─".repeat(50));

    let max_lines = entries.iter().map(|e| e.lines).max().unwrap_or(1);
    for entry in entries {
        let bar_len = (entry.lines as f64 / max_lines as f64 * 14.0).round() as usize;
        println!(
            "{:<16} {:>8} {:>8} {}",
            entry.language,
            entry.lines,
            entry.percent,
            style("█".repeat(bar_len)).cyan()
        );
    }
    Ok(())
}
