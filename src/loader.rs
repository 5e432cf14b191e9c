use crate::error::{PunchcardError, Result};
use crate::model::{DateRange, LineRecord};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::SystemTime;

/// Result of reading a line-history log: the surviving records in input
/// order plus one entry per row that failed coercion.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<LineRecord>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

const REQUIRED_COLUMNS: [&str; 10] = [
    "file", "line", "depth", "length", "type", "commit", "author", "date", "time", "timezone",
];

/// Read a log file into coerced line records. Rows are NDJSON objects or a
/// header-first delimited table; the format is detected from the first
/// non-blank line. Malformed rows are skipped and reported unless `strict`,
/// in which case the first one aborts the load. Records outside `range` are
/// dropped without being counted as skipped.
pub fn load_log(path: &Path, range: &DateRange, strict: bool, progress: bool) -> Result<LoadReport> {
    let file = File::open(path).map_err(|e| {
        PunchcardError::Load(format!("cannot open log {}: {e}", path.display()))
    })?;
    let reader = BufReader::new(file);

    let pb = if progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading log...");
        Some(pb)
    } else {
        None
    };

    let mut report = LoadReport::default();
    let mut header: Option<Vec<String>> = None;
    let mut saw_first = false;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }

        if !saw_first {
            saw_first = true;
            // A `{` on the first line means headerless NDJSON; fall through
            // and parse it as the first record.
            if !line.trim_start().starts_with('{') {
                let cols: Vec<String> = split_delimited(&line)
                    .into_iter()
                    .map(|c| c.trim().to_lowercase())
                    .collect();
                for required in REQUIRED_COLUMNS {
                    let present = cols.iter().any(|c| {
                        c == required || (required == "type" && c == "language")
                    });
                    if !present {
                        return Err(PunchcardError::Load(format!(
                            "log header is missing required column `{required}`"
                        )));
                    }
                }
                header = Some(cols);
                continue;
            }
        }

        let row = match parse_row(&line, header.as_deref()) {
            Ok(row) => row,
            Err(reason) => {
                if strict {
                    return Err(PunchcardError::MalformedRecord { line: line_no, reason });
                }
                report.skipped.push(SkippedRow { line: line_no, reason });
                continue;
            }
        };

        match coerce_row(&row) {
            Ok(record) => {
                if range.contains(&record.datetime.with_timezone(&Utc)) {
                    report.records.push(record);
                }
            }
            Err(reason) => {
                if strict {
                    return Err(PunchcardError::MalformedRecord { line: line_no, reason });
                }
                report.skipped.push(SkippedRow { line: line_no, reason });
            }
        }
    }

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    Ok(report)
}

/// Turn one physical line into a column→value map.
fn parse_row(line: &str, header: Option<&[String]>) -> std::result::Result<HashMap<String, String>, String> {
    match header {
        None => {
            let value: serde_json::Value =
                serde_json::from_str(line).map_err(|e| format!("invalid JSON row: {e}"))?;
            let obj = value
                .as_object()
                .ok_or_else(|| "JSON row is not an object".to_string())?;
            let mut row = HashMap::with_capacity(obj.len());
            for (key, value) in obj {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                row.insert(key.to_lowercase(), text);
            }
            Ok(row)
        }
        Some(columns) => {
            let fields = split_delimited(line);
            if fields.len() != columns.len() {
                return Err(format!(
                    "expected {} fields, found {}",
                    columns.len(),
                    fields.len()
                ));
            }
            Ok(columns.iter().cloned().zip(fields).collect())
        }
    }
}

/// Split a delimited row, honoring double-quoted fields with `""` escapes.
fn split_delimited(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}

fn field<'a>(row: &'a HashMap<String, String>, names: &[&str]) -> std::result::Result<&'a str, String> {
    for name in names {
        if let Some(value) = row.get(*name) {
            return Ok(value.as_str());
        }
    }
    Err(format!("missing field `{}`", names[0]))
}

fn numeric(row: &HashMap<String, String>, name: &str) -> std::result::Result<u32, String> {
    let raw = field(row, &[name])?;
    raw.trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid {name} `{raw}`"))
}

/// Coerce one string-typed row into a `LineRecord`.
fn coerce_row(row: &HashMap<String, String>) -> std::result::Result<LineRecord, String> {
    let file = field(row, &["file"])?.to_string();
    let language = field(row, &["type", "language"])?.to_string();
    let commit = field(row, &["commit"])?.to_string();
    let author = field(row, &["author"])?.to_string();
    let time = field(row, &["time"])?.to_string();
    let timezone = field(row, &["timezone"])?.to_string();

    let line = numeric(row, "line")?;
    if line == 0 {
        return Err("line number must be >= 1".to_string());
    }
    let depth = numeric(row, "depth")?;
    let length = numeric(row, "length")?;

    let date_raw = field(row, &["date"])?;
    let date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{date_raw}`"))?;

    let datetime = match row.get("datetime") {
        Some(raw) => parse_instant(raw.trim())
            .ok_or_else(|| format!("invalid datetime `{raw}`"))?,
        // The log may omit the combined column; rebuild it from the parts.
        None => {
            let composed = format!("{}T{}{}", date_raw.trim(), time.trim(), timezone.trim());
            parse_instant(&composed)
                .ok_or_else(|| format!("cannot compose datetime from `{composed}`"))?
        }
    };

    Ok(LineRecord {
        file,
        line,
        depth,
        length,
        language,
        commit,
        author,
        date,
        time,
        timezone,
        datetime,
    })
}

/// Parse an absolute instant, keeping its UTC offset.
fn parse_instant(input: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    None
}

/// Resolve `--since`/`--until` values into a date range. Accepts RFC 3339,
/// `YYYY-MM-DD`, or a humantime duration followed by "ago".
pub fn resolve_range(since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
    let mut range = DateRange::new();

    let since_dt = since.map(parse_date_expr).transpose()?;
    let until_dt = until.map(parse_date_expr).transpose()?;

    if let (Some(s), Some(u)) = (since_dt, until_dt) {
        if s > u {
            return Err(PunchcardError::InvalidDate(format!(
                "Invalid range: since ({s}) is after until ({u})"
            )));
        }
    }

    if let Some(s) = since_dt {
        range = range.with_since(s);
    }
    if let Some(u) = until_dt {
        range = range.with_until(u);
    }

    Ok(range)
}

fn parse_date_expr(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    if let Some(expr) = input.trim().strip_suffix("ago") {
        if let Ok(duration) = humantime::parse_duration(expr.trim()) {
            let target = SystemTime::now()
                .checked_sub(duration)
                .ok_or_else(|| PunchcardError::InvalidDate(format!("Duration overflow for '{input}'")))?;
            return Ok(DateTime::<Utc>::from(target));
        }
    }

    Err(PunchcardError::InvalidDate(format!(
        "cannot parse '{input}' as RFC 3339, YYYY-MM-DD, or '<duration> ago'"
    )))
}
