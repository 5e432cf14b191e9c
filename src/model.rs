use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One changed source line from the history log, after type coercion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub language: String,
    pub commit: String,
    pub author: String,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
}

/// Aggregate of all line records sharing one commit id. Metadata comes from
/// the first record seen for that id; the record view stays out of the
/// serialized form and is reachable only through the accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub author: String,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    line_rows: Vec<usize>,
}

impl Commit {
    pub fn from_first(id: String, first: &LineRecord) -> Self {
        let hour_frac = f64::from(first.datetime.hour()) + f64::from(first.datetime.minute()) / 60.0;
        Self {
            id,
            author: first.author.clone(),
            date: first.date,
            time: first.time.clone(),
            timezone: first.timezone.clone(),
            datetime: first.datetime,
            hour_frac,
            total_lines: 0,
            line_rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: usize) {
        self.line_rows.push(row);
        self.total_lines += 1;
    }

    /// Indices into the line record store for this commit's subset.
    pub fn line_rows(&self) -> &[usize] {
        &self.line_rows
    }

    pub fn lines<'a>(&'a self, store: &'a [LineRecord]) -> impl Iterator<Item = &'a LineRecord> + 'a {
        self.line_rows.iter().map(move |&i| &store[i])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub total_lines: usize,
    pub total_commits: usize,
    pub file_count: usize,
    pub max_file_length: u32,
    pub avg_file_length: f64,
    pub longest_line: u32,
    pub avg_depth: f64,
    pub busiest_period: Option<String>,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DotSpec {
    pub commit: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisTick {
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log: String,
    pub width: f64,
    pub height: f64,
    pub dots: Vec<DotSpec>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub language: String,
    pub lines: usize,
    pub percent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
