use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;

use punchcard::breakdown::language_breakdown;
use punchcard::commits::aggregate;
use punchcard::model::{DateRange, LineRecord};
use punchcard::plot::brush::{self, BrushRect};
use punchcard::plot::scales::{
    draw_order, HourScale, Margins, PlotMapper, RadiusScale, TimeScale, Viewport,
};
use punchcard::session::Session;
use punchcard::stats::{self, DayPeriod};
use punchcard::{loader, util};

const EPS: f64 = 1e-9;

fn record(commit: &str, author: &str, instant: &str, language: &str, file: &str, line: u32) -> LineRecord {
    let datetime = DateTime::parse_from_rfc3339(instant).unwrap();
    LineRecord {
        file: file.to_string(),
        line,
        depth: 1,
        length: 40,
        language: language.to_string(),
        commit: commit.to_string(),
        author: author.to_string(),
        date: datetime.date_naive(),
        time: datetime.format("%H:%M:%S").to_string(),
        timezone: datetime.format("%:z").to_string(),
        datetime,
    }
}

/// `total` records for one commit, all at the same instant.
fn commit_rows(commit: &str, instant: &str, language: &str, total: usize) -> Vec<LineRecord> {
    (0..total)
        .map(|i| record(commit, "Ada", instant, language, "src/lib.rs", i as u32 + 1))
        .collect()
}

fn test_viewport() -> Viewport {
    Viewport::new(
        120.0,
        64.0,
        Margins { top: 4.0, right: 4.0, bottom: 4.0, left: 12.0 },
        (1.0, 4.0),
    )
}

#[test]
fn aggregation_keeps_first_seen_order_and_counts_rows() {
    let mut records = commit_rows("bbb", "2024-03-05T10:00:00+00:00", "rust", 2);
    records.extend(commit_rows("aaa", "2024-03-04T09:00:00+00:00", "js", 1));
    records.extend(commit_rows("bbb", "2024-03-05T10:00:00+00:00", "rust", 1));

    let commits = aggregate(&records);
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].id, "bbb");
    assert_eq!(commits[0].total_lines, 3);
    assert_eq!(commits[1].id, "aaa");
    assert_eq!(commits[1].total_lines, 1);
}

#[test]
fn every_record_lands_in_exactly_one_commit() {
    let mut records = commit_rows("bbb", "2024-03-05T10:00:00+00:00", "rust", 3);
    records.extend(commit_rows("aaa", "2024-03-04T09:00:00+00:00", "js", 2));
    records.extend(commit_rows("bbb", "2024-03-05T10:00:00+00:00", "rust", 1));

    let commits = aggregate(&records);
    let mut seen = vec![0usize; records.len()];
    for commit in &commits {
        for &row in commit.line_rows() {
            seen[row] += 1;
            assert_eq!(records[row].commit, commit.id);
        }
    }
    assert!(seen.iter().all(|&n| n == 1));

    let covered: usize = commits.iter().map(|c| c.total_lines).sum();
    assert_eq!(covered, records.len());
}

#[test]
fn commit_metadata_comes_from_first_record() {
    let records = vec![
        record("ccc", "First", "2024-03-04T09:30:00+00:00", "rust", "a.rs", 1),
        record("ccc", "Second", "2024-03-04T11:00:00+00:00", "rust", "b.rs", 2),
    ];

    let commits = aggregate(&records);
    assert_eq!(commits[0].author, "First");
    assert_eq!(commits[0].datetime, records[0].datetime);
    assert_eq!(commits[0].total_lines, 2);
}

#[test]
fn hour_frac_is_hour_plus_minute_fraction() {
    let records = vec![
        record("a", "Ada", "2024-03-04T09:30:00+00:00", "rust", "a.rs", 1),
        record("b", "Ada", "2024-03-04T23:45:00+00:00", "rust", "b.rs", 1),
        record("c", "Ada", "2024-03-04T00:00:00+00:00", "rust", "c.rs", 1),
    ];
    let commits = aggregate(&records);
    assert!((commits[0].hour_frac - 9.5).abs() < EPS);
    assert!((commits[1].hour_frac - 23.75).abs() < EPS);
    assert!((commits[2].hour_frac - 0.0).abs() < EPS);
    for commit in &commits {
        assert!(commit.hour_frac >= 0.0 && commit.hour_frac < 24.0);
    }
}

#[test]
fn hour_frac_uses_local_clock_from_offset() {
    // 09:30 at +02:00 is 07:30 UTC; the punchcard should show 9.5.
    let records = vec![record("a", "Ada", "2024-03-04T09:30:00+02:00", "rust", "a.rs", 1)];
    let commits = aggregate(&records);
    assert!((commits[0].hour_frac - 9.5).abs() < EPS);
}

#[test]
fn day_periods_partition_every_hour() {
    for hour in 0..24 {
        let period = DayPeriod::of_hour(hour);
        let expected = match hour {
            0..=5 => DayPeriod::Night,
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        };
        assert_eq!(period, expected, "hour {hour}");
    }
}

#[test]
fn busiest_period_is_order_independent() {
    let mut records = Vec::new();
    records.extend(commit_rows("a", "2024-03-04T07:00:00+00:00", "rust", 3));
    records.extend(commit_rows("b", "2024-03-04T13:00:00+00:00", "rust", 5));
    records.extend(commit_rows("c", "2024-03-04T02:00:00+00:00", "rust", 1));

    let commits = aggregate(&records);
    let forward = stats::compute(&records, &commits, 0);

    let reversed_records: Vec<LineRecord> = records.into_iter().rev().collect();
    let reversed_commits = aggregate(&reversed_records);
    let reversed = stats::compute(&reversed_records, &reversed_commits, 0);

    assert_eq!(forward.busiest_period, Some(DayPeriod::Afternoon));
    assert_eq!(forward.busiest_period, reversed.busiest_period);
}

#[test]
fn empty_dataset_degrades_without_errors() {
    let result = stats::compute(&[], &[], 0);
    assert_eq!(result.total_lines, 0);
    assert_eq!(result.total_commits, 0);
    assert_eq!(result.busiest_period, None);
    assert!(result.avg_depth.is_nan());
    assert!(result.avg_file_length.is_nan());
    assert_eq!(result.max_file_length, 0);
}

#[test]
fn radius_encodes_area_not_length() {
    // Range calibrated so r(v) = sqrt(v): quadrupling the lines doubles the
    // radius, which keeps dot area proportional to lines changed.
    let mut records = commit_rows("small", "2024-03-04T09:00:00+00:00", "rust", 1);
    records.extend(commit_rows("mid", "2024-03-05T10:00:00+00:00", "rust", 4));
    records.extend(commit_rows("big", "2024-03-06T11:00:00+00:00", "rust", 16));
    let commits = aggregate(&records);

    let scale = RadiusScale::new(&commits, (1.0, 4.0));
    let r_small = scale.map(1);
    let r_mid = scale.map(4);
    let r_big = scale.map(16);
    assert!((r_small - 1.0).abs() < EPS);
    assert!((r_mid - 2.0).abs() < EPS);
    assert!((r_big - 4.0).abs() < EPS);
    assert!((r_big - 2.0 * r_mid).abs() < EPS);
}

#[test]
fn equal_totals_share_one_radius_at_the_range_midpoint() {
    let mut records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 7);
    records.extend(commit_rows("b", "2024-03-05T10:00:00+00:00", "rust", 7));
    let commits = aggregate(&records);

    let scale = RadiusScale::new(&commits, (2.0, 30.0));
    let r_a = scale.map(commits[0].total_lines);
    let r_b = scale.map(commits[1].total_lines);
    assert!((r_a - r_b).abs() < EPS);
    assert!((r_a - 16.0).abs() < EPS);
    assert!(r_a.is_finite());
}

#[test]
fn time_scale_nice_domain_contains_extent() {
    let records = [
        record("a", "Ada", "2024-03-04T09:00:00+00:00", "rust", "a.rs", 1),
        record("b", "Ada", "2024-03-20T18:00:00+00:00", "rust", "b.rs", 1),
    ];
    let commits = aggregate(&records);
    let usable = test_viewport().usable();
    let scale = TimeScale::new(&commits, (usable.left, usable.right));

    for commit in &commits {
        let x = scale.map(commit.datetime);
        assert!(x >= usable.left - EPS && x <= usable.right + EPS);
    }

    let ticks = scale.ticks();
    assert!(!ticks.is_empty());
    assert!(ticks.len() <= 12);
    assert!(ticks[0].offset <= scale.map(commits[0].datetime) + EPS);
    assert!(ticks.last().unwrap().offset >= scale.map(commits[1].datetime) - EPS);
}

#[test]
fn time_scale_single_commit_stays_finite() {
    let records = commit_rows("only", "2024-03-04T09:30:00+00:00", "rust", 1);
    let commits = aggregate(&records);
    let usable = test_viewport().usable();
    let scale = TimeScale::new(&commits, (usable.left, usable.right));

    let x = scale.map(commits[0].datetime);
    assert!(x.is_finite());
    assert!(x >= usable.left - EPS && x <= usable.right + EPS);
}

#[test]
fn hour_scale_runs_bottom_to_top() {
    let usable = test_viewport().usable();
    let scale = HourScale::new(&usable);

    assert!((scale.map(0.0) - usable.bottom).abs() < EPS);
    assert!((scale.map(24.0) - usable.top).abs() < EPS);
    assert!((scale.map(12.0) - (usable.top + usable.bottom) / 2.0).abs() < EPS);
    // Later in the day means smaller screen y.
    assert!(scale.map(18.0) < scale.map(6.0));

    let labels: Vec<String> = scale.ticks().into_iter().map(|t| t.label).collect();
    assert_eq!(labels, ["00:00", "06:00", "12:00", "18:00", "00:00"]);
}

#[test]
fn draw_order_is_descending_and_stable() {
    let mut records = commit_rows("first", "2024-03-04T09:00:00+00:00", "rust", 5);
    records.extend(commit_rows("second", "2024-03-05T10:00:00+00:00", "rust", 9));
    records.extend(commit_rows("third", "2024-03-06T11:00:00+00:00", "rust", 5));
    let commits = aggregate(&records);

    assert_eq!(draw_order(&commits), vec![1, 0, 2]);
}

#[test]
fn absent_selection_resolves_to_no_commits() {
    let records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 3);
    let commits = aggregate(&records);
    let mapper = PlotMapper::new(&commits, test_viewport());

    assert!(brush::resolve(&mapper, &commits, None).is_empty());
}

#[test]
fn brush_rect_normalizes_and_contains_inclusively() {
    let rect = BrushRect::from_corners((10.0, 20.0), (4.0, 6.0));
    assert_eq!(rect.x0, 4.0);
    assert_eq!(rect.y0, 6.0);
    assert_eq!(rect.x1, 10.0);
    assert_eq!(rect.y1, 20.0);
    assert_eq!(rect.width(), 6.0);
    assert_eq!(rect.height(), 14.0);
    assert!(!rect.is_click());

    assert!(rect.contains(4.0, 6.0));
    assert!(rect.contains(10.0, 20.0));
    assert!(rect.contains(7.0, 13.0));
    assert!(!rect.contains(3.9, 13.0));
    assert!(!rect.contains(7.0, 20.1));
}

#[test]
fn band_selection_catches_exactly_the_morning_commits() {
    // Two commits around hour 9 with modest totals, one near midnight with a
    // large total; a horizontal band across hours [8.5, 10.5] must catch
    // exactly the first two, in commit order, and the breakdown must cover
    // only their lines.
    let mut records = commit_rows("m1", "2024-03-04T09:00:00+00:00", "rust", 10);
    records.extend(commit_rows("m2", "2024-03-07T09:30:00+00:00", "go", 10));
    records.extend(commit_rows("late", "2024-03-10T23:00:00+00:00", "js", 40));

    let mut session = Session::from_records(records, 0, test_viewport(), None);
    let usable = session.mapper().viewport.usable();
    let y_low = session.mapper().y.map(8.5);
    let y_high = session.mapper().y.map(10.5);

    session.drag_start(usable.left, y_low);
    session.drag_move(usable.right, y_high);
    session.drag_end(usable.right, y_high);

    assert_eq!(session.selected(), &[0, 1]);
    assert_eq!(session.selection_count(), 2);

    let entries = session.breakdown();
    let names: Vec<&str> = entries.iter().map(|e| e.language.as_str()).collect();
    assert_eq!(names, ["go", "rust"]);
    assert!(entries.iter().all(|e| e.percent == "50.0%"));
}

#[test]
fn drag_move_without_movement_is_idempotent() {
    let mut records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 2);
    records.extend(commit_rows("b", "2024-03-06T15:00:00+00:00", "rust", 4));
    let mut session = Session::from_records(records, 0, test_viewport(), None);

    session.drag_start(20.0, 10.0);
    session.drag_move(80.0, 50.0);
    let first: Vec<usize> = session.selected().to_vec();
    session.drag_move(80.0, 50.0);
    assert_eq!(session.selected(), first.as_slice());
}

#[test]
fn click_without_movement_clears_selection() {
    let mut records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 2);
    records.extend(commit_rows("b", "2024-03-06T15:00:00+00:00", "rust", 4));
    let mut session = Session::from_records(records, 0, test_viewport(), None);

    session.drag_start(20.0, 10.0);
    session.drag_move(80.0, 50.0);
    session.drag_end(80.0, 50.0);
    assert!(session.selection().is_some());

    session.drag_start(40.0, 30.0);
    session.drag_end(40.0, 30.0);
    assert!(session.selection().is_none());
    assert_eq!(session.selection_count(), 0);
}

#[test]
fn escape_clears_selection_and_drag() {
    let records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 2);
    let mut session = Session::from_records(records, 0, test_viewport(), None);

    session.drag_start(20.0, 10.0);
    session.drag_move(80.0, 50.0);
    session.clear_selection();
    assert!(session.selection().is_none());
    assert!(!session.is_dragging());
    assert_eq!(session.selection_count(), 0);
}

#[test]
fn resize_keeps_selection_consistent_with_new_mapper() {
    let mut records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 2);
    records.extend(commit_rows("b", "2024-03-06T15:00:00+00:00", "rust", 4));
    let mut session = Session::from_records(records, 0, test_viewport(), None);

    session.drag_start(15.0, 5.0);
    session.drag_move(110.0, 58.0);
    session.drag_end(110.0, 58.0);

    let bigger = Viewport::new(
        200.0,
        100.0,
        Margins { top: 4.0, right: 4.0, bottom: 4.0, left: 12.0 },
        (1.0, 4.0),
    );
    session.resize(bigger);

    let expected = brush::resolve(session.mapper(), session.commits(), session.selection());
    assert_eq!(session.selected(), expected.as_slice());
}

#[test]
fn hover_picks_the_topmost_smallest_dot() {
    // Same instant, so both dots share a center; the smaller one is painted
    // last and should win the hover.
    let mut records = commit_rows("big", "2024-03-04T09:00:00+00:00", "rust", 16);
    records.extend(commit_rows("small", "2024-03-04T09:00:00+00:00", "js", 1));
    let mut session = Session::from_records(records, 0, test_viewport(), None);

    let (x, y) = session.mapper().position(&session.commits()[1]);
    session.hover_at(x, y);
    assert_eq!(session.hover(), Some(1));

    session.hover_clear();
    assert_eq!(session.hover(), None);
}

#[test]
fn hover_misses_empty_space() {
    let records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 2);
    let mut session = Session::from_records(records, 0, test_viewport(), None);

    // The only dot sits at hour 9; the top edge of the plot is hour 24.
    let usable = session.mapper().viewport.usable();
    let (cx, _) = session.mapper().position(&session.commits()[0]);
    session.hover_at(cx, usable.top);
    assert_eq!(session.hover(), None);
}

#[test]
fn tooltip_carries_link_and_first_record_metadata() {
    let records = commit_rows("0123456789abcdef", "2024-03-04T09:30:00+00:00", "rust", 3);
    let mut session = Session::from_records(
        records,
        0,
        test_viewport(),
        Some("https://example.com/repo/".to_string()),
    );

    let (x, y) = session.mapper().position(&session.commits()[0]);
    session.hover_at(x, y);
    let tip = session.tooltip().unwrap();
    assert_eq!(tip.short_id, "01234567");
    assert_eq!(tip.url.as_deref(), Some("https://example.com/repo/commit/0123456789abcdef"));
    assert_eq!(tip.author, "Ada");
    assert_eq!(tip.total_lines, 3);
    assert!(tip.date_label.contains("2024"));
    assert!(tip.date_label.contains("Monday"));
}

#[test]
fn tooltip_short_id_respects_char_boundaries() {
    // Ids are arbitrary strings; the eight-char cut must land on a char
    // boundary even when byte eight sits inside a multibyte character.
    let records = commit_rows("0123456é89abcdef", "2024-03-04T09:30:00+00:00", "rust", 2);
    let mut session = Session::from_records(records, 0, test_viewport(), None);

    let (x, y) = session.mapper().position(&session.commits()[0]);
    session.hover_at(x, y);
    let tip = session.tooltip().unwrap();
    assert_eq!(tip.id, "0123456é89abcdef");
    assert_eq!(tip.short_id, "0123456é");
}

#[test]
fn breakdown_orders_by_lines_then_name() {
    let mut records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 5);
    records.extend(commit_rows("b", "2024-03-05T10:00:00+00:00", "go", 3));
    records.extend(commit_rows("c", "2024-03-06T11:00:00+00:00", "js", 3));
    let commits = aggregate(&records);
    let all: Vec<usize> = (0..commits.len()).collect();

    let entries = language_breakdown(&records, &commits, &all);
    let names: Vec<&str> = entries.iter().map(|e| e.language.as_str()).collect();
    assert_eq!(names, ["rust", "go", "js"]);
    assert_eq!(entries[0].percent, "45.5%");

    let total: f64 = entries
        .iter()
        .map(|e| e.percent.trim_end_matches('%').parse::<f64>().unwrap())
        .sum();
    assert!((total - 100.0).abs() < 0.3);
}

#[test]
fn breakdown_of_empty_selection_is_empty() {
    let records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 5);
    let commits = aggregate(&records);
    assert!(language_breakdown(&records, &commits, &[]).is_empty());
}

#[test]
fn session_breakdown_falls_back_to_all_commits() {
    let mut records = commit_rows("a", "2024-03-04T09:00:00+00:00", "rust", 5);
    records.extend(commit_rows("b", "2024-03-05T10:00:00+00:00", "js", 5));
    let session = Session::from_records(records, 0, test_viewport(), None);
    assert_eq!(session.records().len(), 10);

    let entries = session.breakdown();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].percent, "50.0%");
}

#[test]
fn date_range_resolution_and_containment() {
    let range = loader::resolve_range(Some("2024-03-05"), Some("2024-03-10")).unwrap();
    let inside = DateTime::parse_from_rfc3339("2024-03-07T12:00:00+00:00")
        .unwrap()
        .to_utc();
    let before = DateTime::parse_from_rfc3339("2024-03-04T23:59:59+00:00")
        .unwrap()
        .to_utc();
    assert!(range.contains(&inside));
    assert!(!range.contains(&before));

    assert!(loader::resolve_range(Some("2024-03-10"), Some("2024-03-05")).is_err());
    assert!(loader::resolve_range(Some("not a date"), None).is_err());

    let open = DateRange::new();
    assert!(open.contains(&inside));
}

#[test]
fn duration_ago_resolves_relative_to_now() {
    let range = loader::resolve_range(Some("2 weeks ago"), None).unwrap();
    let since = range.since.unwrap();

    let drift = (Utc::now() - Duration::weeks(2) - since).num_seconds().abs();
    assert!(drift < 5, "since landed {drift}s away from two weeks ago");
    assert!(range.until.is_none());

    assert!(range.contains(&Utc::now()));
    assert!(!range.contains(&(Utc::now() - Duration::weeks(3))));

    assert!(loader::resolve_range(Some("eventually ago"), None).is_err());
}

#[test]
fn commit_url_and_short_id_helpers() {
    assert_eq!(util::short_id("0123456789abcdef"), "01234567");
    assert_eq!(util::short_id("0123456é89abcdef"), "0123456é");
    assert_eq!(util::short_id("abc"), "abc");
    assert_eq!(
        util::commit_url("https://example.com/repo/", "deadbeef"),
        "https://example.com/repo/commit/deadbeef"
    );
    assert_eq!(
        util::commit_url("https://example.com/repo", "deadbeef"),
        "https://example.com/repo/commit/deadbeef"
    );
}
