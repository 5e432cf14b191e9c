use crate::cli::CommonArgs;
use crate::commits;
use crate::loader;
use crate::plot::output;
use crate::plot::scales::{PlotMapper, Viewport};
use crate::stats::warn_skipped;
use anyhow::Context;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let quiet = json || ndjson;
    let range = loader::resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;
    let report = loader::load_log(&common.log, &range, common.strict, !quiet)
        .context("Failed to read line-history log")?;
    warn_skipped(&report);

    let commits = commits::aggregate(&report.records);
    let mapper = PlotMapper::new(&commits, Viewport::page());

    if json {
        output::output_json(&commits, &mapper, &common)?;
    } else if ndjson {
        output::output_ndjson(&commits, &mapper)?;
    } else {
        output::output_punchcard(&commits, &common);
    }

    Ok(())
}
