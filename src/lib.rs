//! Line-history log analysis: commit aggregation, repository statistics,
//! and an interactive time-of-day punchcard plot.

pub mod breakdown;
pub mod cli;
pub mod commits;
pub mod error;
pub mod loader;
pub mod model;
pub mod plot;
pub mod session;
pub mod stats;
pub mod tui;
pub mod util;
