use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "punchcard")]
#[command(about = "Line-history analysis with a commit time-of-day punchcard")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "loc.csv", help = "Path to the line-history log")]
    pub log: PathBuf,

    #[arg(long, help = "Keep records from this instant on (RFC3339, YYYY-MM-DD, or \"<duration> ago\")")]
    pub since: Option<String>,

    #[arg(long, help = "Keep records up to this instant (RFC3339, YYYY-MM-DD, or \"<duration> ago\")")]
    pub until: Option<String>,

    #[arg(long, help = "Fail on the first malformed row instead of skipping it", default_value_t = false)]
    pub strict: bool,

    #[arg(long, help = "Repository base URL for commit links in tooltips")]
    pub repo_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    Plot {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    Breakdown {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json, ndjson } => {
                crate::stats::exec(self.common, json, ndjson)
            }
            Commands::Plot { json, ndjson, interactive } => {
                if interactive {
                    crate::tui::run(&self.common).map_err(|e| anyhow::anyhow!(e))
                } else {
                    crate::plot::exec(self.common, json, ndjson)
                }
            }
            Commands::Breakdown { json, ndjson } => {
                crate::breakdown::exec(self.common, json, ndjson)
            }
        }
    }
}
