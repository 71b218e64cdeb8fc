// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands share the same validation flags:
// - check: validate every link and print the report
// - prune: validate and write the bookmark tree without the bad links
// =============================================================================

use bookmark_linkcheck::config::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_MS};
use bookmark_linkcheck::ValidatorConfig;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "bookmark-linkcheck",
    version = "0.1.0",
    about = "Find dead and moved links in a bookmark tree",
    long_about = "bookmark-linkcheck tests every link in a JSON bookmark tree: host lookup for all \
                  links, and HEAD/GET probing with hard timeouts for plain http links. \
                  Bad links are listed per folder, permanently moved links are flagged."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate all links and print a report of bad and moved links
    ///
    /// Example: bookmark-linkcheck check bookmarks.json --timeout-ms 5000
    Check {
        /// JSON bookmark tree to check
        bookmarks_file: PathBuf,

        /// Output the report in JSON format instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Validate all links and write the tree with bad links removed
    ///
    /// Example: bookmark-linkcheck prune bookmarks.json -o clean.json
    Prune {
        /// JSON bookmark tree to prune
        bookmarks_file: PathBuf,

        /// Where to write the pruned tree (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        probe: ProbeArgs,
    },
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Don't test links at all, every link is kept
    #[arg(long)]
    pub no_probe: bool,

    /// Deadline for each connection attempt, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Redirect hops to follow before calling it a loop
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,
}

impl ProbeArgs {
    pub fn to_config(&self) -> ValidatorConfig {
        let config = if self.no_probe {
            ValidatorConfig::disabled()
        } else {
            ValidatorConfig::default()
        };

        config
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_max_redirects(self.max_redirects)
    }
}
