// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Load the bookmark tree and walk it with a LinkValidator
// 4. Print the report / write the pruned tree
// 5. Exit with proper code (0 = success, 1 = bad links, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use bookmark_linkcheck::bookmarks::{self, BookmarkNode};
use bookmark_linkcheck::LinkValidator;
use clap::Parser;
use cli::{Cli, Commands, ProbeArgs};
use std::fs;
use std::path::Path;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no bad links
//   Ok(1) = bad links found (check only)
//   Err   = couldn't read/write files or set up the HTTP client
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            bookmarks_file,
            json,
            probe,
        } => handle_check(&bookmarks_file, json, &probe).await,
        Commands::Prune {
            bookmarks_file,
            output,
            probe,
        } => handle_prune(&bookmarks_file, output.as_deref(), &probe).await,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tree(path: &Path) -> Result<BookmarkNode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read bookmarks from {}", path.display()))?;
    BookmarkNode::from_json(&content)
        .with_context(|| format!("Invalid bookmark tree in {}", path.display()))
}

// Handles the 'check' subcommand
async fn handle_check(bookmarks_file: &Path, json: bool, probe: &ProbeArgs) -> Result<i32> {
    let root = load_tree(bookmarks_file)?;
    info!("🔍 Checking bookmarks in {}", bookmarks_file.display());

    let mut validator = LinkValidator::new(&probe.to_config())?;
    bookmarks::prune(&root, &mut validator).await;

    if json {
        println!("{}", serde_json::to_string_pretty(validator.report())?);
    } else {
        print!("{}", summary(&validator));
    }

    if validator.error_count() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'prune' subcommand
async fn handle_prune(
    bookmarks_file: &Path,
    output: Option<&Path>,
    probe: &ProbeArgs,
) -> Result<i32> {
    let root = load_tree(bookmarks_file)?;

    let mut validator = LinkValidator::new(&probe.to_config())?;
    let pruned = bookmarks::prune(&root, &mut validator).await;
    // A rejected lone link leaves nothing behind: written as JSON null
    let pruned_json = serde_json::to_string_pretty(&pruned)?;

    match output {
        Some(path) => {
            fs::write(path, pruned_json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("📄 Wrote {}", path.display());
        }
        None => println!("{}", pruned_json),
    }

    info!(
        "Kept {} of {} link(s) ({} invalid links ignored)",
        pruned.as_ref().map_or(0, BookmarkNode::link_count),
        root.link_count(),
        validator.error_count()
    );

    // The report goes to the log so stdout stays pure JSON
    let report = summary(&validator);
    if validator.report().is_clean() {
        info!("{}", report.trim_end());
    } else {
        warn!("{}", report.trim_end());
    }

    Ok(0)
}

fn summary<P: bookmark_linkcheck::Probe>(validator: &LinkValidator<P>) -> String {
    if !validator.is_enabled() {
        return "(links not tested)\n".to_string();
    }

    let (errors, moved) = (validator.error_count(), validator.moved_count());
    if errors + moved == 0 {
        return "✅ (no bad links found)\n".to_string();
    }

    validator.dump(&format!(
        "Found {} bad links and {} redirected links:",
        errors, moved
    ))
}
