use std::env;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Args;

use ::rebrand::defaults;
use ::rebrand::{log_status, Error, WalkStats, Walker};

use crate::commands::CmdResult;
use crate::report::{self, ConsoleReporter};

#[derive(Args, Debug, Default)]
pub struct RebrandArgs {
    /// Report every change without writing or renaming anything
    #[arg(long)]
    pub dry_run: bool,
}

pub struct RebrandOutput {
    pub dry_run: bool,
    pub stats: WalkStats,
    pub elapsed: Duration,
}

pub fn run(args: RebrandArgs) -> CmdResult<RebrandOutput> {
    let root = env::current_dir().map_err(|e| {
        Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
    })?;

    run_in(&root, args.dry_run)
}

fn run_in(root: &Path, dry_run: bool) -> CmdResult<RebrandOutput> {
    let loaded = defaults::load_config(root)?;
    match &loaded.source {
        Some(path) => log_status!("config", "Loaded rules from {}", path.display()),
        None => log_status!("config", "Using built-in rules"),
    }

    let rules = loaded.rule_table();
    let filter = loaded.filter_set();
    let started_at = Local::now();

    report::print_header(root, dry_run, loaded.source.as_deref(), started_at)?;

    let timer = Instant::now();
    let mut reporter = ConsoleReporter::new(root, dry_run);
    let mut walker = Walker::new(&rules, &filter, &mut reporter).dry_run(dry_run);
    if let Some(path) = &loaded.source {
        walker = walker.exclude_file(path);
    }
    let stats = walker.walk(root)?;
    reporter.finish()?;

    Ok((
        RebrandOutput {
            dry_run,
            stats,
            elapsed: timer.elapsed(),
        },
        0,
    ))
}
