//! Console reporting: live per-change lines and the final summary block.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use ::rebrand::{Error, Result, WalkEvent, WalkObserver};

use crate::commands::rebrand::RebrandOutput;

const RULE_WIDTH: usize = 60;

/// Write one line to stdout. A closed pipe is not an error.
fn out(args: fmt::Arguments<'_>) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_line(&mut handle, args)
}

fn write_line(w: &mut impl Write, args: fmt::Arguments<'_>) -> Result<()> {
    match writeln!(w, "{}", args) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
        _ => Ok(()),
    }
}

fn rule() -> Result<()> {
    out(format_args!("{}", "=".repeat(RULE_WIDTH)))
}

/// Prints each change as it happens. The walk cannot be interrupted from an
/// observer, so the first stdout failure is held until [`finish`](Self::finish).
pub struct ConsoleReporter {
    root: PathBuf,
    dry_run: bool,
    error: Option<Error>,
}

impl ConsoleReporter {
    pub fn new(root: &Path, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run,
            error: None,
        }
    }

    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = out(args) {
            self.error = Some(err);
        }
    }

    fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl WalkObserver for ConsoleReporter {
    fn on_event(&mut self, event: &WalkEvent<'_>) {
        match event {
            WalkEvent::FileScanned { .. } => {}
            WalkEvent::FileModified { path, replacements } => {
                let path = self.display(path);
                if self.dry_run {
                    self.emit(format_args!(
                        "[DRY-RUN] Would modify: {} ({} replacements)",
                        path, replacements
                    ));
                } else {
                    self.emit(format_args!(
                        "Modified: {} ({} replacements)",
                        path, replacements
                    ));
                }
            }
            WalkEvent::FileRenamed { from, to } => {
                let (from, to) = (self.display(from), self.display(to));
                if self.dry_run {
                    self.emit(format_args!(
                        "[DRY-RUN] Would rename file: {} -> {}",
                        from, to
                    ));
                } else {
                    self.emit(format_args!("Renamed file: {} -> {}", from, to));
                }
            }
            WalkEvent::DirRenamed { from, to } => {
                let (from, to) = (self.display(from), self.display(to));
                if self.dry_run {
                    self.emit(format_args!(
                        "[DRY-RUN] Would rename directory: {} -> {}",
                        from, to
                    ));
                } else {
                    self.emit(format_args!("Renamed directory: {} -> {}", from, to));
                }
            }
            WalkEvent::FileSkipped { path, failure } => {
                if !failure.is_silent() {
                    eprintln!(
                        "Warning: Could not process {}: {}",
                        self.display(path),
                        failure
                    );
                }
            }
        }
    }
}

pub fn print_header(
    root: &Path,
    dry_run: bool,
    config_source: Option<&Path>,
    started_at: DateTime<Local>,
) -> Result<()> {
    rule()?;
    out(format_args!("Rebrand"))?;
    rule()?;
    out(format_args!("Root directory: {}", root.display()))?;
    out(format_args!(
        "Mode: {}",
        if dry_run {
            "DRY RUN (no changes will be made)"
        } else {
            "LIVE"
        }
    ))?;
    match config_source {
        Some(path) => out(format_args!("Rules: {}", path.display()))?,
        None => out(format_args!("Rules: built-in"))?,
    }
    out(format_args!("Started: {}", started_at.format("%Y-%m-%d %H:%M:%S")))?;
    rule()?;
    out(format_args!(""))
}

pub fn print_summary(output: &RebrandOutput) -> Result<()> {
    let stats = &output.stats;

    out(format_args!(""))?;
    rule()?;
    out(format_args!("Summary"))?;
    rule()?;
    out(format_args!("Files scanned:      {}", stats.files_scanned))?;
    out(format_args!("Files modified:     {}", stats.files_modified))?;
    out(format_args!("Files renamed:      {}", stats.files_renamed))?;
    out(format_args!("Dirs renamed:       {}", stats.dirs_renamed))?;
    out(format_args!("Total replacements: {}", stats.replacements))?;
    out(format_args!(
        "Time elapsed:       {:.2}s",
        output.elapsed.as_secs_f64()
    ))?;
    rule()?;

    if output.dry_run {
        out(format_args!(""))?;
        out(format_args!(
            "This was a dry run. Run without --dry-run to apply changes."
        ))?;
    }

    Ok(())
}
