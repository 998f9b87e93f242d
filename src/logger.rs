//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed with `--verbose`
//! - `ProgressLine` for a single-line per-bundle file counter
//!
//! Warnings and errors go to stderr, everything else to stdout unless
//! [`set_stderr_only`] is on (stdout then carries only command output).
//!
//! # Example
//!
//! ```ignore
//! log!("bundle"; "rebuilding {} ({} files)", name, count);
//!
//! let progress = ProgressLine::new("app.css", 5);
//! progress.inc();
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Route every log line to stderr (set while stdout carries command output)
static STDERR_ONLY: AtomicBool = AtomicBool::new(false);

/// Send all log output to stderr
pub fn set_stderr_only(v: bool) {
    STDERR_ONLY.store(v, Ordering::SeqCst);
}

/// Whether a progress line currently owns the last terminal line
static BAR_ACTIVE: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    match stream_for(&module_lower, STDERR_ONLY.load(Ordering::SeqCst)) {
        Stream::Stdout => write_line(&mut stdout().lock(), &prefix, message),
        Stream::Stderr => write_line(&mut stderr().lock(), &prefix, message),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Where a line for `module_lower` goes.
fn stream_for(module_lower: &str, stderr_only: bool) -> Stream {
    match module_lower {
        _ if stderr_only => Stream::Stderr,
        "warning" | "error" => Stream::Stderr,
        _ => Stream::Stdout,
    }
}

fn write_line(out: &mut impl Write, prefix: &str, message: &str) {
    // Keep an active progress line at the bottom: clear it, print, redraw later
    if BAR_ACTIVE.load(Ordering::SeqCst) {
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    } else {
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
    }

    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "build" => prefix.bright_blue().bold().to_string(),
        "fresh" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Progress Line (single-line counter)
// ============================================================================

/// Single-line progress display for one bundle rebuild
///
/// Displays: `[bundle] app.css(2/5)`
///
/// The counter updates in place on the same line.
///
/// # Example
///
/// ```ignore
/// let progress = ProgressLine::new("app.css", 5);
/// progress.inc();
/// progress.finish(); // keeps the line, moves cursor down
/// ```
pub struct ProgressLine {
    name: String,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl ProgressLine {
    /// Create a new progress display for `total` files.
    ///
    /// Nothing is drawn when `total` is zero.
    pub fn new(name: impl Into<String>, total: usize) -> Self {
        let progress = Self {
            name: name.into(),
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        };
        if total > 0 {
            BAR_ACTIVE.store(true, Ordering::SeqCst);
            progress.display(false);
        }
        progress
    }

    /// Advance the counter by one file.
    #[inline]
    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        if self.total > 0
            && let Some(_guard) = self.lock.try_lock()
        {
            self.display(false);
        }
    }

    /// Number of files counted so far.
    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    fn line(&self) -> String {
        format!("{}({}/{})", self.name, self.current(), self.total)
    }

    /// Draw the line; `newline` keeps it on screen for good.
    fn display(&self, newline: bool) {
        let prefix = colorize_prefix("bundle", "bundle");
        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        if newline {
            writeln!(stdout, "{} {}", prefix, self.line()).ok();
        } else {
            write!(stdout, "{} {}", prefix, self.line()).ok();
        }
        stdout.flush().ok();
    }

    /// Finish progress display, preserve line and move to next line.
    pub fn finish(self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);
        if self.total > 0 {
            let _guard = self.lock.lock();
            self.display(true);
        }
        std::mem::forget(self); // Prevent Drop from clearing
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);
        if self.total == 0 {
            return;
        }

        // Clear the line on drop (if not finished properly)
        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        stdout.flush().ok();
    }
}

// ============================================================================
// Tests
// ============================================================================
