// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Console output for the analyzer and the CLI.
//!
//! `info!`, `success!` and `warn!`/`error!` always print (stdout and stderr
//! respectively); `verbose!` and `section!` are gated on [`is_verbose`], which
//! the CLI drives from `--verbose`.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbosity flag, on until the CLI says otherwise.
static VERBOSE: AtomicBool = AtomicBool::new(true);

/// Turn verbose and section output on or off.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Whether verbose and section output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Plain progress line on stdout, e.g. detection summaries.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        println!("{}", format!($($arg)*));
    }};
}

/// Recoverable problem on stderr, e.g. a missing detector or tracker.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {}", "WARNING ⚠️".yellow().bold(), format!($($arg)*));
    }};
}

/// Fatal problem on stderr; the CLI exits right after.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), format!($($arg)*));
    }};
}

/// Finished output, e.g. where an annotated frame was written.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{} {}", "✅".green(), format!($($arg)*));
    }};
}

/// Detail line printed only in verbose mode.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {{
        if $crate::cli::logging::is_verbose() {
            println!("{}", format!($($arg)*));
        }
    }};
}

/// Command banner in verbose mode: the title in cyan, underlined to its width.
#[macro_export]
macro_rules! section {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        if $crate::cli::logging::is_verbose() {
            let title = format!($($arg)*);
            println!();
            println!("{}", title.cyan().bold());
            println!("{}", "─".repeat(title.chars().count()).dimmed());
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_toggle() {
        set_verbose(false);
        assert!(!is_verbose());
        // gated macros are silent no-ops and usable as statements
        crate::verbose!("hidden {}", 1);
        crate::section!("hidden");

        set_verbose(true);
        assert!(is_verbose());
    }
}
