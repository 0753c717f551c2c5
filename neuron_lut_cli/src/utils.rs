use std::{backtrace::BacktraceStatus, fmt, sync::OnceLock};

use console::style;

/// Set once from `--quiet` before any command runs.
pub static QUIET: OnceLock<bool> = OnceLock::new();

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| false)
}

/// Print a cargo-style status line, e.g. `   Generating table ...`.
pub fn print_cargo_message(status: &str, msg: fmt::Arguments) {
    if is_quiet() {
        return;
    }
    eprintln!("{:>12} {msg}", style(status).green().bold());
}

pub fn print_error(e: anyhow::Error) {
    for e in e.chain().rev() {
        eprintln!("{}{} {}", style("error").red().bold(), style(":").white().bold(), e);
    }
    let bt = e.backtrace();
    if bt.status() == BacktraceStatus::Captured {
        eprintln!("error backtrace:");
        eprintln!("{bt}");
    }
}
