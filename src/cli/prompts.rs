//! Centralized colored message helpers for CLI output.

use super::quiet;

// ANSI color codes (bright variants)
pub const RED: &str = "\x1b[91m";
pub const GREEN: &str = "\x1b[92m";
pub const YELLOW: &str = "\x1b[93m";
pub const BLUE: &str = "\x1b[94m";
pub const CYAN: &str = "\x1b[96m";
pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

/// Print an error to stderr (red, bold) - NOT suppressed in quiet mode
pub fn error(msg: &str) {
    eprintln!("{BOLD}{RED}Error: {msg}{RESET}");
}

/// Print a warning to stderr (yellow, bold) - NOT suppressed in quiet mode
pub fn warn(msg: &str) {
    eprintln!("{BOLD}{YELLOW}Warning: {msg}{RESET}");
}

/// Print a success message (green, bold) - suppressed in quiet mode
pub fn success(msg: &str) {
    if !quiet::enabled() {
        println!("{BOLD}{GREEN}{msg}{RESET}");
    }
}

/// Print a mode banner with a trailing blank line - suppressed in quiet mode
pub fn banner(title: &str) {
    if !quiet::enabled() {
        println!("{BOLD}{GREEN}{title}{RESET}");
        println!();
    }
}

/// Print a colored line to stdout
pub fn line(color: &str, text: &str) {
    println!("{color}{text}{RESET}");
}

/// Print a bold colored line to stdout
pub fn line_bold(color: &str, text: &str) {
    println!("{BOLD}{color}{text}{RESET}");
}
