//! Coloured status lines for stderr.
//!
//! Colour is applied only when the caller says the stream is a terminal.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "info:".cyan().bold(), msg)
    } else {
        writeln!(writer, "info: {}", msg)
    }
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(writer, "warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "error:".red().bold(), msg)
    } else {
        writeln!(writer, "error: {}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_has_no_escapes() {
        let mut buf = Vec::new();
        print_error_message(&mut buf, "boom", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "error: boom\n");
    }

    #[test]
    fn test_coloured_output_keeps_message() {
        let mut buf = Vec::new();
        print_info_message(&mut buf, "done", true).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("\u{1b}["));
        assert!(s.ends_with("done\n"));
    }
}
