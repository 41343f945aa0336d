//! Line buffering for interactive and scripted input.
//!
//! Lines are collected until one contains the `;` terminator, then the
//! whole buffered statement is handed out for parsing. A line reading `0`
//! or `exit` ends the session without parsing anything.
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::sql::ast::SelectQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The user asked to leave. Any buffered text is dropped.
    Exit,
    /// The statement is not terminated yet.
    Incomplete,
    /// A full statement, ready for [`crate::parse`].
    Complete(String),
}

pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line == "0" || line.eq_ignore_ascii_case("exit")
}

#[derive(Debug, Default)]
pub struct StatementBuffer {
    buffer: String,
}

impl StatementBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn push_line(&mut self, line: &str) -> LineOutcome {
        if is_exit_command(line) {
            self.buffer.clear();
            return LineOutcome::Exit;
        }

        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(line);

        if line.contains(';') {
            LineOutcome::Complete(std::mem::take(&mut self.buffer))
        } else {
            LineOutcome::Incomplete
        }
    }

    /// Hands out unterminated leftover text, if there is any.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

/// Parses every statement in a script. Stops at an exit command; a final
/// statement without `;` is still parsed.
pub fn parse_script(script: &str) -> Vec<(String, Result<SelectQuery>)> {
    let mut buffer = StatementBuffer::new();
    let mut results = Vec::new();

    for line in script.lines() {
        match buffer.push_line(line) {
            LineOutcome::Exit => {
                debug!("exit command in script, stopping");
                return results;
            }
            LineOutcome::Incomplete => {}
            LineOutcome::Complete(statement) => {
                let parsed = crate::parse(&statement);
                results.push((statement, parsed));
            }
        }
    }

    if let Some(statement) = buffer.finish() {
        let parsed = crate::parse(&statement);
        results.push((statement, parsed));
    }
    results
}

pub fn parse_script_file(path: &Path) -> io::Result<Vec<(String, Result<SelectQuery>)>> {
    let script = fs::read_to_string(path)?;
    Ok(parse_script(&script))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("0"));
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  EXIT "));
        assert!(!is_exit_command("exit;"));
        assert!(!is_exit_command("00"));
    }

    #[test]
    fn test_buffer_joins_lines_until_terminator() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("SELECT *"), LineOutcome::Incomplete);
        assert_eq!(buffer.push_line("FROM book"), LineOutcome::Incomplete);
        assert_eq!(
            buffer.push_line("WHERE id = 1;"),
            LineOutcome::Complete("SELECT * FROM book WHERE id = 1;".to_string())
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_exit_drops_buffer() {
        let mut buffer = StatementBuffer::new();
        buffer.push_line("SELECT *");
        assert_eq!(buffer.push_line("exit"), LineOutcome::Exit);
        assert!(buffer.is_empty());
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_finish_returns_leftover() {
        let mut buffer = StatementBuffer::new();
        buffer.push_line("SELECT a");
        buffer.push_line("FROM t");
        assert_eq!(buffer.finish(), Some("SELECT a FROM t".to_string()));
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_parse_script() {
        let script =
            "SELECT a\nFROM t;\nSELECT b FROM u; SELECT c;\nSELECT * FROM v\nexit\nSELECT z;";
        let results = parse_script(script);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "SELECT a FROM t;");
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
    }

    #[test]
    fn test_parse_script_unterminated_tail() {
        let results = parse_script("SELECT a FROM t;\nSELECT *\n  FROM v\n");
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].0, "SELECT *   FROM v");
        assert!(results[1].1.is_ok());
    }
}
