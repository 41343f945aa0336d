use std::io::Write;

use selectast::repl::{parse_script_file, LineOutcome, StatementBuffer};
use selectast::ParseError;
use tempfile::NamedTempFile;

#[test]
fn test_parse_script_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "SELECT *").unwrap();
    writeln!(file, "FROM book;").unwrap();
    writeln!(file, "UPDATE book SET cost = 1;").unwrap();
    writeln!(file, "select title from book order by title").unwrap();

    let results = parse_script_file(file.path()).unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].0, "SELECT * FROM book;");
    let query = results[0].1.as_ref().unwrap();
    assert_eq!(query.from_sources.as_ref().map(Vec::len), Some(1));

    assert_eq!(
        results[1].1,
        Err(ParseError::UnsupportedStatement("UPDATE".to_string()))
    );

    let query = results[2].1.as_ref().unwrap();
    assert_eq!(query.sort_columns.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_parse_script_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(parse_script_file(&dir.path().join("missing.sql")).is_err());
}

#[test]
fn test_exit_before_statement_is_parsed() {
    let mut buffer = StatementBuffer::new();
    assert_eq!(buffer.push_line("SELECT a"), LineOutcome::Incomplete);
    assert_eq!(buffer.push_line("Exit"), LineOutcome::Exit);
    assert_eq!(buffer.push_line("SELECT b;"), LineOutcome::Complete("SELECT b;".to_string()));
}
