//! Fixed SELECT grammar: clause keywords and the compiled patterns shared by
//! every parse.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::sql::ast::JoinType;

/// A keyword that opens a clause of a SELECT statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Inner,
    Left,
    Right,
    Full,
    Where,
    Group,
    Having,
    Order,
    Limit,
    Offset,
}

impl Keyword {
    pub const ALL: [Keyword; 12] = [
        Keyword::Select,
        Keyword::From,
        Keyword::Inner,
        Keyword::Left,
        Keyword::Right,
        Keyword::Full,
        Keyword::Where,
        Keyword::Group,
        Keyword::Having,
        Keyword::Order,
        Keyword::Limit,
        Keyword::Offset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Inner => "INNER",
            Keyword::Left => "LEFT",
            Keyword::Right => "RIGHT",
            Keyword::Full => "FULL",
            Keyword::Where => "WHERE",
            Keyword::Group => "GROUP",
            Keyword::Having => "HAVING",
            Keyword::Order => "ORDER",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
        }
    }

    /// Matches a whole token against the keyword list, ignoring case.
    pub fn from_token(token: &str) -> Option<Keyword> {
        Keyword::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(token))
    }

    /// The join produced by this keyword, if it introduces one.
    pub fn join_type(self) -> Option<JoinType> {
        match self {
            Keyword::Inner => Some(JoinType::Inner),
            Keyword::Left => Some(JoinType::Left),
            Keyword::Right => Some(JoinType::Right),
            Keyword::Full => Some(JoinType::Full),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled patterns. Built once, never mutated.
pub struct Grammar {
    /// Whole statement: no `;` except an optional trailing one.
    pub statement: Regex,
    /// Leading run of a column object: `*`, `a.*`, `public.author.id`.
    pub column_run: Regex,
    /// Leading run of a source object: `book`, `public.book`.
    pub source_run: Regex,
    /// A run that may directly precede a call group, `count` in `count(*)`.
    pub function_name: Regex,
    /// Everything after an object: optional `AS`, optional alias.
    pub alias_tail: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid grammar pattern {pattern:?}: {e}"))
}

pub static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| Grammar {
    statement: compile(r"^[^;]*;?\s*$"),
    column_run: compile(r"^[\w.*]+"),
    source_run: compile(r"^[\w.]+"),
    function_name: compile(r"^[\w.]*$"),
    alias_tail: compile(r#"(?i)^(?:\s+AS\b)?(?:\s+("[^"]+"|\w+))?\s*$"#),
});
