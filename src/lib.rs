//! selectast: SQL SELECT statements as a strongly-typed syntax tree.
//!
//! The statement is validated, split into tokens that keep parenthesized
//! groups whole, segmented at clause keywords, and each clause body is
//! parsed into AST nodes:
//! - columns and FROM sources with optional aliases
//! - INNER/LEFT/RIGHT/FULL joins with their ON predicates
//! - WHERE and HAVING predicates split at top-level AND/OR
//! - GROUP BY, ORDER BY, LIMIT and OFFSET
//!
//! ```
//! let query = selectast::parse("SELECT a.name, count(*) FROM author a GROUP BY a.name;").unwrap();
//! assert_eq!(query.columns.len(), 2);
//! assert_eq!(query.group_by_columns, Some(vec!["a.name".to_string()]));
//! assert!(query.where_clauses.is_none());
//! ```

pub mod error;
pub mod repl;
pub mod sql;

pub use crate::error::{ParseError, Result};
pub use crate::sql::ast::{Clause, Column, Join, JoinType, SelectQuery, Sort, Source};
pub use crate::sql::grammar::Keyword;

/// Parse one SELECT statement, with or without a trailing `;`.
pub fn parse(sql: &str) -> Result<SelectQuery> {
    sql::parser::parse_sql(sql)
}
