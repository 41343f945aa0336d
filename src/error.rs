use thiserror::Error;

use crate::sql::grammar::Keyword;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("The query is empty.")]
    EmptyInput,

    #[error("The query syntax is incorrect: only a single statement with an optional trailing ';' is allowed.")]
    MalformedTermination,

    #[error("Unbalanced parentheses near: {0}")]
    UnbalancedParentheses(String),

    #[error("Unterminated quote near: {0}")]
    UnterminatedQuote(String),

    #[error("Only SELECT statements are supported, found: {0}")]
    UnsupportedStatement(String),

    #[error("Error in {0} clause: expression is empty")]
    EmptyClauseBody(Keyword),

    #[error("Error in SELECT clause: no columns selected")]
    MissingSelectList,

    #[error("Error in SELECT clause: {0}")]
    MalformedColumn(String),

    #[error("Error in FROM clause: {0}")]
    MalformedSource(String),

    #[error("Error in JOIN clause: {join_type} {text}")]
    MalformedJoin { join_type: Keyword, text: String },

    #[error("Error in {clause} clause: empty condition in {text}")]
    MalformedPredicate { clause: Keyword, text: String },

    #[error("Error in {clause} clause: empty item in {text}")]
    EmptyListItem { clause: Keyword, text: String },

    #[error("Error in {clause} clause: {text} is not a valid integer")]
    InvalidNumericLiteral { clause: Keyword, text: String },
}

pub type Result<T> = std::result::Result<T, ParseError>;
