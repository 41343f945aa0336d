/// SQL parser: segments the token stream at clause keywords and hands each
/// clause body to its clause parser.
use tracing::{debug, warn};

use crate::error::{ParseError, Result};
use crate::sql::ast::{SelectQuery, SelectQueryBuilder};
use crate::sql::grammar::Keyword;
use crate::sql::lexer::{tokenize, validate};

pub mod clauses;

use clauses::*;

/// Clause segmenter.
///
/// The state is the keyword of the clause being read. A keyword token
/// dispatches the buffered body to that clause's parser and moves to the
/// new clause; [`Segmenter::finish`] dispatches the last one.
pub struct Segmenter {
    state: Keyword,
    expression: String,
    seen: Vec<Keyword>,
    query: SelectQueryBuilder,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// A segmenter positioned just after the leading `SELECT`.
    pub fn new() -> Self {
        Segmenter {
            state: Keyword::Select,
            expression: String::new(),
            seen: vec![Keyword::Select],
            query: SelectQueryBuilder::new(),
        }
    }

    pub fn feed(&mut self, token: &str) -> Result<()> {
        match Keyword::from_token(token) {
            Some(keyword) => {
                self.dispatch()?;
                self.transition(keyword);
            }
            None => {
                if !self.expression.is_empty() {
                    self.expression.push(' ');
                }
                self.expression.push_str(token);
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<SelectQuery> {
        self.dispatch()?;
        self.query.build().ok_or(ParseError::MissingSelectList)
    }

    fn transition(&mut self, keyword: Keyword) {
        if keyword.join_type().is_none() {
            if self.seen.contains(&keyword) {
                warn!(clause = %keyword, "clause repeated, keeping the last one");
            } else {
                self.seen.push(keyword);
            }
        }
        self.state = keyword;
        self.expression.clear();
    }

    fn dispatch(&mut self) -> Result<()> {
        let expression = self.expression.as_str();
        if expression.is_empty() {
            return Err(ParseError::EmptyClauseBody(self.state));
        }
        debug!(clause = %self.state, expression, "dispatching clause");

        match self.state {
            Keyword::Select => self.query.columns(parse_columns(expression)?),
            Keyword::From => self.query.from_sources(parse_sources(expression)?),
            Keyword::Inner | Keyword::Left | Keyword::Right | Keyword::Full => {
                self.query.push_join(parse_join(expression, self.state)?)
            }
            Keyword::Where => {
                if let Some(clauses) = parse_predicates(expression, Keyword::Where)? {
                    self.query.where_clauses(clauses);
                }
            }
            Keyword::Group => self.query.group_by_columns(parse_group_by(expression)?),
            Keyword::Having => {
                if let Some(clauses) = parse_predicates(expression, Keyword::Having)? {
                    self.query.having_clauses(clauses);
                }
            }
            Keyword::Order => self.query.sort_columns(parse_sort(expression)?),
            Keyword::Limit => self.query.limit(parse_limit(expression)?),
            Keyword::Offset => self.query.offset(parse_offset(expression)?),
        }
        Ok(())
    }
}

/// Parse a single SELECT statement.
pub fn parse_sql(sql: &str) -> Result<SelectQuery> {
    validate(sql)?;

    let mut tokens = tokenize(sql);
    let first = tokens.next().ok_or(ParseError::EmptyInput)??;
    if Keyword::from_token(first) != Some(Keyword::Select) {
        return Err(ParseError::UnsupportedStatement(first.to_string()));
    }

    let mut segmenter = Segmenter::new();
    let mut empty = true;
    for token in tokens {
        segmenter.feed(token?)?;
        empty = false;
    }
    if empty {
        return Err(ParseError::MissingSelectList);
    }
    segmenter.finish()
}
