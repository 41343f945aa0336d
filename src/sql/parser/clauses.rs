//! Clause parsers. Each takes the body of one clause, as collected by the
//! segmenter, and turns it into AST nodes.
use crate::error::{ParseError, Result};
use crate::sql::ast::{Clause, Column, Join, Source, Sort};
use crate::sql::grammar::{Keyword, GRAMMAR};
use crate::sql::scan::{
    balanced_group, find_top_level_words, has_unterminated_quote, split_top_level,
    strip_leading_word,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectKind {
    Column,
    Source,
}

/// Length of the object at the start of `item`.
fn object_len(item: &str, kind: ObjectKind) -> Option<usize> {
    match kind {
        ObjectKind::Column => {
            let run = GRAMMAR.column_run.find(item).map_or(0, |m| m.end());
            let rest = &item[run..];
            if rest.starts_with('(') && GRAMMAR.function_name.is_match(&item[..run]) {
                balanced_group(rest).ok().map(|len| run + len)
            } else if run > 0 {
                Some(run)
            } else {
                None
            }
        }
        ObjectKind::Source => {
            if item.starts_with('(') {
                balanced_group(item).ok()
            } else {
                GRAMMAR.source_run.find(item).map(|m| m.end())
            }
        }
    }
}

/// Splits `object [AS] [alias]`.
fn object_with_alias(item: &str, kind: ObjectKind) -> Option<(String, Option<String>)> {
    let item = item.trim();
    let len = object_len(item, kind)?;
    let (object, tail) = item.split_at(len);
    let caps = GRAMMAR.alias_tail.captures(tail)?;
    let alias = caps.get(1).map(|m| m.as_str().to_string());
    Some((object.to_string(), alias))
}

/// Select list: `author.name, count(book.id) c, sum(book.cost) AS s`.
pub fn parse_columns(expression: &str) -> Result<Vec<Column>> {
    let text = expression.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyClauseBody(Keyword::Select));
    }
    split_top_level(text, ',')
        .into_iter()
        .map(|item| {
            object_with_alias(item, ObjectKind::Column)
                .map(|(name, alias)| Column::new(name, alias))
                .ok_or_else(|| ParseError::MalformedColumn(text.to_string()))
        })
        .collect()
}

/// FROM list. Parenthesized sub-queries are kept as opaque text.
pub fn parse_sources(expression: &str) -> Result<Vec<Source>> {
    let text = expression.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyClauseBody(Keyword::From));
    }
    split_top_level(text, ',')
        .into_iter()
        .map(|item| parse_source(item).ok_or_else(|| ParseError::MalformedSource(text.to_string())))
        .collect()
}

/// A single `table [AS] [alias]` item.
pub fn parse_source(item: &str) -> Option<Source> {
    object_with_alias(item, ObjectKind::Source).map(|(table, alias)| Source::new(table, alias))
}

/// `JOIN <source> [AS] [alias] ON <predicates>`, the body following one of
/// INNER, LEFT, RIGHT or FULL.
pub fn parse_join(expression: &str, keyword: Keyword) -> Result<Join> {
    let text = expression.trim();
    let malformed = || ParseError::MalformedJoin {
        join_type: keyword,
        text: text.to_string(),
    };

    let join_type = keyword.join_type().ok_or_else(malformed)?;
    let rest = strip_leading_word(text, "JOIN")
        .ok_or_else(malformed)?
        .trim_start();

    let len = object_len(rest, ObjectKind::Source).ok_or_else(malformed)?;
    let (table, after) = rest.split_at(len);
    let (on, _) = find_top_level_words(after, &["ON"])
        .into_iter()
        .next()
        .ok_or_else(malformed)?;

    let alias = GRAMMAR
        .alias_tail
        .captures(&after[..on])
        .ok_or_else(malformed)?
        .get(1)
        .map(|m| m.as_str().to_string());

    let conditions = parse_predicates(&after[on + 2..], keyword)
        .map_err(|_| malformed())?
        .ok_or_else(malformed)?;

    Ok(Join {
        join_type,
        source: Source::new(table, alias),
        conditions,
    })
}

/// Splits a boolean predicate at top-level AND/OR. Empty input is `None`.
pub fn parse_predicates(expression: &str, clause: Keyword) -> Result<Option<Vec<Clause>>> {
    let text = expression.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if has_unterminated_quote(text) {
        return Err(ParseError::UnterminatedQuote(text.to_string()));
    }

    let mut clauses = Vec::new();
    let mut operator: Option<&str> = None;
    let mut start = 0;
    let connectives = find_top_level_words(text, &["AND", "OR"]);
    let ends = connectives
        .iter()
        .map(|&(pos, word)| (pos, Some(word)))
        .chain(std::iter::once((text.len(), None)));

    for (end, next_operator) in ends {
        let condition = text[start..end].trim();
        if condition.is_empty() {
            return Err(ParseError::MalformedPredicate {
                clause,
                text: text.to_string(),
            });
        }
        clauses.push(Clause::new(condition, operator.map(str::to_string)));
        if let Some(word) = next_operator {
            operator = Some(word);
            start = end + word.len();
        }
    }

    Ok(Some(clauses))
}

/// Drops a leading `BY` and fails on an empty remainder.
fn strip_by(expression: &str, clause: Keyword) -> Result<&str> {
    let text = expression.trim();
    let body = strip_leading_word(text, "BY").unwrap_or(text).trim();
    if body.is_empty() {
        return Err(ParseError::EmptyClauseBody(clause));
    }
    Ok(body)
}

fn list_items(body: &str, clause: Keyword) -> Result<Vec<&str>> {
    split_top_level(body, ',')
        .into_iter()
        .map(|item| {
            let item = item.trim();
            if item.is_empty() {
                Err(ParseError::EmptyListItem {
                    clause,
                    text: body.to_string(),
                })
            } else {
                Ok(item)
            }
        })
        .collect()
}

/// GROUP BY expressions, unvalidated.
pub fn parse_group_by(expression: &str) -> Result<Vec<String>> {
    let body = strip_by(expression, Keyword::Group)?;
    Ok(list_items(body, Keyword::Group)?
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// ORDER BY items with an optional trailing ASC/DESC.
pub fn parse_sort(expression: &str) -> Result<Vec<Sort>> {
    let body = strip_by(expression, Keyword::Order)?;
    list_items(body, Keyword::Order)?
        .into_iter()
        .map(|item| {
            sort_item(item).ok_or_else(|| ParseError::EmptyListItem {
                clause: Keyword::Order,
                text: body.to_string(),
            })
        })
        .collect()
}

fn is_direction(word: &str) -> bool {
    word.eq_ignore_ascii_case("ASC") || word.eq_ignore_ascii_case("DESC")
}

/// The direction is the last whitespace-separated word. A bare direction
/// has no expression and yields `None`.
fn sort_item(item: &str) -> Option<Sort> {
    if is_direction(item) {
        return None;
    }
    match item.rsplit_once(char::is_whitespace) {
        Some((head, dir)) if is_direction(dir) => {
            Some(Sort::new(head.trim_end(), dir.eq_ignore_ascii_case("DESC")))
        }
        _ => Some(Sort::new(item, false)),
    }
}

fn parse_integer(text: &str, clause: Keyword) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| ParseError::InvalidNumericLiteral {
            clause,
            text: text.to_string(),
        })
}

/// `LIMIT n`. Empty input and `ALL` mean no limit.
pub fn parse_limit(expression: &str) -> Result<Option<i64>> {
    let text = expression.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("ALL") {
        return Ok(None);
    }
    parse_integer(text, Keyword::Limit).map(Some)
}

/// `OFFSET n`. Empty input means no offset.
pub fn parse_offset(expression: &str) -> Result<Option<i64>> {
    let text = expression.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse_integer(text, Keyword::Offset).map(Some)
}
