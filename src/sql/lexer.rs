/// Statement validation and keyword tokenizer using nom.
///
/// Tokens are raw slices of the statement: a run of ordinary characters,
/// directly followed by any number of parenthesized groups and an optional
/// trailing comma. Whitespace and commas inside a group stay in the token.
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::tuple,
    IResult,
};

use crate::error::{ParseError, Result};
use crate::sql::grammar::GRAMMAR;
use crate::sql::scan::{balanced_group, Unclosed};

/// Rejects empty input and anything but a single statement with an
/// optional trailing `;`.
pub fn validate(input: &str) -> Result<()> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if !GRAMMAR.statement.is_match(input) {
        return Err(ParseError::MalformedTermination);
    }
    Ok(())
}

/// Tokenize a statement lazily.
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens {
        remaining: input,
        failed: false,
    }
}

/// Lazy token stream over a statement. Stops after the first error.
pub struct Tokens<'a> {
    remaining: &'a str,
    failed: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let rest = skip_separators(self.remaining);
        if rest.is_empty() {
            self.remaining = rest;
            return None;
        }

        match lex_token(rest) {
            Ok((after, token)) if !token.is_empty() => {
                self.remaining = after;
                Some(Ok(token))
            }
            // An empty match means a `)` with nothing open.
            Ok(_) | Err(nom::Err::Incomplete(_)) => {
                self.failed = true;
                Some(Err(ParseError::UnbalancedParentheses(snippet(rest))))
            }
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                self.failed = true;
                Some(Err(lex_error(e.input)))
            }
        }
    }
}

/// Names the failure at `at`, where a quote or a group could not be closed.
fn lex_error(at: &str) -> ParseError {
    let open_quote = at.starts_with(is_quote) || balanced_group(at) == Err(Unclosed::Quote);
    if open_quote {
        ParseError::UnterminatedQuote(snippet(at))
    } else {
        ParseError::UnbalancedParentheses(snippet(at))
    }
}

fn snippet(input: &str) -> String {
    input.chars().take(20).collect()
}

fn skip_separators(input: &str) -> &str {
    let parsed: IResult<&str, &str> = take_while(|c: char| c.is_whitespace() || c == ';')(input);
    match parsed {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

fn lex_token(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        many0(lex_word_piece),
        many0(lex_group),
        opt(char(',')),
    )))(input)
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"' | '`')
}

fn is_plain_char(c: char) -> bool {
    !c.is_whitespace() && !is_quote(c) && !matches!(c, ',' | '(' | ')' | ';')
}

fn lex_word_piece(input: &str) -> IResult<&str, &str> {
    alt((take_while1(is_plain_char), lex_quoted))(input)
}

/// A quoted run. A missing closing quote is a failure, not a run to the end.
fn lex_quoted(input: &str) -> IResult<&str, &str> {
    let quote = match input.chars().next() {
        Some(q) if is_quote(q) => q,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };
    let body = &input[quote.len_utf8()..];
    match body.find(quote) {
        Some(i) => {
            let end = quote.len_utf8() + i + quote.len_utf8();
            Ok((&input[end..], &input[..end]))
        }
        None => Err(nom::Err::Failure(Error::new(input, ErrorKind::Char))),
    }
}

fn lex_group(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('(') {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
    }
    match balanced_group(input) {
        Ok(len) => Ok((&input[len..], &input[..len])),
        Err(_) => Err(nom::Err::Failure(Error::new(input, ErrorKind::Char))),
    }
}
