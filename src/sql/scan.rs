//! Parenthesis- and quote-aware scanning over raw statement text.
//!
//! Nesting depth is tracked with an explicit counter, so groups may nest to
//! any depth. Quoted runs (`'...'`, `"..."`, `` `...` ``) are opaque.

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Nesting {
    depth: usize,
    quote: Option<char>,
}

impl Nesting {
    pub(crate) fn is_top_level(&self) -> bool {
        self.depth == 0 && self.quote.is_none()
    }

    pub(crate) fn step(&mut self, c: char) {
        match self.quote {
            Some(q) => {
                if c == q {
                    self.quote = None;
                }
            }
            None => match c {
                '\'' | '"' | '`' => self.quote = Some(c),
                '(' => self.depth += 1,
                ')' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            },
        }
    }

    pub(crate) fn in_quote(&self) -> bool {
        self.quote.is_some()
    }
}

/// Why [`balanced_group`] could not find the closing paren.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unclosed {
    /// A `(` is never closed, or the input does not open a group at all.
    Paren,
    /// A quote inside the group is never closed and swallows the rest.
    Quote,
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte length of the group opening at the start of `input`, closing paren
/// included.
pub(crate) fn balanced_group(input: &str) -> std::result::Result<usize, Unclosed> {
    if !input.starts_with('(') {
        return Err(Unclosed::Paren);
    }
    let mut nesting = Nesting::default();
    for (i, c) in input.char_indices() {
        nesting.step(c);
        if c == ')' && nesting.is_top_level() {
            return Ok(i + 1);
        }
    }
    if nesting.in_quote() {
        Err(Unclosed::Quote)
    } else {
        Err(Unclosed::Paren)
    }
}

/// True when a quote opened in `text` is still open at its end.
pub(crate) fn has_unterminated_quote(text: &str) -> bool {
    let mut nesting = Nesting::default();
    text.chars().for_each(|c| nesting.step(c));
    nesting.in_quote()
}

/// Splits on `sep` occurring outside parentheses and quotes.
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == sep && nesting.is_top_level() {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
            continue;
        }
        nesting.step(c);
    }
    parts.push(&text[start..]);
    parts
}

/// Finds whole-word, case-insensitive occurrences of `words` outside
/// parentheses and quotes. Returns the byte offset and the text as written.
pub(crate) fn find_top_level_words<'a>(text: &'a str, words: &[&str]) -> Vec<(usize, &'a str)> {
    let mut found = Vec::new();
    let mut nesting = Nesting::default();
    let mut prev: Option<char> = None;
    for (i, c) in text.char_indices() {
        if nesting.is_top_level() && !prev.is_some_and(is_word_char) {
            for word in words {
                let end = i + word.len();
                let Some(candidate) = text.get(i..end) else {
                    continue;
                };
                if candidate.eq_ignore_ascii_case(word)
                    && !text[end..].chars().next().is_some_and(is_word_char)
                {
                    found.push((i, candidate));
                    break;
                }
            }
        }
        nesting.step(c);
        prev = Some(c);
    }
    found
}

/// Strips `word` from the front of `text` when it stands as a whole word.
pub(crate) fn strip_leading_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let head = text.get(..word.len())?;
    let rest = &text[word.len()..];
    if head.eq_ignore_ascii_case(word) && !rest.chars().next().is_some_and(is_word_char) {
        Some(rest)
    } else {
        None
    }
}
