//! Comment stripping and the token cursor.
//!
//! Comments open with 🐪 (U+1F42A) and close with 🏜 (U+1F3DC).  They nest,
//! and each outermost comment is replaced by a single space so that it
//! separates the tokens around it.  A closer with no open comment is kept
//! as text; an opener that is never closed leaves the rest of the input
//! untouched.

use std::str::FromStr;

use crate::{ScenarioError, ScenarioResult};

pub const COMMENT_OPEN: char = '\u{1F42A}';
pub const COMMENT_CLOSE: char = '\u{1F3DC}';

/// Remove every closed comment span from `text`.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Byte offsets in `out` where currently open comments begin.
    let mut open: Vec<usize> = Vec::new();

    for c in text.chars() {
        match c {
            COMMENT_OPEN => {
                open.push(out.len());
                out.push(c);
            }
            COMMENT_CLOSE if !open.is_empty() => {
                if let Some(begin) = open.pop() {
                    out.truncate(begin);
                    out.push(' ');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

// ── Tokens ────────────────────────────────────────────────────────────────────

/// Whitespace-separated tokens with a read cursor.
pub struct Tokens {
    tokens: Vec<String>,
    pos:    usize,
}

impl Tokens {
    /// Strip comments from `text` and split the rest on whitespace.
    pub fn new(text: &str) -> Self {
        let tokens = strip_comments(text)
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        Self { tokens, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    /// The next raw token; `expected` names it in the error.
    pub fn next_token(&mut self, expected: &str) -> ScenarioResult<&str> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| ScenarioError::UnexpectedEof { expected: expected.to_string() })?;
        self.pos += 1;
        Ok(token)
    }

    /// The next token parsed as `T`.
    pub fn parse<T: FromStr>(&mut self, field: &str) -> ScenarioResult<T> {
        let position = self.pos + 1;
        let token = self.next_token(field)?;
        token.parse::<T>().map_err(|_| ScenarioError::InvalidNumber {
            field:    field.to_string(),
            token:    token.to_string(),
            position,
        })
    }

    /// The next token as a finite `f64`; `-0` reads as `0`.
    pub fn real(&mut self, field: &str) -> ScenarioResult<f64> {
        let position = self.pos + 1;
        let value: f64 = self.parse(field)?;
        if value.is_finite() {
            Ok(value + 0.0)
        } else {
            Err(ScenarioError::InvalidNumber {
                field:    field.to_string(),
                token:    self.tokens[position - 1].clone(),
                position,
            })
        }
    }

    /// The next token as a 1-based index in `1..=max`, returned 0-based.
    pub fn index(&mut self, field: &str, max: usize) -> ScenarioResult<usize> {
        let index: usize = self.parse(field)?;
        if index == 0 || index > max {
            return Err(ScenarioError::IndexOutOfRange { field: field.to_string(), index, max });
        }
        Ok(index - 1)
    }
}
