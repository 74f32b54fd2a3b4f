// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template scanning.
//!
//! Scanning happens in two stages: [`split`] cuts the source into literal
//! text and `{{ ... }}` actions (applying trim markers and dropping
//! comments), then [`tokenize`] turns each action body into tokens.

use super::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of template source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Text(String),
    /// Action body without delimiters or trim markers; `offset` is the
    /// byte position of the opening delimiter.
    Action { body: String, offset: usize },
}

/// A token inside an action.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// The cursor `.`
    Dot,
    /// A field chain such as `.Python.TestVersions`
    Field(Vec<String>),
    /// A variable such as `$v` or `$v.Name`; the bare root is `$`
    Variable { name: String, fields: Vec<String> },
    /// A function name
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    If,
    Else,
    End,
    Range,
    With,
    Pipe,
    LParen,
    RParen,
    Comma,
    Declare,
    Assign,
}

fn syntax(offset: usize, message: impl Into<String>) -> TemplateError {
    TemplateError::Syntax {
        offset,
        message: message.into(),
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split template source into text and action segments.
pub(crate) fn split(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut pos = 0;
    let mut trim_next = false;

    while let Some(rel) = source[pos..].find(OPEN) {
        let start = pos + rel;
        let mut text = &source[pos..start];
        if trim_next {
            text = text.trim_start_matches(is_space);
        }

        let mut body_start = start + OPEN.len();
        let rest = &source[body_start..];
        if rest.starts_with('-') && rest[1..].starts_with(is_space) {
            text = text.trim_end_matches(is_space);
            body_start += 1;
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text.to_string()));
        }

        let close = find_close(source, body_start)
            .ok_or_else(|| syntax(start, "unclosed action"))?;
        let mut body = &source[body_start..close];
        trim_next = false;
        if body.ends_with('-') && body[..body.len() - 1].ends_with(is_space) {
            body = &body[..body.len() - 1];
            trim_next = true;
        }

        let trimmed = body.trim_matches(is_space);
        if trimmed.starts_with("/*") {
            if !trimmed.ends_with("*/") || trimmed.len() < 4 {
                return Err(syntax(start, "unclosed comment"));
            }
        } else {
            segments.push(Segment::Action {
                body: body.to_string(),
                offset: start,
            });
        }
        pos = close + CLOSE.len();
    }

    let mut tail = &source[pos..];
    if trim_next {
        tail = tail.trim_start_matches(is_space);
    }
    if !tail.is_empty() {
        segments.push(Segment::Text(tail.to_string()));
    }
    Ok(segments)
}

/// Find the closing delimiter of an action, skipping quoted strings and comments.
fn find_close(source: &str, from: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'`' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'`' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = source[i + 2..].find("*/")?;
                i += end + 3;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize an action body.
pub(crate) fn tokenize(body: &str, offset: usize) -> Result<Vec<Token>, TemplateError> {
    let chars: Vec<char> = body.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if is_space(c) => i += 1,
            '|' => {
                tokens.push(Token::Pipe);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            ':' if chars.get(i + 1) == Some(&'=') => {
                tokens.push(Token::Declare);
                i += 2;
            }
            '=' => {
                tokens.push(Token::Assign);
                i += 1;
            }
            '.' if chars.get(i + 1).copied().is_some_and(is_ident_start) => {
                let (fields, next) = read_fields(&chars, i);
                tokens.push(Token::Field(fields));
                i = next;
            }
            '.' if chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()) => {
                let (token, next) = read_number(&chars, i, offset)?;
                tokens.push(token);
                i = next;
            }
            '.' => {
                tokens.push(Token::Dot);
                i += 1;
            }
            '$' => {
                let mut j = i + 1;
                while j < chars.len() && is_ident_char(chars[j]) {
                    j += 1;
                }
                let name: String = chars[i..j].iter().collect();
                let (fields, next) = read_fields(&chars, j);
                tokens.push(Token::Variable { name, fields });
                i = next;
            }
            '"' => {
                let (value, next) = read_quoted(&chars, i, offset)?;
                tokens.push(Token::Str(value));
                i = next;
            }
            '`' => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&c| c == '`')
                    .ok_or_else(|| syntax(offset, "unterminated raw string"))?;
                tokens.push(Token::Str(chars[i + 1..i + 1 + end].iter().collect()));
                i += end + 2;
            }
            '-' | '+' if chars.get(i + 1).is_some_and(|c| c.is_ascii_digit() || *c == '.') => {
                let (token, next) = read_number(&chars, i, offset)?;
                tokens.push(token);
                i = next;
            }
            c if c.is_ascii_digit() => {
                let (token, next) = read_number(&chars, i, offset)?;
                tokens.push(token);
                i = next;
            }
            c if is_ident_start(c) => {
                let mut j = i;
                while j < chars.len() && is_ident_char(chars[j]) {
                    j += 1;
                }
                let word: String = chars[i..j].iter().collect();
                tokens.push(match word.as_str() {
                    "if" => Token::If,
                    "else" => Token::Else,
                    "end" => Token::End,
                    "range" => Token::Range,
                    "with" => Token::With,
                    "true" => Token::Bool(true),
                    "false" => Token::Bool(false),
                    "nil" => Token::Nil,
                    _ => Token::Ident(word),
                });
                i = j;
            }
            other => {
                return Err(syntax(
                    offset,
                    format!("unexpected character {:?} in action", other),
                ))
            }
        }
    }

    Ok(tokens)
}

/// Read a contiguous `.A.B.C` chain starting at `i` (which may not be a dot).
fn read_fields(chars: &[char], mut i: usize) -> (Vec<String>, usize) {
    let mut fields = Vec::new();
    while i < chars.len()
        && chars[i] == '.'
        && chars.get(i + 1).copied().is_some_and(is_ident_start)
    {
        let mut j = i + 1;
        while j < chars.len() && is_ident_char(chars[j]) {
            j += 1;
        }
        fields.push(chars[i + 1..j].iter().collect());
        i = j;
    }
    (fields, i)
}

fn read_number(chars: &[char], start: usize, offset: usize) -> Result<(Token, usize), TemplateError> {
    let mut j = start;
    if matches!(chars[j], '-' | '+') {
        j += 1;
    }
    while j < chars.len() && (chars[j].is_ascii_alphanumeric() || chars[j] == '.' || chars[j] == '_')
    {
        // exponent sign, as in 1e-3
        if matches!(chars[j], 'e' | 'E') && matches!(chars.get(j + 1), Some('-') | Some('+')) {
            j += 1;
        }
        j += 1;
    }
    let text: String = chars[start..j].iter().filter(|&&c| c != '_').collect();
    if let Ok(n) = text.parse::<i64>() {
        return Ok((Token::Int(n), j));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Ok((Token::Float(f), j));
    }
    Err(syntax(offset, format!("bad number syntax: {:?}", text)))
}

fn read_quoted(chars: &[char], start: usize, offset: usize) -> Result<(String, usize), TemplateError> {
    let mut value = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '"' => return Ok((value, i + 1)),
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or_else(|| syntax(offset, "unterminated quoted string"))?;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => *other,
                });
                i += 2;
            }
            c => {
                value.push(c);
                i += 1;
            }
        }
    }
    Err(syntax(offset, "unterminated quoted string"))
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
