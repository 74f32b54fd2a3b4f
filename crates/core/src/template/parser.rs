// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template parsing (segments and tokens to a node tree).
//!
//! Variables and function names are checked here, so a template that
//! parses cleanly can only fail at render time on data: missing keys,
//! type mismatches, or function errors.

use super::funcs;
use super::lexer::{split, tokenize, Segment, Token};
use super::TemplateError;

/// A parsed template node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Action(Pipeline),
    If {
        cond: Pipeline,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Range {
        pipe: Pipeline,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
    With {
        pipe: Pipeline,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// A pipeline: optional variable declaration plus `|`-separated commands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pipeline {
    /// Declared (or assigned) variable names, e.g. `$i, $v :=`
    pub vars: Vec<String>,
    /// `=` rather than `:=`
    pub assign: bool,
    pub commands: Vec<Command>,
}

impl Pipeline {
    pub fn is_declaration(&self) -> bool {
        !self.vars.is_empty()
    }
}

/// One command in a pipeline: a function call or a single operand.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Command {
    pub args: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Dot,
    Field(Vec<String>),
    Variable { name: String, fields: Vec<String> },
    Func(String),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    Sub(Box<Pipeline>),
}

/// How a nested list ended.
enum Terminator {
    End,
    Else,
    ElseIf(Pipeline),
    Eof,
}

struct Parser {
    segments: Vec<Segment>,
    pos: usize,
    /// Declared variables; scopes are restored by truncation.
    vars: Vec<String>,
    /// Offset of the current action, for error messages.
    offset: usize,
}

/// Parse template source into nodes.
pub(crate) fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
    let mut parser = Parser {
        segments: split(source)?,
        pos: 0,
        vars: vec!["$".to_string()],
        offset: 0,
    };
    let (nodes, terminator) = parser.parse_list()?;
    match terminator {
        Terminator::Eof => Ok(nodes),
        Terminator::End => Err(parser.error("unexpected {{end}}")),
        Terminator::Else | Terminator::ElseIf(_) => Err(parser.error("unexpected {{else}}")),
    }
}

impl Parser {
    fn error(&self, message: impl Into<String>) -> TemplateError {
        TemplateError::Syntax {
            offset: self.offset,
            message: message.into(),
        }
    }

    fn parse_list(&mut self) -> Result<(Vec<Node>, Terminator), TemplateError> {
        let mut nodes = Vec::new();
        while self.pos < self.segments.len() {
            let segment = self.segments[self.pos].clone();
            self.pos += 1;
            let (body, offset) = match segment {
                Segment::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Segment::Action { body, offset } => (body, offset),
            };
            self.offset = offset;
            let tokens = tokenize(&body, offset)?;
            match tokens.first() {
                None => return Err(self.error("missing value for command")),
                Some(Token::End) => {
                    self.expect_bare(&tokens, "end")?;
                    return Ok((nodes, Terminator::End));
                }
                Some(Token::Else) => {
                    return match tokens.get(1) {
                        None => Ok((nodes, Terminator::Else)),
                        Some(Token::If) => {
                            let cond = self.parse_pipeline(&tokens[2..], true)?;
                            Ok((nodes, Terminator::ElseIf(cond)))
                        }
                        Some(_) => Err(self.error("unexpected token after else")),
                    };
                }
                Some(Token::If) => {
                    let mark = self.vars.len();
                    let cond = self.parse_pipeline(&tokens[1..], true)?;
                    let node = self.parse_if(cond)?;
                    self.vars.truncate(mark);
                    nodes.push(node);
                }
                Some(Token::Range) => {
                    let mark = self.vars.len();
                    let pipe = self.parse_pipeline(&tokens[1..], true)?;
                    if pipe.assign || pipe.vars.len() > 2 {
                        return Err(self.error("range can only declare one or two variables"));
                    }
                    let (body, otherwise) = self.parse_block("range")?;
                    self.vars.truncate(mark);
                    nodes.push(Node::Range {
                        pipe,
                        body,
                        otherwise,
                    });
                }
                Some(Token::With) => {
                    let mark = self.vars.len();
                    let pipe = self.parse_pipeline(&tokens[1..], true)?;
                    let (body, otherwise) = self.parse_block("with")?;
                    self.vars.truncate(mark);
                    nodes.push(Node::With {
                        pipe,
                        body,
                        otherwise,
                    });
                }
                Some(_) => {
                    let pipe = self.parse_pipeline(&tokens, true)?;
                    nodes.push(Node::Action(pipe));
                }
            }
        }
        Ok((nodes, Terminator::Eof))
    }

    fn expect_bare(&self, tokens: &[Token], keyword: &str) -> Result<(), TemplateError> {
        if tokens.len() > 1 {
            return Err(self.error(format!("unexpected token after {}", keyword)));
        }
        Ok(())
    }

    /// Parse the body of `if` including any `else if` chain; consumes the `end`.
    fn parse_if(&mut self, cond: Pipeline) -> Result<Node, TemplateError> {
        let (then, terminator) = self.parse_list()?;
        let otherwise = match terminator {
            Terminator::End => Vec::new(),
            Terminator::Else => {
                let (otherwise, terminator) = self.parse_list()?;
                self.require_end(terminator, "if")?;
                otherwise
            }
            Terminator::ElseIf(next) => {
                let mark = self.vars.len();
                let node = self.parse_if(next)?;
                self.vars.truncate(mark);
                vec![node]
            }
            Terminator::Eof => return Err(self.error("unexpected EOF in if")),
        };
        Ok(Node::If {
            cond,
            then,
            otherwise,
        })
    }

    /// Parse the body and optional else branch of `range`/`with`.
    fn parse_block(&mut self, keyword: &str) -> Result<(Vec<Node>, Vec<Node>), TemplateError> {
        let (body, terminator) = self.parse_list()?;
        match terminator {
            Terminator::End => Ok((body, Vec::new())),
            Terminator::Else => {
                let (otherwise, terminator) = self.parse_list()?;
                self.require_end(terminator, keyword)?;
                Ok((body, otherwise))
            }
            Terminator::ElseIf(_) => Err(self.error(format!("else if inside {}", keyword))),
            Terminator::Eof => Err(self.error(format!("unexpected EOF in {}", keyword))),
        }
    }

    fn require_end(&self, terminator: Terminator, keyword: &str) -> Result<(), TemplateError> {
        match terminator {
            Terminator::End => Ok(()),
            Terminator::Eof => Err(self.error(format!("unexpected EOF in {}", keyword))),
            _ => Err(self.error(format!("unexpected {{{{else}}}} in {}", keyword))),
        }
    }

    fn parse_pipeline(
        &mut self,
        tokens: &[Token],
        allow_decl: bool,
    ) -> Result<Pipeline, TemplateError> {
        let (vars, assign, rest) = if allow_decl {
            split_declaration(tokens)
        } else {
            (Vec::new(), false, tokens)
        };
        if assign {
            for var in &vars {
                if !self.vars.contains(var) {
                    return Err(self.error(format!("undefined variable \"{}\"", var)));
                }
            }
        }

        let mut commands = Vec::new();
        for chunk in split_pipes(rest) {
            commands.push(self.parse_command(chunk)?);
        }
        if commands.is_empty() {
            return Err(self.error("missing value for command"));
        }
        for (i, command) in commands.iter().enumerate() {
            if i > 0 && !matches!(command.args.first(), Some(Operand::Func(_))) {
                return Err(self.error("non executable command in pipeline stage"));
            }
        }

        // Declared names become visible after the pipeline itself.
        if !assign {
            self.vars.extend(vars.iter().cloned());
        }
        Ok(Pipeline {
            vars,
            assign,
            commands,
        })
    }

    fn parse_command(&mut self, tokens: &[Token]) -> Result<Command, TemplateError> {
        let mut args = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let operand = match &tokens[i] {
                Token::Dot => Operand::Dot,
                Token::Field(fields) => Operand::Field(fields.clone()),
                Token::Variable { name, fields } => {
                    if !self.vars.contains(name) {
                        return Err(self.error(format!("undefined variable \"{}\"", name)));
                    }
                    Operand::Variable {
                        name: name.clone(),
                        fields: fields.clone(),
                    }
                }
                Token::Ident(name) => {
                    if funcs::lookup(name).is_none() {
                        return Err(self.error(format!("function \"{}\" not defined", name)));
                    }
                    Operand::Func(name.clone())
                }
                Token::Str(s) => Operand::Str(s.clone()),
                Token::Int(n) => Operand::Int(*n),
                Token::Float(f) => Operand::Float(*f),
                Token::Bool(b) => Operand::Bool(*b),
                Token::Nil => Operand::Nil,
                Token::LParen => {
                    let close = matching_paren(tokens, i)
                        .ok_or_else(|| self.error("unclosed left paren"))?;
                    let inner = self.parse_pipeline(&tokens[i + 1..close], false)?;
                    i = close;
                    Operand::Sub(Box::new(inner))
                }
                Token::RParen => return Err(self.error("unexpected right paren")),
                other => return Err(self.error(format!("unexpected {:?} in command", other))),
            };
            args.push(operand);
            i += 1;
        }
        if args.is_empty() {
            return Err(self.error("missing value for command"));
        }
        if args.len() > 1 && !matches!(args[0], Operand::Func(_)) {
            return Err(self.error("can't give argument to non-function"));
        }
        Ok(Command { args })
    }
}

/// Split `$a, $b := rest` / `$a = rest` off the front of a token list.
fn split_declaration(tokens: &[Token]) -> (Vec<String>, bool, &[Token]) {
    let mut vars = Vec::new();
    let mut i = 0;
    loop {
        match tokens.get(i) {
            Some(Token::Variable { name, fields }) if fields.is_empty() && name != "$" => {
                vars.push(name.clone());
                i += 1;
            }
            _ => return (Vec::new(), false, tokens),
        }
        match tokens.get(i) {
            Some(Token::Comma) => i += 1,
            Some(Token::Declare) => return (vars, false, &tokens[i + 1..]),
            Some(Token::Assign) if vars.len() == 1 => return (vars, true, &tokens[i + 1..]),
            _ => return (Vec::new(), false, tokens),
        }
    }
}

/// Split tokens on top-level `|`.
fn split_pipes(tokens: &[Token]) -> Vec<&[Token]> {
    let mut chunks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Pipe if depth == 0 => {
                chunks.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() || !chunks.is_empty() {
        chunks.push(&tokens[start..]);
    }
    chunks
}

fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
