// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Go-template-style expressions used inside manifest strings.
//!
//! Supported syntax:
//!
//! - Field access: `{{.Name}}`, `{{.Org.Value}}`, `{{$v.Field}}`
//! - Pipelines: `{{trimPrefix .Org.Value "~" | toUpper}}`
//! - Conditionals: `{{if hasPrefix $v "3.6"}}...{{else if ...}}...{{else}}...{{end}}`
//! - Iteration: `{{range $i, $v := .Python.TestVersions}}...{{end}}`
//! - Scoping: `{{with .Params.Target}}...{{end}}`
//! - Variables: `{{$x := index .Args 0}}`, trim markers `{{- ... -}}`,
//!   comments `{{/* ... */}}`
//!
//! Rendering is strict: a field that does not exist in the context fails
//! with [`TemplateError::UndefinedVariable`].

mod eval;
mod funcs;
mod lexer;
mod parser;
mod value;

pub use value::{Context, ContextValue};

use parser::{Node, Operand, Pipeline};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use thiserror::Error;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").expect("constant regex pattern is valid"));

/// Errors that can occur during template parsing or rendering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// Template syntax error
    #[error("template syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A referenced context field or variable is absent
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// Type mismatch or function failure during rendering
    #[error("render error: {0}")]
    Render(String),
}

/// A parsed template, ready to render many times.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            nodes: parser::parse(source)?,
        })
    }

    /// Render against a context.
    pub fn render(&self, context: &Context) -> Result<String, TemplateError> {
        let root = context.to_value();
        eval::Evaluator::new(&root).run(&self.nodes)
    }

    /// True when the template contains no actions.
    pub fn is_literal(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n, Node::Text(_)))
    }

    /// Top-level context fields this template reads from the root.
    ///
    /// Fields read through a rebound dot (inside `range` or `with`) are not
    /// included, since they address the element rather than the root.
    pub fn field_roots(&self) -> BTreeSet<String> {
        let mut roots = BTreeSet::new();
        collect_nodes(&self.nodes, true, &mut roots);
        roots
    }
}

fn collect_nodes(nodes: &[Node], dot_is_root: bool, roots: &mut BTreeSet<String>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Action(pipe) => collect_pipeline(pipe, dot_is_root, roots),
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                collect_pipeline(cond, dot_is_root, roots);
                collect_nodes(then, dot_is_root, roots);
                collect_nodes(otherwise, dot_is_root, roots);
            }
            Node::Range {
                pipe,
                body,
                otherwise,
            }
            | Node::With {
                pipe,
                body,
                otherwise,
            } => {
                collect_pipeline(pipe, dot_is_root, roots);
                collect_nodes(body, false, roots);
                collect_nodes(otherwise, dot_is_root, roots);
            }
        }
    }
}

fn collect_pipeline(pipe: &Pipeline, dot_is_root: bool, roots: &mut BTreeSet<String>) {
    for command in &pipe.commands {
        for operand in &command.args {
            match operand {
                Operand::Field(fields) if dot_is_root => {
                    if let Some(first) = fields.first() {
                        roots.insert(first.clone());
                    }
                }
                Operand::Variable { name, fields } if name == "$" => {
                    if let Some(first) = fields.first() {
                        roots.insert(first.clone());
                    }
                }
                Operand::Sub(inner) => collect_pipeline(inner, dot_is_root, roots),
                _ => {}
            }
        }
    }
}

/// Parse and render a template string in one step.
///
/// # Example
///
/// ```
/// use newt_core::template::{resolve_template, Context};
///
/// let context = Context::new()
///     .with_string("Name", "mezzfs")
///     .with_string("PackageRoot", "/pkg");
/// let path = resolve_template("{{.PackageRoot}}/apps/{{.Name}}", &context).unwrap();
/// assert_eq!(path, "/pkg/apps/mezzfs");
/// ```
pub fn resolve_template(text: &str, context: &Context) -> Result<String, TemplateError> {
    Template::parse(text)?.render(context)
}

/// Whether a string still contains `{{...}}` placeholders.
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER_PATTERN.is_match(text)
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
