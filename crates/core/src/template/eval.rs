// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template execution.

use super::funcs;
use super::parser::{Command, Node, Operand, Pipeline};
use super::value::ContextValue;
use super::TemplateError;

/// Executes a parsed node tree against a root value.
pub(crate) struct Evaluator<'a> {
    root: &'a ContextValue,
    /// Variable stack; scopes are restored by truncation.
    vars: Vec<(String, ContextValue)>,
    out: String,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a ContextValue) -> Self {
        Self {
            root,
            vars: vec![("$".to_string(), root.clone())],
            out: String::new(),
        }
    }

    pub fn run(mut self, nodes: &[Node]) -> Result<String, TemplateError> {
        let root = self.root;
        self.exec_list(nodes, root)?;
        Ok(self.out)
    }

    fn exec_list(&mut self, nodes: &[Node], dot: &ContextValue) -> Result<(), TemplateError> {
        for node in nodes {
            self.exec(node, dot)?;
        }
        Ok(())
    }

    fn exec(&mut self, node: &Node, dot: &ContextValue) -> Result<(), TemplateError> {
        match node {
            Node::Text(text) => self.out.push_str(text),
            Node::Action(pipe) => {
                let value = self.eval_pipeline(pipe, dot)?;
                if !pipe.is_declaration() {
                    self.out.push_str(&value.to_string());
                }
            }
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                let mark = self.vars.len();
                let value = self.eval_pipeline(cond, dot)?;
                if value.is_truthy() {
                    self.exec_list(then, dot)?;
                } else {
                    self.exec_list(otherwise, dot)?;
                }
                self.vars.truncate(mark);
            }
            Node::With {
                pipe,
                body,
                otherwise,
            } => {
                let mark = self.vars.len();
                let value = self.eval_pipeline(pipe, dot)?;
                if value.is_truthy() {
                    self.exec_list(body, &value)?;
                } else {
                    self.exec_list(otherwise, dot)?;
                }
                self.vars.truncate(mark);
            }
            Node::Range {
                pipe,
                body,
                otherwise,
            } => self.exec_range(pipe, body, otherwise, dot)?,
        }
        Ok(())
    }

    fn exec_range(
        &mut self,
        pipe: &Pipeline,
        body: &[Node],
        otherwise: &[Node],
        dot: &ContextValue,
    ) -> Result<(), TemplateError> {
        let value = self.eval_commands(&pipe.commands, dot)?;
        let items: Vec<(ContextValue, ContextValue)> = match value {
            ContextValue::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (ContextValue::Number(i as i64), item))
                .collect(),
            ContextValue::Object(map) => map
                .into_iter()
                .map(|(k, v)| (ContextValue::String(k), v))
                .collect(),
            ContextValue::Number(n) if n >= 0 => (0..n)
                .map(|i| (ContextValue::Number(i), ContextValue::Number(i)))
                .collect(),
            ContextValue::Null => Vec::new(),
            other => {
                return Err(TemplateError::Render(format!(
                    "range can't iterate over {}",
                    other.type_name()
                )))
            }
        };

        if items.is_empty() {
            return self.exec_list(otherwise, dot);
        }

        for (key, item) in items {
            let mark = self.vars.len();
            match pipe.vars.as_slice() {
                [value_var] => self.vars.push((value_var.clone(), item.clone())),
                [key_var, value_var] => {
                    self.vars.push((key_var.clone(), key));
                    self.vars.push((value_var.clone(), item.clone()));
                }
                _ => {}
            }
            let result = self.exec_list(body, &item);
            self.vars.truncate(mark);
            result?;
        }
        Ok(())
    }

    fn eval_pipeline(
        &mut self,
        pipe: &Pipeline,
        dot: &ContextValue,
    ) -> Result<ContextValue, TemplateError> {
        let value = self.eval_commands(&pipe.commands, dot)?;
        if pipe.assign {
            if let Some(name) = pipe.vars.first() {
                let slot = self
                    .vars
                    .iter_mut()
                    .rev()
                    .find(|(n, _)| n == name)
                    .ok_or_else(|| TemplateError::UndefinedVariable(name.clone()))?;
                slot.1 = value.clone();
            }
        } else {
            for name in &pipe.vars {
                self.vars.push((name.clone(), value.clone()));
            }
        }
        Ok(value)
    }

    fn eval_commands(
        &mut self,
        commands: &[Command],
        dot: &ContextValue,
    ) -> Result<ContextValue, TemplateError> {
        let mut piped = None;
        for command in commands {
            piped = Some(self.eval_command(command, dot, piped)?);
        }
        Ok(piped.unwrap_or(ContextValue::Null))
    }

    fn eval_command(
        &mut self,
        command: &Command,
        dot: &ContextValue,
        piped: Option<ContextValue>,
    ) -> Result<ContextValue, TemplateError> {
        let Some((first, rest)) = command.args.split_first() else {
            return Err(TemplateError::Render("empty command".to_string()));
        };
        match first {
            Operand::Func(name) => {
                let func = funcs::lookup(name)
                    .ok_or_else(|| TemplateError::Render(format!("function {:?} not defined", name)))?;
                let mut args = Vec::with_capacity(rest.len() + 1);
                for operand in rest {
                    args.push(self.eval_operand(operand, dot)?);
                }
                args.extend(piped);
                func(&args)
            }
            operand => {
                if !rest.is_empty() || piped.is_some() {
                    return Err(TemplateError::Render(
                        "can't give argument to non-function".to_string(),
                    ));
                }
                self.eval_operand(operand, dot)
            }
        }
    }

    fn eval_operand(
        &mut self,
        operand: &Operand,
        dot: &ContextValue,
    ) -> Result<ContextValue, TemplateError> {
        match operand {
            Operand::Dot => Ok(dot.clone()),
            Operand::Field(fields) => lookup_fields(dot, fields, ""),
            Operand::Variable { name, fields } => {
                let value = self
                    .vars
                    .iter()
                    .rev()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v)
                    .ok_or_else(|| TemplateError::UndefinedVariable(name.clone()))?;
                lookup_fields(value, fields, name)
            }
            Operand::Func(name) => {
                let func = funcs::lookup(name)
                    .ok_or_else(|| TemplateError::Render(format!("function {:?} not defined", name)))?;
                func(&[])
            }
            Operand::Str(s) => Ok(ContextValue::String(s.clone())),
            Operand::Int(n) => Ok(ContextValue::Number(*n)),
            Operand::Float(f) => Ok(ContextValue::Float(*f)),
            Operand::Bool(b) => Ok(ContextValue::Bool(*b)),
            Operand::Nil => Ok(ContextValue::Null),
            Operand::Sub(pipe) => self.eval_pipeline(pipe, dot),
        }
    }
}

/// Walk a field chain; a missing key is an undefined variable.
fn lookup_fields(
    start: &ContextValue,
    fields: &[String],
    prefix: &str,
) -> Result<ContextValue, TemplateError> {
    let mut current = start;
    let mut path = prefix.to_string();
    for field in fields {
        path.push('.');
        path.push_str(field);
        current = match current {
            ContextValue::Object(map) => map
                .get(field)
                .ok_or_else(|| TemplateError::UndefinedVariable(path.clone()))?,
            ContextValue::Null => {
                return Err(TemplateError::UndefinedVariable(path));
            }
            other => {
                return Err(TemplateError::Render(format!(
                    "can't evaluate field {} in type {}",
                    field,
                    other.type_name()
                )))
            }
        };
    }
    Ok(current.clone())
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
