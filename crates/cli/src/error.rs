// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Errors carry what went wrong (message), why it might have happened
//! (context) and how to fix it (suggestions).

use newt_core::TemplateError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct NewtError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl NewtError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for NewtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for NewtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures users hit most often.
impl NewtError {
    /// The manifest file does not exist.
    pub fn manifest_not_found(path: &Path) -> Self {
        NewtError::new(format!("Manifest '{}' not found", path.display()))
            .with_context("newt looks for .newt.yml in the current directory by default")
            .with_suggestion("Run from the project root")
            .with_suggestion("Point at the manifest: newt --file path/to/.newt.yml <command>")
    }

    /// The manifest parsed but failed validation.
    pub fn invalid_manifest(path: &Path, errors: &[String]) -> Self {
        let mut err = NewtError::new(format!(
            "Manifest '{}' has {} error(s)",
            path.display(),
            errors.len()
        ));
        for error in errors {
            err = err.with_context(error.clone());
        }
        err.with_suggestion(format!("Check the manifest: newt --file {} check", path.display()))
    }

    /// No command with the given name.
    pub fn unknown_command(name: &str, similar: &[String]) -> Self {
        let mut err = NewtError::new(format!("Command '{}' not found", name));
        if !similar.is_empty() {
            err = err.with_context(format!("Similar commands: {}", similar.join(", ")));
        }
        err.with_suggestion("List available commands: newt list")
    }

    /// A template could not be resolved against the context.
    pub fn unresolved(location: &str, reason: TemplateError) -> Self {
        NewtError::new(format!("Cannot resolve {}", location))
            .with_context(reason.to_string())
            .with_suggestion("Supply missing values with --set KEY=VALUE")
            .with_suggestion("Or set them in the [context] table of config.toml")
            .with_source(reason)
    }
}
