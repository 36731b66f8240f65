//! Format registry
//!
//! Formats register under their name and serialize a token tree to a string.

use crate::sheetfmt::token::Token;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// A named way of rendering a token tree
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn serialize(&self, token: &Token) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any previous one of the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, token: &Token, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(token)
    }

    /// Registered names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and description pairs, sorted by name.
    pub fn descriptions(&self) -> Vec<(String, String)> {
        self.list_formats()
            .into_iter()
            .filter_map(|name| {
                let description = self.get(&name)?.description().to_string();
                Some((name, description))
            })
            .collect()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::KindsFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
