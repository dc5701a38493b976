//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time.

use std::fmt;

/// Stable identity of a data row, as reported by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    /// Smart constructor: validates non-empty row ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRowId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidRowId)
        } else {
            Ok(Self(raw))
        }
    }

    /// Borrows the id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<usize> for RowId {
    fn from(index: usize) -> Self {
        Self(index.to_string())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key naming the rendering template a row requires.
///
/// Rows that share a template kind can reuse each other's recycled cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateKind(String);

impl TemplateKind {
    /// Smart constructor: validates non-empty template kind
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidTemplateKind> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidTemplateKind)
        } else {
            Ok(Self(raw))
        }
    }

    /// Borrows the kind as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TemplateKind {
    /// Kind used by renderers with a single template.
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("RowId cannot be empty")]
/// Error returned for an empty row id.
pub struct InvalidRowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("TemplateKind cannot be empty")]
/// Error returned for an empty template kind.
pub struct InvalidTemplateKind;
