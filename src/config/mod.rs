//! Configuration model and resolution.
//!
//! Settings live in an external key-value store ([`crate::host::SettingsStore`]);
//! this module owns the typed [`Config`] shape, the built-in defaults, and
//! the [`ConfigResolver`] that merges the two. Configuration is re-read on
//! every workflow invocation — the store is the source of truth and nothing
//! is cached across calls.

// ============================================================================
// Submodules
// ============================================================================

/// Built-in default values.
pub mod defaults;

/// Store-backed resolution with default substitution.
pub mod resolver;

pub use resolver::ConfigResolver;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// ConflictAction
// ============================================================================

/// Policy for naming a downloaded file when one of the same name exists.
///
/// `Uniquify` is the canonical spelling; the legacy short form `"uniq"`
/// found in older stored settings parses to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAction {
    /// Rename the new file to avoid the collision.
    #[serde(alias = "uniq")]
    Uniquify,
    /// Overwrite the existing file.
    Overwrite,
    /// Ask the user.
    Prompt,
}

impl ConflictAction {
    /// Returns the canonical wire string.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uniquify => "uniquify",
            Self::Overwrite => "overwrite",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for ConflictAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniquify" | "uniq" => Ok(Self::Uniquify),
            "overwrite" => Ok(Self::Overwrite),
            "prompt" => Ok(Self::Prompt),
            other => Err(Error::store(format!("unknown conflict action: {other}"))),
        }
    }
}

// ============================================================================
// ConfigKey
// ============================================================================

/// The keys the engine reads from the settings store.
///
/// Key names match the store's own naming so hosts can share the store with
/// their settings UI unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Close a tab after its download succeeds.
    CloseAfterSave,
    /// Filename conflict policy.
    ConflictAction,
    /// File extensions eligible for download.
    FileTypes,
    /// Prompt with a save dialog per download.
    SaveAs,
}

impl ConfigKey {
    /// All keys, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::CloseAfterSave,
        Self::ConflictAction,
        Self::FileTypes,
        Self::SaveAs,
    ];

    /// Returns the store-side key name.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CloseAfterSave => "closeAfterSave",
            Self::ConflictAction => "conflictAction",
            Self::FileTypes => "fileTypes",
            Self::SaveAs => "saveAs",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Config
// ============================================================================

/// Resolved configuration for one workflow run.
///
/// Every field always holds a usable value: resolution substitutes the
/// built-in default for anything the store is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Close a tab after its download succeeds (never the viewed tab).
    pub close_after_save: bool,
    /// Filename conflict policy.
    pub conflict_action: ConflictAction,
    /// File extensions eligible for download, without leading dots.
    pub file_types: Vec<String>,
    /// Prompt with a save dialog per download.
    pub save_as: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            close_after_save: defaults::CLOSE_AFTER_SAVE,
            conflict_action: defaults::CONFLICT_ACTION,
            file_types: defaults::file_types(),
            save_as: defaults::SAVE_AS,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
