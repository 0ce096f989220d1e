//! Artifact data types
//!
//! An Artifact is one candidate `(filename, content)` pair recovered from an
//! assistant response, tagged with the cascade strategy that produced it.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The cascade strategy that produced an artifact, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    /// `## Heading (file.ext)` followed by a fence
    HeadingFence,
    /// `**file.ext**` followed by a fence
    BoldFence,
    /// A line holding only `file.ext` followed by a fence
    BareFilenameFence,
    /// A fence tagged with a language only; filename becomes `index.<ext>`
    ExtensionFence,
    /// Stateful line scan fallback
    LineScan,
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeadingFence => write!(f, "heading_fence"),
            Self::BoldFence => write!(f, "bold_fence"),
            Self::BareFilenameFence => write!(f, "bare_filename_fence"),
            Self::ExtensionFence => write!(f, "extension_fence"),
            Self::LineScan => write!(f, "line_scan"),
        }
    }
}

/// A candidate file recovered from response text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Normalized, project-relative filename
    pub filename: String,
    /// Fence body, verbatim
    pub content: String,
    /// Strategy that matched this artifact
    pub matched_by: StrategyId,
    /// Surrounding text asked for the whole file to be replaced
    pub forced_full_replace: bool,
}

impl Artifact {
    /// Create an artifact that is not forced to replace the target
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        matched_by: StrategyId,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            matched_by,
            forced_full_replace: false,
        }
    }

    /// Set the forced-replacement flag
    pub fn with_forced_full_replace(mut self, forced: bool) -> Self {
        self.forced_full_replace = forced;
        self
    }

    /// File kind inferred from the filename extension
    pub fn kind(&self) -> FileKind {
        FileKind::from_filename(&self.filename)
    }
}

/// Broad file family, used for extension-specific rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Markup,
    Stylesheet,
    Script,
    Other,
}

impl FileKind {
    /// Classify a filename by its (case-insensitive) extension.
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("html" | "htm") => Self::Markup,
            Some("css") => Self::Stylesheet,
            Some("js" | "mjs" | "cjs" | "ts") => Self::Script,
            _ => Self::Other,
        }
    }
}
