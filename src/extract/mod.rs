//! Block extraction from assistant responses
//!
//! Turns free-form response text into an ordered list of [`Artifact`]s by
//! running a cascade of matchers in fixed priority order:
//!
//! 1. Heading-annotated fence (`## Styles (style.css)`)
//! 2. Bold-annotated fence (`**app.js**`)
//! 3. Bare-filename-line fence (`app.js` on its own line)
//! 4. Extension-only fence (```` ```css ```` becomes `index.css`)
//! 5. Line-scanning fallback
//!
//! The first strategy that yields at least one artifact wins; later
//! strategies are not consulted. Extraction never fails: text with no
//! recognizable blocks yields an empty list.

pub mod artifact;
pub mod filter;
pub mod scanner;
pub mod strategies;

pub use artifact::{Artifact, FileKind, StrategyId};
pub use filter::{normalize_filename, Rejection};

use crate::config::ExtractConfig;
use strategies::CASCADE;

/// Runs the strategy cascade over response text
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extract artifacts from a single response text.
    pub fn extract(&self, text: &str) -> Vec<Artifact> {
        for (strategy, matcher) in CASCADE {
            let artifacts = matcher(text, &self.config);
            if !artifacts.is_empty() {
                tracing::debug!(
                    %strategy,
                    count = artifacts.len(),
                    "Extraction cascade matched"
                );
                return artifacts;
            }
        }

        tracing::debug!("No strategy matched response text");
        Vec::new()
    }
}
