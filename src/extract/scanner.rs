//! Line-scanning fallback
//!
//! A single pass over the response text driven by a small state machine.
//! A short, punctuation-free `name.ext` line outside a fence becomes the
//! current filename; fenced lines that follow accumulate under it until the
//! next filename line or the end of the text.
//!
//! ```text
//! Outside          + filename line → TrackingFilename
//! Outside          + fence         → InFence(None)
//! TrackingFilename + filename line → emit, TrackingFilename(new)
//! TrackingFilename + fence         → InFence(Some)
//! InFence(Some)    + fence         → TrackingFilename
//! InFence(None)    + fence         → Outside
//! InFence(Some)    + other line    → append line
//! ```

use super::artifact::{Artifact, StrategyId};
use super::filter::normalize_filename;
use crate::config::ExtractConfig;

const FENCE: &str = "```";

/// Tokens that mark a line as prose even when it is shaped like a filename
const PROSE_TOKENS: &[&str] = &["Replace", "your"];

/// File currently being collected
#[derive(Debug)]
struct Pending {
    filename: String,
    body: String,
}

#[derive(Debug)]
enum ScanState {
    /// No current filename, outside any fence
    Outside,
    /// A filename was seen; waiting for its fence
    TrackingFilename(Pending),
    /// Inside a fence, collecting lines when a filename is active
    InFence(Option<Pending>),
}

/// Stateful line scanner producing [`StrategyId::LineScan`] artifacts
pub struct LineScanner<'a> {
    config: &'a ExtractConfig,
    state: ScanState,
    artifacts: Vec<Artifact>,
}

impl<'a> LineScanner<'a> {
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self {
            config,
            state: ScanState::Outside,
            artifacts: Vec::new(),
        }
    }

    /// Scan the full text and return the collected artifacts.
    pub fn scan(mut self, text: &str) -> Vec<Artifact> {
        for line in text.split('\n') {
            self.feed(line);
        }
        self.finish()
    }

    fn feed(&mut self, line: &str) {
        let trimmed = line.trim();
        let state = std::mem::replace(&mut self.state, ScanState::Outside);

        self.state = match state {
            ScanState::Outside => {
                if self.is_filename_line(trimmed) {
                    ScanState::TrackingFilename(Pending::new(trimmed))
                } else if trimmed.starts_with(FENCE) {
                    ScanState::InFence(None)
                } else {
                    ScanState::Outside
                }
            }
            ScanState::TrackingFilename(pending) => {
                if self.is_filename_line(trimmed) {
                    self.emit(pending);
                    ScanState::TrackingFilename(Pending::new(trimmed))
                } else if trimmed.starts_with(FENCE) {
                    ScanState::InFence(Some(pending))
                } else {
                    ScanState::TrackingFilename(pending)
                }
            }
            ScanState::InFence(current) => {
                if trimmed.starts_with(FENCE) {
                    match current {
                        Some(pending) => ScanState::TrackingFilename(pending),
                        None => ScanState::Outside,
                    }
                } else {
                    let current = current.map(|mut pending| {
                        pending.body.push_str(line);
                        pending.body.push('\n');
                        pending
                    });
                    ScanState::InFence(current)
                }
            }
        };
    }

    fn finish(mut self) -> Vec<Artifact> {
        match std::mem::replace(&mut self.state, ScanState::Outside) {
            ScanState::TrackingFilename(pending) | ScanState::InFence(Some(pending)) => {
                self.emit(pending)
            }
            ScanState::Outside | ScanState::InFence(None) => {}
        }
        self.artifacts
    }

    fn emit(&mut self, pending: Pending) {
        if pending.body.is_empty() {
            return;
        }
        self.artifacts.push(Artifact::new(
            pending.filename,
            pending.body,
            StrategyId::LineScan,
        ));
    }

    /// Very restrictive: `name.ext` with exactly one dot and no markup.
    fn is_filename_line(&self, trimmed: &str) -> bool {
        trimmed.len() >= 3
            && trimmed.len() < self.config.max_filename_len
            && trimmed.matches('.').count() == 1
            && !trimmed.contains(|c: char| c.is_whitespace() || matches!(c, ':' | '#' | '*'))
            && !PROSE_TOKENS.iter().any(|t| trimmed.contains(t))
    }
}

impl Pending {
    fn new(raw: &str) -> Self {
        Self {
            filename: normalize_filename(raw),
            body: String::new(),
        }
    }
}
