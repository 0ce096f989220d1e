//! Per-candidate filtering and filename normalization
//!
//! Annotated strategies produce candidates that still have to pass a few
//! content checks before they become artifacts. Matching is substring based.
//! Header instructions match case-sensitively; body boilerplate and
//! replacement phrases match in any case.

use super::artifact::FileKind;
use crate::config::ExtractConfig;

/// Header phrases that defer the block to partial-update handling
const DEFERRED_ADDITION_MARKERS: &[&str] = &["Add to"];

/// Body phrases showing the fence holds instructions, not file content
const BOILERPLATE_MARKERS: &[&str] = &[
    "browser console command",
    "press f12",
    "developer tools",
    "## option",
];

/// Phrases asking for the whole target file to be replaced
const FORCED_REPLACE_PHRASES: &[&str] = &["replace your entire", "replace the entire", "replace your"];

/// Canonical name of the HTML entry file
const ENTRY_FILE: &str = "index.html";

/// Why a candidate was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Header carries an "Add to ..." instruction
    DeferredAddition,
    /// Body contains instructional boilerplate
    Boilerplate(&'static str),
    /// Trimmed body is shorter than the minimum for its file kind
    TooShort { len: usize, min: usize },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeferredAddition => write!(f, "deferred addition"),
            Self::Boilerplate(marker) => write!(f, "boilerplate marker '{}'", marker),
            Self::TooShort { len, min } => write!(f, "body too short ({} < {})", len, min),
        }
    }
}

/// Content checks shared by the annotated strategies
pub struct CandidateFilter<'a> {
    config: &'a ExtractConfig,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self { config }
    }

    /// Return the reason to drop a candidate, or `None` to keep it.
    ///
    /// `header` is the matched text before the opening fence; `body` is the
    /// fence content.
    pub fn check(&self, filename: &str, header: &str, body: &str) -> Option<Rejection> {
        if DEFERRED_ADDITION_MARKERS.iter().any(|m| header.contains(m)) {
            return Some(Rejection::DeferredAddition);
        }

        let body_lower = body.to_lowercase();
        if let Some(marker) = BOILERPLATE_MARKERS.iter().find(|m| body_lower.contains(*m)) {
            return Some(Rejection::Boilerplate(marker));
        }

        let min = self.min_body_len(filename);
        let len = body.trim().len();
        if len < min {
            return Some(Rejection::TooShort { len, min });
        }

        None
    }

    fn min_body_len(&self, filename: &str) -> usize {
        match FileKind::from_filename(filename) {
            FileKind::Script => self.config.min_script_body_len,
            _ => self.config.min_body_len,
        }
    }
}

/// Strip emphasis markers and collapse case variants of the entry file.
pub fn normalize_filename(raw: &str) -> String {
    let cleaned = raw.trim().trim_matches('*');
    if cleaned.eq_ignore_ascii_case(ENTRY_FILE) {
        ENTRY_FILE.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Whether the text asks for the target file to be replaced wholesale.
pub fn is_forced_replace(text: &str) -> bool {
    let lower = text.to_lowercase();
    FORCED_REPLACE_PHRASES.iter().any(|p| lower.contains(p))
}

/// Whether a bare token is shaped like `name.ext`.
pub fn looks_like_filename(candidate: &str, max_len: usize) -> bool {
    candidate.contains('.')
        && !candidate.contains(char::is_whitespace)
        && !candidate.contains('#')
        && candidate.len() < max_len
}
