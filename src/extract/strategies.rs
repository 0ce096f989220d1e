//! Cascade matchers
//!
//! Each matcher is a stateless function from response text to zero or more
//! artifacts. [`CASCADE`] lists them in priority order.

use super::artifact::{Artifact, StrategyId};
use super::filter::{is_forced_replace, looks_like_filename, normalize_filename, CandidateFilter};
use super::scanner::LineScanner;
use crate::config::ExtractConfig;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A single cascade strategy
pub type Matcher = fn(&str, &ExtractConfig) -> Vec<Artifact>;

/// All strategies, highest priority first
pub const CASCADE: &[(StrategyId, Matcher)] = &[
    (StrategyId::HeadingFence, heading_fence),
    (StrategyId::BoldFence, bold_fence),
    (StrategyId::BareFilenameFence, bare_filename_fence),
    (StrategyId::ExtensionFence, extension_fence),
    (StrategyId::LineScan, line_scan),
];

const FENCE: &str = "```";

// `## 1. HTML Structure (index.html)`, `## Updated JavaScript (script.js) - Data`
static HEADING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)##\s+(?:(?:\d+\.\s+)|(?:Updated\s+))?.*?\(?([\w\-./]+\.\w+)\)?.*?\n```(\w+)?\s*\n(.*?)\n```",
    )
    .expect("heading fence pattern")
});

// `**app.js**`, `**Updated style.css**`
static BOLD_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\*\*(?:Updated\s+)?([\w\-./]+\.\w+)\*\*.*?\n```(\w+)?\s*\n(.*?)\n```")
        .expect("bold fence pattern")
});

// a line holding nothing but `app.js`
static BARE_FILENAME_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^[ \t]*([\w\-./]+\.\w+)[ \t]*\r?\n\s*```(\w+)?\s*\n(.*?)\n```")
        .expect("bare filename fence pattern")
});

static EXTENSION_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(\w+)\s*\n(.*?)\n```").expect("extension fence pattern")
});

/// Heading line embedding a filename, followed by a fence.
pub fn heading_fence(text: &str, config: &ExtractConfig) -> Vec<Artifact> {
    annotated(&HEADING_FENCE, text, config, StrategyId::HeadingFence)
}

/// Bold filename, optionally prefixed "Updated", followed by a fence.
pub fn bold_fence(text: &str, config: &ExtractConfig) -> Vec<Artifact> {
    annotated(&BOLD_FENCE, text, config, StrategyId::BoldFence)
}

/// Standalone filename line followed by a fence.
pub fn bare_filename_fence(text: &str, config: &ExtractConfig) -> Vec<Artifact> {
    annotated(&BARE_FILENAME_FENCE, text, config, StrategyId::BareFilenameFence)
}

/// Fence tagged with a language only; the file becomes `index.<ext>`.
pub fn extension_fence(text: &str, config: &ExtractConfig) -> Vec<Artifact> {
    EXTENSION_FENCE
        .captures_iter(text)
        .filter_map(|caps| {
            let tag = caps.get(1)?.as_str();
            let body = caps.get(2).map_or("", |m| m.as_str());
            if body.trim().len() < config.min_body_len {
                tracing::debug!(tag, "Skipping short untitled fence");
                return None;
            }
            let filename = format!("index.{}", extension_for_tag(tag));
            Some(Artifact::new(filename, body, StrategyId::ExtensionFence))
        })
        .collect()
}

/// Stateful line-scan fallback.
pub fn line_scan(text: &str, config: &ExtractConfig) -> Vec<Artifact> {
    LineScanner::new(config).scan(text)
}

/// Shared body for the three annotated strategies.
///
/// Every pattern captures the filename in group 1 and the fence body in
/// group 3.
fn annotated(
    pattern: &Regex,
    text: &str,
    config: &ExtractConfig,
    strategy: StrategyId,
) -> Vec<Artifact> {
    let filter = CandidateFilter::new(config);

    pattern
        .captures_iter(text)
        .filter_map(|caps| candidate(&caps, &filter, config, strategy))
        .collect()
}

fn candidate(
    caps: &Captures<'_>,
    filter: &CandidateFilter<'_>,
    config: &ExtractConfig,
    strategy: StrategyId,
) -> Option<Artifact> {
    let whole = caps.get(0)?.as_str();
    let filename = normalize_filename(caps.get(1)?.as_str());
    let body = caps.get(3).map_or("", |m| m.as_str());

    if strategy == StrategyId::BareFilenameFence
        && !looks_like_filename(&filename, config.max_filename_len)
    {
        return None;
    }

    let header = whole.find(FENCE).map_or(whole, |end| &whole[..end]);
    if let Some(reason) = filter.check(&filename, header, body) {
        tracing::debug!(%strategy, filename = %filename, %reason, "Dropping candidate block");
        return None;
    }

    Some(Artifact::new(filename, body, strategy).with_forced_full_replace(is_forced_replace(whole)))
}

/// Map a fence language tag to a file extension.
fn extension_for_tag(tag: &str) -> String {
    let lower = tag.to_ascii_lowercase();
    let ext = match lower.as_str() {
        "javascript" => "js",
        "typescript" => "ts",
        "python" => "py",
        "markdown" => "md",
        "shell" | "bash" | "sh" => "sh",
        "yaml" => "yml",
        other => other,
    };
    ext.to_string()
}
