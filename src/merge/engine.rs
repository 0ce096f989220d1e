//! Method-level merge for script files
//!
//! Locates the first function or method defined in a patch, finds the
//! method of the same name in the existing script, and splices the patch's
//! definition over the existing line span. All other lines are kept
//! byte-identical.

use super::braces::{block_end, line_balance};
use std::ops::RangeInclusive;

/// Words that can precede `() {` without naming a method
const NON_METHOD_WORDS: &[&str] = &[
    "function", "if", "for", "while", "switch", "catch", "return", "else",
];

/// A single method definition cut from a patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPatch {
    pub name: String,
    /// Definition lines, from the opener to the closing brace
    pub body: String,
}

/// Result of attempting a method splice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The method was replaced
    Spliced {
        content: String,
        method: String,
        /// Line span of the replaced definition in the existing content
        span: RangeInclusive<usize>,
    },
    /// The patch defines no recognizable method; use it verbatim
    NoMethodInPatch,
    /// The patch opens a block but none of its openers names a method
    UnnamedDefinition,
    /// The method does not appear in the existing content
    TargetNotFound { method: String },
    /// The existing definition never closes its braces
    UnterminatedTarget { method: String },
}

impl MergeOutcome {
    /// Final file content for this outcome.
    pub fn into_content(self, existing: &str, patch: &str) -> String {
        match self {
            Self::Spliced { content, .. } => content,
            Self::NoMethodInPatch => patch.to_string(),
            Self::UnnamedDefinition
            | Self::TargetNotFound { .. }
            | Self::UnterminatedTarget { .. } => existing.to_string(),
        }
    }

    /// Short label for logs and events
    pub fn label(&self) -> &'static str {
        match self {
            Self::Spliced { .. } => "spliced",
            Self::NoMethodInPatch => "no_method_in_patch",
            Self::UnnamedDefinition => "unnamed_definition",
            Self::TargetNotFound { .. } => "target_not_found",
            Self::UnterminatedTarget { .. } => "unterminated_target",
        }
    }
}

/// Merge `patch` into `existing`, returning the merged content.
///
/// Falls back to `patch` when it defines no method, and to `existing` when
/// the method is anonymous or cannot be located there.
pub fn merge_script(existing: &str, patch: &str) -> String {
    splice_method(existing, patch).into_content(existing, patch)
}

/// Merge `patch` into `existing`, reporting what happened.
pub fn splice_method(existing: &str, patch: &str) -> MergeOutcome {
    let Some(method) = extract_method(patch) else {
        if patch.split('\n').any(|line| is_method_opener(line.trim())) {
            return MergeOutcome::UnnamedDefinition;
        }
        return MergeOutcome::NoMethodInPatch;
    };

    let lines: Vec<&str> = existing.split('\n').collect();
    let Some(start) = lines
        .iter()
        .position(|line| line.contains('{') && has_call_opener(line, &method.name))
    else {
        return MergeOutcome::TargetNotFound { method: method.name };
    };

    let Some(end) = block_end(&lines, start) else {
        return MergeOutcome::UnterminatedTarget { method: method.name };
    };

    let mut merged: Vec<&str> = Vec::with_capacity(lines.len());
    merged.extend_from_slice(&lines[..start]);
    merged.extend(method.body.split('\n'));
    merged.extend_from_slice(&lines[end + 1..]);

    MergeOutcome::Spliced {
        content: merged.join("\n"),
        method: method.name,
        span: start..=end,
    }
}

/// Cut the first named method definition out of a patch.
///
/// Openers without a usable name (`function() {`) are skipped. A patch whose
/// definition never closes contributes everything from the opener to the
/// end of the patch.
pub fn extract_method(patch: &str) -> Option<MethodPatch> {
    let lines: Vec<&str> = patch.split('\n').collect();
    let (start, name) = lines.iter().enumerate().find_map(|(idx, line)| {
        let trimmed = line.trim();
        if is_method_opener(trimmed) {
            method_name(trimmed).map(|name| (idx, name))
        } else {
            None
        }
    })?;

    let end = if line_balance(lines[start]) <= 0 {
        start
    } else {
        block_end(&lines, start).unwrap_or(lines.len() - 1)
    };

    Some(MethodPatch {
        name,
        body: lines[start..=end].join("\n"),
    })
}

fn is_method_opener(trimmed: &str) -> bool {
    trimmed.contains("() {") || (trimmed.contains("function ") && trimmed.contains('{'))
}

/// `function name(...)` or `name() {`
fn method_name(trimmed: &str) -> Option<String> {
    let candidate = if let Some((_, rest)) = trimmed.split_once("function ") {
        rest.split('(').next()?.trim()
    } else {
        let (prefix, _) = trimmed.split_once("() {")?;
        prefix
            .split_whitespace()
            .last()?
            .trim_start_matches(|c: char| !is_ident_char(c))
    };

    let valid = !candidate.is_empty()
        && candidate.chars().all(is_ident_char)
        && !NON_METHOD_WORDS.contains(&candidate);
    valid.then(|| candidate.to_string())
}

/// Whether `line` contains `name(` not preceded by another identifier char.
fn has_call_opener(line: &str, name: &str) -> bool {
    let needle = format!("{}(", name);
    line.match_indices(&needle).any(|(idx, _)| {
        line[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !is_ident_char(c))
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = "class App {\n  constructor() {\n    this.items = [];\n  }\n\n  render() {\n    if (this.items.length) {\n      show();\n    }\n  }\n\n  save() {\n    store(this.items);\n  }\n}\n";

    #[test]
    fn test_nested_method_replacement() {
        let patch = "  render() {\n    if (!this.items.length) {\n      hide();\n    } else {\n      show();\n    }\n  }";
        let (content, method, span) = match splice_method(APP, patch) {
            MergeOutcome::Spliced { content, method, span } => (content, method, span),
            other => panic!("expected a splice, got {:?}", other),
        };
        assert_eq!(method, "render");
        assert_eq!(span, 5..=9);

        let old: Vec<&str> = APP.split('\n').collect();
        let new: Vec<&str> = content.split('\n').collect();
        let patch_lines: Vec<&str> = patch.split('\n').collect();

        assert_eq!(&new[..5], &old[..5]);
        assert_eq!(&new[5..5 + patch_lines.len()], patch_lines.as_slice());
        assert_eq!(&new[5 + patch_lines.len()..], &old[10..]);
    }

    #[test]
    fn test_function_keyword_replacement() {
        let existing = "const x = 1;\n\nfunction loadData(url) {\n  return fetch(url);\n}\n\nfunction reloadData() {\n  loadData('/a');\n}\n";
        let patch = "function loadData(url) {\n  return fetch(url, { cache: 'no-store' });\n}";
        let merged = merge_script(existing, patch);
        assert_eq!(
            merged,
            "const x = 1;\n\nfunction loadData(url) {\n  return fetch(url, { cache: 'no-store' });\n}\n\nfunction reloadData() {\n  loadData('/a');\n}\n"
        );
    }

    #[test]
    fn test_does_not_match_longer_identifier() {
        let existing = "function reloadData() {\n  go();\n}\n";
        let patch = "function loadData() {\n  stop();\n}";
        assert_eq!(
            splice_method(existing, patch),
            MergeOutcome::TargetNotFound {
                method: "loadData".to_string()
            }
        );
        assert_eq!(merge_script(existing, patch), existing);
    }

    #[test]
    fn test_single_line_target() {
        let existing = "a();\nfunction tick() { count++; }\nb();";
        let patch = "function tick() {\n  count += 2;\n}";
        let outcome = splice_method(existing, patch);
        assert_eq!(outcome.label(), "spliced");
        assert_eq!(
            outcome.into_content(existing, patch),
            "a();\nfunction tick() {\n  count += 2;\n}\nb();"
        );
    }

    #[test]
    fn test_no_method_in_patch_returns_patch() {
        let existing = "function a() {\n}\n";
        let patch = "const settings = { theme: 'dark' };";
        assert_eq!(splice_method(existing, patch), MergeOutcome::NoMethodInPatch);
        assert_eq!(merge_script(existing, patch), patch);
    }

    #[test]
    fn test_anonymous_callback_keeps_existing() {
        let existing = "const a = 1;\nfunction go() {\n  run();\n}\n";
        let patch = "document.addEventListener('click', function() {\n  go();\n});";
        assert_eq!(splice_method(existing, patch), MergeOutcome::UnnamedDefinition);
        assert_eq!(merge_script(existing, patch), existing);
    }

    #[test]
    fn test_named_method_after_anonymous_opener() {
        let existing = "function render() {\n  old();\n}\nafter();";
        let patch = "window.onload = function() {\n  boot();\n};\nfunction render() {\n  fresh();\n}";
        assert_eq!(
            merge_script(existing, patch),
            "function render() {\n  fresh();\n}\nafter();"
        );
    }

    #[test]
    fn test_unterminated_target_keeps_existing() {
        let existing = "function draw() {\n  if (x) {\n    y();\n";
        let patch = "function draw() {\n  z();\n}";
        let outcome = splice_method(existing, patch);
        assert_eq!(outcome.label(), "unterminated_target");
        assert_eq!(merge_script(existing, patch), existing);
    }

    #[test]
    fn test_only_first_definition_replaced() {
        let existing = "function a() {\n  one();\n}\nfunction a() {\n  two();\n}";
        let patch = "function a() {\n  three();\n}";
        assert_eq!(
            merge_script(existing, patch),
            "function a() {\n  three();\n}\nfunction a() {\n  two();\n}"
        );
    }

    #[test]
    fn test_extract_method_variants() {
        let patch = "// tweak\nasync loadData() {\n  await go();\n}\nextra();";
        let method = extract_method(patch).unwrap();
        assert_eq!(method.name, "loadData");
        assert_eq!(method.body, "async loadData() {\n  await go();\n}");

        assert!(extract_method("const f = function() {\n};").is_none());
        assert!(extract_method("no code here").is_none());

        let open = extract_method("function x() {\n  y();").unwrap();
        assert_eq!(open.body, "function x() {\n  y();");
    }

    #[test]
    fn test_brace_in_string_misleads_scanner() {
        // lexical scanning: the "}" inside the string closes the method early
        let existing = "function fmt() {\n  return \"}\";\n}\nrest();";
        let patch = "function fmt() {\n  return '';\n}";
        let MergeOutcome::Spliced { span, .. } = splice_method(existing, patch) else {
            panic!("expected a splice");
        };
        assert_eq!(span, 0..=1);
    }
}
