//! Content classifier for artifacts targeting existing files

use crate::config::ClassifyConfig;
use crate::extract::{Artifact, FileKind};
use crate::workspace::TargetFile;
use serde::{Deserialize, Serialize};

/// What to do with an artifact's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeDecision {
    /// Target does not exist yet
    Create,
    /// Overwrite the target with the artifact content
    FullReplace,
    /// Splice a single function into the existing script
    PartialMerge,
    /// Keep the existing file untouched
    Discard,
}

impl std::fmt::Display for MergeDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::FullReplace => write!(f, "full_replace"),
            Self::PartialMerge => write!(f, "partial_merge"),
            Self::Discard => write!(f, "discard"),
        }
    }
}

/// A decision together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub decision: MergeDecision,
    /// Short rule label for logs
    pub rule: &'static str,
}

impl Classification {
    fn new(decision: MergeDecision, rule: &'static str) -> Self {
        Self { decision, rule }
    }
}

/// Tags that open a bare markup fragment
const MARKUP_FRAGMENT_OPENERS: &[&str] = &["<nav", "<div", "<section", "<header"];

/// Markers of a complete markup document (matched lowercase)
const MARKUP_DOCUMENT_MARKERS: &[&str] = &["<!doctype", "<html", "<head", "<body"];

/// Stylesheet comments that ask for rules to be removed
const STYLESHEET_REMOVAL_MARKERS: &[&str] = &["Remove these sections", "/* Remove"];

/// Stylesheet comments introducing an addition
const STYLESHEET_ADDITION_MARKERS: &[&str] = &["/* Add this to", "/* Navigation Actions */"];

/// Selectors that only a whole stylesheet tends to carry
const STYLESHEET_ROOT_SELECTORS: &[&str] = &[":root", "* {"];

/// Leading comments marking a script snippet as an addition
const SCRIPT_ADDITION_MARKERS: &[&str] = &["// Add this function", "// Add the following function"];

/// Phrases showing the content is a partial excerpt
const PARTIAL_UPDATE_MARKERS: &[&str] = &["Updated", "only showing", "modified"];

/// Decides among create, replace, merge, and discard
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifyConfig,
}

impl Classifier {
    pub fn new(config: ClassifyConfig) -> Self {
        Self { config }
    }

    /// Classify an artifact against a target snapshot
    pub fn classify(&self, artifact: &Artifact, target: &TargetFile) -> MergeDecision {
        self.explain(artifact, target).decision
    }

    /// Classify and report which rule decided
    pub fn explain(&self, artifact: &Artifact, target: &TargetFile) -> Classification {
        if !target.exists() {
            return Classification::new(MergeDecision::Create, "target_missing");
        }

        if artifact.forced_full_replace {
            return Classification::new(MergeDecision::FullReplace, "forced_replace");
        }

        // non-UTF-8 targets have no functions to merge into
        let existing = target.existing_text().unwrap_or_default();
        let content = artifact.content.as_str();
        let specific = match artifact.kind() {
            FileKind::Markup => self.markup(content),
            FileKind::Stylesheet => self.stylesheet(content),
            FileKind::Script => self.script(content, existing),
            FileKind::Other => None,
        };

        specific.unwrap_or_else(|| {
            if contains_any(content, PARTIAL_UPDATE_MARKERS) {
                Classification::new(MergeDecision::Discard, "partial_update_marker")
            } else {
                Classification::new(MergeDecision::FullReplace, "default")
            }
        })
    }

    /// A bare structural fragment without a document root cannot be placed.
    fn markup(&self, content: &str) -> Option<Classification> {
        let trimmed = content.trim();
        let lower = trimmed.to_lowercase();

        let is_fragment = MARKUP_FRAGMENT_OPENERS.iter().any(|t| lower.starts_with(t))
            && !contains_any(&lower, MARKUP_DOCUMENT_MARKERS);

        is_fragment.then(|| Classification::new(MergeDecision::Discard, "markup_fragment"))
    }

    /// Instructions and small targeted additions keep the existing stylesheet.
    fn stylesheet(&self, content: &str) -> Option<Classification> {
        let trimmed = content.trim();

        if contains_any(trimmed, STYLESHEET_REMOVAL_MARKERS) {
            return Some(Classification::new(MergeDecision::Discard, "stylesheet_removal"));
        }

        if trimmed.matches("/*").count() > trimmed.matches('{').count() {
            return Some(Classification::new(MergeDecision::Discard, "stylesheet_comments"));
        }

        if contains_any(trimmed, STYLESHEET_ADDITION_MARKERS) {
            return Some(Classification::new(MergeDecision::Discard, "stylesheet_addition"));
        }

        let targeted = trimmed.contains('.')
            && line_count(trimmed) < self.config.fragment_max_lines
            && !contains_any(trimmed, STYLESHEET_ROOT_SELECTORS);
        if targeted {
            return Some(Classification::new(MergeDecision::Discard, "stylesheet_targeted_addition"));
        }

        None
    }

    /// Function-level rules; anything they leave undecided falls through to
    /// the generic marker check.
    fn script(&self, content: &str, existing: &str) -> Option<Classification> {
        let trimmed = content.trim();

        if let Some(name) = leading_function_name(trimmed) {
            if existing.contains(&format!("function {}(", name)) {
                return Some(Classification::new(MergeDecision::PartialMerge, "method_replacement"));
            }
        }

        if SCRIPT_ADDITION_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
            return Some(Classification::new(MergeDecision::Discard, "script_addition"));
        }

        let defines_function = content.contains("function ") || content.contains("() {");
        let new_lines = line_count(content);
        if defines_function
            && new_lines < self.config.fragment_max_lines
            && new_lines < line_count(existing) / 2
        {
            return Some(Classification::new(MergeDecision::PartialMerge, "script_fragment"));
        }

        None
    }
}

/// Name of the function a snippet opens with, if it starts `function name(`.
fn leading_function_name(trimmed: &str) -> Option<&str> {
    let first_line = trimmed.lines().next()?;
    let rest = first_line.strip_prefix("function ")?;
    let name = rest[..rest.find('(')?].trim();
    (!name.is_empty()).then_some(name)
}

fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::StrategyId;
    use std::path::PathBuf;

    fn artifact(filename: &str, content: &str) -> Artifact {
        Artifact::new(filename, content, StrategyId::HeadingFence)
    }

    fn existing(content: &str) -> TargetFile {
        existing_bytes(content.as_bytes())
    }

    fn existing_bytes(bytes: &[u8]) -> TargetFile {
        TargetFile {
            path: PathBuf::from("/tmp/unused"),
            existing: Some(bytes.to_vec()),
        }
    }

    fn missing() -> TargetFile {
        TargetFile {
            path: PathBuf::from("/tmp/unused"),
            existing: None,
        }
    }

    fn classify(filename: &str, content: &str, target: &TargetFile) -> MergeDecision {
        Classifier::default().classify(&artifact(filename, content), target)
    }

    /// A script with `n` filler lines around one function
    fn long_script(n: usize) -> String {
        let mut out = String::from("function render() {\n  draw();\n}\n");
        for i in 0..n {
            out.push_str(&format!("const value{} = {};\n", i, i));
        }
        out
    }

    #[test]
    fn test_missing_target_creates() {
        assert_eq!(classify("style.css", "/* Remove */", &missing()), MergeDecision::Create);
    }

    #[test]
    fn test_forced_replace_overrides_rules() {
        let forced = artifact("style.css", "/* Remove these sections */").with_forced_full_replace(true);
        let decision = Classifier::default().classify(&forced, &existing("body {}"));
        assert_eq!(decision, MergeDecision::FullReplace);
    }

    #[test]
    fn test_markup_fragment_discarded() {
        let target = existing("<!DOCTYPE html><html><body></body></html>");
        assert_eq!(
            classify("index.html", "<nav class=\"top\"><a href=\"/\">Home</a></nav>", &target),
            MergeDecision::Discard
        );
        assert_eq!(
            classify("index.html", "  <section>\n<p>Hi</p>\n</section>", &target),
            MergeDecision::Discard
        );
    }

    #[test]
    fn test_markup_document_replaces() {
        let target = existing("<html></html>");
        assert_eq!(
            classify("index.html", "<!doctype html>\n<html><body>New</body></html>", &target),
            MergeDecision::FullReplace
        );
        assert_eq!(
            classify("index.html", "<div><!DOCTYPE html><html></html></div>", &target),
            MergeDecision::FullReplace
        );
    }

    #[test]
    fn test_stylesheet_removal_instruction_discarded() {
        let target = existing("body { margin: 0; }\n.old-nav { color: red; }\n");
        assert_eq!(
            classify("style.css", "/* Remove these sections: .old-nav */", &target),
            MergeDecision::Discard
        );
    }

    #[test]
    fn test_stylesheet_comment_heavy_discarded() {
        let target = existing("body {}");
        let content = "/* header */\n/* footer */\nbody { margin: 0 }";
        assert_eq!(classify("style.css", content, &target), MergeDecision::Discard);
    }

    #[test]
    fn test_stylesheet_targeted_addition_discarded() {
        let target = existing("body {}");
        let content = ".nav-actions {\n  display: flex;\n}";
        assert_eq!(classify("style.css", content, &target), MergeDecision::Discard);
    }

    #[test]
    fn test_stylesheet_with_root_selector_replaces() {
        let target = existing("body {}");
        let content = ":root {\n  --accent: #333;\n}\n.card { color: var(--accent); }";
        assert_eq!(classify("style.css", content, &target), MergeDecision::FullReplace);
    }

    #[test]
    fn test_stylesheet_plain_rule_replaces() {
        let target = existing("body{color:red}");
        assert_eq!(classify("style.css", "body{color:red}", &target), MergeDecision::FullReplace);
    }

    #[test]
    fn test_script_method_replacement() {
        let target = existing("function loadData() {\n  return [];\n}\n");
        let content = "function loadData() {\n  return [1, 2, 3];\n}";
        let classification = Classifier::default().explain(&artifact("app.js", content), &target);
        assert_eq!(classification.decision, MergeDecision::PartialMerge);
        assert_eq!(classification.rule, "method_replacement");
    }

    #[test]
    fn test_script_addition_discarded() {
        let target = existing(&long_script(10));
        let content = "// Add this function\nfunction helper() {\n  return 1;\n}";
        assert_eq!(classify("app.js", content, &target), MergeDecision::Discard);
    }

    #[test]
    fn test_script_small_fragment_merges() {
        let target = existing(&long_script(40));
        let content = "function brandNew() {\n  return 1;\n}";
        let classification = Classifier::default().explain(&artifact("app.js", content), &target);
        assert_eq!(classification.decision, MergeDecision::PartialMerge);
        assert_eq!(classification.rule, "script_fragment");
    }

    #[test]
    fn test_script_comparable_size_replaces() {
        let target = existing("const a = 1;\nconst b = 2;\n");
        let content = "function start() {\n  go();\n}\nstart();";
        assert_eq!(classify("app.js", content, &target), MergeDecision::FullReplace);
    }

    #[test]
    fn test_script_excerpt_with_markers_discarded() {
        let target = existing("const API = '/v1';\nconst RETRIES = 3;\nconst TIMEOUT = 500;\nstart();\n");
        let content = "// only showing the modified constant\nconst API = '/v2';";
        let classification = Classifier::default().explain(&artifact("app.js", content), &target);
        assert_eq!(classification.decision, MergeDecision::Discard);
        assert_eq!(classification.rule, "partial_update_marker");
    }

    #[test]
    fn test_script_function_rules_precede_markers() {
        let target = existing(&long_script(40));
        let content = "// Updated helper\nfunction brandNew() {\n  return 1;\n}";
        let classification = Classifier::default().explain(&artifact("app.js", content), &target);
        assert_eq!(classification.decision, MergeDecision::PartialMerge);
        assert_eq!(classification.rule, "script_fragment");
    }

    #[test]
    fn test_stylesheet_navigation_actions_marker_discarded() {
        let target = existing("body {}");
        let mut content = String::from("/* Navigation Actions */\nnav { display: flex; }\n");
        for i in 0..120 {
            content.push_str(&format!("li:nth-child({}) {{ order: {}; }}\n", i, i));
        }
        let classification = Classifier::default().explain(&artifact("style.css", &content), &target);
        assert_eq!(classification.decision, MergeDecision::Discard);
        assert_eq!(classification.rule, "stylesheet_addition");
    }

    #[test]
    fn test_non_utf8_target_is_replaceable() {
        let target = existing_bytes(b"caf\xe9 menu\n");
        assert_eq!(
            classify("notes.txt", "Fresh menu for the week.\n", &target),
            MergeDecision::FullReplace
        );
        assert_eq!(
            classify("app.js", "function brandNew() {\n  return 1;\n}", &target),
            MergeDecision::FullReplace
        );
    }

    #[test]
    fn test_generic_partial_markers_discard() {
        let target = existing("# Title\n\nBody text.\n");
        assert_eq!(
            classify("README.md", "# Title\n\n(only showing the changed section)\n", &target),
            MergeDecision::Discard
        );
        assert_eq!(
            classify("README.md", "# Title\n\nNew body text.\n", &target),
            MergeDecision::FullReplace
        );
    }

    #[test]
    fn test_leading_function_name() {
        assert_eq!(leading_function_name("function foo(a, b) {"), Some("foo"));
        assert_eq!(leading_function_name("function (x) {"), None);
        assert_eq!(leading_function_name("const foo = () => {"), None);
    }
}
