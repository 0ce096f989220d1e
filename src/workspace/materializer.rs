//! Artifact materializer
//!
//! Writes one artifact into its project directory and reports what it did.
//! Passes are not transactional: a failure leaves earlier writes in place.

use super::project::{ProjectRef, TargetFile};
use crate::classify::{Classifier, MergeDecision};
use crate::error::{Error, Result};
use crate::events::{Reporter, Stage};
use crate::extract::Artifact;
use crate::merge::splice_method;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Verb of an action-log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionVerb {
    Created,
    Updated,
}

impl std::fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Updated => write!(f, "Updated"),
        }
    }
}

/// One entry of the action log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub verb: ActionVerb,
    pub path: PathBuf,
}

impl std::fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} file: {}", self.verb, self.path.display())
    }
}

/// Resolves, classifies, merges, and writes artifacts
#[derive(Debug, Clone)]
pub struct Materializer {
    root: PathBuf,
    classifier: Classifier,
}

impl Materializer {
    pub fn new(root: impl Into<PathBuf>, classifier: Classifier) -> Self {
        Self {
            root: root.into(),
            classifier,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Materialize one artifact.
    ///
    /// Returns `None` when the artifact was discarded and the target left
    /// untouched.
    pub fn materialize(
        &self,
        artifact: &Artifact,
        project: &ProjectRef,
        reporter: &Reporter,
    ) -> Result<Option<ActionRecord>> {
        let filename = artifact.filename.as_str();
        let path = project.resolve(&self.root, filename)?;
        let target = TargetFile::snapshot(path, filename)?;

        let classification = self.classifier.explain(artifact, &target);
        let decision = classification.decision;
        reporter.report(Stage::Classified, filename, Some(decision), classification.rule);

        let content = match decision {
            MergeDecision::Create | MergeDecision::FullReplace => artifact.content.clone(),
            MergeDecision::PartialMerge => {
                let Some(existing) = target.existing_text() else {
                    tracing::warn!(filename, "Existing file is not UTF-8, leaving it untouched");
                    reporter.report(Stage::Merged, filename, Some(decision), "opaque_target");
                    return Ok(Some(ActionRecord {
                        verb: ActionVerb::Updated,
                        path: target.path,
                    }));
                };
                let outcome = splice_method(existing, &artifact.content);
                tracing::debug!(filename, outcome = outcome.label(), "Applied partial merge");
                reporter.report(Stage::Merged, filename, Some(decision), outcome.label());
                outcome.into_content(existing, &artifact.content)
            }
            MergeDecision::Discard => {
                tracing::info!(filename, rule = classification.rule, "Discarded artifact");
                reporter.report(Stage::Discarded, filename, Some(decision), classification.rule);
                return Ok(None);
            }
        };

        if target.is_unchanged(&content) {
            tracing::debug!(filename, "Content unchanged, skipping write");
            reporter.report(Stage::Written, filename, Some(decision), "unchanged");
        } else {
            write_file(&target.path, filename, &content)?;
            reporter.report(Stage::Written, filename, Some(decision), "written");
        }

        let verb = match decision {
            MergeDecision::Create => ActionVerb::Created,
            _ => ActionVerb::Updated,
        };
        Ok(Some(ActionRecord {
            verb,
            path: target.path,
        }))
    }
}

fn write_file(path: &Path, filename: &str, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(filename, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(filename, e))
}
