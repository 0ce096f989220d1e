//! Pipeline event types
//!
//! Structured records emitted at each stage of a pass. All types serialize
//! with camelCase fields so callers can persist or forward them as JSON.

use crate::classify::MergeDecision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stage an event was emitted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Extracted,
    Classified,
    Merged,
    Written,
    Discarded,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extracted => write!(f, "extracted"),
            Self::Classified => write!(f, "classified"),
            Self::Merged => write!(f, "merged"),
            Self::Written => write!(f, "written"),
            Self::Discarded => write!(f, "discarded"),
        }
    }
}

/// A single pipeline event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineEvent {
    /// Identifier shared by every event of one pass
    pub pass_id: Uuid,
    pub stage: Stage,
    pub filename: String,
    pub decision: Option<MergeDecision>,
    /// Free-form detail (matching strategy, rule, merge outcome)
    pub detail: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PipelineEvent {
    pub fn new(pass_id: Uuid, stage: Stage, filename: impl Into<String>) -> Self {
        Self {
            pass_id,
            stage,
            filename: filename.into(),
            decision: None,
            detail: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_decision(mut self, decision: MergeDecision) -> Self {
        self.decision = Some(decision);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
