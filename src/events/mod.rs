//! Pipeline observability
//!
//! Every pass reports `{stage, filename, decision}` records to an injected
//! [`EventSink`]. The default sink forwards them to `tracing`.

pub mod sink;
pub mod types;

pub use sink::{EventSink, MemorySink, NoopSink, TracingSink};
pub use types::{PipelineEvent, Stage};

use crate::classify::MergeDecision;
use std::sync::Arc;
use uuid::Uuid;

/// Emits events for one pass, stamping each with the pass id
#[derive(Clone)]
pub struct Reporter {
    pass_id: Uuid,
    sink: Arc<dyn EventSink>,
}

impl Reporter {
    pub fn new(pass_id: Uuid, sink: Arc<dyn EventSink>) -> Self {
        Self { pass_id, sink }
    }

    pub fn pass_id(&self) -> Uuid {
        self.pass_id
    }

    pub fn report(
        &self,
        stage: Stage,
        filename: &str,
        decision: Option<MergeDecision>,
        detail: impl Into<String>,
    ) {
        let mut event = PipelineEvent::new(self.pass_id, stage, filename).with_detail(detail);
        event.decision = decision;
        self.sink.emit(&event);
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("pass_id", &self.pass_id)
            .finish_non_exhaustive()
    }
}
