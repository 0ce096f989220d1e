//! Event sinks
//!
//! A sink is injected into the pipeline and receives every [`PipelineEvent`].
//! Sinks must not fail the pass, so `emit` returns nothing.

use super::types::PipelineEvent;
use std::sync::Mutex;

/// Receiver of pipeline events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &PipelineEvent);
}

/// Logs every event at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &PipelineEvent) {
        tracing::debug!(
            pass_id = %event.pass_id,
            stage = %event.stage,
            filename = %event.filename,
            decision = ?event.decision,
            detail = event.detail.as_deref().unwrap_or(""),
            "Pipeline event"
        );
    }
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &PipelineEvent) {}
}

/// Collects events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected events
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.lock().clone()
    }

    /// Remove and return the collected events
    pub fn drain(&self) -> Vec<PipelineEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PipelineEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &PipelineEvent) {
        self.lock().push(event.clone());
    }
}
