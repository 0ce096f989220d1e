//! End-to-end pass over assistant responses

use super::history::Conversation;
use crate::classify::Classifier;
use crate::config::HarvestConfig;
use crate::error::Result;
use crate::events::{EventSink, Reporter, Stage, TracingSink};
use crate::extract::Extractor;
use crate::workspace::{ActionRecord, Materializer, ProjectRef};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Extracts, classifies, merges, and writes the files in a response.
///
/// Passes against the same project must be serialized by the caller; there
/// is no internal locking.
pub struct Harvester {
    extractor: Extractor,
    materializer: Materializer,
    sink: Arc<dyn EventSink>,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Self {
        Self {
            extractor: Extractor::new(config.extract),
            materializer: Materializer::new(
                config.workspace.root,
                Classifier::new(config.classify),
            ),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the event sink
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        self.materializer.root()
    }

    /// Run one pass over a single response text.
    ///
    /// Stops at the first failing artifact; files written earlier in the
    /// pass stay on disk.
    pub fn process_response(&self, text: &str, project: &ProjectRef) -> Result<Vec<ActionRecord>> {
        let pass_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "harvest_pass",
            %pass_id,
            user = project.user(),
            project = project.name()
        );
        let _guard = span.enter();

        let reporter = Reporter::new(pass_id, self.sink.clone());
        let artifacts = self.extractor.extract(text);
        tracing::debug!(count = artifacts.len(), "Extracted artifacts");

        let mut actions = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            reporter.report(
                Stage::Extracted,
                &artifact.filename,
                None,
                artifact.matched_by.to_string(),
            );
            if let Some(record) = self.materializer.materialize(artifact, project, &reporter)? {
                tracing::info!("{}", record);
                actions.push(record);
            }
        }

        Ok(actions)
    }

    /// Replay every assistant message of a history in order.
    pub fn replay(&self, conversation: &Conversation, project: &ProjectRef) -> Result<Vec<ActionRecord>> {
        let mut actions = Vec::new();
        for message in conversation.assistant_messages() {
            actions.extend(self.process_response(&message.content, project)?);
        }
        Ok(actions)
    }

    /// Process only the final message, when the assistant wrote it.
    pub fn process_latest(
        &self,
        conversation: &Conversation,
        project: &ProjectRef,
    ) -> Result<Vec<ActionRecord>> {
        match conversation.latest_assistant() {
            Some(message) => self.process_response(&message.content, project),
            None => {
                tracing::debug!("Latest message is not from the assistant");
                Ok(Vec::new())
            }
        }
    }
}

impl std::fmt::Debug for Harvester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harvester")
            .field("extractor", &self.extractor)
            .field("materializer", &self.materializer)
            .finish_non_exhaustive()
    }
}
