//! codeharvest - materialize code blocks from assistant responses
//!
//! codeharvest turns the free-form text of an LLM reply into files inside a
//! per-user project workspace. Each response is run through a fixed pipeline:
//!
//! ```text
//!   response text
//!        │
//!        ▼
//! ┌──────────────┐   heading ▸ bold ▸ bare filename ▸ extension ▸ line scan
//! │  Extractor   │   (first strategy with results wins)
//! └──────┬───────┘
//!        │ artifacts (filename, content)
//!        ▼
//! ┌──────────────┐   create / full replace / partial merge / discard
//! │  Classifier  │
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐   brace-depth method splice for script fragments
//! │ Merge engine │
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐   <root>/<user>/<project>/<filename>
//! │ Materializer │
//! └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`extract`]: block extraction cascade
//! - [`classify`]: merge decision heuristics
//! - [`merge`]: method-level splicing for scripts
//! - [`workspace`]: project paths and file writes
//! - [`pipeline`]: end-to-end passes and history replay
//! - [`events`]: structured per-stage events
//! - [`config`]: configuration management

pub mod classify;
pub mod config;
pub mod error;
pub mod events;
pub mod extract;
pub mod merge;
pub mod pipeline;
pub mod workspace;

pub use config::HarvestConfig;
pub use error::{Error, Result};
pub use pipeline::{Conversation, Harvester};
pub use workspace::{ActionRecord, ProjectRef};
