//! Response processing pipeline
//!
//! A pass runs one assistant response through extraction, classification,
//! merge, and materialization, in that order, one artifact at a time.

pub mod harvester;
pub mod history;

pub use harvester::Harvester;
pub use history::{Conversation, Message, Role};
