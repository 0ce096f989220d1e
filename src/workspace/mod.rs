//! Workspace materialization
//!
//! Projects live under `<root>/<user>/<project>/`. Each artifact resolves to
//! exactly one file there; the materializer snapshots it, asks the
//! classifier what to do, runs the merge engine for partial updates, and
//! writes the result.

pub mod materializer;
pub mod project;

pub use materializer::{ActionRecord, ActionVerb, Materializer};
pub use project::{ProjectRef, TargetFile};
