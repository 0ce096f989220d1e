//! Method-level merge engine for partial script updates
//!
//! Lexical, line-oriented splicing driven by brace depth. See
//! [`braces`] for the counting rules and their known blind spots.

pub mod braces;
pub mod engine;

pub use engine::{extract_method, merge_script, splice_method, MergeOutcome, MethodPatch};
