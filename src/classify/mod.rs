//! Full-versus-partial classification
//!
//! Given an artifact headed for a file that may already exist, decide whether
//! to create it, replace it wholesale, merge it method-by-method, or discard
//! it and keep the existing file. Classification is a pure function of the
//! artifact, the target snapshot, and the file kind.

pub mod classifier;

pub use classifier::{Classification, Classifier, MergeDecision};
