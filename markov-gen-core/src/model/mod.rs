//! Transition model and chain walking.
//!
//! This module provides:
//! - Corpus slicing and transition collection (`transitions`)
//! - Per-context successor lists (`successors`)
//! - The lazy token producer (`chain`)
//! - Generation parameters (`options`)

/// Unbounded token producer that walks a transition model and backtracks
/// on dead ends.
pub mod chain;

/// Parameters of a generation run, loadable from a configuration file.
pub mod options;

/// Duplicate-preserving list of tokens observed after one context.
pub mod successors;

/// Fixed-width corpus windows and the context → successors mapping
/// built from them.
pub mod transitions;
