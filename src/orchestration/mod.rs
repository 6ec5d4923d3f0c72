//! Orchestration layer for styleguide publishing
//!
//! This module provides the deploy sequencer that drives the two publish
//! steps in strict order and reports their outcomes.

pub mod sequencer;

// Re-export main types for convenience
pub use sequencer::{
    DOCS_FAILURE_PREFIX, DOCS_SUCCESS_LOG, DeployReport, DeploySequencer, README_FAILURE_PREFIX,
    README_SUCCESS_LOG, StepOutcome,
};
