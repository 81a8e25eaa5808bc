//! Arduino code generation for the stepper blocks.
//!
//! This module provides:
//! - [`fragments`] – Fragment buffers and the shared pin assignment map.
//! - [`expression`] – Expressions for value blocks plugged into inputs.
//! - [`stepper`] – Emitters for the configuration and step blocks.
//! - [`pass`] – The per-pass orchestrator that visits a workspace.
//! - [`sketch`] – Assembly of the fragment buffers into an `.ino` sketch.

pub mod expression;
pub mod fragments;
pub mod pass;
pub mod sketch;
pub mod stepper;

pub use fragments::{CodeFragmentSet, PinAssignment, PinConflict};
pub use pass::{GenerationPass, GenerationReport, WarningSource, Warnings, generate};
pub use sketch::render_sketch;
pub use stepper::{ConfigureOutput, StepOutput, StepperConfig, emit_configure, emit_step};
