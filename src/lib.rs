//! Arduino code generation for stepper motor blocks.
//!
//! This crate turns a snapshot of a visual block workspace into Arduino
//! `Stepper` library code: the include, one global object per configured
//! motor, its `setSpeed()` call in `setup()` and the `steps()` calls.
//!
//! The binary `stepperblocks` reads a workspace JSON file and prints the
//! generated sketch.

pub mod block;
pub mod field;
pub mod generator;
pub mod model;
pub mod profile;
pub mod registry;
