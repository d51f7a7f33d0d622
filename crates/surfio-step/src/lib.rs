#![warn(missing_docs)]

//! STEP export for surfio face compounds.
//!
//! Writes ISO 10303-21 (Part 21) files against the AP214 automotive
//! design schema. Each face becomes an untrimmed `ADVANCED_FACE` over a
//! B-spline surface entity; the faces are gathered into an open shell
//! presented as a `SHELL_BASED_SURFACE_MODEL`.

mod error;
mod writer;

pub use error::{Result, StepError};
pub use writer::{write_step, write_step_to_buffer};
