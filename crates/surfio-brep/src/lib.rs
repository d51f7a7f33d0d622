#![warn(missing_docs)]

//! Minimal B-rep kernel for surfio.
//!
//! Holds the kernel-native surface representation and the conversion path
//! from the application-level NURBS model:
//!
//! - [`BsplineSurface`] — rational tensor-product B-spline surface with
//!   De Boor point evaluation
//! - [`Face`] / [`Compound`] — untrimmed faces and the ordered container
//!   the exporters consume
//! - [`convert::surfaces_to_compound`] — validates, dehomogenizes, and
//!   wraps a surface list into one compound, reporting skipped inputs
//!
//! The kernel is purely geometric: faces carry no trimming loops and the
//! compound implies no connectivity between its members.

mod compound;
pub mod convert;
mod error;
mod surface;

pub use compound::{Compound, Face};
pub use convert::{surfaces_to_compound, Conversion};
pub use error::{BrepError, Result};
pub use surface::BsplineSurface;
