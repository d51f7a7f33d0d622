#![warn(missing_docs)]

//! IGES 5.3 export for surfio face compounds.
//!
//! Emits the classic fixed-width format: 80-column records grouped into
//! Start, Global, Directory Entry, Parameter Data, and Terminate
//! sections. Every face is written as a type 128 rational B-spline
//! surface entity.

mod error;
mod writer;

pub use error::{IgesError, Result};
pub use writer::{write_iges, write_iges_to_buffer, IgesSettings};
