#![forbid(unsafe_code)]

//! Address-plate core: house-number decomposition, plate geometry and the request model.
//!
//! Design goals:
//! - total, ordered classification of house numbers (first matching rule wins)
//! - geometry is data: every dimension comes from the bundled table, never from code
//! - validation happens before any layout or drawing work starts

pub mod error;
pub mod geom;
pub mod geometry;
pub mod house_number;
pub mod request;

pub use error::{Error, Result};
pub use geometry::{Face, FontSpec, GeometryTable, SizeClass, width_bucket};
pub use house_number::{ArrowNumber, HouseNumber, Level, decompose, decompose_arrow};
pub use request::{PlateInput, PlateKind, PlateRequest, StreetLabel};

#[cfg(test)]
mod tests;
