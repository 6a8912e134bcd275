//! 3D curves and their SinusX ASCII interchange.
//!
//! The geometry model is a [`Curve`]: a polyline bound onto an owned [`Vertices`] store, kept
//! in a shifted local frame so large georeferenced coordinates keep their precision.
//! With the `io` feature (default) curves can be read from and written to SinusX files, see
//! [`io::sinusx`].

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod curve;
mod entity;
#[cfg(feature = "io")]
pub mod io;
mod point;
mod shift;
mod vertices;

pub use curve::*;
pub use entity::*;
pub use point::*;
pub use shift::*;
pub use vertices::*;
