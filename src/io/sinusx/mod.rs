//! SinusX ASCII curve interchange.
//!
//! A SinusX file is a sequence of _blocks_, one per curve. Each directive sits on its own line
//! with whitespace separated fields:
//!
//! ```text
//! C <comment...>                 comment
//! B <type> [frame and scale...]  new block, type is one of S, P, N, C
//! CN <name>                      curve name
//! CP <connected> <closed>        first header line
//! CP <type specific>             second header line (absent for S)
//! CP <plane code>                base plane: 0 = XY, 1 = YZ, 2 = ZX
//! <x> <y> <z> <key>              vertex, repeated
//! ```
//!
//! Curves are always written back as type `S`.
use super::*;

pub mod grammar;
mod read;
mod write;

pub use read::*;
pub use write::*;

/// File extensions recognised as SinusX.
pub const FILE_EXTENSIONS: [&str; 2] = ["sx", "sinusx"];

/// Case insensitive check of a file extension.
pub fn can_load_extension(ext: &str) -> bool {
    FILE_EXTENSIONS
        .iter()
        .any(|x| x.eq_ignore_ascii_case(ext))
}
