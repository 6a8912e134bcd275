//! Geometry data interop.
//! Reading and writing curves to exchange formats.
use crate::*;

pub mod sinusx;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of an import or export.
///
/// Only [`Error::MalformedFile`] is recoverable: a reader keeps going past it and reports the
/// _last_ one seen once the input is consumed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bad argument: {0}")]
    BadArgument(&'static str),
    #[error("nothing to save")]
    NoDataToSave,
    #[error("failed writing destination: {0}")]
    WriteFailure(#[source] std::io::Error),
    #[error("failed reading source: {0}")]
    ReadFailure(#[source] std::io::Error),
    #[error("not enough memory")]
    OutOfMemory,
    #[error("malformed file (last fault on line {line})")]
    MalformedFile { line: usize },
}

/// Receiver of user facing, non-fatal, warnings.
pub trait Diagnostics {
    fn warn(&mut self, message: &str);
}

/// Forwards warnings to the [`log`] facade.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Collects warnings.
impl Diagnostics for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
