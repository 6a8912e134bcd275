//! Recentering of large coordinates.
//!
//! Points are stored in a local frame (`local = raw + shift`) so that georeferenced data with
//! coordinates in the millions does not lose precision. A [`CoordinateShift`] decides which
//! translation, if any, to apply when the first point of a file is read.
use crate::*;

/// Decides the translation applied to a file's points.
pub trait CoordinateShift {
    /// Given the first raw point of a file, propose a shift to add to every point.
    ///
    /// `None` (or a zero shift) leaves the points as-is.
    fn propose_shift(&mut self, point: Point3) -> Option<Point3>;
}

impl<F> CoordinateShift for F
where
    F: FnMut(Point3) -> Option<Point3>,
{
    fn propose_shift(&mut self, point: Point3) -> Option<Point3> {
        self(point)
    }
}

/// Never shift.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoShift;

impl CoordinateShift for NoShift {
    fn propose_shift(&mut self, _: Point3) -> Option<Point3> {
        None
    }
}

/// Always apply the same shift, such as one reused from a previous file.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedShift(pub Point3);

impl CoordinateShift for FixedShift {
    fn propose_shift(&mut self, _: Point3) -> Option<Point3> {
        Some(self.0)
    }
}

/// Shift any axis whose magnitude reaches `max_abs_coord`.
///
/// The shift for such an axis is the negated coordinate, truncated to a multiple of 100 so the
/// recentered values stay readable.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AutoShift {
    pub max_abs_coord: f64,
}

impl AutoShift {
    pub const DEFAULT_MAX_ABS_COORD: f64 = 1.0e4;

    /// The shift that would recenter `p`, zero on axes that are in range.
    pub fn best_shift(&self, p: Point3) -> Point3 {
        p.map(|x| {
            if x.abs() >= self.max_abs_coord {
                -(x / 100.0).trunc() * 100.0
            } else {
                0.0
            }
        })
    }
}

impl Default for AutoShift {
    fn default() -> Self {
        Self {
            max_abs_coord: Self::DEFAULT_MAX_ABS_COORD,
        }
    }
}

impl CoordinateShift for AutoShift {
    fn propose_shift(&mut self, point: Point3) -> Option<Point3> {
        if !point.is_finite() {
            return None;
        }
        Some(self.best_shift(point)).filter(|s| !s.is_zero())
    }
}
