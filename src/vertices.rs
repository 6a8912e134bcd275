use crate::*;
use std::collections::TryReserveError;

/// Number of points the storage grows by each time it is full.
pub const GROWTH_STEP: usize = 10;

/// A growable store of 3D points in a shifted local frame.
///
/// The _global_ coordinate of a stored point is `local - global_shift`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vertices {
    points: Vec<Point3>,
    global_shift: Point3,
    /// Whether the raw points should be displayed on their own.
    enabled: bool,
}

impl Vertices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn get(&self, idx: usize) -> Option<Point3> {
        self.points.get(idx).copied()
    }

    /// Append a local point.
    ///
    /// When the storage is full it grows by exactly [`GROWTH_STEP`] points. The allocation
    /// failure is returned rather than aborting so a reader can bail out cleanly.
    pub fn try_push(&mut self, p: Point3) -> Result<(), TryReserveError> {
        if self.points.len() == self.points.capacity() {
            self.points.try_reserve_exact(GROWTH_STEP)?;
        }
        self.points.push(p);
        Ok(())
    }

    /// Release any spare capacity so the storage holds exactly [`Self::len`] points.
    pub fn shrink_to_fit(&mut self) {
        self.points.shrink_to_fit();
    }

    pub fn global_shift(&self) -> Point3 {
        self.global_shift
    }

    pub fn set_global_shift(&mut self, shift: Point3) {
        self.global_shift = shift;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Convert a local point into the global frame.
    pub fn to_global(&self, p: Point3) -> Point3 {
        p.sub(self.global_shift)
    }
}

impl FromIterator<Point3> for Vertices {
    fn from_iter<T: IntoIterator<Item = Point3>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}
