use crate::*;
use rustc_hash::FxHashMap as HashMap;
use std::ops::Range;

/// Metadata key holding the curve's [`UpDir`] (as its integer index).
pub const META_UP_DIR: &str = "up_dir";
/// Metadata key holding the constant altitude of a level curve.
pub const META_CONST_ALTITUDE: &str = "const_altitude";

/// Free-form metadata attached to a curve.
pub type Metadata = HashMap<String, MetaValue>;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MetaValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetaValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(x) => Some(*x),
            _ => None,
        }
    }

    /// Integers are widened to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetaValue::Float(x) => Some(*x),
            MetaValue::Int(x) => Some(*x as f64),
            MetaValue::Text(_) => None,
        }
    }
}

/// The axis normal to the plane a 2D curve is drawn in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum UpDir {
    X,
    Y,
    #[default]
    Z,
}

impl UpDir {
    /// Axis index: X = 0, Y = 1, Z = 2.
    pub fn index(self) -> i64 {
        match self {
            UpDir::X => 0,
            UpDir::Y => 1,
            UpDir::Z => 2,
        }
    }

    pub fn from_index(idx: i64) -> Option<Self> {
        match idx {
            0 => Some(UpDir::X),
            1 => Some(UpDir::Y),
            2 => Some(UpDir::Z),
            _ => None,
        }
    }
}

/// A polyline over an owned set of [`Vertices`].
///
/// The curve does not expose the vertices directly as its points. Instead a contiguous
/// index range is _bound_ onto the store ([`Curve::bind_range`]), and only bound points make
/// up the curve. A freshly constructed curve has no points even if its store does.
///
/// The global shift lives on the vertex store; the curve reads and writes it through there.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CurveData")]
pub struct Curve {
    name: String,
    vertices: Vertices,
    indices: Vec<u32>,
    closed: bool,
    visible: bool,
    mode_2d: bool,
    metadata: Metadata,
}

/// Deserialized form of a [`Curve`], checked before it becomes one.
#[derive(serde::Deserialize)]
struct CurveData {
    name: String,
    vertices: Vertices,
    indices: Vec<u32>,
    closed: bool,
    visible: bool,
    mode_2d: bool,
    metadata: Metadata,
}

impl TryFrom<CurveData> for Curve {
    type Error = &'static str;

    fn try_from(data: CurveData) -> Result<Self, Self::Error> {
        let CurveData {
            name,
            vertices,
            indices,
            closed,
            visible,
            mode_2d,
            metadata,
        } = data;

        if indices.iter().any(|&i| i as usize >= vertices.len()) {
            return Err("point index is outside of the vertex store");
        }

        Ok(Self {
            name,
            vertices,
            indices,
            closed,
            visible,
            mode_2d,
            metadata,
        })
    }
}

impl Curve {
    /// Create a curve owning `vertices`, with nothing bound yet.
    pub fn new(vertices: Vertices) -> Self {
        Self {
            name: String::new(),
            vertices,
            indices: Vec::new(),
            closed: false,
            visible: true,
            mode_2d: false,
            metadata: Metadata::default(),
        }
    }

    /// Create a curve with every point bound, in order.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3>,
    {
        let vertices = points.into_iter().collect::<Vertices>();
        let len = vertices.len();
        let mut curve = Self::new(vertices);
        curve.indices = (0..len as u32).collect();
        curve
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Bind `range` of the vertex store as the curve's points.
    ///
    /// Fails if the range reaches past the store, or if the index storage cannot be
    /// allocated.
    pub fn bind_range(&mut self, range: Range<usize>) -> Result<(), &'static str> {
        if range.end > self.vertices.len() || range.start > range.end {
            return Err("point range is outside of the vertex store");
        }
        if range.end > u32::MAX as usize {
            return Err("point range exceeds the indexable vertex count");
        }

        self.indices
            .try_reserve_exact(range.len())
            .map_err(|_| "not enough memory to bind point range")?;
        self.indices.extend(range.map(|i| i as u32));

        Ok(())
    }

    /// The number of bound points.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bound point at `idx`, in the local frame.
    pub fn point(&self, idx: usize) -> Option<Point3> {
        self.indices
            .get(idx)
            .and_then(|&i| self.vertices.get(i as usize))
    }

    /// The bound points, in the local frame.
    ///
    /// Bound indices always lie within the vertex store: [`Curve::bind_range`] and
    /// deserialization both reject anything else.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point3> + '_ {
        self.indices
            .iter()
            .map(move |&i| self.vertices.points()[i as usize])
    }

    /// The bound points, in the global frame.
    pub fn global_points(&self) -> impl ExactSizeIterator<Item = Point3> + '_ {
        self.points().map(move |p| self.to_global(p))
    }

    pub fn to_global(&self, p: Point3) -> Point3 {
        self.vertices.to_global(p)
    }

    pub fn vertices(&self) -> &Vertices {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut Vertices {
        &mut self.vertices
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// A 2D curve is one drawn in the plane normal to its [`UpDir`].
    pub fn is_2d(&self) -> bool {
        self.mode_2d
    }

    pub fn set_2d(&mut self, mode_2d: bool) {
        self.mode_2d = mode_2d;
    }

    pub fn global_shift(&self) -> Point3 {
        self.vertices.global_shift()
    }

    pub fn set_global_shift(&mut self, shift: Point3) {
        self.vertices.set_global_shift(shift);
    }

    pub fn metadata(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: MetaValue) {
        self.metadata.insert(key.into(), value);
    }

    /// The up direction stored in the metadata, defaulting to [`UpDir::Z`] if absent or
    /// unreadable.
    pub fn up_dir(&self) -> UpDir {
        self.metadata(META_UP_DIR)
            .and_then(MetaValue::as_int)
            .and_then(UpDir::from_index)
            .unwrap_or_default()
    }

    pub fn set_up_dir(&mut self, dir: UpDir) {
        self.set_metadata(META_UP_DIR, MetaValue::Int(dir.index()));
    }

    pub fn constant_altitude(&self) -> Option<f64> {
        self.metadata(META_CONST_ALTITUDE)
            .and_then(MetaValue::as_float)
    }

    pub fn set_constant_altitude(&mut self, z: f64) {
        self.set_metadata(META_CONST_ALTITUDE, MetaValue::Float(z));
    }
}
