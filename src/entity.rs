use crate::*;

/// Something that accepts finished curves.
pub trait Container {
    fn add_child(&mut self, curve: Curve);
}

impl Container for Vec<Curve> {
    fn add_child(&mut self, curve: Curve) {
        self.push(curve);
    }
}

/// A document entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Entity {
    Curve(Curve),
    Group(Group),
    /// A bare point set, which is not a curve.
    Vertices(Vertices),
}

impl Entity {
    pub fn as_curve(&self) -> Option<&Curve> {
        match self {
            Entity::Curve(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Entity::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Curve> for Entity {
    fn from(curve: Curve) -> Self {
        Entity::Curve(curve)
    }
}

impl From<Group> for Entity {
    fn from(group: Group) -> Self {
        Entity::Group(group)
    }
}

/// An ordered, named collection of entities.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Group {
    pub name: String,
    children: Vec<Entity>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: impl Into<Entity>) {
        self.children.push(child.into());
    }

    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The direct children that are curves.
    ///
    /// Curves nested in child groups are _not_ included.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.children.iter().filter_map(Entity::as_curve)
    }
}

impl Container for Group {
    fn add_child(&mut self, curve: Curve) {
        self.push(curve);
    }
}
