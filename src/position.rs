//! Positions for nodes that live in a plane.

use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Sub},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A point or displacement in two dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    x: f64,
    y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Vector2D) -> f64 {
        (*self - *other).magnitude()
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A node with a position, and the physical properties a layout needs.
///
/// Setters take `&self`: nodes are stored in the graph by value, so a
/// movable node keeps its placement behind shared interior state.
pub trait PositionableNode {
    fn position(&self) -> Vector2D;
    fn set_position(&self, position: Vector2D);
    fn velocity(&self) -> Vector2D;
    fn set_velocity(&self, velocity: Vector2D);
    fn size(&self) -> f64;
    fn set_size(&self, size: f64);
    fn mass(&self) -> f64;
    fn set_mass(&self, mass: f64);

    fn is_movable(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    position: Vector2D,
    velocity: Vector2D,
    size: f64,
    mass: f64,
    movable: bool,
}

/// An identifier paired with a shared, mutable placement.
///
/// Clones share the placement, so moving the copy held by a caller moves
/// the node inside the graph.  Equality and hashing use the identifier
/// only.
#[derive(Clone)]
pub struct PlacedNode<T> {
    id: T,
    placement: Arc<Mutex<Placement>>,
}

impl<T> PlacedNode<T> {
    /// Creates a movable node of size and mass 1 at `position`.
    pub fn new(id: T, position: Vector2D) -> Self {
        Self {
            id,
            placement: Arc::new(Mutex::new(Placement {
                position,
                velocity: Vector2D::ZERO,
                size: 1.0,
                mass: 1.0,
                movable: true,
            })),
        }
    }

    /// Pins the node in place.
    pub fn fixed(self) -> Self {
        self.lock().movable = false;
        self
    }

    pub fn id(&self) -> &T {
        &self.id
    }

    fn lock(&self) -> MutexGuard<'_, Placement> {
        self.placement.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> PositionableNode for PlacedNode<T> {
    fn position(&self) -> Vector2D {
        self.lock().position
    }

    fn set_position(&self, position: Vector2D) {
        self.lock().position = position;
    }

    fn velocity(&self) -> Vector2D {
        self.lock().velocity
    }

    fn set_velocity(&self, velocity: Vector2D) {
        self.lock().velocity = velocity;
    }

    fn size(&self) -> f64 {
        self.lock().size
    }

    fn set_size(&self, size: f64) {
        self.lock().size = size;
    }

    fn mass(&self) -> f64 {
        self.lock().mass
    }

    fn set_mass(&self, mass: f64) {
        self.lock().mass = mass;
    }

    fn is_movable(&self) -> bool {
        self.lock().movable
    }
}

impl<T: PartialEq> PartialEq for PlacedNode<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Eq> Eq for PlacedNode<T> {}

impl<T: Hash> Hash for PlacedNode<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for PlacedNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.id, self.position())
    }
}
