pub mod math;
pub mod common;
pub mod shapes;
pub mod collision;
pub mod grid;
pub mod colliders;

// Re-export key types for easier use
pub use math::vec2::Vec2;
pub use math::transform::Transform;
pub use shapes::{Circle, LineSegment, Polygon, Rect, Shape, ShapeKind};
pub use collision::{Manifold, Ray, Raycast, AABB};
pub use grid::{CellFlags, GridSpace, Map};
pub use colliders::{
    CellGrid, Collider, ColliderHost, ColliderId, ColliderIndex, ColliderKind, ColliderState, EntityId,
    GridCollider, TileMapCollider, TileSet, TileTemplate,
};
pub use common::{CollisionError, CollisionSettings, Result};
