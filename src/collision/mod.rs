pub mod aabb;
pub mod detection;
pub mod gjk;
pub mod manifold;
pub mod raycast;
pub mod sat;

// Re-export key types
pub use aabb::AABB;
pub use detection::{collide, collide_with, overlaps, overlaps_with};
pub use gjk::{DistanceOutput, DistanceProxy, TimeOfImpact};
pub use manifold::Manifold;
pub use raycast::{Ray, Raycast};
