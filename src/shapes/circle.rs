use crate::collision::aabb::AABB;
use crate::common::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    /// Creates a circle, rejecting negative or non-finite radii.
    pub fn new(center: Vec2, radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(CollisionError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn bounds(&self) -> AABB {
        let extent = Vec2::splat(self.radius);
        AABB {
            min: self.center - extent,
            max: self.center + extent,
        }
    }

    /// Squared-distance containment, boundary included.
    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Point on the boundary furthest along `direction`.
    pub fn support(&self, direction: Vec2) -> Vec2 {
        self.center + direction.normalize() * self.radius
    }
}
