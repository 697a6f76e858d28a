use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Placement of local geometry in the world: scale, then rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // Angle in radians
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a new transform with unit scale.
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self {
            position,
            rotation,
            scale: Vec2::ONE,
        }
    }

    /// Creates an identity transform (no translation, no rotation, unit scale).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Applies the transform (scale, rotation, then translation) to a point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.component_mul(self.scale).rotate(self.rotation) + self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        let p = Vec2::new(5.0, -3.0);
        assert_eq!(t.apply(p), p);
    }

    #[test]
    fn test_transform_apply_translation() {
        let t = Transform::new(Vec2::new(10.0, 5.0), 0.0);
        assert_relative_eq!(t.apply(Vec2::new(1.0, 2.0)), Vec2::new(11.0, 7.0), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_apply_rotation_90_deg() {
        let t = Transform::new(Vec2::ZERO, PI / 2.0);
        assert_relative_eq!(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(t.apply(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_scale_applies_before_rotation() {
        let t = Transform::new(Vec2::new(1.0, 1.0), PI / 2.0).with_scale(Vec2::new(2.0, 1.0));
        // (1,0) scaled to (2,0), rotated to (0,2), translated to (1,3)
        assert_relative_eq!(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(1.0, 3.0), epsilon = EPSILON);
    }
}
