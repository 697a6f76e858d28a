use crate::math::vec2::Vec2;

/// Stores information about a contact between two regions.
///
/// Only meaningful when the test that produced it reported a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    /// Unit normal pointing from the first operand towards the second.
    pub normal: Vec2,
    /// Penetration depth along `normal`, never negative.
    pub depth: f64,
    /// World-space point where the regions touch.
    pub contact_point: Vec2,
}

impl Manifold {
    pub fn new(normal: Vec2, depth: f64, contact_point: Vec2) -> Self {
        Self {
            normal,
            depth,
            contact_point,
        }
    }

    /// The same contact seen from the other operand.
    pub fn negated(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }

    /// Offset that moves the first operand out of the second.
    pub fn separation(&self) -> Vec2 {
        -self.normal * self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negated_flips_only_normal() {
        let m = Manifold::new(Vec2::UNIT_X, 2.0, Vec2::new(1.0, 1.0));
        let n = m.negated();
        assert_eq!(n.normal, -Vec2::UNIT_X);
        assert_eq!(n.depth, 2.0);
        assert_eq!(n.contact_point, m.contact_point);
        assert_eq!(m.separation(), Vec2::new(-2.0, 0.0));
    }
}
