// Defines an Axis-Aligned Bounding Box

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
///
/// With the y-down convention used throughout the crate `min.y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB, sorting the corners so that `min <= max`.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// AABB spanning `size` from `position`.
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        AABB::new(position, position + size)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Checks if this AABB overlaps with another AABB.
    /// Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }

    /// Inclusive point test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn translated(&self, offset: Vec2) -> AABB {
        AABB {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = AABB { min: *first, max: *first };
        for point in rest {
            aabb.min = aabb.min.min(*point);
            aabb.max = aabb.max.max(*point);
        }
        Some(aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_corners() {
        let aabb = AABB::new(Vec2::new(5.0, -1.0), Vec2::new(-5.0, 1.0));
        assert_eq!(aabb.min, Vec2::new(-5.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(5.0, 1.0));
        assert_eq!(aabb.center(), Vec2::ZERO);
        assert_eq!(aabb.size(), Vec2::new(10.0, 2.0));
    }

    #[test]
    fn test_overlaps_is_strict() {
        let a = AABB::from_position_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let touching = AABB::from_position_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let overlapping = AABB::from_position_size(Vec2::new(9.0, 9.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&overlapping));
    }

    #[test]
    fn test_from_points() {
        let from = AABB::from_points(&[Vec2::new(2.0, -1.0), Vec2::new(-3.0, 4.0), Vec2::ZERO]);
        assert_eq!(from, Some(AABB::new(Vec2::new(-3.0, -1.0), Vec2::new(2.0, 4.0))));
        assert_eq!(AABB::from_points(&[]), None);
    }
}
