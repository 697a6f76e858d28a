use crate::collision::aabb::AABB;
use crate::math::vec2::Vec2;

/// Axis-aligned rectangle anchored at its top-left (minimum) corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle. A negative size extends the rectangle the other
    /// way, so the stored position is always the minimum corner.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        let aabb = AABB::from_position_size(position, size);
        Self {
            position: aabb.min,
            size: aabb.size(),
        }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(width, height))
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_position_size(self.position, self.size)
    }

    /// Corners in clockwise screen order starting at the top-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.position,
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left(), self.bottom()),
        ]
    }

    /// Two range checks, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x <= self.right() && point.y >= self.top() && point.y <= self.bottom()
    }

    /// Nearest point of the rectangle to `point`.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }

    /// Corner furthest along `direction`.
    pub fn support(&self, direction: Vec2) -> Vec2 {
        Vec2::new(
            if direction.x >= 0.0 { self.right() } else { self.left() },
            if direction.y >= 0.0 { self.bottom() } else { self.top() },
        )
    }
}
