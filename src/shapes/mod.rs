pub mod circle;
pub mod line_segment;
pub mod polygon;
pub mod rect;

pub use circle::Circle;
pub use line_segment::LineSegment;
pub use polygon::Polygon;
pub use rect::Rect;

use crate::collision::aabb::AABB;
use crate::collision::manifold::Manifold;
use crate::collision::raycast::{self, Ray, Raycast};
use crate::collision::detection;
use crate::common::{Color, CollisionSettings, DrawBatch};
use crate::math::vec2::Vec2;

/// Enum representing the geometric shape of a collision region, in world space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
    Polygon(Polygon),
}

/// Discriminant of [`Shape`], used when logging and dispatching pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rect,
    Polygon,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn bounds(&self) -> AABB {
        match self {
            Shape::Circle(circle) => circle.bounds(),
            Shape::Rect(rect) => rect.bounds(),
            Shape::Polygon(polygon) => polygon.bounds(),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Shape::Circle(circle) => circle.contains(point),
            Shape::Rect(rect) => rect.contains(point),
            Shape::Polygon(polygon) => polygon.contains(point),
        }
    }

    /// Reference point of the shape: circle center, rectangle top-left corner,
    /// polygon transform origin.
    pub fn position(&self) -> Vec2 {
        match self {
            Shape::Circle(circle) => circle.center,
            Shape::Rect(rect) => rect.position,
            Shape::Polygon(polygon) => polygon.position(),
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Shape::Circle(circle) => circle.center = position,
            Shape::Rect(rect) => rect.position = position,
            Shape::Polygon(polygon) => polygon.set_position(position),
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.position() + offset);
    }

    pub fn translated(&self, offset: Vec2) -> Shape {
        let mut shape = self.clone();
        shape.translate(offset);
        shape
    }

    /// Point furthest along `direction`, ignoring any rounding radius.
    pub fn support(&self, direction: Vec2) -> Vec2 {
        match self {
            Shape::Circle(circle) => circle.support(direction),
            Shape::Rect(rect) => rect.support(direction),
            Shape::Polygon(polygon) => polygon.support(direction),
        }
    }

    pub fn cast_ray(&self, ray: &Ray) -> Option<Raycast> {
        raycast::cast(ray, self)
    }

    pub fn overlaps(&self, other: &Shape) -> bool {
        detection::overlaps(self, other)
    }

    pub fn overlaps_with(&self, other: &Shape, settings: &CollisionSettings) -> bool {
        detection::overlaps_with(self, other, settings)
    }

    /// Contact against `other`, normal pointing from `self` towards `other`.
    pub fn collide(&self, other: &Shape) -> Option<Manifold> {
        detection::collide(self, other)
    }

    pub fn collide_with(&self, other: &Shape, settings: &CollisionSettings) -> Option<Manifold> {
        detection::collide_with(self, other, settings)
    }

    pub fn draw(&self, batch: &mut dyn DrawBatch, stroke: Color, fill: Option<Color>) {
        match self {
            Shape::Circle(circle) => {
                if let Some(fill) = fill {
                    batch.fill_circle(circle.center, circle.radius, fill);
                }
                batch.stroke_circle(circle.center, circle.radius, stroke);
            }
            Shape::Rect(rect) => {
                if let Some(fill) = fill {
                    batch.fill_rect(rect.position, rect.size, fill);
                }
                batch.stroke_rect(rect.position, rect.size, stroke);
            }
            Shape::Polygon(polygon) => {
                if let Some(fill) = fill {
                    batch.fill_polygon(polygon.world_vertices(), fill);
                }
                batch.stroke_polygon(polygon.world_vertices(), stroke);
            }
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
