//! Rendering contract for shapes and colliders.
//!
//! The crate never rasterises anything itself; a host engine implements
//! [`DrawBatch`] on top of its sprite or line batcher.

use super::color::Color;
use crate::math::vec2::Vec2;

/// Primitive sink that shapes and colliders emit debug geometry into.
pub trait DrawBatch {
    /// Draws a closed outline through `points`.
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color);

    /// Fills the convex region bounded by `points`.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color);

    /// Axis-aligned rectangle outline; defaults to the polygon path.
    fn stroke_rect(&mut self, position: Vec2, size: Vec2, color: Color) {
        self.stroke_polygon(&rect_corners(position, size), color);
    }

    /// Axis-aligned rectangle fill; defaults to the polygon path.
    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Color) {
        self.fill_polygon(&rect_corners(position, size), color);
    }
}

fn rect_corners(position: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        position,
        Vec2::new(position.x + size.x, position.y),
        position + size,
        Vec2::new(position.x, position.y + size.y),
    ]
}

/// A batch that records everything it receives. Handy for tests and for
/// hosts that replay debug geometry later in the frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingBatch {
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    StrokePolygon(Vec<Vec2>, Color),
    FillPolygon(Vec<Vec2>, Color),
    StrokeCircle(Vec2, f64, Color),
    FillCircle(Vec2, f64, Color),
}

impl DrawBatch for RecordingBatch {
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::StrokePolygon(points.to_vec(), color));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon(points.to_vec(), color));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle(center, radius, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle(center, radius, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rect_goes_through_polygon() {
        let mut batch = RecordingBatch::default();
        batch.stroke_rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::GREEN);
        assert_eq!(
            batch.commands,
            vec![DrawCommand::StrokePolygon(
                vec![
                    Vec2::new(1.0, 2.0),
                    Vec2::new(4.0, 2.0),
                    Vec2::new(4.0, 6.0),
                    Vec2::new(1.0, 6.0),
                ],
                Color::GREEN
            )]
        );
    }
}
