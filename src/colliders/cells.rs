//! Queries shared by every grid-backed collider.
//!
//! A grid narrows a continuous query down to a set of cells, asks each cell
//! for its shape and runs the ordinary narrow-phase test on it. Cell shapes
//! are built on demand and dropped after the query.

use crate::collision::aabb::AABB;
use crate::collision::detection;
use crate::collision::manifold::Manifold;
use crate::collision::raycast::{Ray, Raycast};
use crate::common::{Color, CollisionSettings, DrawBatch};
use crate::grid::GridSpace;
use crate::math::vec2::Vec2;
use crate::shapes::{LineSegment, Shape};

pub trait CellGrid {
    /// Current placement of the grid in the world.
    fn space(&self) -> GridSpace;

    /// World-space shape of an occupied cell, `None` for empty cells.
    fn cell_shape(&self, col: usize, row: usize) -> Option<Shape>;

    fn bounds(&self) -> AABB {
        self.space().bounds()
    }

    /// Shapes of the occupied cells touched by `area`, row-major.
    fn shapes_in(&self, area: &AABB) -> Vec<Shape> {
        self.space()
            .place_rect(area)
            .into_iter()
            .filter_map(|(col, row)| self.cell_shape(col, row))
            .collect()
    }

    fn contains(&self, point: Vec2) -> bool {
        self.space()
            .place_point(point)
            .and_then(|(col, row)| self.cell_shape(col, row))
            .map_or(false, |shape| shape.contains(point))
    }

    /// Nearest hit among the cells the ray walks through.
    fn cast_ray(&self, ray: &Ray) -> Option<Raycast> {
        if ray.is_degenerate() {
            return None;
        }
        let segment = LineSegment::new(ray.origin, ray.end());
        let mut nearest: Option<Raycast> = None;
        for (col, row) in self.space().place_segment(&segment) {
            let hit = self.cell_shape(col, row).and_then(|shape| shape.cast_ray(ray));
            if let Some(hit) = hit {
                if nearest.map_or(true, |best| hit.impact < best.impact) {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }

    fn overlaps_shape(&self, shape: &Shape, settings: &CollisionSettings) -> bool {
        self.shapes_in(&shape.bounds())
            .iter()
            .any(|cell| detection::overlaps_with(cell, shape, settings))
    }

    /// Every cell contact with `shape`, row-major. Normals point from the
    /// grid towards `shape`.
    fn contacts_shape(&self, shape: &Shape, settings: &CollisionSettings) -> Vec<Manifold> {
        self.shapes_in(&shape.bounds())
            .iter()
            .filter_map(|cell| detection::collide_with(cell, shape, settings))
            .collect()
    }

    /// The deepest cell contact; the earliest cell wins ties.
    fn collide_shape(&self, shape: &Shape, settings: &CollisionSettings) -> Option<Manifold> {
        deepest(self.contacts_shape(shape, settings))
    }

    fn draw(&self, batch: &mut dyn DrawBatch, stroke: Color, fill: Option<Color>) {
        for shape in self.shapes_in(&self.bounds()) {
            shape.draw(batch, stroke, fill);
        }
    }
}

pub(crate) fn deepest(contacts: Vec<Manifold>) -> Option<Manifold> {
    let mut best: Option<Manifold> = None;
    for contact in contacts {
        if best.map_or(true, |b| contact.depth > b.depth) {
            best = Some(contact);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deepest_keeps_first_on_ties() {
        let first = Manifold::new(Vec2::UNIT_X, 2.0, Vec2::ZERO);
        let second = Manifold::new(Vec2::UNIT_Y, 2.0, Vec2::ONE);
        let shallow = Manifold::new(-Vec2::UNIT_X, 1.0, Vec2::ONE);
        assert_eq!(deepest(vec![shallow, first, second]), Some(first));
        assert_eq!(deepest(Vec::new()), None);
    }
}
