// Conversions between world space and the cells of a uniform grid.

use crate::collision::aabb::AABB;
use crate::common::error::{CollisionError, Result};
use crate::math::vec2::Vec2;
use crate::shapes::{LineSegment, Rect};

/// Placement of a `columns × rows` grid in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpace {
    /// World position of the top-left corner of cell `(0, 0)`.
    pub origin: Vec2,
    cell_size: Vec2,
    inv_cell_size: Vec2, // cached reciprocal of cell_size
    columns: usize,
    rows: usize,
}

impl GridSpace {
    /// Creates a grid placement. Cell sizes must be positive and finite.
    pub fn new(origin: Vec2, cell_size: Vec2, columns: usize, rows: usize) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size.x > 0.0 && cell_size.y > 0.0) {
            return Err(CollisionError::InvalidCellSize {
                width: cell_size.x,
                height: cell_size.y,
            });
        }
        Ok(Self {
            origin,
            cell_size,
            inv_cell_size: Vec2::new(1.0 / cell_size.x, 1.0 / cell_size.y),
            columns,
            rows,
        })
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn set_dimensions(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
    }

    /// World-space area covered by the whole grid.
    pub fn bounds(&self) -> AABB {
        AABB::from_position_size(
            self.origin,
            self.cell_size.component_mul(Vec2::new(self.columns as f64, self.rows as f64)),
        )
    }

    /// Converts world coordinates to (possibly out-of-range) cell indices.
    #[inline]
    pub fn cell_at(&self, point: Vec2) -> (isize, isize) {
        let local = (point - self.origin).component_mul(self.inv_cell_size);
        (local.x.floor() as isize, local.y.floor() as isize)
    }

    pub fn contains_cell(&self, col: isize, row: isize) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.columns && (row as usize) < self.rows
    }

    /// World position of a cell's top-left corner.
    pub fn cell_origin(&self, col: usize, row: usize) -> Vec2 {
        self.origin + self.cell_size.component_mul(Vec2::new(col as f64, row as f64))
    }

    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(self.cell_origin(col, row), self.cell_size)
    }

    /// The single in-grid cell under `point`.
    pub fn place_point(&self, point: Vec2) -> Option<(usize, usize)> {
        if !point.is_finite() {
            return None;
        }
        let (col, row) = self.cell_at(point);
        self.contains_cell(col, row).then(|| (col as usize, row as usize))
    }

    /// Cells along a segment, walked low-X to high-X. The segment is clipped
    /// to the grid first, so the walk never leaves the grid by more than a cell.
    pub fn place_segment(&self, segment: &LineSegment) -> Vec<(usize, usize)> {
        if !(segment.a.is_finite() && segment.b.is_finite()) {
            return Vec::new();
        }
        let segment = match clip_segment(segment, &self.bounds()) {
            Some(clipped) => clipped,
            None => return Vec::new(),
        };
        let (x0, y0) = self.cell_at(segment.a);
        let (x1, y1) = self.cell_at(segment.b);
        bresenham(x0, y0, x1, y1)
            .into_iter()
            .filter(|&(c, r)| self.contains_cell(c, r))
            .map(|(c, r)| (c as usize, r as usize))
            .collect()
    }

    /// Every in-grid cell an axis-aligned box touches, row-major.
    ///
    /// A cell boundary that coincides with the box's far edge is not included,
    /// so a grid-aligned box of `w × h` yields `ceil(w / cell_w) × ceil(h / cell_h)`
    /// cells. A zero-area box still yields the cell it sits in.
    pub fn place_rect(&self, area: &AABB) -> Vec<(usize, usize)> {
        let (min_col, min_row, max_col, max_row) = match self.cell_range(area) {
            Some(range) => range,
            None => return Vec::new(),
        };

        let mut cells = Vec::with_capacity((max_col - min_col) * (max_row - min_row));
        for row in min_row..max_row {
            for col in min_col..max_col {
                cells.push((col, row));
            }
        }
        cells
    }

    /// Half-open, clamped column and row range covered by an AABB.
    fn cell_range(&self, area: &AABB) -> Option<(usize, usize, usize, usize)> {
        if !(area.min.is_finite() && area.max.is_finite()) {
            return None;
        }
        let min = (area.min - self.origin).component_mul(self.inv_cell_size);
        let max = (area.max - self.origin).component_mul(self.inv_cell_size);

        let first_col = min.x.floor();
        let first_row = min.y.floor();
        let end_col = max.x.ceil().max(first_col + 1.0);
        let end_row = max.y.ceil().max(first_row + 1.0);

        let clamp = |v: f64, limit: usize| v.max(0.0).min(limit as f64) as usize;
        let range = (
            clamp(first_col, self.columns),
            clamp(first_row, self.rows),
            clamp(end_col, self.columns),
            clamp(end_row, self.rows),
        );
        (range.0 < range.2 && range.1 < range.3).then_some(range)
    }
}

/// Liang-Barsky clip of a segment against a box. `None` when they do not meet.
fn clip_segment(segment: &LineSegment, area: &AABB) -> Option<LineSegment> {
    let delta = segment.direction();
    if !delta.is_finite() {
        return None;
    }

    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    let edges = [
        (-delta.x, segment.a.x - area.min.x),
        (delta.x, area.max.x - segment.a.x),
        (-delta.y, segment.a.y - area.min.y),
        (delta.y, area.max.y - segment.a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }

    // rounding on very long segments can land just outside the box
    let clamp = |point: Vec2| point.max(area.min).min(area.max);
    Some(LineSegment::new(
        clamp(segment.a + delta * t_enter),
        clamp(segment.a + delta * t_exit),
    ))
}

/// Integer line walk between two cells. Steep lines are walked with X and Y
/// swapped; the walk always runs from the lower to the higher major coordinate.
pub fn bresenham(mut x0: isize, mut y0: isize, mut x1: isize, mut y1: isize) -> Vec<(isize, isize)> {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let y_step = if y0 < y1 { 1 } else { -1 };
    let mut error = dx / 2;
    let mut y = y0;

    let mut cells = Vec::with_capacity(dx as usize + 1);
    for x in x0..=x1 {
        cells.push(if steep { (y, x) } else { (x, y) });
        error -= dy;
        if error < 0 {
            y += y_step;
            error += dx;
        }
    }
    cells
}
