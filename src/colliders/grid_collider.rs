use super::cells::CellGrid;
use crate::common::error::Result;
use crate::grid::{CellFlags, GridSpace, Map};
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// Cell storage of a grid collider and the rule that makes a cell solid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCells {
    /// `true` cells are solid.
    Simple(Map<bool>),
    /// Cells holding anything but the map's empty value are solid; with a
    /// filter only that exact value is.
    Indexed { map: Map<i32>, filter: Option<i32> },
    /// Cells sharing at least one bit with `mask` are solid.
    BitFlag { map: Map<CellFlags>, mask: CellFlags },
}

impl GridCells {
    pub fn columns(&self) -> usize {
        match self {
            GridCells::Simple(map) => map.columns(),
            GridCells::Indexed { map, .. } => map.columns(),
            GridCells::BitFlag { map, .. } => map.columns(),
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            GridCells::Simple(map) => map.rows(),
            GridCells::Indexed { map, .. } => map.rows(),
            GridCells::BitFlag { map, .. } => map.rows(),
        }
    }

    pub fn is_solid(&self, col: isize, row: isize) -> bool {
        match self {
            GridCells::Simple(map) => map.get(col, row).copied().unwrap_or(false),
            GridCells::Indexed { map, filter } => match map.get(col, row) {
                Some(value) if value != map.empty() => filter.map_or(true, |f| *value == f),
                _ => false,
            },
            GridCells::BitFlag { map, mask } => {
                map.get(col, row).map_or(false, |flags| flags.intersects(*mask))
            }
        }
    }

    /// Resizes the underlying map; see [`Map::resize`].
    pub fn resize(&mut self, columns: isize, rows: isize) {
        match self {
            GridCells::Simple(map) => map.resize(columns, rows),
            GridCells::Indexed { map, .. } => map.resize(columns, rows),
            GridCells::BitFlag { map, .. } => map.resize(columns, rows),
        }
    }
}

/// Grid of solid rectangular cells anchored at the collider's position.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCollider {
    cells: GridCells,
    space: GridSpace,
}

impl GridCollider {
    pub fn new(cells: GridCells, cell_size: Vec2) -> Result<Self> {
        let space = GridSpace::new(Vec2::ZERO, cell_size, cells.columns(), cells.rows())?;
        Ok(Self { cells, space })
    }

    /// Boolean grid with every cell empty.
    pub fn simple(columns: usize, rows: usize, cell_size: Vec2) -> Result<Self> {
        Self::new(GridCells::Simple(Map::new(columns, rows, false)), cell_size)
    }

    /// Integer grid using `empty` as the unoccupied value.
    pub fn indexed(columns: usize, rows: usize, cell_size: Vec2, empty: i32) -> Result<Self> {
        Self::new(
            GridCells::Indexed {
                map: Map::new(columns, rows, empty),
                filter: None,
            },
            cell_size,
        )
    }

    /// Flag grid where cells matching `mask` are solid.
    pub fn bit_flag(columns: usize, rows: usize, cell_size: Vec2, mask: CellFlags) -> Result<Self> {
        Self::new(
            GridCells::BitFlag {
                map: Map::new(columns, rows, CellFlags::empty()),
                mask,
            },
            cell_size,
        )
    }

    pub fn cells(&self) -> &GridCells {
        &self.cells
    }

    /// Direct access to the cells. Dimension changes are picked up by the
    /// next query.
    pub fn cells_mut(&mut self) -> &mut GridCells {
        &mut self.cells
    }

    pub fn simple_map_mut(&mut self) -> Option<&mut Map<bool>> {
        match &mut self.cells {
            GridCells::Simple(map) => Some(map),
            _ => None,
        }
    }

    pub fn indexed_map_mut(&mut self) -> Option<&mut Map<i32>> {
        match &mut self.cells {
            GridCells::Indexed { map, .. } => Some(map),
            _ => None,
        }
    }

    pub fn flag_map_mut(&mut self) -> Option<&mut Map<CellFlags>> {
        match &mut self.cells {
            GridCells::BitFlag { map, .. } => Some(map),
            _ => None,
        }
    }

    /// Restricts an indexed grid to one value. Ignored by other kinds.
    pub fn set_filter(&mut self, value: Option<i32>) {
        match &mut self.cells {
            GridCells::Indexed { filter, .. } => *filter = value,
            _ => log::warn!("set_filter called on a non-indexed grid"),
        }
    }

    pub fn set_mask(&mut self, value: CellFlags) {
        match &mut self.cells {
            GridCells::BitFlag { mask, .. } => *mask = value,
            _ => log::warn!("set_mask called on a non-bitflag grid"),
        }
    }

    pub fn resize(&mut self, columns: isize, rows: isize) {
        self.cells.resize(columns, rows);
    }

    pub fn is_solid(&self, col: isize, row: isize) -> bool {
        self.cells.is_solid(col, row)
    }

    pub(crate) fn set_origin(&mut self, origin: Vec2) {
        self.space.origin = origin;
    }
}

impl CellGrid for GridCollider {
    fn space(&self) -> GridSpace {
        let mut space = self.space;
        space.set_dimensions(self.cells.columns(), self.cells.rows());
        space
    }

    fn cell_shape(&self, col: usize, row: usize) -> Option<Shape> {
        if !self.cells.is_solid(col as isize, row as isize) {
            return None;
        }
        Some(Shape::Rect(self.space.cell_rect(col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::raycast::Ray;
    use crate::common::{CollisionError, CollisionSettings};
    use crate::shapes::{Circle, Rect};

    fn solid_top_row() -> GridCollider {
        let mut grid = GridCollider::simple(10, 10, Vec2::new(32.0, 32.0)).unwrap();
        grid.simple_map_mut().unwrap().fill(true, 0, 0, 10, 1);
        grid
    }

    #[test]
    fn test_invalid_cell_size_fails_fast() {
        assert!(matches!(
            GridCollider::simple(4, 4, Vec2::new(-1.0, 32.0)),
            Err(CollisionError::InvalidCellSize { .. })
        ));
    }

    #[test]
    fn test_simple_contains() {
        let grid = solid_top_row();
        assert!(grid.contains(Vec2::new(5.0 * 32.0 + 16.0, 16.0)));
        assert!(!grid.contains(Vec2::new(5.0 * 32.0 + 16.0, 48.0)));
        assert!(!grid.contains(Vec2::new(-10.0, 16.0)));
    }

    #[test]
    fn test_origin_follows_position() {
        let mut grid = solid_top_row();
        grid.set_origin(Vec2::new(100.0, 100.0));
        assert!(!grid.contains(Vec2::new(16.0, 16.0)));
        assert!(grid.contains(Vec2::new(116.0, 116.0)));
        assert_eq!(grid.bounds().min, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_indexed_filter() {
        let mut grid = GridCollider::indexed(4, 1, Vec2::new(10.0, 10.0), -1).unwrap();
        {
            let map = grid.indexed_map_mut().unwrap();
            map.set(0, 0, 0);
            map.set(1, 0, 3);
        }
        assert!(grid.is_solid(0, 0));
        assert!(grid.is_solid(1, 0));
        assert!(!grid.is_solid(2, 0));

        grid.set_filter(Some(3));
        assert!(!grid.is_solid(0, 0));
        assert!(grid.is_solid(1, 0));
    }

    #[test]
    fn test_bit_flag_mask() {
        let mut grid = GridCollider::bit_flag(2, 1, Vec2::new(10.0, 10.0), CellFlags::SOLID).unwrap();
        {
            let map = grid.flag_map_mut().unwrap();
            map.set(0, 0, CellFlags::SOLID | CellFlags::LADDER);
            map.set(1, 0, CellFlags::WATER);
        }
        assert!(grid.contains(Vec2::new(5.0, 5.0)));
        assert!(!grid.contains(Vec2::new(15.0, 5.0)));

        grid.set_mask(CellFlags::WATER);
        assert!(grid.contains(Vec2::new(15.0, 5.0)));
        assert!(!grid.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_contacts_row_major_and_deepest() {
        let grid = solid_top_row();
        let settings = CollisionSettings::default();
        // straddles cells 1 and 2 of the solid row, deeper into cell 2
        let query = Shape::Rect(Rect::from_xywh(60.0, 20.0, 20.0, 20.0));
        let contacts = grid.contacts_shape(&query, &settings);
        assert_eq!(contacts.len(), 2);
        assert!(contacts[0].contact_point.x < contacts[1].contact_point.x);

        let deepest = grid.collide_shape(&query, &settings).unwrap();
        assert_eq!(deepest, contacts[1]);
        assert_eq!(deepest.normal, Vec2::UNIT_Y);
        assert_eq!(deepest.depth, 12.0);
        assert!(grid.overlaps_shape(&query, &settings));

        let below = Shape::Circle(Circle::new(Vec2::new(100.0, 100.0), 10.0).unwrap());
        assert!(grid.contacts_shape(&below, &settings).is_empty());
        assert!(!grid.overlaps_shape(&below, &settings));
    }

    #[test]
    fn test_cast_ray_takes_nearest_cell() {
        let grid = solid_top_row();
        let ray = Ray::new(Vec2::new(48.0, 200.0), Vec2::new(0.0, -1.0), 500.0);
        let hit = grid.cast_ray(&ray).unwrap();
        assert!((hit.impact - 168.0).abs() < 1e-9);
        assert_eq!(hit.normal, Vec2::UNIT_Y);

        let miss = Ray::new(Vec2::new(48.0, 200.0), Vec2::new(0.0, -1.0), 100.0);
        assert!(grid.cast_ray(&miss).is_none());
    }

    #[test]
    fn test_queries_far_outside_grid() {
        let mut grid = GridCollider::simple(4, 4, Vec2::new(16.0, 16.0)).unwrap();
        grid.simple_map_mut().unwrap().fill(true, 0, 0, 4, 4);
        let settings = CollisionSettings::default();

        let west = Ray::new(Vec2::new(8.0, 8.0), Vec2::new(-1.0, 0.0), 1e300);
        let hit = grid.cast_ray(&west).unwrap();
        assert_eq!(hit.impact, 0.0);

        let east = Ray::new(Vec2::new(-100.0, 8.0), Vec2::UNIT_X, 1e300);
        let hit = grid.cast_ray(&east).unwrap();
        assert!((hit.impact - 100.0).abs() < 1e-9);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));

        let away = Ray::new(Vec2::new(-100.0, 8.0), Vec2::new(-1.0, 0.0), 1e300);
        assert!(grid.cast_ray(&away).is_none());

        assert!(!grid.contains(Vec2::new(1e300, -1e300)));
        let far = Shape::Circle(Circle::new(Vec2::new(-1e300, 1e300), 5.0).unwrap());
        assert!(grid.contacts_shape(&far, &settings).is_empty());
        let huge = Shape::Rect(Rect::from_xywh(-1e300, -1e300, 2e300, 2e300));
        assert_eq!(grid.shapes_in(&huge.bounds()).len(), 16);
    }

    #[test]
    fn test_resize_updates_space() {
        let mut grid = solid_top_row();
        grid.resize(-2, 3);
        assert_eq!(grid.space().columns(), 2);
        assert_eq!(grid.space().rows(), 3);
        assert!(grid.is_solid(1, 0));
        assert!(!grid.is_solid(5, 0));
    }
}
