use std::collections::HashMap;

use super::cells::CellGrid;
use crate::collision::aabb::AABB;
use crate::common::error::{CollisionError, Result};
use crate::grid::{GridSpace, Map};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Polygon, Rect, Shape};

/// Tile id that marks an empty cell.
pub const EMPTY_TILE: i32 = 0;

/// Collision shape shared by every cell holding the same tile id.
///
/// Coordinates are offsets from the cell's top-left corner, in world units.
#[derive(Debug, Clone, PartialEq)]
pub enum TileTemplate {
    /// The whole cell.
    Full,
    Rect { position: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f64 },
    Polygon(Vec<Vec2>),
}

impl TileTemplate {
    /// True when the template lies within a cell of `cell_size`, edges included.
    pub fn fits(&self, cell_size: Vec2) -> bool {
        let cell = AABB::new(Vec2::ZERO, cell_size);
        match self {
            TileTemplate::Full => true,
            TileTemplate::Rect { position, size } => {
                cell.contains(*position) && cell.contains(*position + *size)
            }
            TileTemplate::Circle { center, radius } => {
                let reach = Vec2::new(*radius, *radius);
                cell.contains(*center - reach) && cell.contains(*center + reach)
            }
            TileTemplate::Polygon(vertices) => vertices.iter().all(|v| cell.contains(*v)),
        }
    }
}

/// Concrete world-space shape of `template` placed in cell `(col, row)`.
///
/// A fresh value on every call; nothing is cached.
pub fn instantiate(template: &TileTemplate, col: usize, row: usize, space: &GridSpace) -> Shape {
    let origin = space.cell_origin(col, row);
    match template {
        TileTemplate::Full => Shape::Rect(Rect::new(origin, space.cell_size())),
        TileTemplate::Rect { position, size } => Shape::Rect(Rect::new(origin + *position, *size)),
        TileTemplate::Circle { center, radius } => Shape::Circle(Circle {
            center: origin + *center,
            radius: *radius,
        }),
        TileTemplate::Polygon(vertices) => Shape::Polygon(Polygon::with_transform(
            vertices.clone(),
            Transform::new(origin, 0.0),
        )),
    }
}

/// Tile id → template lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSet {
    templates: HashMap<i32, TileTemplate>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template. The empty id, an id already in use and
    /// templates that cannot enclose an area are rejected. Whether the
    /// template fits a cell is checked by the tile map that uses the set.
    pub fn insert(&mut self, id: i32, template: TileTemplate) -> Result<()> {
        if id == EMPTY_TILE {
            return Err(CollisionError::ReservedTileId(id));
        }
        if self.templates.contains_key(&id) {
            return Err(CollisionError::DuplicateTile(id));
        }
        match &template {
            TileTemplate::Circle { radius, .. } => {
                Circle::new(Vec2::ZERO, *radius)?;
            }
            TileTemplate::Polygon(vertices) => {
                if Polygon::new(vertices.clone()).is_degenerate() {
                    return Err(CollisionError::DegenerateTemplate {
                        id,
                        vertices: vertices.len(),
                    });
                }
            }
            TileTemplate::Full | TileTemplate::Rect { .. } => {}
        }
        self.templates.insert(id, template);
        Ok(())
    }

    /// Builder form of [`TileSet::insert`].
    pub fn with(mut self, id: i32, template: TileTemplate) -> Result<Self> {
        self.insert(id, template)?;
        Ok(self)
    }

    pub fn get(&self, id: i32) -> Option<&TileTemplate> {
        self.templates.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &TileTemplate)> + '_ {
        self.templates.iter().map(|(id, template)| (*id, template))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Grid of tile ids whose cells resolve to template shapes at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMapCollider {
    map: Map<i32>,
    tiles: TileSet,
    space: GridSpace,
}

impl TileMapCollider {
    /// Fails on a bad cell size or on any template that overhangs a cell.
    pub fn new(columns: usize, rows: usize, cell_size: Vec2, tiles: TileSet) -> Result<Self> {
        let space = GridSpace::new(Vec2::ZERO, cell_size, columns, rows)?;
        for (id, template) in tiles.iter() {
            check_fit(id, template, cell_size)?;
        }
        Ok(Self {
            map: Map::new(columns, rows, EMPTY_TILE),
            tiles,
            space,
        })
    }

    pub fn map(&self) -> &Map<i32> {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map<i32> {
        &mut self.map
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Adds a template to this map's tile set.
    pub fn insert_tile(&mut self, id: i32, template: TileTemplate) -> Result<()> {
        check_fit(id, &template, self.space.cell_size())?;
        self.tiles.insert(id, template)
    }

    pub fn set_tile(&mut self, col: isize, row: isize, id: i32) -> bool {
        self.map.set(col, row, id)
    }

    pub(crate) fn set_origin(&mut self, origin: Vec2) {
        self.space.origin = origin;
    }
}

fn check_fit(id: i32, template: &TileTemplate, cell_size: Vec2) -> Result<()> {
    if template.fits(cell_size) {
        return Ok(());
    }
    Err(CollisionError::TemplateOutsideCell {
        id,
        width: cell_size.x,
        height: cell_size.y,
    })
}

impl CellGrid for TileMapCollider {
    fn space(&self) -> GridSpace {
        let mut space = self.space;
        space.set_dimensions(self.map.columns(), self.map.rows());
        space
    }

    fn cell_shape(&self, col: usize, row: usize) -> Option<Shape> {
        let id = *self.map.get(col as isize, row as isize)?;
        if id == EMPTY_TILE {
            return None;
        }
        match self.tiles.get(id) {
            Some(template) => Some(instantiate(template, col, row, &self.space)),
            None => {
                log::trace!("tile id {} at ({}, {}) has no template", id, col, row);
                None
            }
        }
    }
}
