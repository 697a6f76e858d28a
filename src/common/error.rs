//! Construction-time errors. Queries never produce these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Grid cells must have a positive, finite width and height.
    #[error("invalid cell size {width}x{height}: both dimensions must be positive and finite")]
    InvalidCellSize { width: f64, height: f64 },

    /// Tile id 0 marks an empty cell and cannot carry a template.
    #[error("tile id {0} is reserved for empty cells")]
    ReservedTileId(i32),

    #[error("tile id {0} already has a template")]
    DuplicateTile(i32),

    /// Polygon templates need at least three non-collinear vertices.
    #[error("tile {id} polygon template is degenerate ({vertices} vertices or zero area)")]
    DegenerateTemplate { id: i32, vertices: usize },

    /// Cells only collide with what lies inside them.
    #[error("tile {id} template does not fit a {width}x{height} cell")]
    TemplateOutsideCell { id: i32, width: f64, height: f64 },

    #[error("invalid radius {0}: must be non-negative and finite")]
    InvalidRadius(f64),

    #[error("invalid collision settings: {0}")]
    Settings(String),
}

pub type Result<T, E = CollisionError> = std::result::Result<T, E>;
