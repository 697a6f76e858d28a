//! Colliders: shapes and grids attached to an entity.
//!
//! A collider keeps its geometry in local space (relative to the owning
//! entity) and a world-space copy derived from `local_offset + entity
//! position`. Every change re-derives the world copy and, while the collider
//! is registered, pushes the new bounds to the spatial index as an in-place
//! update.

pub mod cells;
pub mod grid_collider;
pub mod index;
pub mod tile_map;

pub use cells::CellGrid;
pub use grid_collider::{GridCells, GridCollider};
pub use index::{ColliderHost, ColliderId, ColliderIndex, EntityId};
pub use tile_map::{instantiate, TileMapCollider, TileSet, TileTemplate, EMPTY_TILE};

use crate::collision::aabb::AABB;
use crate::collision::detection;
use crate::collision::manifold::Manifold;
use crate::collision::raycast::{Ray, Raycast};
use crate::common::error::Result;
use crate::common::{Color, CollisionSettings, DrawBatch};
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Polygon, Rect, Shape};

/// A shape in collider-local space and its world-space placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCollider {
    local: Shape,
    world: Shape,
}

impl ShapeCollider {
    pub fn new(local: Shape) -> Self {
        Self {
            world: local.clone(),
            local,
        }
    }

    pub fn local(&self) -> &Shape {
        &self.local
    }

    pub fn world(&self) -> &Shape {
        &self.world
    }

    fn place(&mut self, position: Vec2) {
        self.world = self.local.translated(position);
    }
}

/// The geometry a collider wraps.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderKind {
    Shape(ShapeCollider),
    Grid(GridCollider),
    TileMap(TileMapCollider),
}

impl ColliderKind {
    /// Grid-backed variants as a cell query.
    pub fn as_cells(&self) -> Option<&dyn CellGrid> {
        match self {
            ColliderKind::Shape(_) => None,
            ColliderKind::Grid(grid) => Some(grid),
            ColliderKind::TileMap(tiles) => Some(tiles),
        }
    }

    fn place(&mut self, position: Vec2) {
        match self {
            ColliderKind::Shape(shape) => shape.place(position),
            ColliderKind::Grid(grid) => grid.set_origin(position),
            ColliderKind::TileMap(tiles) => tiles.set_origin(position),
        }
    }
}

/// Lifecycle state as seen from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderState {
    Unattached,
    Attached,
    Registered,
}

#[derive(Debug)]
pub struct Collider {
    id: ColliderId,
    kind: ColliderKind,
    local_offset: Vec2,
    absolute_position: Vec2,
    entity: Option<EntityId>,
    registered: bool,
    layer: u32,
    settings: CollisionSettings,
}

impl Collider {
    pub const DEFAULT_LAYER: u32 = 1;

    pub fn new(kind: ColliderKind) -> Self {
        let mut collider = Self {
            id: ColliderId::next(),
            kind,
            local_offset: Vec2::ZERO,
            absolute_position: Vec2::ZERO,
            entity: None,
            registered: false,
            layer: Self::DEFAULT_LAYER,
            settings: CollisionSettings::default(),
        };
        collider.refresh();
        collider
    }

    pub fn from_shape(shape: impl Into<Shape>) -> Self {
        Self::new(ColliderKind::Shape(ShapeCollider::new(shape.into())))
    }

    /// Circle centered on the collider's position.
    pub fn circle(radius: f64) -> Result<Self> {
        Ok(Self::from_shape(Circle::new(Vec2::ZERO, radius)?))
    }

    /// Rectangle centered on the collider's position.
    pub fn rect(width: f64, height: f64) -> Self {
        let size = Vec2::new(width, height);
        Self::from_shape(Rect::new(size * -0.5, size))
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Self::from_shape(Polygon::new(vertices))
    }

    pub fn grid(grid: GridCollider) -> Self {
        Self::new(ColliderKind::Grid(grid))
    }

    pub fn tile_map(tiles: TileMapCollider) -> Self {
        Self::new(ColliderKind::TileMap(tiles))
    }

    pub fn with_settings(mut self, settings: CollisionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_local_offset(mut self, offset: Vec2) -> Self {
        self.absolute_position = self.absolute_position - self.local_offset + offset;
        self.local_offset = offset;
        self.refresh();
        self
    }

    pub fn id(&self) -> ColliderId {
        self.id
    }

    pub fn kind(&self) -> &ColliderKind {
        &self.kind
    }

    pub fn settings(&self) -> &CollisionSettings {
        &self.settings
    }

    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn local_offset(&self) -> Vec2 {
        self.local_offset
    }

    /// `local_offset` plus the owning entity's position.
    pub fn absolute_position(&self) -> Vec2 {
        self.absolute_position
    }

    pub fn state(&self) -> ColliderState {
        match (self.entity, self.registered) {
            (_, true) => ColliderState::Registered,
            (Some(_), false) => ColliderState::Attached,
            (None, false) => ColliderState::Unattached,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// World-space shape of a shape collider.
    pub fn shape(&self) -> Option<&Shape> {
        match &self.kind {
            ColliderKind::Shape(shape) => Some(shape.world()),
            _ => None,
        }
    }

    pub fn bounds(&self) -> AABB {
        match &self.kind {
            ColliderKind::Shape(shape) => shape.world().bounds(),
            ColliderKind::Grid(grid) => grid.bounds(),
            ColliderKind::TileMap(tiles) => tiles.bounds(),
        }
    }

    // --- Lifecycle hooks ---

    /// The collider was added to an entity: link it, place it, and register
    /// it with the index.
    pub fn on_added(&mut self, host: &dyn ColliderHost, index: &mut dyn ColliderIndex) {
        self.entity = Some(host.entity_id());
        self.absolute_position = self.local_offset + host.position();
        self.refresh();
        log::debug!("collider {:?} attached to {:?}", self.id, host.entity_id());
        self.register(index);
    }

    /// The collider was removed from its entity. Safe to call at any time.
    pub fn on_removed(&mut self, index: &mut dyn ColliderIndex) {
        self.unregister(index);
        if let Some(entity) = self.entity.take() {
            log::debug!("collider {:?} detached from {:?}", self.id, entity);
        }
    }

    /// The owning entity moved.
    pub fn on_transformed(&mut self, host: &dyn ColliderHost, index: &mut dyn ColliderIndex) {
        self.absolute_position = self.local_offset + host.position();
        self.refresh();
        self.push_update(index);
    }

    /// The owning entity entered the scene.
    pub fn on_entity_added(&mut self, index: &mut dyn ColliderIndex) {
        if self.entity.is_some() {
            self.register(index);
        }
    }

    /// The owning entity left the scene; the entity link is kept.
    pub fn on_entity_removed(&mut self, index: &mut dyn ColliderIndex) {
        self.unregister(index);
    }

    /// The collision layer changed, so the index entry is re-filed.
    pub fn on_layer_changed(&mut self, index: &mut dyn ColliderIndex) {
        if self.registered {
            index.remove(self.id);
            index.insert(self.id, self.bounds(), self.layer);
            log::debug!("collider {:?} moved to layer {}", self.id, self.layer);
        }
    }

    pub fn set_layer(&mut self, layer: u32, index: &mut dyn ColliderIndex) {
        if self.layer != layer {
            self.layer = layer;
            self.on_layer_changed(index);
        }
    }

    // --- Mutation ---

    pub fn set_local_offset(&mut self, offset: Vec2, index: &mut dyn ColliderIndex) {
        self.absolute_position = self.absolute_position - self.local_offset + offset;
        self.local_offset = offset;
        self.refresh();
        self.push_update(index);
    }

    /// Replaces the local shape of a shape collider.
    pub fn set_shape(&mut self, shape: impl Into<Shape>, index: &mut dyn ColliderIndex) {
        match &mut self.kind {
            ColliderKind::Shape(current) => *current = ShapeCollider::new(shape.into()),
            _ => {
                log::warn!("set_shape called on grid collider {:?}; ignored", self.id);
                return;
            }
        }
        self.refresh();
        self.push_update(index);
    }

    /// Edits the wrapped geometry in place, then re-derives the world state
    /// and updates the index.
    pub fn modify<F>(&mut self, index: &mut dyn ColliderIndex, edit: F)
    where
        F: FnOnce(&mut ColliderKind),
    {
        edit(&mut self.kind);
        self.refresh();
        self.push_update(index);
    }

    fn refresh(&mut self) {
        self.kind.place(self.absolute_position);
    }

    fn register(&mut self, index: &mut dyn ColliderIndex) {
        if !self.registered {
            index.insert(self.id, self.bounds(), self.layer);
            self.registered = true;
            log::debug!("collider {:?} registered", self.id);
        }
    }

    fn unregister(&mut self, index: &mut dyn ColliderIndex) {
        if self.registered {
            index.remove(self.id);
            self.registered = false;
            log::debug!("collider {:?} unregistered", self.id);
        }
    }

    fn push_update(&self, index: &mut dyn ColliderIndex) {
        if self.registered {
            index.update(self.id, self.bounds());
        }
    }

    // --- Queries ---

    pub fn contains(&self, point: Vec2) -> bool {
        match &self.kind {
            ColliderKind::Shape(shape) => shape.world().contains(point),
            ColliderKind::Grid(grid) => grid.contains(point),
            ColliderKind::TileMap(tiles) => tiles.contains(point),
        }
    }

    pub fn cast_ray(&self, ray: &Ray) -> Option<Raycast> {
        match &self.kind {
            ColliderKind::Shape(shape) => shape.world().cast_ray(ray),
            ColliderKind::Grid(grid) => grid.cast_ray(ray),
            ColliderKind::TileMap(tiles) => tiles.cast_ray(ray),
        }
    }

    pub fn overlaps_shape(&self, shape: &Shape) -> bool {
        match &self.kind {
            ColliderKind::Shape(own) => detection::overlaps_with(own.world(), shape, &self.settings),
            ColliderKind::Grid(grid) => grid.overlaps_shape(shape, &self.settings),
            ColliderKind::TileMap(tiles) => tiles.overlaps_shape(shape, &self.settings),
        }
    }

    /// Contact with `shape`, normal pointing from this collider towards it.
    /// Grid colliders report their deepest cell contact.
    pub fn collide_shape(&self, shape: &Shape) -> Option<Manifold> {
        match &self.kind {
            ColliderKind::Shape(own) => detection::collide_with(own.world(), shape, &self.settings),
            ColliderKind::Grid(grid) => grid.collide_shape(shape, &self.settings),
            ColliderKind::TileMap(tiles) => tiles.collide_shape(shape, &self.settings),
        }
    }

    /// Every contact with `shape`: at most one for shape colliders, one per
    /// touching cell (row-major) for grids.
    pub fn contacts_shape(&self, shape: &Shape) -> Vec<Manifold> {
        match self.kind.as_cells() {
            Some(cells) => cells.contacts_shape(shape, &self.settings),
            None => self.collide_shape(shape).into_iter().collect(),
        }
    }

    pub fn overlaps(&self, other: &Collider) -> bool {
        match (&self.kind, other.kind.as_cells()) {
            (ColliderKind::Shape(own), _) => other.overlaps_shape(own.world()),
            (_, None) => other
                .shape()
                .map_or(false, |shape| self.overlaps_shape(shape)),
            (_, Some(cells)) => self.cell_shapes_near(other).iter().any(|cell| {
                cells.overlaps_shape(cell, &self.settings)
            }),
        }
    }

    /// Contact with another collider, normal pointing from `self` to `other`.
    pub fn collide(&self, other: &Collider) -> Option<Manifold> {
        match (&self.kind, &other.kind) {
            (ColliderKind::Shape(a), ColliderKind::Shape(b)) => {
                detection::collide_with(a.world(), b.world(), &self.settings)
            }
            (ColliderKind::Shape(a), _) => other.collide_shape(a.world()).map(Manifold::negated),
            (_, ColliderKind::Shape(b)) => self.collide_shape(b.world()),
            _ => cells::deepest(self.contacts(other)),
        }
    }

    /// Every contact with another collider, normals from `self` to `other`.
    /// Grid pairs walk this collider's cells row-major and append the other
    /// grid's contacts for each.
    pub fn contacts(&self, other: &Collider) -> Vec<Manifold> {
        match (&self.kind, &other.kind) {
            (ColliderKind::Shape(a), _) => other
                .contacts_shape(a.world())
                .into_iter()
                .map(Manifold::negated)
                .collect(),
            (_, ColliderKind::Shape(b)) => self.contacts_shape(b.world()),
            _ => {
                let Some(theirs) = other.kind.as_cells() else {
                    return Vec::new();
                };
                let mut contacts = Vec::new();
                for cell in self.cell_shapes_near(other) {
                    contacts.extend(
                        theirs
                            .contacts_shape(&cell, &self.settings)
                            .into_iter()
                            .map(Manifold::negated),
                    );
                }
                contacts
            }
        }
    }

    /// This grid's occupied cell shapes inside `other`'s bounds.
    fn cell_shapes_near(&self, other: &Collider) -> Vec<Shape> {
        self.kind
            .as_cells()
            .map(|cells| cells.shapes_in(&other.bounds()))
            .unwrap_or_default()
    }

    pub fn draw(&self, batch: &mut dyn DrawBatch, stroke: Color, fill: Option<Color>) {
        match &self.kind {
            ColliderKind::Shape(shape) => shape.world().draw(batch, stroke, fill),
            ColliderKind::Grid(grid) => grid.draw(batch, stroke, fill),
            ColliderKind::TileMap(tiles) => tiles.draw(batch, stroke, fill),
        }
    }
}

impl Clone for Collider {
    /// A detached copy with its own id. Geometry and world placement are
    /// kept, so the copy collides exactly like the original.
    fn clone(&self) -> Self {
        Self {
            id: ColliderId::next(),
            kind: self.kind.clone(),
            local_offset: self.local_offset,
            absolute_position: self.absolute_position,
            entity: None,
            registered: false,
            layer: self.layer,
            settings: self.settings,
        }
    }
}
