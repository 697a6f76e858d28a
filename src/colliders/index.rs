//! Seams to the surrounding entity framework.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::collision::aabb::AABB;
use crate::math::vec2::Vec2;

static NEXT_COLLIDER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a collider, used as the spatial index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(u64);

impl ColliderId {
    pub(crate) fn next() -> Self {
        ColliderId(NEXT_COLLIDER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Identity of the entity that owns a collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// The entity a collider is attached to.
pub trait ColliderHost {
    fn entity_id(&self) -> EntityId;

    /// World translation of the entity.
    fn position(&self) -> Vec2;
}

/// Scene-level spatial index the colliders keep informed.
///
/// Implementations must tolerate repeated calls: inserting a known id,
/// updating an unknown one or removing twice are no-ops.
pub trait ColliderIndex {
    fn insert(&mut self, id: ColliderId, bounds: AABB, layer: u32);

    /// Bounds changed in place.
    fn update(&mut self, id: ColliderId, bounds: AABB);

    fn remove(&mut self, id: ColliderId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ColliderId::next();
        let b = ColliderId::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }
}
