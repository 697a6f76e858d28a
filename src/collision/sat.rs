//! Polygon–polygon contact by the separating axis theorem with incident-edge
//! clipping.

use std::cmp::Ordering;

use crate::collision::manifold::Manifold;
use crate::common::CollisionSettings;
use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

/// Best separating face of `reference` against `other`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisQuery {
    pub face: usize,
    /// Signed separation along the face normal; negative when overlapping.
    pub separation: f64,
}

/// The face of `reference` whose plane the other polygon's deepest vertex
/// penetrates least.
pub fn find_axis_least_penetration(reference: &Polygon, other: &Polygon) -> AxisQuery {
    let mut best = AxisQuery {
        face: 0,
        separation: f64::NEG_INFINITY,
    };

    for (i, (vertex, normal)) in reference
        .world_vertices()
        .iter()
        .zip(reference.normals())
        .enumerate()
    {
        let support = other.support(-*normal);
        let separation = normal.dot(support - *vertex);
        if separation > best.separation {
            best = AxisQuery { face: i, separation };
        }
    }

    best
}

/// Contact between two convex polygons, normal pointing from `a` to `b`.
///
/// Touching polygons (zero separation) do not collide. The operands are put
/// in a fixed order before the reference face is chosen, so swapping them
/// only negates the normal.
pub fn polygon_polygon(a: &Polygon, b: &Polygon, settings: &CollisionSettings) -> Option<Manifold> {
    if a.is_degenerate() || b.is_degenerate() {
        return None;
    }
    if canonical_order(a, b) == Ordering::Greater {
        return solve(b, a, settings).map(Manifold::negated);
    }
    solve(a, b, settings)
}

fn canonical_order(a: &Polygon, b: &Polygon) -> Ordering {
    let (ca, cb) = (a.centroid(), b.centroid());
    ca.x.partial_cmp(&cb.x)
        .unwrap_or(Ordering::Equal)
        .then(ca.y.partial_cmp(&cb.y).unwrap_or(Ordering::Equal))
        .then(a.world_vertices().len().cmp(&b.world_vertices().len()))
}

fn solve(a: &Polygon, b: &Polygon, settings: &CollisionSettings) -> Option<Manifold> {
    let query_a = find_axis_least_penetration(a, b);
    if query_a.separation >= 0.0 {
        return None;
    }
    let query_b = find_axis_least_penetration(b, a);
    if query_b.separation >= 0.0 {
        return None;
    }

    let penetration_a = -query_a.separation;
    let penetration_b = -query_b.separation;

    // A only loses the reference role when it is clearly deeper.
    let (reference, incident, face, flip) = if penetration_a * settings.sat_relative_bias
        > penetration_b + settings.sat_absolute_bias
    {
        (b, a, query_b.face, true)
    } else {
        (a, b, query_a.face, false)
    };

    let ref_vertices = reference.world_vertices();
    let ref_normal = reference.normals()[face];
    let v1 = ref_vertices[face];
    let v2 = ref_vertices[(face + 1) % ref_vertices.len()];

    let mut incident_face = incident_edge(incident, ref_normal);

    let side = (v2 - v1).normalize();
    let neg_side = -side.dot(v1);
    let pos_side = side.dot(v2);

    if clip(-side, neg_side, &mut incident_face) < 2 {
        log::trace!("sat: incident edge clipped away on the negative side plane");
        return None;
    }
    if clip(side, pos_side, &mut incident_face) < 2 {
        log::trace!("sat: incident edge clipped away on the positive side plane");
        return None;
    }

    let ref_offset = ref_normal.dot(v1);
    let mut deepest: Option<(Vec2, f64)> = None;
    for point in incident_face {
        let depth = ref_offset - ref_normal.dot(point);
        if depth >= 0.0 && deepest.map_or(true, |(_, best)| depth > best) {
            deepest = Some((point, depth));
        }
    }

    let (contact_point, depth) = deepest?;
    let normal = if flip { -ref_normal } else { ref_normal };
    Some(Manifold::new(normal, depth, contact_point))
}

/// Edge of `incident` whose normal is most anti-parallel to `ref_normal`.
fn incident_edge(incident: &Polygon, ref_normal: Vec2) -> [Vec2; 2] {
    let vertices = incident.world_vertices();
    let mut face = 0;
    let mut min_dot = f64::INFINITY;
    for (i, normal) in incident.normals().iter().enumerate() {
        let d = ref_normal.dot(*normal);
        if d < min_dot {
            min_dot = d;
            face = i;
        }
    }
    [vertices[face], vertices[(face + 1) % vertices.len()]]
}

/// Keeps the part of `face` behind the plane `n·p = c`. Returns how many
/// points survive.
fn clip(n: Vec2, c: f64, face: &mut [Vec2; 2]) -> usize {
    let mut out = *face;
    let mut count = 0;

    let d1 = n.dot(face[0]) - c;
    let d2 = n.dot(face[1]) - c;

    if d1 <= 0.0 {
        out[count] = face[0];
        count += 1;
    }
    if d2 <= 0.0 {
        out[count] = face[1];
        count += 1;
    }

    // the edge crosses the plane
    if d1 * d2 < 0.0 && count < 2 {
        let alpha = d1 / (d1 - d2);
        out[count] = face[0] + (face[1] - face[0]) * alpha;
        count += 1;
    }

    *face = out;
    count
}
