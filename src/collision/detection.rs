//! Narrow-phase tests for every pair of shape kinds.
//!
//! Each pair has a boolean form and a manifold form. Manifold normals point
//! from the first operand towards the second; the reversed pairings reuse the
//! forward routine and negate the result.

use super::gjk::{self, DistanceProxy};
use super::manifold::Manifold;
use super::sat;
use crate::common::CollisionSettings;
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Polygon, Rect, Shape};

/// Do `a` and `b` overlap, using the default settings.
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    overlaps_with(a, b, &CollisionSettings::default())
}

/// Boolean overlap. Circles and rectangles are tested directly; any pairing
/// with a polygon asks GJK whether the rounded distance is zero.
pub fn overlaps_with(a: &Shape, b: &Shape, settings: &CollisionSettings) -> bool {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => circles_overlap(a, b),
        (Shape::Circle(c), Shape::Rect(r)) | (Shape::Rect(r), Shape::Circle(c)) => {
            circle_rect_overlap(c, r)
        }
        (Shape::Rect(a), Shape::Rect(b)) => rects_overlap(a, b),
        (Shape::Polygon(p), _) | (_, Shape::Polygon(p)) if p.is_degenerate() => false,
        _ => gjk::overlaps_with(a, b, settings),
    }
}

/// Contact between `a` and `b`, using the default settings.
pub fn collide(a: &Shape, b: &Shape) -> Option<Manifold> {
    collide_with(a, b, &CollisionSettings::default())
}

pub fn collide_with(a: &Shape, b: &Shape, settings: &CollisionSettings) -> Option<Manifold> {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => check_circle_circle(a, b),
        (Shape::Circle(c), Shape::Rect(r)) => check_circle_rect(c, r),
        (Shape::Rect(r), Shape::Circle(c)) => check_circle_rect(c, r).map(Manifold::negated),
        (Shape::Rect(a), Shape::Rect(b)) => check_rect_rect(a, b),
        (Shape::Circle(c), Shape::Polygon(p)) => check_circle_polygon(c, p, settings),
        (Shape::Polygon(p), Shape::Circle(c)) => {
            check_circle_polygon(c, p, settings).map(Manifold::negated)
        }
        (Shape::Rect(r), Shape::Polygon(p)) => check_rect_polygon(r, p, settings),
        (Shape::Polygon(p), Shape::Rect(r)) => {
            check_rect_polygon(r, p, settings).map(Manifold::negated)
        }
        (Shape::Polygon(a), Shape::Polygon(b)) => sat::polygon_polygon(a, b, settings),
    }
}

pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let radii_sum = a.radius + b.radius;
    a.center.distance_squared(b.center) < radii_sum * radii_sum
}

/// Checks for collision between two circles.
pub fn check_circle_circle(a: &Circle, b: &Circle) -> Option<Manifold> {
    if !circles_overlap(a, b) {
        return None;
    }

    let dist_vec = b.center - a.center;
    let distance = dist_vec.magnitude();
    let normal = if distance > 0.0 {
        dist_vec / distance
    } else {
        // coincident centers
        Vec2::UNIT_Y
    };

    Some(Manifold::new(
        normal,
        a.radius + b.radius - distance,
        a.center + normal * a.radius,
    ))
}

pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let closest = rect.clamp(circle.center);
    closest == circle.center
        || closest.distance_squared(circle.center) < circle.radius * circle.radius
}

/// Checks for collision between a circle and a rectangle; the normal points
/// from the circle into the rectangle.
pub fn check_circle_rect(circle: &Circle, rect: &Rect) -> Option<Manifold> {
    let closest = rect.clamp(circle.center);

    if closest != circle.center {
        let dist_vec = closest - circle.center;
        let dist_sq = dist_vec.magnitude_squared();
        if dist_sq >= circle.radius * circle.radius {
            return None;
        }
        let distance = dist_sq.sqrt();
        return Some(Manifold::new(
            dist_vec / distance,
            circle.radius - distance,
            closest,
        ));
    }

    // Center inside: push out through the nearest side, X before Y.
    let half = rect.half_extents();
    let box_center = rect.center();
    let offset = circle.center - box_center;
    let pen_x = half.x - offset.x.abs();
    let pen_y = half.y - offset.y.abs();

    let manifold = if pen_x <= pen_y {
        let side = sign_or_positive(offset.x);
        Manifold::new(
            Vec2::new(-side, 0.0),
            pen_x + circle.radius,
            Vec2::new(box_center.x + side * half.x, circle.center.y),
        )
    } else {
        let side = sign_or_positive(offset.y);
        Manifold::new(
            Vec2::new(0.0, -side),
            pen_y + circle.radius,
            Vec2::new(circle.center.x, box_center.y + side * half.y),
        )
    };
    Some(manifold)
}

/// Strict on every edge: shared edges do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.right() > b.left() && b.right() > a.left() && a.bottom() > b.top() && b.bottom() > a.top()
}

/// Checks for collision between two rectangles, resolving along the axis of
/// least overlap (X on ties).
pub fn check_rect_rect(a: &Rect, b: &Rect) -> Option<Manifold> {
    if !rects_overlap(a, b) {
        return None;
    }

    let half_a = a.half_extents();
    let half_b = b.half_extents();
    let delta = b.center() - a.center();
    let overlap_x = half_a.x + half_b.x - delta.x.abs();
    let overlap_y = half_a.y + half_b.y - delta.y.abs();

    let (normal, depth) = if overlap_x <= overlap_y {
        (Vec2::new(sign_or_positive(delta.x), 0.0), overlap_x)
    } else {
        (Vec2::new(0.0, sign_or_positive(delta.y)), overlap_y)
    };

    Some(Manifold::new(
        normal,
        depth,
        a.center() + normal.component_mul(half_a),
    ))
}

/// Checks for collision between a circle and a convex polygon.
///
/// GJK finds the closest points while the center is outside the polygon.
/// Once the center is inside, the face plane it is closest to becomes the
/// separating plane.
pub fn check_circle_polygon(
    circle: &Circle,
    polygon: &Polygon,
    settings: &CollisionSettings,
) -> Option<Manifold> {
    if polygon.is_degenerate() {
        return None;
    }

    let output = gjk::distance_proxies(
        &DistanceProxy::new(std::slice::from_ref(&circle.center), circle.radius),
        &DistanceProxy::new(polygon.world_vertices(), 0.0),
        false,
        settings,
    );

    if output.distance > settings.epsilon {
        if output.distance >= circle.radius {
            return None;
        }
        let normal = (output.point_b - output.point_a) / output.distance;
        return Some(Manifold::new(
            normal,
            circle.radius - output.distance,
            output.point_b,
        ));
    }

    // GJK's tolerance also lets through centers just outside a face
    let (face_normal, separation) = deepest_face(polygon, |_| circle.center);
    let depth = circle.radius - separation;
    if depth <= 0.0 {
        return None;
    }
    Some(Manifold::new(
        -face_normal,
        depth,
        circle.center - face_normal * separation,
    ))
}

/// Checks for collision between a rectangle and a convex polygon.
///
/// Only pairs GJK reports as touching go on to the face search, which tries
/// the polygon's faces against the rectangle's deepest corner and the
/// rectangle's four sides against the polygon's deepest vertex.
pub fn check_rect_polygon(
    rect: &Rect,
    polygon: &Polygon,
    settings: &CollisionSettings,
) -> Option<Manifold> {
    if polygon.is_degenerate() {
        return None;
    }

    let corners = rect.corners();
    let output = gjk::distance_proxies(
        &DistanceProxy::new(&corners[..], 0.0),
        &DistanceProxy::new(polygon.world_vertices(), 0.0),
        false,
        settings,
    );
    if output.distance > settings.epsilon {
        return None;
    }

    // polygon faces; normal runs opposite the face normal
    let (face_normal, face_separation) = deepest_face(polygon, |n| rect.support(-n));
    let mut best = Manifold::new(-face_normal, -face_separation, rect.support(-face_normal));
    let mut best_separation = face_separation;

    // rectangle sides, each with a point on it
    let sides = [
        (Vec2::new(-1.0, 0.0), corners[0]),
        (Vec2::new(1.0, 0.0), corners[2]),
        (Vec2::new(0.0, -1.0), corners[0]),
        (Vec2::new(0.0, 1.0), corners[2]),
    ];
    for (normal, anchor) in sides {
        let vertex = polygon.support(-normal);
        let separation = normal.dot(vertex - anchor);
        if separation > best_separation {
            best_separation = separation;
            best = Manifold::new(normal, -separation, vertex);
        }
    }

    if best_separation >= 0.0 {
        return None;
    }
    Some(best)
}

/// Face of `polygon` with the greatest signed distance to the point chosen
/// by `pick` for that face's normal.
fn deepest_face(polygon: &Polygon, pick: impl Fn(Vec2) -> Vec2) -> (Vec2, f64) {
    let mut best_normal = Vec2::UNIT_Y;
    let mut best_separation = f64::NEG_INFINITY;
    for (vertex, normal) in polygon.world_vertices().iter().zip(polygon.normals()) {
        let separation = normal.dot(pick(*normal) - *vertex);
        if separation > best_separation {
            best_separation = separation;
            best_normal = *normal;
        }
    }
    (best_normal, best_separation)
}

fn sign_or_positive(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}
