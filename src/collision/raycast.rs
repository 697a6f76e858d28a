use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Polygon, Rect, Shape};

const PARALLEL_EPSILON: f64 = 1e-12;

/// A ray with a unit direction and a maximum travel distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Unit length, or zero for a degenerate ray.
    pub direction: Vec2,
    pub max_distance: f64,
}

impl Ray {
    /// Creates a new ray; `direction` is normalized. A zero direction gives a
    /// degenerate ray that hits nothing.
    pub fn new(origin: Vec2, direction: Vec2, max_distance: f64) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            max_distance,
        }
    }

    /// Ray covering the segment from `start` to `end`.
    pub fn between(start: Vec2, end: Vec2) -> Self {
        Self::new(start, end - start, start.distance(end))
    }

    /// Get a point along the ray at distance `t`.
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.origin + self.direction * t
    }

    pub fn end(&self) -> Vec2 {
        self.point_at(self.max_distance)
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction.magnitude_squared() < 0.5
            || !self.origin.is_finite()
            || !self.max_distance.is_finite()
            || self.max_distance < 0.0
    }
}

/// Where a ray first strikes a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycast {
    /// Distance along the ray, in `[0, max_distance]`.
    pub impact: f64,
    /// Unit surface normal at the impact point.
    pub normal: Vec2,
}

impl Raycast {
    pub fn new(impact: f64, normal: Vec2) -> Self {
        Self { impact, normal }
    }
}

/// First hit of `ray` on `shape`.
///
/// Rays starting inside a rectangle or polygon hit at distance zero with the
/// normal facing back along the ray. Rays starting inside a circle report
/// where they leave it.
pub fn cast(ray: &Ray, shape: &Shape) -> Option<Raycast> {
    if ray.is_degenerate() {
        return None;
    }
    match shape {
        Shape::Circle(circle) => ray_circle(ray, circle),
        Shape::Rect(rect) => ray_rect(ray, rect),
        Shape::Polygon(polygon) => ray_polygon(ray, polygon),
    }
}

/// Smallest non-negative root of `|o + t d - c|² = r²`.
pub fn ray_circle(ray: &Ray, circle: &Circle) -> Option<Raycast> {
    let m = ray.origin - circle.center;
    let b = m.dot(ray.direction);
    let c = m.magnitude_squared() - circle.radius * circle.radius;

    // outside and pointing away
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let t = if near >= 0.0 { near } else { -b + root };
    if t < 0.0 || t > ray.max_distance {
        return None;
    }

    let point = ray.point_at(t);
    let normal = (point - circle.center).normalize_or(-ray.direction);
    Some(Raycast::new(t, normal))
}

/// Slab method.
pub fn ray_rect(ray: &Ray, rect: &Rect) -> Option<Raycast> {
    let min = [rect.left(), rect.top()];
    let max = [rect.right(), rect.bottom()];
    let origin = [ray.origin.x, ray.origin.y];
    let direction = [ray.direction.x, ray.direction.y];

    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;
    let mut entry_axis = 0;

    for axis in 0..2 {
        if direction[axis].abs() < PARALLEL_EPSILON {
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction[axis];
        let mut t1 = (min[axis] - origin[axis]) * inv;
        let mut t2 = (max[axis] - origin[axis]) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        if t1 > t_min {
            t_min = t1;
            entry_axis = axis;
        }
        t_max = t_max.min(t2);

        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 || t_min > ray.max_distance {
        return None;
    }

    if t_min < 0.0 {
        return Some(Raycast::new(0.0, -ray.direction));
    }

    let offset = ray.point_at(t_min) - rect.center();
    let normal = if entry_axis == 0 {
        Vec2::new(if offset.x >= 0.0 { 1.0 } else { -1.0 }, 0.0)
    } else {
        Vec2::new(0.0, if offset.y >= 0.0 { 1.0 } else { -1.0 })
    };
    Some(Raycast::new(t_min, normal))
}

/// Clips `[0, max_distance]` against every edge half-plane.
pub fn ray_polygon(ray: &Ray, polygon: &Polygon) -> Option<Raycast> {
    if polygon.is_degenerate() {
        return None;
    }

    let mut lower = 0.0;
    let mut upper = ray.max_distance;
    let mut entry_edge = None;

    for (vertex, normal) in polygon.world_vertices().iter().zip(polygon.normals()) {
        let numerator = normal.dot(*vertex - ray.origin);
        let denominator = normal.dot(ray.direction);

        if denominator.abs() < PARALLEL_EPSILON {
            // parallel and outside this edge
            if numerator < 0.0 {
                return None;
            }
        } else if denominator < 0.0 && numerator < lower * denominator {
            // entering the half-plane
            lower = numerator / denominator;
            entry_edge = Some(*normal);
        } else if denominator > 0.0 && numerator < upper * denominator {
            upper = numerator / denominator;
        }

        if upper < lower {
            return None;
        }
    }

    match entry_edge {
        Some(normal) => Some(Raycast::new(lower, normal)),
        None => Some(Raycast::new(0.0, -ray.direction)),
    }
}
