//! GJK closest-point solver shared by every pairing that involves a polygon.
//!
//! Shapes are seen through a [`DistanceProxy`]: a vertex cloud plus a rounding
//! radius. Circles are a single vertex rounded by their radius, rectangles and
//! polygons are their corners with radius zero. The solver keeps a simplex of
//! at most three support pairs and walks it towards the origin of the
//! Minkowski difference `B - A`.

use std::borrow::Cow;

use crate::common::CollisionSettings;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// Convex vertex cloud with a rounding radius.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceProxy<'a> {
    vertices: Cow<'a, [Vec2]>,
    radius: f64,
}

impl<'a> DistanceProxy<'a> {
    pub fn new(vertices: impl Into<Cow<'a, [Vec2]>>, radius: f64) -> Self {
        Self {
            vertices: vertices.into(),
            radius,
        }
    }

    /// Proxy over a shape's world geometry. Polygons are borrowed.
    pub fn from_shape(shape: &'a Shape) -> Self {
        match shape {
            Shape::Circle(circle) => Self::new(vec![circle.center], circle.radius),
            Shape::Rect(rect) => Self::new(rect.corners().to_vec(), 0.0),
            Shape::Polygon(polygon) => Self::new(polygon.world_vertices(), 0.0),
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Index of the vertex furthest along `direction`.
    pub fn support(&self, direction: Vec2) -> usize {
        let mut best = 0;
        let mut best_dot = f64::NEG_INFINITY;
        for (i, v) in self.vertices.iter().enumerate() {
            let d = v.dot(direction);
            if d > best_dot {
                best = i;
                best_dot = d;
            }
        }
        best
    }

    pub fn vertex(&self, index: usize) -> Vec2 {
        self.vertices[index]
    }

    /// Owned copy moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> DistanceProxy<'static> {
        DistanceProxy {
            vertices: Cow::Owned(self.vertices.iter().map(|v| *v + offset).collect()),
            radius: self.radius,
        }
    }
}

/// Result of a distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceOutput {
    /// Closest point on the first shape.
    pub point_a: Vec2,
    /// Closest point on the second shape.
    pub point_b: Vec2,
    pub distance: f64,
    pub iterations: usize,
}

impl DistanceOutput {
    fn unreachable() -> Self {
        Self {
            point_a: Vec2::ZERO,
            point_b: Vec2::ZERO,
            distance: f64::INFINITY,
            iterations: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SimplexVertex {
    w_a: Vec2,
    w_b: Vec2,
    /// `w_b - w_a`
    w: Vec2,
    /// Barycentric weight of this vertex in the closest point.
    a: f64,
    index_a: usize,
    index_b: usize,
}

impl SimplexVertex {
    fn new(proxy_a: &DistanceProxy, index_a: usize, proxy_b: &DistanceProxy, index_b: usize) -> Self {
        let w_a = proxy_a.vertex(index_a);
        let w_b = proxy_b.vertex(index_b);
        Self {
            w_a,
            w_b,
            w: w_b - w_a,
            a: 1.0,
            index_a,
            index_b,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Simplex {
    v: [SimplexVertex; 3],
    count: usize,
}

impl Simplex {
    fn search_direction(&self) -> Vec2 {
        match self.count {
            1 => -self.v[0].w,
            2 => {
                let e12 = self.v[1].w - self.v[0].w;
                let sgn = e12.cross(-self.v[0].w);
                if sgn > 0.0 {
                    // origin is left of e12
                    Vec2::new(-e12.y, e12.x)
                } else {
                    Vec2::new(e12.y, -e12.x)
                }
            }
            _ => Vec2::ZERO,
        }
    }

    fn witness_points(&self) -> (Vec2, Vec2) {
        match self.count {
            1 => (self.v[0].w_a, self.v[0].w_b),
            2 => (
                self.v[0].w_a * self.v[0].a + self.v[1].w_a * self.v[1].a,
                self.v[0].w_b * self.v[0].a + self.v[1].w_b * self.v[1].a,
            ),
            3 => {
                let p = self.v[0].w_a * self.v[0].a + self.v[1].w_a * self.v[1].a + self.v[2].w_a * self.v[2].a;
                (p, p)
            }
            _ => (Vec2::ZERO, Vec2::ZERO),
        }
    }

    /// Closest point on segment `w1 w2` to the origin, by barycentric projection.
    fn solve2(&mut self) {
        let w1 = self.v[0].w;
        let w2 = self.v[1].w;
        let e12 = w2 - w1;

        // w1 region
        let d12_2 = -w1.dot(e12);
        if d12_2 <= 0.0 {
            self.v[0].a = 1.0;
            self.count = 1;
            return;
        }

        // w2 region
        let d12_1 = w2.dot(e12);
        if d12_1 <= 0.0 {
            self.v[1].a = 1.0;
            self.count = 1;
            self.v[0] = self.v[1];
            return;
        }

        let inv_d12 = 1.0 / (d12_1 + d12_2);
        self.v[0].a = d12_1 * inv_d12;
        self.v[1].a = d12_2 * inv_d12;
        self.count = 2;
    }

    /// Reduces the triangle to the feature closest to the origin. The count
    /// stays at three only when the origin is inside.
    fn solve3(&mut self) {
        let w1 = self.v[0].w;
        let w2 = self.v[1].w;
        let w3 = self.v[2].w;

        let e12 = w2 - w1;
        let d12_1 = w2.dot(e12);
        let d12_2 = -w1.dot(e12);

        let e13 = w3 - w1;
        let d13_1 = w3.dot(e13);
        let d13_2 = -w1.dot(e13);

        let e23 = w3 - w2;
        let d23_1 = w3.dot(e23);
        let d23_2 = -w2.dot(e23);

        let n123 = e12.cross(e13);
        let d123_1 = n123 * w2.cross(w3);
        let d123_2 = n123 * w3.cross(w1);
        let d123_3 = n123 * w1.cross(w2);

        if d12_2 <= 0.0 && d13_2 <= 0.0 {
            self.v[0].a = 1.0;
            self.count = 1;
            return;
        }

        if d12_1 > 0.0 && d12_2 > 0.0 && d123_3 <= 0.0 {
            let inv_d12 = 1.0 / (d12_1 + d12_2);
            self.v[0].a = d12_1 * inv_d12;
            self.v[1].a = d12_2 * inv_d12;
            self.count = 2;
            return;
        }

        if d13_1 > 0.0 && d13_2 > 0.0 && d123_2 <= 0.0 {
            let inv_d13 = 1.0 / (d13_1 + d13_2);
            self.v[0].a = d13_1 * inv_d13;
            self.v[2].a = d13_2 * inv_d13;
            self.count = 2;
            self.v[1] = self.v[2];
            return;
        }

        if d12_1 <= 0.0 && d23_2 <= 0.0 {
            self.v[1].a = 1.0;
            self.count = 1;
            self.v[0] = self.v[1];
            return;
        }

        if d13_1 <= 0.0 && d23_1 <= 0.0 {
            self.v[2].a = 1.0;
            self.count = 1;
            self.v[0] = self.v[2];
            return;
        }

        if d23_1 > 0.0 && d23_2 > 0.0 && d123_1 <= 0.0 {
            let inv_d23 = 1.0 / (d23_1 + d23_2);
            self.v[1].a = d23_1 * inv_d23;
            self.v[2].a = d23_2 * inv_d23;
            self.count = 2;
            self.v[0] = self.v[2];
            return;
        }

        let inv_d123 = 1.0 / (d123_1 + d123_2 + d123_3);
        self.v[0].a = d123_1 * inv_d123;
        self.v[1].a = d123_2 * inv_d123;
        self.v[2].a = d123_3 * inv_d123;
        self.count = 3;
    }
}

/// Closest points between two shapes with the default settings.
pub fn distance(a: &Shape, b: &Shape, apply_radius: bool) -> DistanceOutput {
    distance_with(a, b, apply_radius, &CollisionSettings::default())
}

pub fn distance_with(
    a: &Shape,
    b: &Shape,
    apply_radius: bool,
    settings: &CollisionSettings,
) -> DistanceOutput {
    distance_proxies(
        &DistanceProxy::from_shape(a),
        &DistanceProxy::from_shape(b),
        apply_radius,
        settings,
    )
}

/// Core GJK loop.
///
/// With `apply_radius` the witness points are pulled in by each proxy's
/// radius; when that would make them cross, both collapse onto their
/// midpoint and the distance becomes zero. An empty proxy is infinitely far
/// from everything.
pub fn distance_proxies(
    proxy_a: &DistanceProxy,
    proxy_b: &DistanceProxy,
    apply_radius: bool,
    settings: &CollisionSettings,
) -> DistanceOutput {
    if proxy_a.is_empty() || proxy_b.is_empty() {
        return DistanceOutput::unreachable();
    }

    let mut simplex = Simplex {
        v: [
            SimplexVertex::new(proxy_a, 0, proxy_b, 0),
            SimplexVertex::default(),
            SimplexVertex::default(),
        ],
        count: 1,
    };

    let mut saved = [(0usize, 0usize); 3];
    let mut iterations = 0;

    while iterations < settings.gjk_max_iterations {
        let save_count = simplex.count;
        for (slot, vertex) in saved.iter_mut().zip(&simplex.v).take(save_count) {
            *slot = (vertex.index_a, vertex.index_b);
        }

        match simplex.count {
            2 => simplex.solve2(),
            3 => simplex.solve3(),
            _ => {}
        }

        // origin inside the triangle: overlap
        if simplex.count == 3 {
            break;
        }

        let d = simplex.search_direction();
        if d.magnitude_squared() < f64::EPSILON * f64::EPSILON {
            // origin sits on the current feature
            break;
        }

        let index_a = proxy_a.support(-d);
        let index_b = proxy_b.support(d);
        iterations += 1;

        if saved[..save_count].contains(&(index_a, index_b)) {
            // no progress possible
            break;
        }

        simplex.v[simplex.count] = SimplexVertex::new(proxy_a, index_a, proxy_b, index_b);
        simplex.count += 1;
    }

    if iterations >= settings.gjk_max_iterations {
        log::trace!("gjk: iteration cap of {} reached", settings.gjk_max_iterations);
    }

    let (mut point_a, mut point_b) = simplex.witness_points();
    let mut distance = point_a.distance(point_b);

    if apply_radius {
        let r_a = proxy_a.radius();
        let r_b = proxy_b.radius();
        if distance > r_a + r_b && distance > f64::EPSILON {
            distance -= r_a + r_b;
            let normal = (point_b - point_a).normalize();
            point_a += normal * r_a;
            point_b -= normal * r_b;
        } else {
            let p = (point_a + point_b) * 0.5;
            point_a = p;
            point_b = p;
            distance = 0.0;
        }
    }

    DistanceOutput {
        point_a,
        point_b,
        distance,
        iterations,
    }
}

/// Boolean overlap: rounded distance within `epsilon` of zero.
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    overlaps_with(a, b, &CollisionSettings::default())
}

pub fn overlaps_with(a: &Shape, b: &Shape, settings: &CollisionSettings) -> bool {
    distance_with(a, b, true, settings).distance <= settings.epsilon
}

/// First moment of contact between two linearly moving shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeOfImpact {
    /// Fraction of the motion, in `[0, 1]`.
    pub time: f64,
    /// Direction from the first shape towards the second at impact.
    pub normal: Vec2,
    /// Contact point in world space at `time`.
    pub point: Vec2,
}

/// Conservative advancement over the translations `translation_a` and
/// `translation_b`, both applied over the unit interval. Returns `None` when
/// the shapes never come within the contact tolerance.
pub fn time_of_impact(
    a: &Shape,
    translation_a: Vec2,
    b: &Shape,
    translation_b: Vec2,
) -> Option<TimeOfImpact> {
    time_of_impact_with(a, translation_a, b, translation_b, &CollisionSettings::default())
}

pub fn time_of_impact_with(
    a: &Shape,
    translation_a: Vec2,
    b: &Shape,
    translation_b: Vec2,
    settings: &CollisionSettings,
) -> Option<TimeOfImpact> {
    let proxy_a = DistanceProxy::from_shape(a);
    let proxy_b = DistanceProxy::from_shape(b);
    if proxy_a.is_empty() || proxy_b.is_empty() {
        return None;
    }

    // Work in A's frame: only B moves.
    let relative = translation_b - translation_a;
    let target = settings.toi_tolerance * 0.5;
    let mut normal = (-relative).normalize_or(Vec2::UNIT_Y);
    let mut t = 0.0;

    for _ in 0..settings.toi_max_iterations {
        let moved_b = proxy_b.translated(relative * t);
        let output = distance_proxies(&proxy_a, &moved_b, true, settings);

        if output.distance <= settings.toi_tolerance {
            let point = (output.point_a + output.point_b) * 0.5 + translation_a * t;
            return Some(TimeOfImpact { time: t, normal, point });
        }

        normal = (output.point_b - output.point_a).normalize_or(normal);
        let closing_speed = -relative.dot(normal);
        if closing_speed <= f64::EPSILON {
            return None;
        }

        t += (output.distance - target) / closing_speed;
        if t > 1.0 {
            return None;
        }
    }

    log::trace!("toi: no convergence after {} iterations", settings.toi_max_iterations);
    None
}
