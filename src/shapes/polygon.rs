use crate::collision::aabb::AABB;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

const DEGENERATE_AREA: f64 = 1e-12;

/// A convex polygon defined by local-space vertices and a transform.
///
/// World vertices, outward edge normals and bounds are re-derived every time
/// the vertices or the transform change, so queries always read a consistent
/// snapshot. Either winding order is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    transform: Transform,
    world_vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
    bounds: AABB,
}

impl Polygon {
    /// Creates a polygon at the origin with an identity transform.
    ///
    /// Fewer than three vertices (or collinear ones) yield a degenerate
    /// polygon that never contains, overlaps or blocks anything.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self::with_transform(vertices, Transform::identity())
    }

    pub fn with_transform(vertices: Vec<Vec2>, transform: Transform) -> Self {
        let mut polygon = Polygon {
            vertices,
            transform,
            world_vertices: Vec::new(),
            normals: Vec::new(),
            bounds: AABB::new(transform.position, transform.position),
        };
        polygon.refresh();
        polygon
    }

    /// Regular polygon with `sides` vertices on a circle of `radius` around the origin.
    pub fn regular(sides: usize, radius: f64) -> Self {
        let step = std::f64::consts::TAU / sides.max(1) as f64;
        let vertices = (0..sides)
            .map(|i| Vec2::new(radius, 0.0).rotate(step * i as f64))
            .collect();
        Self::new(vertices)
    }

    /// Local-space vertices as supplied.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Transformed vertices with consecutive duplicates removed.
    pub fn world_vertices(&self) -> &[Vec2] {
        &self.world_vertices
    }

    /// Outward unit normal of the edge starting at `world_vertices()[i]`.
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
        self.refresh();
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.transform.position + offset);
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.transform.rotation = rotation;
        self.refresh();
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.transform.scale = scale;
        self.refresh();
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.refresh();
    }

    pub fn set_vertices(&mut self, vertices: Vec<Vec2>) {
        self.vertices = vertices;
        self.refresh();
    }

    /// True when the polygon cannot enclose any area.
    pub fn is_degenerate(&self) -> bool {
        self.world_vertices.len() < 3 || self.signed_area().abs() < DEGENERATE_AREA
    }

    /// Signed world-space area (Shoelace formula); positive for counter-clockwise
    /// winding in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.world_vertices)
    }

    /// Calculates the area of the polygon.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Calculates the world-space centroid of the polygon.
    pub fn centroid(&self) -> Vec2 {
        let n = self.world_vertices.len();
        if n == 0 {
            return self.transform.position;
        }

        let mut centroid = Vec2::ZERO;
        let mut signed_area_sum = 0.0;
        let origin = self.world_vertices[0];

        for i in 1..n.saturating_sub(1) {
            let v2 = self.world_vertices[i];
            let v3 = self.world_vertices[i + 1];

            let triangle_signed_area = (v2 - origin).cross(v3 - origin) / 2.0;
            signed_area_sum += triangle_signed_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_signed_area;
        }

        if signed_area_sum.abs() < DEGENERATE_AREA {
            // collinear: fall back to the vertex average
            let mut avg = Vec2::ZERO;
            for v in &self.world_vertices {
                avg += *v;
            }
            avg / n as f64
        } else {
            centroid / signed_area_sum
        }
    }

    /// World vertex furthest along `direction`.
    pub fn support(&self, direction: Vec2) -> Vec2 {
        self.world_vertices
            .get(self.support_index(direction))
            .copied()
            .unwrap_or(self.transform.position)
    }

    pub(crate) fn support_index(&self, direction: Vec2) -> usize {
        let mut best = 0;
        let mut best_dot = f64::NEG_INFINITY;
        for (i, v) in self.world_vertices.iter().enumerate() {
            let d = v.dot(direction);
            if d > best_dot {
                best_dot = d;
                best = i;
            }
        }
        best
    }

    /// Half-plane test against every edge, boundary included.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        self.world_vertices
            .iter()
            .zip(&self.normals)
            .all(|(v, n)| n.dot(point - *v) <= 0.0)
    }

    fn refresh(&mut self) {
        let mut world: Vec<Vec2> = Vec::with_capacity(self.vertices.len());
        for local in &self.vertices {
            let v = self.transform.apply(*local);
            if world.last().map_or(true, |last| last.distance_squared(v) > DEGENERATE_AREA) {
                world.push(v);
            }
        }
        while world.len() > 1 && world[0].distance_squared(world[world.len() - 1]) <= DEGENERATE_AREA {
            world.pop();
        }

        self.bounds = AABB::from_points(&world)
            .unwrap_or_else(|| AABB::new(self.transform.position, self.transform.position));
        self.normals = edge_normals(&world);
        self.world_vertices = world;
    }
}

fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        area += vertices[i].cross(vertices[(i + 1) % n]);
    }
    area / 2.0
}

/// Outward-facing normals for each edge, whichever way the vertices wind.
fn edge_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let n = vertices.len();
    let outward_sign = if signed_area(vertices) >= 0.0 { 1.0 } else { -1.0 };
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let edge = vertices[(i + 1) % n] - vertices[i];
        normals.push(Vec2::new(edge.y, -edge.x).normalize() * outward_sign);
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ]
    }

    #[test]
    fn test_polygon_area_square() {
        let polygon = Polygon::new(unit_square());
        assert!((polygon.area() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_area_triangle() {
        let polygon = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ]);
        assert!((polygon.area() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_centroid_square_offset() {
        let offset = Vec2::new(10.0, -5.0);
        let polygon = Polygon::with_transform(unit_square(), Transform::new(offset, 0.0));
        assert_relative_eq!(polygon.centroid(), offset, epsilon = EPSILON);
    }

    #[test]
    fn test_polygon_centroid_triangle() {
        let polygon = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(0.0, 3.0),
        ]);
        assert_relative_eq!(polygon.centroid(), Vec2::new(1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_normals_point_outward_for_both_windings() {
        let ccw = Polygon::new(unit_square());
        let mut reversed = unit_square();
        reversed.reverse();
        let cw = Polygon::new(reversed);

        for polygon in [&ccw, &cw] {
            let center = polygon.centroid();
            for (v, n) in polygon.world_vertices().iter().zip(polygon.normals()) {
                assert!(n.dot(*v - center) > 0.0, "normal {:?} points inward", n);
                assert!((n.magnitude() - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_transform_changes_rederive_bounds() {
        let mut polygon = Polygon::new(unit_square());
        assert_eq!(polygon.bounds(), AABB::new(Vec2::splat(-0.5), Vec2::splat(0.5)));

        polygon.set_position(Vec2::new(10.0, 0.0));
        assert_relative_eq!(polygon.bounds().center(), Vec2::new(10.0, 0.0), epsilon = EPSILON);

        polygon.set_scale(Vec2::new(4.0, 2.0));
        assert_relative_eq!(polygon.bounds().size(), Vec2::new(4.0, 2.0), epsilon = EPSILON);

        polygon.set_rotation(PI / 4.0);
        let half_diagonal = (2.0f64.powi(2) + 1.0f64.powi(2)).sqrt();
        assert!(polygon.bounds().width() > 4.0 && polygon.bounds().width() <= 2.0 * half_diagonal + EPSILON);
    }

    #[test]
    fn test_contains_half_plane() {
        let polygon = Polygon::with_transform(
            vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 8.0)],
            Transform::new(Vec2::new(100.0, 0.0), 0.0),
        );
        assert!(polygon.contains(Vec2::new(105.0, 2.0)));
        assert!(polygon.contains(Vec2::new(100.0, 0.0)));
        assert!(!polygon.contains(Vec2::new(105.0, 9.0)));
        assert!(!polygon.contains(Vec2::new(5.0, 2.0)));
    }

    #[test]
    fn test_degenerate_polygons_contain_nothing() {
        let line = Polygon::new(vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]);
        assert!(line.is_degenerate());
        assert!(!line.contains(Vec2::new(1.0, 0.0)));

        let empty = Polygon::new(Vec::new());
        assert!(empty.is_degenerate());
        assert!(!empty.contains(Vec2::ZERO));
        assert_eq!(empty.bounds(), AABB::new(Vec2::ZERO, Vec2::ZERO));
    }

    #[test]
    fn test_duplicate_vertices_are_dropped() {
        let polygon = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
        ]);
        assert_eq!(polygon.world_vertices().len(), 3);
        assert_eq!(polygon.vertices().len(), 5);
    }

    #[test]
    fn test_regular_polygon() {
        let hexagon = Polygon::regular(6, 2.0);
        assert_eq!(hexagon.world_vertices().len(), 6);
        assert!(hexagon.contains(Vec2::ZERO));
        assert_relative_eq!(hexagon.support(Vec2::UNIT_X), Vec2::new(2.0, 0.0), epsilon = EPSILON);
    }
}
