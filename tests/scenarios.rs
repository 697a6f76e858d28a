use approx::assert_relative_eq;
use collision_engine::{
    collision::{self, gjk, AABB},
    colliders::{Collider, GridCollider},
    grid::{GridSpace, Map},
    shapes::{Circle, Polygon, Rect, Shape},
    Ray, Vec2,
};

fn circle(x: f64, y: f64, radius: f64) -> Shape {
    Shape::Circle(Circle::new(Vec2::new(x, y), radius).unwrap())
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::Rect(Rect::from_xywh(x, y, w, h))
}

fn triangle(offset: Vec2) -> Shape {
    let mut polygon = Polygon::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(5.0, 8.0),
    ]);
    polygon.set_position(offset);
    Shape::Polygon(polygon)
}

/// A mix of overlapping and clearly separated shapes; no pair merely touches.
fn zoo() -> Vec<Shape> {
    let mut hexagon = Polygon::regular(6, 4.0);
    hexagon.set_position(Vec2::new(30.0, 2.0));
    vec![
        circle(0.0, 0.0, 10.0),
        circle(12.0, 0.0, 5.0),
        circle(40.0, 0.0, 5.0),
        rect(4.0, 4.0, 10.0, 10.0),
        rect(-30.0, -30.0, 5.0, 5.0),
        triangle(Vec2::ZERO),
        triangle(Vec2::new(3.0, 0.0)),
        Shape::Polygon(hexagon),
    ]
}

#[test]
fn overlapping_circles_report_depth_and_normal() {
    let hit = collision::collide(&circle(0.0, 0.0, 10.0), &circle(12.0, 0.0, 5.0)).unwrap();
    assert_relative_eq!(hit.depth, 3.0, epsilon = 1e-9);
    assert_relative_eq!(hit.normal, Vec2::UNIT_X, epsilon = 1e-9);
}

#[test]
fn distant_circles_do_not_collide() {
    let a = circle(0.0, 0.0, 10.0);
    let b = circle(20.0, 0.0, 5.0);
    assert!(collision::collide(&a, &b).is_none());
    assert!(!collision::overlaps(&a, &b));
}

#[test]
fn box_tie_resolves_along_x() {
    let hit = collision::collide(&rect(0.0, 0.0, 10.0, 10.0), &rect(5.0, 5.0, 10.0, 10.0)).unwrap();
    assert_eq!(hit.depth, 5.0);
    assert_eq!(hit.normal, Vec2::UNIT_X);
}

#[test]
fn ray_enters_box_through_top_edge() {
    let ray = Ray::new(Vec2::new(0.0, -10.0), Vec2::UNIT_Y, 20.0);
    let hit = rect(-5.0, -5.0, 10.0, 10.0).cast_ray(&ray).unwrap();
    assert_relative_eq!(hit.impact, 5.0, epsilon = 1e-9);
    assert_relative_eq!(hit.normal, Vec2::new(0.0, -1.0), epsilon = 1e-9);
}

#[test]
fn solid_top_row_contains() {
    let mut grid = GridCollider::simple(10, 10, Vec2::new(32.0, 32.0)).unwrap();
    grid.simple_map_mut().unwrap().fill(true, 0, 0, 10, 1);
    let collider = Collider::grid(grid);

    let col5 = 5.0 * 32.0 + 16.0;
    assert!(collider.contains(Vec2::new(col5, 16.0)));
    assert!(!collider.contains(Vec2::new(col5, 48.0)));
}

#[test]
fn translated_triangles_collide_away_from_reference() {
    let a = triangle(Vec2::ZERO);
    let b = triangle(Vec2::new(3.0, 0.0));
    let hit = collision::collide(&a, &b).unwrap();
    assert!(hit.depth > 0.0);
    // b sits to the right of a, so the normal has to lean right
    assert!(hit.normal.x > 0.0);
    assert_relative_eq!(hit.normal.magnitude(), 1.0, epsilon = 1e-9);
}

#[test]
fn collide_is_symmetric() {
    let shapes = zoo();
    for (i, a) in shapes.iter().enumerate() {
        for (j, b) in shapes.iter().enumerate() {
            if i == j {
                continue;
            }
            let ab = collision::collide(a, b);
            let ba = collision::collide(b, a);
            assert_eq!(ab.is_some(), ba.is_some(), "pair {} {}", i, j);
            if let (Some(ab), Some(ba)) = (ab, ba) {
                assert_relative_eq!(ab.depth, ba.depth, epsilon = 1e-9);
                assert_relative_eq!(ab.normal, -ba.normal, epsilon = 1e-9);
            }
            assert_eq!(collision::overlaps(a, b), collision::overlaps(b, a));
        }
    }
}

#[test]
fn gjk_distance_agrees_with_collide() {
    let shapes = zoo();
    for (i, a) in shapes.iter().enumerate() {
        for (j, b) in shapes.iter().enumerate() {
            if i == j {
                continue;
            }
            let touching = gjk::distance(a, b, true).distance <= 1e-5;
            assert_eq!(touching, collision::collide(a, b).is_some(), "pair {} {}", i, j);
            assert_eq!(touching, collision::overlaps(a, b), "pair {} {}", i, j);
        }
    }
}

/// Every shape kind with its left edge at `x`, spanning `y` in 0..10.
fn lined_up_at(x: f64) -> Vec<Shape> {
    let mut square = Polygon::regular(4, 50f64.sqrt());
    square.set_rotation(std::f64::consts::FRAC_PI_4);
    square.set_position(Vec2::new(x + 5.0, 5.0));
    vec![
        circle(x + 5.0, 5.0, 5.0),
        circle(x, 5.0, 0.0),
        rect(x, 0.0, 10.0, 10.0),
        Shape::Polygon(square),
        triangle(Vec2::new(x, 1.0)),
    ]
}

#[test]
fn near_contact_depth_is_never_negative() {
    let left = lined_up_at(0.0);
    for gap in [-1e-6, -1e-9, 0.0, 1e-9, 1e-6] {
        // the right-hand shapes start where the left ones end, give or take `gap`
        for (i, a) in left.iter().enumerate() {
            let right_edge = a.bounds().max.x;
            for (j, b) in lined_up_at(right_edge + gap).iter().enumerate() {
                for m in [collision::collide(a, b), collision::collide(b, a)].into_iter().flatten() {
                    assert!(m.depth >= 0.0, "gap {} pair {} {}: {:?}", gap, i, j, m);
                    assert!(m.normal.is_finite());
                }
            }
        }
    }
}

#[test]
fn edge_sharing_boxes_do_not_collide() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let beside = rect(10.0, 0.0, 10.0, 10.0);
    let below = rect(0.0, 10.0, 10.0, 10.0);
    for other in [&beside, &below] {
        assert!(collision::collide(&a, other).is_none());
        assert!(!collision::overlaps(&a, other));
        assert!(!a.bounds().overlaps(&other.bounds()));
    }
}

#[test]
fn aligned_rect_places_expected_cell_count() {
    let space = GridSpace::new(Vec2::ZERO, Vec2::new(16.0, 8.0), 20, 20).unwrap();
    for (w, h) in [(16.0, 8.0), (48.0, 24.0), (64.0, 8.0)] {
        let area = AABB::from_position_size(Vec2::new(32.0, 16.0), Vec2::new(w, h));
        let expected = (w / 16.0_f64).ceil() * (h / 8.0_f64).ceil();
        assert_eq!(space.place_rect(&area).len(), expected as usize);
    }
    assert!(space.place_point(Vec2::new(33.0, 17.0)).is_some());
}

#[test]
fn clone_collides_like_original() {
    let mut grid = GridCollider::simple(4, 4, Vec2::new(10.0, 10.0)).unwrap();
    grid.simple_map_mut().unwrap().fill(true, 1, 1, 2, 2);
    let colliders = vec![
        Collider::circle(6.0).unwrap().with_local_offset(Vec2::new(3.0, 3.0)),
        Collider::rect(8.0, 4.0).with_local_offset(Vec2::new(12.0, 22.0)),
        Collider::grid(grid),
    ];
    let others = vec![
        Collider::circle(4.0).unwrap().with_local_offset(Vec2::new(10.0, 10.0)),
        Collider::rect(30.0, 2.0).with_local_offset(Vec2::new(15.0, 20.0)),
        Collider::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(6.0, 0.0),
            Vec2::new(3.0, 5.0),
        ])
        .with_local_offset(Vec2::new(25.0, 25.0)),
    ];

    for original in &colliders {
        let copy = original.clone();
        assert_ne!(copy.id(), original.id());
        for other in &others {
            assert_eq!(original.collide(other), copy.collide(other));
            assert_eq!(original.contacts(other), copy.contacts(other));
            assert_eq!(original.overlaps(other), copy.overlaps(other));
        }
    }
}

#[test]
fn resize_keeps_overlap_and_fills_empty() {
    let mut map = Map::new(3, 3, 0);
    for row in 0..3 {
        for col in 0..3 {
            map.set(col, row, (row * 3 + col + 1) as i32);
        }
    }
    map.resize(2, -4);
    assert_eq!((map.columns(), map.rows()), (2, 4));
    for row in 0..3 {
        for col in 0..2 {
            assert_eq!(map.get(col, row), Some(&((row * 3 + col + 1) as i32)));
        }
    }
    assert_eq!(map.get(0, 3), Some(&0));
    assert_eq!(map.get(1, 3), Some(&0));
}
