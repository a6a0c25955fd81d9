use scenepick_geometry::{Point2, Rect, Vec2};

pub(crate) type Triangle = [Point2; 3];

fn segments_for(radius: f32) -> usize {
    (radius.abs() as usize).clamp(12, 64)
}

pub(crate) fn rect(rect: Rect) -> [Triangle; 2] {
    let a = rect.min;
    let b = Point2::new(rect.max.x, rect.min.y);
    let c = rect.max;
    let d = Point2::new(rect.min.x, rect.max.y);
    [[a, b, c], [a, c, d]]
}

/// Quad of `width` centred on the segment. Degenerate segments become a
/// square so a click on a collapsed handle still lands.
pub(crate) fn thick_line(start: Point2, end: Point2, width: f32) -> [Triangle; 2] {
    let half = (width * 0.5).max(0.5);
    let dir = (end - start).normalized();
    if dir == Vec2::ZERO {
        return rect(Rect::from_center_size(start, Vec2::new(half * 2.0, half * 2.0)));
    }
    let n = dir.perp() * half;
    let a = start + n;
    let b = end + n;
    let c = end - n;
    let d = start - n;
    [[a, b, c], [a, c, d]]
}

pub(crate) fn disc(center: Point2, radius: f32) -> Vec<Triangle> {
    let ring = circle_points(center, radius);
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(&a, &b)| [center, a, b])
        .collect()
}

pub(crate) fn annulus(center: Point2, radius: f32, width: f32) -> Vec<Triangle> {
    let half = (width * 0.5).max(0.5);
    let outer = circle_points(center, radius + half);
    let inner = circle_points(center, (radius - half).max(0.0));
    let mut tris = Vec::with_capacity(outer.len() * 2);
    for i in 0..outer.len() {
        let j = (i + 1) % outer.len();
        tris.push([outer[i], outer[j], inner[j]]);
        tris.push([outer[i], inner[j], inner[i]]);
    }
    tris
}

/// Fan triangulation; valid for convex outlines only.
pub(crate) fn convex_polygon(points: &[Point2]) -> Vec<Triangle> {
    if points.len() < 3 {
        return Vec::new();
    }
    let anchor = points[0];
    points[1..]
        .windows(2)
        .map(|pair| [anchor, pair[0], pair[1]])
        .collect()
}

fn circle_points(center: Point2, radius: f32) -> Vec<Point2> {
    let count = segments_for(radius);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}
