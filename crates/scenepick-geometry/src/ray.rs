use crate::{InnerSpace, Point3, Vector3, math::normalize_or};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    /// Builds a ray with a unit direction. A zero direction degrades to -Z.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: normalize_or(direction, -Vector3::unit_z()),
        }
    }

    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Orthogonal projection of `point` onto the ray's supporting line.
    pub fn project(&self, point: Point3) -> f64 {
        (point - self.origin).dot(self.direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineClosest {
    /// `param` is measured along the line's unit direction from its origin.
    Point { param: f64, point: Point3 },
    Parallel,
}

/// Point on the infinite line `origin + s * direction` closest to `ray`'s
/// supporting line.
pub fn closest_point_on_line_to_ray(
    origin: Point3,
    direction: Vector3,
    ray: &Ray,
    tolerance: f64,
) -> LineClosest {
    let u = normalize_or(direction, Vector3::unit_x());
    let v = ray.direction;
    let w0 = origin - ray.origin;
    let b = u.dot(v);
    let d = u.dot(w0);
    let e = v.dot(w0);
    // a = c = 1 for unit directions.
    let denom = 1.0 - b * b;
    if denom <= tolerance {
        return LineClosest::Parallel;
    }
    let param = (b * e - d) / denom;
    if !param.is_finite() {
        return LineClosest::Parallel;
    }
    LineClosest::Point {
        param,
        point: origin + u * param,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skew_lines_meet_at_expected_point() {
        let ray = Ray::new(Point3::new(2.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = closest_point_on_line_to_ray(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_x(),
            &ray,
            1.0e-9,
        );
        match hit {
            LineClosest::Point { param, point } => {
                assert!((param - 2.0).abs() < 1.0e-12);
                assert!((point.x - 2.0).abs() < 1.0e-12);
            }
            LineClosest::Parallel => panic!("expected a closest point"),
        }
    }

    #[test]
    fn parallel_lines_are_reported() {
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::unit_x());
        let hit = closest_point_on_line_to_ray(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_x(),
            &ray,
            1.0e-9,
        );
        assert_eq!(hit, LineClosest::Parallel);
    }

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 4.0));
        assert!((ray.direction.magnitude() - 1.0).abs() < 1.0e-12);
        assert!((ray.at(5.0).z - 4.0).abs() < 1.0e-12);
    }
}
