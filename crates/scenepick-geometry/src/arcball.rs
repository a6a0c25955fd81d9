use crate::ui::Point2;
use crate::{InnerSpace, Vector3};

/// Maps a screen point onto the unit hemisphere centred on `center`.
///
/// The result is in view space: +x right, +y up, +z toward the viewer.
/// Points outside the arc radius land on the hemisphere's rim.
pub fn arcball_point(screen: Point2, center: Point2, radius: f32) -> Vector3 {
    let radius = f64::from(radius.max(1.0));
    let x = f64::from(screen.x - center.x) / radius;
    let y = f64::from(center.y - screen.y) / radius;
    let d2 = x * x + y * y;
    if d2 <= 1.0 {
        Vector3::new(x, y, (1.0 - d2).sqrt())
    } else {
        let len = d2.sqrt();
        Vector3::new(x / len, y / len, 0.0)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ArcBall {
    center: Point2,
    radius: f32,
    start: Vector3,
}

impl ArcBall {
    pub fn begin(center: Point2, radius: f32, start: Point2) -> Self {
        Self {
            center,
            radius,
            start: arcball_point(start, center, radius),
        }
    }

    /// View-space rotation (unit axis, angle in radians) carrying the start
    /// point to `current`. `None` when the two points are (anti)collinear.
    pub fn rotation(&self, current: Point2, epsilon: f64) -> Option<(Vector3, f64)> {
        let end = arcball_point(current, self.center, self.radius);
        let axis = self.start.cross(end);
        let len = axis.magnitude();
        if len <= epsilon || !len.is_finite() {
            return None;
        }
        let angle = self.start.dot(end).clamp(-1.0, 1.0).acos();
        Some((axis / len, angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pos2;

    #[test]
    fn centre_maps_to_pole_and_rim_is_flat() {
        let c = pos2(100.0, 100.0);
        let pole = arcball_point(c, c, 50.0);
        assert!((pole.z - 1.0).abs() < 1.0e-12);
        let rim = arcball_point(pos2(300.0, 100.0), c, 50.0);
        assert!((rim.x - 1.0).abs() < 1.0e-12);
        assert_eq!(rim.z, 0.0);
    }

    #[test]
    fn horizontal_drag_rotates_about_view_up() {
        let c = pos2(0.0, 0.0);
        let arc = ArcBall::begin(c, 100.0, c);
        let (axis, angle) = arc.rotation(pos2(50.0, 0.0), 1.0e-12).expect("rotation");
        assert!((axis.y - 1.0).abs() < 1.0e-9);
        assert!(angle > 0.0);
        assert!(arc.rotation(c, 1.0e-12).is_none());
    }
}
