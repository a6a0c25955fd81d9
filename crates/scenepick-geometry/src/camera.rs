use serde::{Deserialize, Serialize};

use crate::ray::Ray;
use crate::ui::{Point2, pos2};
use crate::{Deg, InnerSpace, Matrix4, Point3, Vector3, math::normalize_or};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub pos: Point3,
    pub right: Vector3,
    pub up: Vector3,
    pub forward: Vector3,
}

impl CameraBasis {
    /// View-space vector (x right, y up, z toward the viewer) to world space.
    pub fn view_to_world(&self, v: Vector3) -> Vector3 {
        self.right * v.x + self.up * v.y - self.forward * v.z
    }
}

/// What the manipulation and picking code needs from a viewport.
///
/// Screen coordinates are pixels with the origin at the top-left corner.
pub trait ViewportCamera {
    fn size(&self) -> (u32, u32);
    fn basis(&self) -> CameraBasis;
    fn eye_ray(&self, screen: Point2) -> Ray;
    fn view_matrix(&self) -> Matrix4;
    fn projection_matrix(&self) -> Matrix4;
    /// Screen position and view depth; `None` behind the near plane.
    fn project(&self, world: Point3) -> Option<(Point2, f64)>;
    /// World length that spans `pixels` on screen at the depth of `world`.
    fn world_size_at(&self, world: Point3, pixels: f32) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub eye: Point3,
    pub target: Point3,
    pub up: Vector3,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, -10.0, 4.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_z(),
            fov_y_deg: 60.0,
            near: 0.05,
            far: 1.0e4,
            width: 640,
            height: 480,
        }
    }
}

impl PerspectiveCamera {
    pub fn look_at(eye: Point3, target: Point3, up: Vector3) -> Self {
        Self {
            eye,
            target,
            up,
            ..Self::default()
        }
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.set_viewport(width, height);
        self
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width.max(1)) / f64::from(self.height.max(1))
    }

    fn forward(&self) -> Vector3 {
        normalize_or(self.target - self.eye, Vector3::unit_y())
    }

    fn tan_half_fov(&self) -> f64 {
        (self.fov_y_deg.to_radians() * 0.5).tan().max(1.0e-6)
    }

    /// Pixels per world unit at unit depth.
    fn focal(&self) -> f64 {
        f64::from(self.height.max(1)) / (2.0 * self.tan_half_fov())
    }

    fn default_up(forward: Vector3) -> Vector3 {
        let mut up = Vector3::unit_z();
        let mut right = forward.cross(up);
        if right.magnitude() <= 1.0e-6 {
            up = Vector3::unit_y();
            right = forward.cross(up);
        }
        let right = right.normalize();
        right.cross(forward).normalize()
    }
}

impl ViewportCamera for PerspectiveCamera {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn basis(&self) -> CameraBasis {
        let forward = self.forward();
        let mut right = forward.cross(self.up);
        if right.magnitude() <= 1.0e-6 {
            right = forward.cross(Self::default_up(forward));
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();
        CameraBasis {
            pos: self.eye,
            right,
            up,
            forward,
        }
    }

    fn eye_ray(&self, screen: Point2) -> Ray {
        let basis = self.basis();
        let focal = self.focal();
        let cx = f64::from(self.width) * 0.5;
        let cy = f64::from(self.height) * 0.5;
        let dx = (f64::from(screen.x) - cx) / focal;
        let dy = (cy - f64::from(screen.y)) / focal;
        Ray::new(self.eye, basis.forward + basis.right * dx + basis.up * dy)
    }

    fn view_matrix(&self) -> Matrix4 {
        let basis = self.basis();
        Matrix4::look_at_rh(self.eye, self.eye + basis.forward, basis.up)
    }

    fn projection_matrix(&self) -> Matrix4 {
        cgmath::perspective(Deg(self.fov_y_deg), self.aspect(), self.near, self.far)
    }

    fn project(&self, world: Point3) -> Option<(Point2, f64)> {
        let basis = self.basis();
        let rel = world - basis.pos;
        let depth = rel.dot(basis.forward);
        if depth <= self.near {
            return None;
        }
        let focal = self.focal();
        let sx = f64::from(self.width) * 0.5 + rel.dot(basis.right) / depth * focal;
        let sy = f64::from(self.height) * 0.5 - rel.dot(basis.up) / depth * focal;
        Some((pos2(sx as f32, sy as f32), depth))
    }

    fn world_size_at(&self, world: Point3, pixels: f32) -> f64 {
        let depth = (world - self.eye).dot(self.forward()).max(self.near);
        depth * f64::from(pixels) / self.focal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuclideanSpace;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::look_at(
            Point3::new(0.0, -10.0, 0.0),
            Point3::origin(),
            Vector3::unit_z(),
        )
        .with_viewport(200, 100)
    }

    #[test]
    fn target_projects_to_viewport_centre() {
        let (pos, depth) = camera().project(Point3::origin()).expect("in front");
        assert!((pos.x - 100.0).abs() < 1.0e-4);
        assert!((pos.y - 50.0).abs() < 1.0e-4);
        assert!((depth - 10.0).abs() < 1.0e-9);
    }

    #[test]
    fn eye_ray_passes_through_projected_point() {
        let cam = camera();
        let world = Point3::new(1.5, 2.0, -0.75);
        let (screen, depth) = cam.project(world).expect("in front");
        let ray = cam.eye_ray(screen);
        let along = ray.project(world);
        let closest = ray.at(along);
        assert!((closest - world).magnitude() < 1.0e-4 * depth);
    }

    #[test]
    fn clip_matrices_agree_with_project() {
        let cam = PerspectiveCamera::look_at(
            Point3::new(3.0, -8.0, 4.0),
            Point3::new(0.5, 0.0, 0.0),
            Vector3::unit_z(),
        )
        .with_viewport(320, 240);
        let world = Point3::new(1.0, 1.5, -0.5);
        let (screen, depth) = cam.project(world).expect("in front");

        let eye_space = cam.view_matrix() * world.to_homogeneous();
        assert!((-eye_space.z - depth).abs() < 1.0e-9);
        let clip = cam.projection_matrix() * eye_space;
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let sx = (ndc_x + 1.0) * 0.5 * f64::from(cam.width);
        let sy = (1.0 - ndc_y) * 0.5 * f64::from(cam.height);
        assert!((sx - f64::from(screen.x)).abs() < 1.0e-3);
        assert!((sy - f64::from(screen.y)).abs() < 1.0e-3);
    }

    #[test]
    fn points_behind_eye_do_not_project() {
        assert!(camera().project(Point3::new(0.0, -20.0, 0.0)).is_none());
    }

    #[test]
    fn world_size_scales_with_depth() {
        let cam = camera();
        let near = cam.world_size_at(Point3::new(0.0, -5.0, 0.0), 10.0);
        let far = cam.world_size_at(Point3::new(0.0, 10.0, 0.0), 10.0);
        assert!((far / near - 4.0).abs() < 1.0e-9);
    }
}
