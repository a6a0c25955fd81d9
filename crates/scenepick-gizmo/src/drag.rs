use scenepick_geometry::{
    ArcBall, InnerSpace, LineClosest, Point2, Point3, Quaternion, Rad, Rotation3, Vector3,
    ViewportCamera, clamp_components, closest_point_on_line_to_ray, normalize_or, renormalize,
};
use scenepick_scene::Placeable;

use crate::config::GizmoConfig;

/// Transform of the selected object at the moment a drag began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManipulationSnapshot {
    pub origin: Point3,
    pub orientation: Quaternion,
    pub scale: f64,
}

impl ManipulationSnapshot {
    pub fn capture(target: &dyn Placeable) -> Self {
        Self {
            origin: target.origin(),
            orientation: renormalize(target.orientation()),
            scale: target.scale(),
        }
    }
}

/// Screen-space reference of a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStart {
    pub screen: Point2,
    /// Projected snapshot origin, used as the arc-ball centre.
    pub pivot: Point2,
    pub eye_distance: f64,
}

impl DragStart {
    pub fn new<C: ViewportCamera + ?Sized>(
        camera: &C,
        snapshot: &ManipulationSnapshot,
        screen: Point2,
    ) -> Self {
        let eye = camera.basis().pos;
        let pivot = camera
            .project(snapshot.origin)
            .map(|(pos, _)| pos)
            .unwrap_or(screen);
        Self {
            screen,
            pivot,
            eye_distance: (snapshot.origin - eye).magnitude(),
        }
    }
}

pub fn snap(value: f64, step: f64) -> f64 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Parameter along the axis line picked by the eye ray through `screen`.
fn axis_param<C: ViewportCamera + ?Sized>(
    camera: &C,
    origin: Point3,
    direction: Vector3,
    screen: Point2,
    fallback_distance: f64,
    epsilon: f64,
) -> f64 {
    let ray = camera.eye_ray(screen);
    match closest_point_on_line_to_ray(origin, direction, &ray, epsilon) {
        LineClosest::Point { param, .. } => param,
        // Line of sight runs along the axis: hold the reference depth instead.
        LineClosest::Parallel => (ray.at(fallback_distance) - origin).dot(direction),
    }
}

/// Translation along `direction` (through the snapshot origin) that carries
/// the drag-start pick point to the one under `current`.
pub fn axis_translation<C: ViewportCamera + ?Sized>(
    camera: &C,
    snapshot: &ManipulationSnapshot,
    direction: Vector3,
    start: &DragStart,
    current: Point2,
    config: &GizmoConfig,
    snapping: bool,
) -> Vector3 {
    let direction = normalize_or(direction, Vector3::unit_x());
    let epsilon = config.tolerance.angular;
    let from = axis_param(
        camera,
        snapshot.origin,
        direction,
        start.screen,
        start.eye_distance,
        epsilon,
    );
    let to = axis_param(
        camera,
        snapshot.origin,
        direction,
        current,
        start.eye_distance,
        epsilon,
    );
    let mut along = to - from;
    if snapping {
        along = snap(along, config.translate_snap);
    }
    if !along.is_finite() {
        return Vector3::new(0.0, 0.0, 0.0);
    }
    let limit = config.max_translate_delta;
    direction * along.clamp(-limit, limit)
}

/// New origin for a drag that keeps the object at its drag-start distance
/// from the eye.
///
/// The cursor is shifted by the grab offset so the eye ray passes through
/// the projected object origin rather than the grabbed pixel.
pub fn constant_depth_origin<C: ViewportCamera + ?Sized>(
    camera: &C,
    snapshot: &ManipulationSnapshot,
    start: &DragStart,
    current: Point2,
    config: &GizmoConfig,
    snapping: bool,
) -> Point3 {
    let offset = start.pivot - start.screen;
    let grab = camera.eye_ray(start.screen + offset).at(start.eye_distance);
    let now = camera.eye_ray(current + offset).at(start.eye_distance);
    let mut delta = now - grab;
    if snapping {
        let step = config.translate_snap;
        delta = Vector3::new(snap(delta.x, step), snap(delta.y, step), snap(delta.z, step));
    }
    snapshot.origin + clamp_components(delta, config.max_translate_delta)
}

/// Uniform scale from the screen distance travelled since drag start,
/// signed by its horizontal component. Never drops below `min_scale`.
pub fn uniform_scale(snapshot_scale: f64, start: Point2, current: Point2, config: &GizmoConfig) -> f64 {
    let delta = current - start;
    let magnitude = f64::from(delta.length());
    let signed = if delta.x < 0.0 { -magnitude } else { magnitude };
    let scale = snapshot_scale + signed * config.scale_per_pixel;
    let min_scale = config.min_scale.max(f64::MIN_POSITIVE);
    if scale.is_finite() {
        scale.max(min_scale)
    } else {
        snapshot_scale.max(min_scale)
    }
}

/// Orientation after rotating the snapshot about `direction` by the arc-ball
/// drag from `start` to `current`. `None` for degenerate drags.
pub fn axis_rotation<C: ViewportCamera + ?Sized>(
    camera: &C,
    snapshot: &ManipulationSnapshot,
    direction: Vector3,
    start: &DragStart,
    current: Point2,
    config: &GizmoConfig,
    snapping: bool,
) -> Option<Quaternion> {
    let direction = normalize_or(direction, Vector3::unit_z());
    let arc = ArcBall::begin(start.pivot, config.arc_radius_px, start.screen);
    let (view_axis, angle) = arc.rotation(current, config.tolerance.angular)?;
    let world_axis = camera.basis().view_to_world(view_axis);
    let mut angle = world_axis.dot(direction) * angle;
    if snapping {
        angle = snap(angle.to_degrees(), config.rotate_snap_deg).to_radians();
    }
    if !angle.is_finite() {
        return None;
    }
    let delta = Quaternion::from_axis_angle(direction, Rad(angle));
    Some(renormalize(delta * snapshot.orientation))
}
