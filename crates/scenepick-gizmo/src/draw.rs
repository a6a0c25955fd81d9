use scenepick_geometry::{
    Color32, OverlayPainter, OverlayShape, Point2, Point3, Quaternion, Rect, Stroke, Vector3,
    ViewportCamera, normalize_or, vec2,
};
use scenepick_picking::{PickTarget, PickingBuffer};
use scenepick_scene::SceneAccess;

use crate::HitProxy;
use crate::axis::{GizmoAxis, GizmoMode, HIGHLIGHT};
use crate::config::GizmoConfig;
use crate::widget::ManipulationWidget;

/// Screen shapes of one pickable gizmo handle.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleShapes {
    pub axis: GizmoAxis,
    pub shapes: Vec<OverlayShape>,
}

struct Anchor {
    origin: Point3,
    orientation: Quaternion,
    center: Point2,
    length: f64,
}

impl ManipulationWidget {
    fn anchor<C, S>(&self, camera: &C, scene: &S) -> Option<Anchor>
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
    {
        let target = scene.placeable(self.selected()?)?;
        let origin = target.origin();
        let (center, _) = camera.project(origin)?;
        Some(Anchor {
            origin,
            orientation: target.orientation(),
            center,
            length: camera.world_size_at(origin, self.config.axis_length_px),
        })
    }

    fn handle_color(&self, axis: GizmoAxis) -> Color32 {
        let active = self.active_axis();
        let lit = if active == GizmoAxis::None {
            self.hovered_axis() == axis
        } else {
            active == axis
        };
        if lit { HIGHLIGHT } else { axis.color() }
    }

    /// Handle geometry for the current selection and display mode, axes
    /// first and the center handle last.
    pub fn handles<C, S>(&self, camera: &C, scene: &S) -> Vec<HandleShapes>
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
    {
        let Some(anchor) = self.anchor(camera, scene) else {
            return Vec::new();
        };
        let config = &self.config;
        let mut handles = Vec::with_capacity(4);
        for axis in GizmoAxis::HANDLES {
            let Some(direction) = axis.direction(anchor.orientation) else {
                continue;
            };
            let stroke = Stroke::new(config.stroke_width, self.handle_color(axis));
            let shapes = match self.display_mode() {
                GizmoMode::Translate => arrow(camera, &anchor, direction, stroke, config),
                GizmoMode::Rotate => ring(camera, &anchor, direction, stroke, config),
                GizmoMode::Scale => scale_handle(camera, &anchor, direction, stroke, config),
            };
            if !shapes.is_empty() {
                handles.push(HandleShapes { axis, shapes });
            }
        }
        handles.push(HandleShapes {
            axis: GizmoAxis::All,
            shapes: vec![OverlayShape::Circle {
                center: anchor.center,
                radius: config.center_radius_px,
                fill: Some(self.handle_color(GizmoAxis::All)),
                stroke: None,
            }],
        });
        handles
    }

    /// Visible overlay, including the scale drag indicator.
    pub fn draw<C, S, P>(&self, camera: &C, scene: &S, painter: &mut P)
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
        P: OverlayPainter + ?Sized,
    {
        for handle in self.handles(camera, scene) {
            for shape in &handle.shapes {
                painter.paint(shape);
            }
        }
        if self.is_dragging() && self.display_mode() == GizmoMode::Scale {
            if let (Some(anchor), Some(cursor)) = (self.anchor(camera, scene), self.cursor) {
                painter.dashed_line(anchor.center, cursor, 6.0, 4.0, Stroke::new(1.0, HIGHLIGHT));
            }
        }
    }

    /// Draws every handle into the pick pass under its own proxy.
    pub fn draw_pickable<C, S, T>(
        &self,
        camera: &C,
        scene: &S,
        picking: &mut PickingBuffer<HitProxy, T>,
    ) -> scenepick_picking::Result<()>
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
        T: PickTarget,
    {
        for handle in self.handles(camera, scene) {
            picking.register_and_activate(HitProxy::Axis(handle.axis))?;
            for shape in &handle.shapes {
                picking.paint(shape);
            }
        }
        picking.deactivate();
        Ok(())
    }
}

fn axis_tip<C: ViewportCamera + ?Sized>(
    camera: &C,
    anchor: &Anchor,
    direction: Vector3,
) -> Option<Point2> {
    let (tip, _) = camera.project(anchor.origin + direction * anchor.length)?;
    // Axes pointing at the viewer collapse to a dot and are not drawn.
    (tip.distance(anchor.center) >= 1.0).then_some(tip)
}

fn arrow<C: ViewportCamera + ?Sized>(
    camera: &C,
    anchor: &Anchor,
    direction: Vector3,
    stroke: Stroke,
    config: &GizmoConfig,
) -> Vec<OverlayShape> {
    let Some(tip) = axis_tip(camera, anchor, direction) else {
        return Vec::new();
    };
    let along = (tip - anchor.center).normalized();
    let head = config.head_length_px.min(tip.distance(anchor.center));
    let base = tip - along * head;
    let side = along.perp() * (head * 0.45);
    vec![
        OverlayShape::Line {
            start: anchor.center,
            end: base,
            stroke,
        },
        OverlayShape::Polygon {
            points: vec![tip, base + side, base - side],
            fill: stroke.color,
            stroke,
        },
    ]
}

fn scale_handle<C: ViewportCamera + ?Sized>(
    camera: &C,
    anchor: &Anchor,
    direction: Vector3,
    stroke: Stroke,
    config: &GizmoConfig,
) -> Vec<OverlayShape> {
    let Some(tip) = axis_tip(camera, anchor, direction) else {
        return Vec::new();
    };
    let size = config.handle_size_px;
    vec![
        OverlayShape::Line {
            start: anchor.center,
            end: tip,
            stroke,
        },
        OverlayShape::Rect {
            rect: Rect::from_center_size(tip, vec2(size, size)),
            fill: stroke.color,
        },
    ]
}

fn ring<C: ViewportCamera + ?Sized>(
    camera: &C,
    anchor: &Anchor,
    direction: Vector3,
    stroke: Stroke,
    config: &GizmoConfig,
) -> Vec<OverlayShape> {
    let helper = if direction.x.abs() < 0.9 {
        Vector3::unit_x()
    } else {
        Vector3::unit_y()
    };
    let u = normalize_or(direction.cross(helper), Vector3::unit_y());
    let v = normalize_or(direction.cross(u), Vector3::unit_z());
    let segments = config.ring_segments.max(8);
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let angle = i as f64 / segments as f64 * std::f64::consts::TAU;
        let world = anchor.origin + (u * angle.cos() + v * angle.sin()) * anchor.length;
        // A ring crossing the near plane is skipped whole.
        let (screen, _) = match camera.project(world) {
            Some(projected) => projected,
            None => return Vec::new(),
        };
        points.push(screen);
    }
    points
        .windows(2)
        .map(|pair| OverlayShape::Line {
            start: pair[0],
            end: pair[1],
            stroke,
        })
        .collect()
}
