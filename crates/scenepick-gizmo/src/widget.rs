use scenepick_geometry::{Point2, ViewportCamera};
use scenepick_picking::{PickTarget, PickingBuffer};
use scenepick_scene::{ObjectId, SceneAccess};
use tracing::debug;

use crate::HitProxy;
use crate::axis::{GizmoAxis, GizmoMode};
use crate::config::GizmoConfig;
use crate::drag::{
    DragStart, ManipulationSnapshot, axis_rotation, axis_translation, constant_depth_origin,
    uniform_scale,
};
use crate::input::{InputEvent, Key, Modifiers, MouseButton};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GizmoState {
    #[default]
    Idle,
    Selected {
        object: ObjectId,
    },
    Dragging {
        object: ObjectId,
        axis: GizmoAxis,
        /// Mode the drag started in; later mode switches do not affect it.
        mode: GizmoMode,
        start: DragStart,
    },
}

impl GizmoState {
    pub fn selected(&self) -> Option<ObjectId> {
        match *self {
            GizmoState::Idle => None,
            GizmoState::Selected { object } | GizmoState::Dragging { object, .. } => Some(object),
        }
    }
}

/// Selection and transform-drag state machine driven by pick results.
#[derive(Clone, Debug, Default)]
pub struct ManipulationWidget {
    pub(crate) config: GizmoConfig,
    mode: GizmoMode,
    state: GizmoState,
    hovered_axis: GizmoAxis,
    highlighted: Option<ObjectId>,
    snapshot: Option<ManipulationSnapshot>,
    modifiers: Modifiers,
    pub(crate) cursor: Option<Point2>,
}

impl ManipulationWidget {
    pub fn new(config: GizmoConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GizmoMode) {
        if self.mode != mode {
            debug!(%mode, "gizmo mode changed");
            self.mode = mode;
        }
    }

    pub fn state(&self) -> &GizmoState {
        &self.state
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.state.selected()
    }

    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlighted
    }

    pub fn hovered_axis(&self) -> GizmoAxis {
        self.hovered_axis
    }

    pub fn active_axis(&self) -> GizmoAxis {
        match self.state {
            GizmoState::Dragging { axis, .. } => axis,
            _ => GizmoAxis::None,
        }
    }

    /// Mode whose handles are shown: the drag's own mode while dragging.
    pub fn display_mode(&self) -> GizmoMode {
        match self.state {
            GizmoState::Dragging { mode, .. } => mode,
            _ => self.mode,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GizmoState::Dragging { .. })
    }

    pub fn snapshot(&self) -> Option<&ManipulationSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn select<S: SceneAccess + ?Sized>(&mut self, object: ObjectId, scene: &S) -> bool {
        let Some(target) = scene.placeable(object) else {
            return false;
        };
        self.snapshot = Some(ManipulationSnapshot::capture(target));
        if self.state.selected() != Some(object) {
            debug!(%object, "object selected");
        }
        self.state = GizmoState::Selected { object };
        true
    }

    /// Back to `Idle`. Edits already applied to the object are kept.
    pub fn reset(&mut self) {
        if let Some(object) = self.state.selected() {
            debug!(%object, "selection cleared");
        }
        self.state = GizmoState::Idle;
        self.snapshot = None;
        self.hovered_axis = GizmoAxis::None;
    }

    /// Destruction notification from the scene.
    pub fn object_destroyed(&mut self, id: ObjectId) {
        if self.highlighted == Some(id) {
            self.highlighted = None;
        }
        if self.state.selected() == Some(id) {
            self.reset();
        }
    }

    /// Applies one input event. Hit tests use the last completed pick pass.
    /// Returns whether selection or an object transform changed.
    pub fn handle_event<C, S, T>(
        &mut self,
        event: &InputEvent,
        picking: &PickingBuffer<HitProxy, T>,
        camera: &C,
        scene: &mut S,
    ) -> bool
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
        T: PickTarget,
    {
        self.modifiers = event.modifiers();
        if let Some(pos) = event.position() {
            self.cursor = Some(pos);
        }
        match *event {
            InputEvent::MouseMove { pos, .. } => {
                if self.is_dragging() {
                    self.update_drag(pos, camera, scene)
                } else {
                    self.update_hover(picking.query_at(pos).map(|hit| hit.proxy));
                    false
                }
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
                pos,
                ..
            } => {
                let hit = picking.query_at(pos).map(|hit| hit.proxy);
                self.press(pos, hit, camera, scene)
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
                pos,
                ..
            } => self.release(pos, camera, scene),
            InputEvent::MouseButton { .. } => false,
            InputEvent::Key {
                key, pressed: true, ..
            } => self.key(key),
            InputEvent::Key { .. } => false,
        }
    }

    fn update_hover(&mut self, hit: Option<HitProxy>) {
        match hit {
            Some(HitProxy::Axis(axis)) => {
                self.hovered_axis = axis;
                self.highlighted = None;
            }
            Some(HitProxy::Object(object)) => {
                self.hovered_axis = GizmoAxis::None;
                self.highlighted = Some(object);
            }
            None => {
                self.hovered_axis = GizmoAxis::None;
                self.highlighted = None;
            }
        }
    }

    fn press<C, S>(&mut self, pos: Point2, hit: Option<HitProxy>, camera: &C, scene: &mut S) -> bool
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
    {
        if self.is_dragging() {
            return false;
        }
        match hit {
            Some(HitProxy::Axis(GizmoAxis::None)) => false,
            Some(HitProxy::Axis(axis)) => match self.state.selected() {
                Some(object) => self.begin_drag(object, axis, pos, camera, &*scene),
                None => false,
            },
            Some(HitProxy::Object(object)) => self.select(object, &*scene),
            None => {
                let had_selection = self.state.selected().is_some();
                self.reset();
                had_selection
            }
        }
    }

    fn begin_drag<C, S>(
        &mut self,
        object: ObjectId,
        axis: GizmoAxis,
        pos: Point2,
        camera: &C,
        scene: &S,
    ) -> bool
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
    {
        let Some(target) = scene.placeable(object) else {
            self.reset();
            return false;
        };
        let snapshot = ManipulationSnapshot::capture(target);
        let start = DragStart::new(camera, &snapshot, pos);
        let mode = self.mode;
        self.snapshot = Some(snapshot);
        self.state = GizmoState::Dragging {
            object,
            axis,
            mode,
            start,
        };
        debug!(%object, ?axis, %mode, "drag started");
        true
    }

    fn update_drag<C, S>(&mut self, pos: Point2, camera: &C, scene: &mut S) -> bool
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
    {
        let GizmoState::Dragging {
            object,
            axis,
            mode,
            start,
        } = self.state
        else {
            return false;
        };
        let Some(snapshot) = self.snapshot else {
            return false;
        };
        let Some(target) = scene.placeable_mut(object) else {
            self.reset();
            return false;
        };
        let config = &self.config;
        let snapping = self.modifiers.shift;
        let direction = axis.direction(snapshot.orientation);
        match (direction, mode) {
            (None, _) => {
                let origin =
                    constant_depth_origin(camera, &snapshot, &start, pos, config, snapping);
                target.set_origin(origin);
            }
            (Some(direction), GizmoMode::Translate) => {
                let delta = axis_translation(
                    camera, &snapshot, direction, &start, pos, config, snapping,
                );
                target.set_origin(snapshot.origin + delta);
            }
            (Some(direction), GizmoMode::Rotate) => {
                match axis_rotation(camera, &snapshot, direction, &start, pos, config, snapping) {
                    Some(orientation) => target.set_orientation(orientation),
                    None => return false,
                }
            }
            (Some(_), GizmoMode::Scale) => {
                target.set_scale(uniform_scale(snapshot.scale, start.screen, pos, config));
            }
        }
        true
    }

    fn release<C, S>(&mut self, pos: Point2, camera: &C, scene: &mut S) -> bool
    where
        C: ViewportCamera + ?Sized,
        S: SceneAccess + ?Sized,
    {
        let GizmoState::Dragging { object, .. } = self.state else {
            return false;
        };
        self.update_drag(pos, camera, scene);
        // The drag may have been aborted by a vanished target.
        if !self.is_dragging() {
            return true;
        }
        match scene.placeable(object) {
            Some(target) => {
                self.snapshot = Some(ManipulationSnapshot::capture(target));
                self.state = GizmoState::Selected { object };
                debug!(%object, "drag finished");
            }
            None => self.reset(),
        }
        true
    }

    fn key(&mut self, key: Key) -> bool {
        match key {
            Key::T | Key::M => self.set_mode(GizmoMode::Translate),
            Key::R => self.set_mode(GizmoMode::Rotate),
            Key::E => self.set_mode(GizmoMode::Scale),
            Key::Escape => {
                let had_selection = self.state.selected().is_some();
                self.reset();
                return had_selection;
            }
        }
        false
    }
}
