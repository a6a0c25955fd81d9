use std::collections::VecDeque;

use scenepick_geometry::{
    Color32, InnerSpace, OverlayCollector, OverlayShape, PerspectiveCamera, Point2,
};
use scenepick_gizmo::{HitProxy, InputEvent, ManipulationWidget};
use scenepick_picking::{PickTarget, PickingBuffer, SoftwareTarget};
use scenepick_scene::{ObjectId, Placeable, Scene, SceneEvent, SceneObject};
use tracing::{debug, trace};

use crate::config::SessionConfig;
use crate::render::draw_object;
use crate::Result;

const OBJECT_FILL: Color32 = Color32::from_gray(170);
const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(210, 200, 140);

/// One viewport: camera, pick pass, gizmo and the input queue, advanced by
/// [`ViewportSession::tick`] once per frame.
pub struct ViewportSession<T: PickTarget = SoftwareTarget> {
    camera: PerspectiveCamera,
    picking: PickingBuffer<HitProxy, T>,
    widget: ManipulationWidget,
    events: VecDeque<InputEvent>,
    overlay: OverlayCollector,
    frame: u64,
}

impl ViewportSession<SoftwareTarget> {
    pub fn software(config: &SessionConfig) -> Result<Self> {
        let target = SoftwareTarget::new(config.viewport.width, config.viewport.height)?;
        Self::new(config, target)
    }
}

impl<T: PickTarget> ViewportSession<T> {
    pub fn new(config: &SessionConfig, target: T) -> Result<Self> {
        config.validate()?;
        let (width, height) = target.size();
        let camera = config.viewport.camera().with_viewport(width, height);
        let picking = PickingBuffer::new(target).with_stroke_padding(config.gizmo.pick_padding);
        Ok(Self {
            camera,
            picking,
            widget: ManipulationWidget::new(config.gizmo.clone()),
            events: VecDeque::new(),
            overlay: OverlayCollector::default(),
            frame: 0,
        })
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn picking(&self) -> &PickingBuffer<HitProxy, T> {
        &self.picking
    }

    pub fn widget(&self) -> &ManipulationWidget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut ManipulationWidget {
        &mut self.widget
    }

    /// Visible shapes produced by the last frame.
    pub fn overlay(&self) -> &[OverlayShape] {
        &self.overlay.shapes
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Proxy under `pos` in the last completed pass.
    pub fn pick(&self, pos: Point2) -> Option<HitProxy> {
        self.picking.query_at(pos).map(|hit| hit.proxy)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.picking.resize(width, height)?;
        self.camera.set_viewport(width, height);
        debug!(width, height, "viewport resized");
        Ok(())
    }

    /// Applies queued scene notifications: destroyed objects are dropped from
    /// the pick registry and from the gizmo's selection.
    pub fn sync_scene(&mut self, scene: &mut Scene) {
        let destroyed: Vec<ObjectId> = scene
            .drain_events()
            .filter_map(|event| match event {
                SceneEvent::Destroyed(id) => Some(id),
                SceneEvent::Spawned(_) => None,
            })
            .collect();
        for id in destroyed {
            let cleared = self.picking.invalidate(&HitProxy::Object(id));
            self.widget.object_destroyed(id);
            trace!(%id, cleared, "pick proxies invalidated");
        }
    }

    /// Runs one frame. Returns how many input events changed the selection
    /// or an object transform.
    pub fn tick(&mut self, scene: &mut Scene) -> Result<usize> {
        self.sync_scene(scene);
        let mut changed = 0;
        while let Some(event) = self.events.pop_front() {
            if self
                .widget
                .handle_event(&event, &self.picking, &self.camera, scene)
            {
                changed += 1;
            }
        }
        self.render(scene)?;
        self.frame += 1;
        Ok(changed)
    }

    fn render(&mut self, scene: &Scene) -> Result<()> {
        self.picking.begin_pass()?;
        let drawn = self.draw_pick_pass(scene);
        let ended = self.picking.end_pass();
        drawn?;
        ended?;

        self.overlay.clear();
        for (id, object) in self.back_to_front(scene) {
            let fill = if self.widget.highlighted() == Some(id) {
                HIGHLIGHT_FILL
            } else {
                OBJECT_FILL
            };
            draw_object(&mut self.overlay, &self.camera, object, fill);
        }
        self.widget.draw(&self.camera, scene, &mut self.overlay);
        trace!(
            frame = self.frame,
            proxies = self.picking.registered(),
            shapes = self.overlay.shapes.len(),
            "frame rendered"
        );
        Ok(())
    }

    fn draw_pick_pass(&mut self, scene: &Scene) -> Result<()> {
        for (id, object) in self.back_to_front(scene) {
            self.picking.register_and_activate(HitProxy::Object(id))?;
            draw_object(&mut self.picking, &self.camera, object, OBJECT_FILL);
        }
        self.picking.deactivate();
        self.widget.draw_pickable(&self.camera, scene, &mut self.picking)?;
        Ok(())
    }

    /// Without a depth buffer the nearest object has to be drawn last.
    fn back_to_front<'s>(&self, scene: &'s Scene) -> Vec<(ObjectId, &'s SceneObject)> {
        let eye = self.camera.eye;
        let mut objects: Vec<_> = scene
            .iter()
            .map(|(id, object)| (id, object, (object.origin() - eye).magnitude2()))
            .collect();
        objects.sort_by(|a, b| b.2.total_cmp(&a.2));
        objects.into_iter().map(|(id, object, _)| (id, object)).collect()
    }
}
