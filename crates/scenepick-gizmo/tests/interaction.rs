use scenepick_geometry::{
    Color32, EuclideanSpace, OverlayPainter, OverlayShape, PerspectiveCamera, Point2, Point3,
    Rect, Vector3, ViewportCamera, pos2, vec2,
};
use scenepick_gizmo::{
    GizmoAxis, GizmoMode, GizmoState, HitProxy, InputEvent, Key, ManipulationWidget, Modifiers,
    MouseButton,
};
use scenepick_picking::{PickingBuffer, Result};
use scenepick_scene::{ObjectId, Placeable, Scene, SceneObject};

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::look_at(
        Point3::new(2.0, -10.0, 3.0),
        Point3::origin(),
        Vector3::unit_z(),
    )
    .with_viewport(320, 240)
}

fn press(pos: Point2) -> InputEvent {
    InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
        pos,
        modifiers: Modifiers::default(),
    }
}

fn release(pos: Point2) -> InputEvent {
    InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: false,
        pos,
        modifiers: Modifiers::default(),
    }
}

fn key(key: Key) -> InputEvent {
    InputEvent::Key {
        key,
        pressed: true,
        modifiers: Modifiers::default(),
    }
}

/// One pick pass with the object drawn as a small square at its projected
/// origin, followed by the gizmo handles.
fn render(
    picking: &mut PickingBuffer<HitProxy>,
    widget: &ManipulationWidget,
    camera: &PerspectiveCamera,
    scene: &Scene,
    id: ObjectId,
) -> Result<()> {
    picking.begin_pass()?;
    if let Some((center, _)) = scene.get(id).and_then(|o| camera.project(o.origin())) {
        picking.register_and_activate(HitProxy::Object(id))?;
        picking.rect_filled(Rect::from_center_size(center, vec2(30.0, 30.0)), Color32::WHITE);
        picking.deactivate();
    }
    widget.draw_pickable(camera, scene, picking)?;
    picking.end_pass()
}

#[test]
fn translate_x_drag_moves_along_x_only() -> Result<()> {
    let camera = camera();
    let mut scene = Scene::new();
    let id = scene.spawn(SceneObject::new("o", Point3::origin()));
    let mut picking = PickingBuffer::<HitProxy>::software(320, 240)?;
    let mut widget = ManipulationWidget::default();

    let (center, _) = camera.project(Point3::origin()).expect("visible");
    render(&mut picking, &widget, &camera, &scene, id)?;
    widget.handle_event(&press(center), &picking, &camera, &mut scene);
    widget.handle_event(&release(center), &picking, &camera, &mut scene);
    assert_eq!(widget.selected(), Some(id));

    render(&mut picking, &widget, &camera, &scene, id)?;
    let (x_tip, _) = camera.project(Point3::new(3.0, 0.0, 0.0)).expect("visible");
    let p0 = center.lerp(x_tip, 0.7);
    assert_eq!(
        picking.query_at(p0).map(|hit| hit.proxy),
        Some(HitProxy::Axis(GizmoAxis::X))
    );
    widget.handle_event(&press(p0), &picking, &camera, &mut scene);
    assert!(widget.is_dragging());

    let p1 = p0 + (x_tip - center) * 0.5;
    widget.handle_event(&InputEvent::mouse_move(p1), &picking, &camera, &mut scene);
    widget.handle_event(&release(p1), &picking, &camera, &mut scene);

    let origin = scene.get(id).expect("live").origin();
    assert!(origin.x > 0.0);
    assert!(origin.y.abs() < 1.0e-9);
    assert!(origin.z.abs() < 1.0e-9);
    assert_eq!(widget.state(), &GizmoState::Selected { object: id });
    assert_eq!(widget.snapshot().map(|s| s.origin), Some(origin));
    Ok(())
}

#[test]
fn releasing_shift_mid_drag_stops_snapping() -> Result<()> {
    let camera = camera();
    let mut scene = Scene::new();
    let id = scene.spawn(SceneObject::new("o", Point3::origin()));
    let mut picking = PickingBuffer::<HitProxy>::software(320, 240)?;
    let mut widget = ManipulationWidget::default();
    let step = widget.config().translate_snap;
    assert!(widget.select(id, &scene));
    render(&mut picking, &widget, &camera, &scene, id)?;

    let (center, _) = camera.project(Point3::origin()).expect("visible");
    let (x_tip, _) = camera.project(Point3::new(3.0, 0.0, 0.0)).expect("visible");
    let p0 = center.lerp(x_tip, 0.7);
    let shift = Modifiers {
        shift: true,
        ..Modifiers::default()
    };
    let pressed = InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
        pos: p0,
        modifiers: shift,
    };
    widget.handle_event(&pressed, &picking, &camera, &mut scene);
    assert_eq!(widget.active_axis(), GizmoAxis::X);

    let p1 = p0 + (x_tip - center) * 0.45;
    let held = InputEvent::MouseMove {
        pos: p1,
        modifiers: shift,
    };
    widget.handle_event(&held, &picking, &camera, &mut scene);
    let snapped = scene.get(id).expect("live").origin().x;
    assert!(snapped > 0.0);
    assert!((snapped / step - (snapped / step).round()).abs() < 1.0e-9);

    widget.handle_event(&InputEvent::mouse_move(p1), &picking, &camera, &mut scene);
    let free = scene.get(id).expect("live").origin().x;
    assert!((free / step - (free / step).round()).abs() > 1.0e-6);
    assert!((free - snapped).abs() <= step * 0.5 + 1.0e-9);
    Ok(())
}

#[test]
fn escape_and_destruction_return_to_idle() -> Result<()> {
    let camera = camera();
    let mut scene = Scene::new();
    let id = scene.spawn(SceneObject::new("o", Point3::origin()));
    let picking = PickingBuffer::<HitProxy>::software(320, 240)?;
    let mut widget = ManipulationWidget::default();

    assert!(widget.select(id, &scene));
    widget.handle_event(&key(Key::Escape), &picking, &camera, &mut scene);
    assert_eq!(widget.state(), &GizmoState::Idle);

    assert!(widget.select(id, &scene));
    scene.destroy(id);
    widget.object_destroyed(id);
    assert_eq!(widget.state(), &GizmoState::Idle);
    assert!(!widget.select(id, &scene));
    Ok(())
}

#[test]
fn mode_keys_do_not_change_an_active_drag() -> Result<()> {
    let camera = camera();
    let mut scene = Scene::new();
    let id = scene.spawn(SceneObject::new("o", Point3::origin()));
    let mut picking = PickingBuffer::<HitProxy>::software(320, 240)?;
    let mut widget = ManipulationWidget::default();
    assert!(widget.select(id, &scene));
    widget.handle_event(&key(Key::E), &picking, &camera, &mut scene);
    assert_eq!(widget.mode(), GizmoMode::Scale);

    render(&mut picking, &widget, &camera, &scene, id)?;
    let (center, _) = camera.project(Point3::origin()).expect("visible");
    widget.handle_event(&press(center), &picking, &camera, &mut scene);
    assert_eq!(widget.active_axis(), GizmoAxis::All);

    widget.handle_event(&key(Key::R), &picking, &camera, &mut scene);
    assert_eq!(widget.mode(), GizmoMode::Rotate);
    assert_eq!(widget.display_mode(), GizmoMode::Scale);

    // Center-handle drags move the object whatever the mode.
    let moved = pos2(center.x + 40.0, center.y);
    widget.handle_event(&InputEvent::mouse_move(moved), &picking, &camera, &mut scene);
    let object = scene.get(id).expect("live");
    assert!(object.origin().x > 0.0);
    assert_eq!(object.scale(), 1.0);
    Ok(())
}

#[test]
fn scale_drag_on_axis_handle_is_uniform_and_positive() -> Result<()> {
    let camera = camera();
    let mut scene = Scene::new();
    let id = scene.spawn(SceneObject::new("o", Point3::origin()));
    let mut picking = PickingBuffer::<HitProxy>::software(320, 240)?;
    let mut widget = ManipulationWidget::default();
    assert!(widget.select(id, &scene));
    widget.handle_event(&key(Key::E), &picking, &camera, &mut scene);
    render(&mut picking, &widget, &camera, &scene, id)?;

    let handle = widget
        .handles(&camera, &scene)
        .into_iter()
        .find(|handle| handle.axis == GizmoAxis::Z)
        .expect("z handle");
    let grab = match handle.shapes.last() {
        Some(OverlayShape::Rect { rect, .. }) => rect.center(),
        other => panic!("unexpected shape {other:?}"),
    };
    widget.handle_event(&press(grab), &picking, &camera, &mut scene);
    assert_eq!(widget.active_axis(), GizmoAxis::Z);

    for dx in [-50.0, -400.0, -2000.0] {
        let pos = pos2(grab.x + dx, grab.y);
        widget.handle_event(&InputEvent::mouse_move(pos), &picking, &camera, &mut scene);
        assert!(scene.get(id).expect("live").scale() > 0.0);
    }
    let pos = pos2(grab.x + 100.0, grab.y);
    widget.handle_event(&InputEvent::mouse_move(pos), &picking, &camera, &mut scene);
    assert!((scene.get(id).expect("live").scale() - 2.0).abs() < 1.0e-6);
    Ok(())
}

#[test]
fn clicking_empty_space_clears_selection() -> Result<()> {
    let camera = camera();
    let mut scene = Scene::new();
    let id = scene.spawn(SceneObject::new("o", Point3::origin()));
    let mut picking = PickingBuffer::<HitProxy>::software(320, 240)?;
    let mut widget = ManipulationWidget::default();
    assert!(widget.select(id, &scene));
    render(&mut picking, &widget, &camera, &scene, id)?;
    assert!(widget.handle_event(&press(pos2(2.0, 2.0)), &picking, &camera, &mut scene));
    assert_eq!(widget.selected(), None);
    Ok(())
}
