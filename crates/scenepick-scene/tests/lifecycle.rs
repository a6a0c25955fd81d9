use scenepick_geometry::{Point3, Vector3};
use scenepick_scene::{Placeable, Result, SceneDescription, SceneEvent, SceneObject};

#[test]
fn description_spawns_and_destruction_is_observable() -> Result<()> {
    let mut scene = SceneDescription::from_json(
        r#"{
            "objects": [
                { "name": "a", "origin": [0.0, 0.0, 0.0] },
                { "name": "b", "origin": [2.0, 0.0, 0.0], "half_extents": [1.0, 0.5, 0.25] }
            ]
        }"#,
    )?
    .build()?;
    assert_eq!(scene.drain_events().count(), 2);

    let b = scene.find_by_name("b").expect("spawned");
    let bounds = scene.get(b).expect("live").world_bounds();
    assert_eq!(bounds.min, Point3::new(1.0, -0.5, -0.25));
    assert_eq!(bounds.max, Point3::new(3.0, 0.5, 0.25));

    let a = scene.find_by_name("a").expect("spawned");
    scene.destroy(a);
    let c = scene.spawn(SceneObject::new("c", Point3::new(0.0, 0.0, 1.0)));
    let events: Vec<_> = scene.drain_events().collect();
    assert_eq!(events, vec![SceneEvent::Destroyed(a), SceneEvent::Spawned(c)]);
    assert!(scene.get(a).is_none());
    assert_eq!(scene.len(), 2);
    Ok(())
}

#[test]
fn scaled_box_bounds_follow_scale() {
    let object = SceneObject::new("s", Point3::new(0.0, 0.0, 0.0))
        .with_half_extents(Vector3::new(1.0, 1.0, 1.0))
        .with_scale(2.0);
    let bounds = object.world_bounds();
    assert_eq!(bounds.size(), Vector3::new(4.0, 4.0, 4.0));
}
