use scenepick_geometry::{Color32, OverlayPainter, Rect, pos2, vec2};
use scenepick_picking::{PickingBuffer, Result, decode, encode};

fn pixel(x: u32, y: u32) -> Rect {
    Rect::from_min_size(pos2(x as f32, y as f32), vec2(1.0, 1.0))
}

#[test]
fn pixels_resolve_to_the_handle_active_when_drawn() -> Result<()> {
    let mut picking: PickingBuffer<&str> = PickingBuffer::software(32, 32)?;
    picking.begin_pass()?;
    let a = picking.register_and_activate("A")?;
    picking.rect_filled(pixel(10, 10), Color32::WHITE);
    let b = picking.register_and_activate("B")?;
    picking.rect_filled(pixel(20, 20), Color32::WHITE);
    picking.deactivate();
    picking.end_pass()?;

    assert_eq!((a.index(), b.index()), (1, 2));
    let hit_a = picking.query(10, 10).expect("A drawn");
    assert_eq!((hit_a.handle, hit_a.proxy), (a, "A"));
    let hit_b = picking.query(20, 20).expect("B drawn");
    assert_eq!((hit_b.handle, hit_b.proxy), (b, "B"));
    assert!(picking.query(0, 0).is_none());
    Ok(())
}

#[test]
fn later_activations_never_claim_earlier_pixels() -> Result<()> {
    let mut picking: PickingBuffer<u32> = PickingBuffer::software(64, 8)?;
    picking.begin_pass()?;
    for i in 0..64u32 {
        picking.register_and_activate(i)?;
        picking.rect_filled(pixel(i, 3), Color32::WHITE);
    }
    picking.end_pass()?;
    for i in 0..64u32 {
        let hit = picking.query(i, 3).expect("drawn");
        assert_eq!(hit.proxy, i);
        assert_eq!(hit.handle.index(), i + 1);
    }
    Ok(())
}

#[test]
fn invalidated_proxies_stop_resolving_before_next_pass() -> Result<()> {
    let mut picking: PickingBuffer<&str> = PickingBuffer::software(16, 16)?;
    picking.begin_pass()?;
    let handle = picking.register_and_activate("doomed")?;
    picking.rect_filled(pixel(4, 4), Color32::WHITE);
    picking.register_and_activate("kept")?;
    picking.rect_filled(pixel(8, 8), Color32::WHITE);
    picking.end_pass()?;

    assert_eq!(picking.invalidate(&"doomed"), 1);
    assert!(picking.query(4, 4).is_none());
    assert!(picking.resolve(handle).is_none());
    assert_eq!(picking.query(8, 8).map(|hit| hit.proxy), Some("kept"));
    Ok(())
}

#[test]
fn resize_drops_every_answer_until_next_pass() -> Result<()> {
    let mut picking: PickingBuffer<&str> = PickingBuffer::software(16, 16)?;
    picking.begin_pass()?;
    picking.register_and_activate("all")?;
    picking.rect_filled(Rect::from_min_size(pos2(0.0, 0.0), vec2(16.0, 16.0)), Color32::WHITE);
    picking.end_pass()?;
    assert!(picking.query(5, 5).is_some());

    picking.resize(32, 32)?;
    for y in 0..32 {
        for x in 0..32 {
            assert!(picking.query(x, y).is_none());
        }
    }
    assert!(picking.resize(0, 10).is_err());
    Ok(())
}

#[test]
fn nothing_color_never_decodes_to_a_handle() {
    assert_eq!(decode(encode(0)), 0);
    assert_eq!(decode([0, 0, 0, 0]), 0);
}
