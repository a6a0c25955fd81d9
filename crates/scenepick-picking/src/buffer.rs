use scenepick_geometry::{Color32, OverlayPainter, Point2, Rect, Stroke};
use tracing::{debug, trace};

use crate::codec::{MAX_INDEX, NOTHING, decode, encode};
use crate::raster::{self, Triangle};
use crate::software::SoftwareTarget;
use crate::target::{PickTarget, PixelBuffer};
use crate::{PickingError, Result};

/// Index of a registered proxy, tagged with the pass that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PickHandle {
    index: u32,
    pass: u64,
}

impl PickHandle {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn pass(self) -> u64 {
        self.pass
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PickResult<P> {
    pub handle: PickHandle,
    pub proxy: P,
}

/// Identity-colored render target plus the per-pass proxy registry.
///
/// Slot 0 of the registry is permanently empty: it is what the target is
/// cleared to and what draws outside an activation are attributed to.
pub struct PickingBuffer<P, T = SoftwareTarget> {
    target: T,
    registry: Vec<Option<P>>,
    pass: u64,
    open: bool,
    active: u32,
    readback: Option<PixelBuffer>,
    stroke_padding: f32,
}

impl<P> PickingBuffer<P, SoftwareTarget> {
    pub fn software(width: u32, height: u32) -> Result<Self> {
        Ok(Self::new(SoftwareTarget::new(width, height)?))
    }
}

impl<P, T: PickTarget> PickingBuffer<P, T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            registry: vec![None],
            pass: 0,
            open: false,
            active: NOTHING,
            readback: None,
            stroke_padding: 0.0,
        }
    }

    /// Extra width added to every stroke drawn into the pick target, so thin
    /// handles are easier to hit than they look.
    pub fn with_stroke_padding(mut self, padding: f32) -> Self {
        self.stroke_padding = padding.max(0.0);
        self
    }

    pub fn size(&self) -> (u32, u32) {
        self.target.size()
    }

    /// Proxies registered in the current (or last) pass, invalidated ones
    /// included.
    pub fn registered(&self) -> usize {
        self.registry.len() - 1
    }

    pub fn readback(&self) -> Option<&PixelBuffer> {
        self.readback.as_ref()
    }

    pub fn begin_pass(&mut self) -> Result<()> {
        if self.open {
            return Err(PickingError::PassAlreadyOpen);
        }
        self.registry.clear();
        self.registry.push(None);
        self.readback = None;
        self.active = NOTHING;
        self.pass += 1;
        self.target.begin(encode(NOTHING))?;
        self.open = true;
        trace!(pass = self.pass, "pick pass begun");
        Ok(())
    }

    /// Registers `proxy` under the next index and makes it the identity that
    /// subsequent draws are attributed to.
    pub fn register_and_activate(&mut self, proxy: P) -> Result<PickHandle> {
        if !self.open {
            return Err(PickingError::PassNotOpen);
        }
        let index = u32::try_from(self.registry.len())
            .ok()
            .filter(|index| *index <= MAX_INDEX)
            .ok_or(PickingError::CapacityExceeded { max: MAX_INDEX })?;
        self.registry.push(Some(proxy));
        self.active = index;
        Ok(PickHandle {
            index,
            pass: self.pass,
        })
    }

    pub fn deactivate(&mut self) {
        self.active = NOTHING;
    }

    pub fn end_pass(&mut self) -> Result<()> {
        if !self.open {
            return Err(PickingError::PassNotOpen);
        }
        self.open = false;
        self.active = NOTHING;
        let pixels = self.target.read_back()?;
        trace!(
            pass = self.pass,
            proxies = self.registered(),
            width = pixels.width(),
            height = pixels.height(),
            "pick pass read back"
        );
        self.readback = Some(pixels);
        Ok(())
    }

    /// Drops the retained readback and registry before resizing the target,
    /// so no query can decode pixels laid out for the old size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.open {
            return Err(PickingError::ResizeDuringPass);
        }
        self.readback = None;
        self.registry.truncate(1);
        self.target.resize(width, height)?;
        debug!(width, height, "pick target resized");
        Ok(())
    }

    /// Nulls every slot holding `proxy`. Returns how many were cleared.
    pub fn invalidate(&mut self, proxy: &P) -> usize
    where
        P: PartialEq,
    {
        let mut cleared = 0;
        for slot in self.registry.iter_mut().skip(1) {
            if slot.as_ref() == Some(proxy) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn resolve(&self, handle: PickHandle) -> Option<&P> {
        if handle.pass != self.pass {
            return None;
        }
        self.registry.get(handle.index as usize)?.as_ref()
    }

    pub fn query(&self, x: u32, y: u32) -> Option<PickResult<P>>
    where
        P: Clone,
    {
        let pixels = self.readback.as_ref()?;
        let index = decode(pixels.pixel(x, y)?);
        if index == NOTHING {
            return None;
        }
        let proxy = self.registry.get(index as usize)?.clone()?;
        Some(PickResult {
            handle: PickHandle {
                index,
                pass: self.pass,
            },
            proxy,
        })
    }

    /// Query at a fractional screen position; negative or non-finite
    /// coordinates resolve to nothing.
    pub fn query_at(&self, pos: Point2) -> Option<PickResult<P>>
    where
        P: Clone,
    {
        if !pos.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        self.query(pos.x.floor() as u32, pos.y.floor() as u32)
    }

    pub fn fill_triangle(&mut self, points: [Point2; 3]) {
        if !self.open {
            return;
        }
        self.target.fill_triangle(points, encode(self.active));
    }

    fn fill_all(&mut self, triangles: impl IntoIterator<Item = Triangle>) {
        for tri in triangles {
            self.fill_triangle(tri);
        }
    }
}

// Colors are ignored: everything is drawn in the active identity.
impl<P, T: PickTarget> OverlayPainter for PickingBuffer<P, T> {
    fn rect_filled(&mut self, rect: Rect, _fill: Color32) {
        self.fill_all(raster::rect(rect));
    }

    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        let width = stroke.width + self.stroke_padding;
        self.fill_all(raster::thick_line(start, end, width));
    }

    fn circle_filled(&mut self, center: Point2, radius: f32, _fill: Color32) {
        self.fill_all(raster::disc(center, radius + self.stroke_padding * 0.5));
    }

    fn circle_stroke(&mut self, center: Point2, radius: f32, stroke: Stroke) {
        let width = stroke.width + self.stroke_padding;
        self.fill_all(raster::annulus(center, radius, width));
    }

    fn polygon(&mut self, points: Vec<Point2>, _fill: Color32, _stroke: Stroke) {
        self.fill_all(raster::convex_polygon(&points));
    }
}
