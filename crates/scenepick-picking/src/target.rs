use scenepick_geometry::Point2;

use crate::Result;

/// CPU copy of a pick target: tightly packed RGBA8 rows, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(count))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Offscreen color target the pick pass renders into.
///
/// Draws issued between `begin` and `read_back` land in submission order;
/// later triangles overwrite earlier ones.
pub trait PickTarget {
    fn size(&self) -> (u32, u32);
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;
    fn begin(&mut self, clear: [u8; 4]) -> Result<()>;
    fn fill_triangle(&mut self, points: [Point2; 3], color: [u8; 4]);
    /// Blocks until the target's contents are available on the CPU.
    fn read_back(&mut self) -> Result<PixelBuffer>;
}

impl<T: PickTarget + ?Sized> PickTarget for Box<T> {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        (**self).resize(width, height)
    }

    fn begin(&mut self, clear: [u8; 4]) -> Result<()> {
        (**self).begin(clear)
    }

    fn fill_triangle(&mut self, points: [Point2; 3], color: [u8; 4]) {
        (**self).fill_triangle(points, color)
    }

    fn read_back(&mut self) -> Result<PixelBuffer> {
        (**self).read_back()
    }
}
