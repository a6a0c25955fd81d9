use scenepick_geometry::Point2;

use crate::target::{PickTarget, PixelBuffer};
use crate::{PickingError, Result};

/// CPU rasterizer used headless and in tests.
///
/// A pixel is covered when its centre lies inside or on the edge of a
/// triangle. There is no depth buffer: submission order decides overlap.
#[derive(Clone, Debug)]
pub struct SoftwareTarget {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl SoftwareTarget {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut target = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        target.resize(width, height)?;
        Ok(target)
    }
}

fn edge(a: Point2, b: Point2, p: Point2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl PickTarget for SoftwareTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PickingError::EmptyViewport { width, height });
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0; 4]; width as usize * height as usize];
        Ok(())
    }

    fn begin(&mut self, clear: [u8; 4]) -> Result<()> {
        self.pixels.fill(clear);
        Ok(())
    }

    fn fill_triangle(&mut self, points: [Point2; 3], color: [u8; 4]) {
        let [a, b, c] = points;
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return;
        }
        let area = edge(a, b, c);
        if area.abs() <= f32::EPSILON {
            return;
        }

        let max_x = self.width as f32 - 1.0;
        let max_y = self.height as f32 - 1.0;
        let x0 = a.x.min(b.x).min(c.x).floor().clamp(0.0, max_x) as u32;
        let x1 = a.x.max(b.x).max(c.x).ceil().clamp(0.0, max_x) as u32;
        let y0 = a.y.min(b.y).min(c.y).floor().clamp(0.0, max_y) as u32;
        let y1 = a.y.max(b.y).max(c.y).ceil().clamp(0.0, max_y) as u32;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.pixels[y as usize * self.width as usize + x as usize] = color;
                }
            }
        }
    }

    fn read_back(&mut self) -> Result<PixelBuffer> {
        let data = self.pixels.iter().flatten().copied().collect();
        Ok(PixelBuffer::new(self.width, self.height, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenepick_geometry::pos2;

    #[test]
    fn triangle_covers_pixel_centres_in_either_winding() -> Result<()> {
        let mut target = SoftwareTarget::new(8, 8)?;
        target.begin([0, 0, 0, 255])?;
        target.fill_triangle([pos2(0.0, 0.0), pos2(8.0, 0.0), pos2(0.0, 8.0)], [9, 0, 0, 255]);
        target.fill_triangle([pos2(8.0, 8.0), pos2(8.0, 4.0), pos2(4.0, 8.0)], [7, 0, 0, 255]);
        let pixels = target.read_back()?;
        assert_eq!(pixels.pixel(1, 1), Some([9, 0, 0, 255]));
        assert_eq!(pixels.pixel(7, 7), Some([7, 0, 0, 255]));
        assert_eq!(pixels.pixel(5, 5), Some([0, 0, 0, 255]));
        Ok(())
    }

    #[test]
    fn offscreen_geometry_is_clipped() -> Result<()> {
        let mut target = SoftwareTarget::new(4, 4)?;
        target.begin([0, 0, 0, 255])?;
        target.fill_triangle(
            [pos2(-100.0, -100.0), pos2(103.0, -100.0), pos2(-100.0, 103.0)],
            [1, 2, 3, 255],
        );
        let pixels = target.read_back()?;
        assert_eq!(pixels.pixel(0, 0), Some([1, 2, 3, 255]));
        assert_eq!(pixels.pixel(1, 0), Some([1, 2, 3, 255]));
        assert_eq!(pixels.pixel(3, 3), Some([0, 0, 0, 255]));
        assert_eq!(pixels.pixel(4, 0), None);
        Ok(())
    }

    #[test]
    fn zero_sized_target_is_rejected() {
        assert!(matches!(
            SoftwareTarget::new(0, 10),
            Err(PickingError::EmptyViewport { .. })
        ));
    }
}
