//! Compositing of nearest-site fields and altitude samplers into RGBA pixel buffers.
//!
//! - [`colormap`]: piecewise-linear color ramps
//! - [`compositor`]: erodibility and coastline view of a nearest-site field
//! - [`relief`]: shaded relief from an external altitude sampler
pub mod colormap;
pub mod compositor;
pub mod relief;

pub use colormap::{ColorStop, Colormap};
pub use compositor::{compose_sites, CompositeOptions};
pub use relief::{compose_relief, ReliefOptions};

/// Neutral fill used when there is nothing to draw.
pub const PLACEHOLDER_COLOR: [u8; 3] = [0xaa, 0xaa, 0xaa];

/// Row-major RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates an opaque buffer filled with `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let len = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Writes an opaque pixel; writes outside the buffer are ignored.
    pub fn put_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}
