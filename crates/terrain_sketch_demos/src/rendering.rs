use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::RgbaImage;
use terrain_sketch::render::PixelBuffer;
use terrain_sketch::site::Site;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber, honoring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Writes a pixel buffer as PNG.
pub fn save_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let image = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .context("pixel buffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {}x{} image to {}.", buffer.width(), buffer.height(), path.display());
    Ok(())
}

/// How site markers are drawn on top of a composited buffer.
#[derive(Clone, Copy, Debug)]
pub struct MarkerStyle {
    pub color: [u8; 3],
    pub selected_color: [u8; 3],
    /// Half side length of the square marker in pixels.
    pub half_size: i32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            selected_color: [255, 51, 51],
            half_size: 2,
        }
    }
}

/// Draws a square marker for every site, mapping `surface_extent` onto the buffer.
pub fn draw_site_markers(
    buffer: &mut PixelBuffer,
    sites: &[Site],
    surface_extent: Vec2,
    selection: Option<usize>,
    style: &MarkerStyle,
) {
    let to_pixels = Vec2::new(
        buffer.width() as f32 / surface_extent.x,
        buffer.height() as f32 / surface_extent.y,
    );
    for (i, site) in sites.iter().enumerate() {
        let color = if selection == Some(i) {
            style.selected_color
        } else {
            style.color
        };
        let center = (site.position * to_pixels).floor();
        let (cx, cy) = (center.x as i32, center.y as i32);
        for dy in -style.half_size..=style.half_size {
            for dx in -style.half_size..=style.half_size {
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 {
                    buffer.put_rgb(x as u32, y as u32, color);
                }
            }
        }
    }
}
