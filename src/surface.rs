//! Drawing-surface seam for the glitch renderer.
//!
//! The core never owns a real canvas: the host supplies a [`DrawSurface`]
//! (clear + row blit with horizontal offset) and a [`TextRasterizer`]
//! (measure + one-time master render). [`RenderSurface`] holds the off-screen
//! master bitmap those operations sample from; it is rendered exactly once
//! per surface lifetime and never mutated afterwards.
//!
//! [`PixmapSurface`] and [`BlockRasterizer`] are software implementations for
//! headless hosts and tests.

use image::{Rgba, RgbaImage};

use crate::config::GlitchConfig;
use crate::error::{MotionError, MotionResult};

/// Solid white, the loader's text color.
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Measured bounding box of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width in pixels.
    pub width: f32,
}

/// Host-provided text measurement and rasterization.
pub trait TextRasterizer {
    /// Measure `text` at the given size and weight.
    fn measure(&self, text: &str, font_size: f32, weight: u16) -> MotionResult<TextMetrics>;

    /// Draw `text` once into `target` at `x`, vertically centered on
    /// `center_y` (middle baseline).
    fn raster(
        &self,
        text: &str,
        font_size: f32,
        weight: u16,
        color: Rgba<u8>,
        target: &mut RgbaImage,
        x: u32,
        center_y: u32,
    ) -> MotionResult<()>;
}

/// Host-provided visible drawing surface.
///
/// Implementations are assumed synchronous and single-writer: only the frame
/// callback of the renderer that owns the surface touches it.
pub trait DrawSurface: Send {
    /// Resize the surface. Contents after a resize are undefined.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Copy row `row` of `master` onto row `row` of this surface, shifted
    /// horizontally by `dx` pixels. Pixels shifted out of bounds are clipped.
    fn blit_row(&mut self, master: &RgbaImage, row: u32, dx: i32);
}

/// Off-screen master bitmap plus the dimensions derived from the measured
/// text box.
#[derive(Debug)]
pub struct RenderSurface {
    width: u32,
    height: u32,
    master: RgbaImage,
}

impl RenderSurface {
    /// Measure the configured text, size the surface to its box plus padding,
    /// and render the master bitmap exactly once.
    pub fn prepare(raster: &dyn TextRasterizer, config: &GlitchConfig) -> MotionResult<Self> {
        let metrics = raster.measure(&config.text, config.font_size, config.font_weight)?;
        let width = metrics.width.ceil() as u32 + config.padding * 2;
        let height = (config.font_size * 1.5).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(MotionError::RasterError(format!(
                "degenerate surface {}x{} for {:?}",
                width, height, config.text
            )));
        }

        let mut master = RgbaImage::new(width, height);
        raster.raster(
            &config.text,
            config.font_size,
            config.font_weight,
            TEXT_COLOR,
            &mut master,
            config.padding,
            height / 2,
        )?;

        log::debug!("[GLITCH] master bitmap prepared ({}x{})", width, height);
        Ok(Self {
            width,
            height,
            master,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The master bitmap. Read-only: per-frame drawing samples from it and
    /// never writes back.
    pub fn master(&self) -> &RgbaImage {
        &self.master
    }
}

/// Software [`DrawSurface`] backed by an RGBA pixel buffer.
pub struct PixmapSurface {
    pixels: RgbaImage,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl DrawSurface for PixmapSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn blit_row(&mut self, master: &RgbaImage, row: u32, dx: i32) {
        if row >= self.pixels.height() || row >= master.height() {
            return;
        }
        let dst_width = i64::from(self.pixels.width());
        for x in 0..master.width() {
            let dst_x = i64::from(x) + i64::from(dx);
            if dst_x < 0 || dst_x >= dst_width {
                continue;
            }
            self.pixels
                .put_pixel(dst_x as u32, row, *master.get_pixel(x, row));
        }
    }
}

/// Placeholder rasterizer drawing each glyph as a solid block.
///
/// Stands in for a real font stack on headless hosts; the glitch algorithm
/// only needs opaque rows to displace, not legible glyphs.
pub struct BlockRasterizer;

impl BlockRasterizer {
    /// Advance width per glyph, as a fraction of font size.
    const ADVANCE: f32 = 0.6;
    /// Block width per glyph, as a fraction of font size.
    const INK: f32 = 0.52;
    /// Block height, as a fraction of font size.
    const HEIGHT: f32 = 0.7;
}

impl TextRasterizer for BlockRasterizer {
    fn measure(&self, text: &str, font_size: f32, _weight: u16) -> MotionResult<TextMetrics> {
        let glyphs = text.chars().count() as f32;
        Ok(TextMetrics {
            width: glyphs * font_size * Self::ADVANCE,
        })
    }

    fn raster(
        &self,
        text: &str,
        font_size: f32,
        _weight: u16,
        color: Rgba<u8>,
        target: &mut RgbaImage,
        x: u32,
        center_y: u32,
    ) -> MotionResult<()> {
        let advance = (font_size * Self::ADVANCE) as u32;
        let ink = (font_size * Self::INK) as u32;
        let half_height = (font_size * Self::HEIGHT / 2.0) as u32;
        let top = center_y.saturating_sub(half_height);
        let bottom = (center_y + half_height).min(target.height());

        let mut pen_x = x;
        for glyph in text.chars() {
            if !glyph.is_whitespace() {
                for gx in pen_x..(pen_x + ink).min(target.width()) {
                    for gy in top..bottom {
                        target.put_pixel(gx, gy, color);
                    }
                }
            }
            pen_x = pen_x.saturating_add(advance);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_span(pixels: &RgbaImage, row: u32) -> Option<(u32, u32)> {
        let xs: Vec<u32> = (0..pixels.width())
            .filter(|&x| pixels.get_pixel(x, row)[3] != 0)
            .collect();
        Some((*xs.first()?, *xs.last()?))
    }

    #[test]
    fn test_prepare_dimensions_follow_measured_text() {
        let config = GlitchConfig::default();
        let surface = RenderSurface::prepare(&BlockRasterizer, &config).unwrap();

        // 7 glyphs * 120 * 0.6 = 504, plus 50px padding each side.
        assert_eq!(surface.width(), 604);
        // ceil(120 * 1.5).
        assert_eq!(surface.height(), 180);
    }

    #[test]
    fn test_master_rendered_inside_padding() {
        let config = GlitchConfig::default();
        let surface = RenderSurface::prepare(&BlockRasterizer, &config).unwrap();

        let mid = surface.height() / 2;
        let (first, last) = opaque_span(surface.master(), mid).unwrap();
        assert!(first >= config.padding);
        assert!(last < surface.width() - config.padding + 1);
    }

    #[test]
    fn test_prepare_rejects_empty_text_box() {
        let config = GlitchConfig {
            text: String::new(),
            padding: 0,
            ..Default::default()
        };
        let err = RenderSurface::prepare(&BlockRasterizer, &config).unwrap_err();
        assert!(matches!(err, MotionError::RasterError(_)));
    }

    #[test]
    fn test_blit_row_shifts_and_clips() {
        let mut master = RgbaImage::new(10, 1);
        for x in 0..10 {
            master.put_pixel(x, 0, TEXT_COLOR);
        }

        let mut surface = PixmapSurface::new(10, 1);
        surface.blit_row(&master, 0, 4);
        let (first, last) = {
            let xs: Vec<u32> = (0..10)
                .filter(|&x| surface.pixels().get_pixel(x, 0)[3] != 0)
                .collect();
            (*xs.first().unwrap(), *xs.last().unwrap())
        };
        // Shifted right by 4, clipped at the right edge.
        assert_eq!((first, last), (4, 9));

        surface.clear();
        surface.blit_row(&master, 0, -12);
        // Entirely clipped: nothing drawn.
        assert!((0..10).all(|x| surface.pixels().get_pixel(x, 0)[3] == 0));
    }

    #[test]
    fn test_blit_row_ignores_out_of_range_row() {
        let master = RgbaImage::new(4, 2);
        let mut surface = PixmapSurface::new(4, 1);
        // Must not panic.
        surface.blit_row(&master, 5, 0);
    }
}
