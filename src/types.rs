// Core types shared by the compositor, the overlay controller and the window.

use image::RgbaImage;

/// Composite surface size in logical units (one unit = one pixel at scale 1).
pub const SURFACE_WIDTH: u32 = 400;
pub const SURFACE_HEIGHT: u32 = 700;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    /// Flatten an RGBA surface onto a solid background, upscaling by `scale`
    /// (nearest neighbour, so one surface pixel becomes a scale×scale block).
    /// Visual: the tinted jersey on a light grey backdrop, crisp at any scale.
    pub fn from_rgba(src: &RgbaImage, background: u32, scale: usize) -> Self {
        let scale = scale.max(1);
        let mut fb = Self::new(src.width() as usize * scale, src.height() as usize * scale, background);
        for (x, y, px) in src.enumerate_pixels() {
            let c = blend_over(background, px.0);
            for sy in 0..scale {
                let row = (y as usize * scale + sy) * fb.width;
                let start = row + x as usize * scale;
                fb.pixels[start..start + scale].fill(c);
            }
        }
        fb
    }
}

/// Source-over blend one RGBA pixel onto an opaque 0x00RRGGBB pixel.
/// Visual: soft edges of a layer fade into whatever is underneath.
#[inline]
pub fn blend_over(dst: u32, [r, g, b, a]: [u8; 4]) -> u32 {
    match a {
        0 => dst,
        255 => ((r as u32) << 16) | ((g as u32) << 8) | b as u32,
        _ => {
            let a = a as u32;
            let inv = 255 - a;
            let mix = |s: u8, d: u32| (s as u32 * a + d * inv + 127) / 255;
            let nr = mix(r, (dst >> 16) & 0xFF);
            let ng = mix(g, (dst >> 8) & 0xFF);
            let nb = mix(b, dst & 0xFF);
            (nr << 16) | (ng << 8) | nb
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn blend_extremes() {
        assert_eq!(blend_over(0x00_12_34_56, [1, 2, 3, 0]), 0x00_12_34_56);
        assert_eq!(blend_over(0x00_12_34_56, [1, 2, 3, 255]), 0x00_01_02_03);
    }

    #[test]
    fn blend_half() {
        // 50% red over white lands halfway on G and B.
        let c = blend_over(0x00_FF_FF_FF, [255, 0, 0, 128]);
        assert_eq!((c >> 16) & 0xFF, 255);
        assert_eq!((c >> 8) & 0xFF, 127);
        assert_eq!(c & 0xFF, 127);
    }

    #[test]
    fn from_rgba_scales_blocks() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let fb = FrameBuffer::from_rgba(&img, 0x00_FF_FF_FF, 2);
        assert_eq!((fb.width, fb.height), (4, 2));
        assert_eq!(fb.pixels, vec![
            0x00_FF_FF_FF, 0x00_FF_FF_FF, 0x00_00_00_FF, 0x00_00_00_FF,
            0x00_FF_FF_FF, 0x00_FF_FF_FF, 0x00_00_00_FF, 0x00_00_00_FF,
        ]);
    }
}
