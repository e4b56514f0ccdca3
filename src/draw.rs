// Window + software drawing utilities.
// 1) A window that shows the composite jersey.
// 2) The decal blended on top, with a thin outline while it is being handled.
// 3) A tiny 5x7 bitmap font for the status line.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::overlay::OverlayRect;
use crate::types::{blend_over, FrameBuffer};

pub struct Drawer {
    window: Window, // the on-screen window you see
    scale: usize,   // window pixels per surface unit
}

impl Drawer {
    /// Create a window `scale` times the surface size.
    /// Visual: an empty window opens, 400×700 at scale 1.
    pub fn new(title: &str, width: usize, height: usize, scale: usize) -> Result<Self, Error> {
        let scale = scale.max(1);
        let mut window = Window::new(title, width * scale, height * scale, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, scale })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately shows the jersey + decal for this tick.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in surface units (window pixels divided by the scale).
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        let s = self.scale as f32;
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) / s, y.max(0.0) / s))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    // reload the design file
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }
}

/* ---------- Decal ---------- */

/// The decal bitmap plus a copy resized to the last size it was drawn at.
pub struct Decal {
    source: RgbaImage,
    scaled: Option<RgbaImage>,
}

impl Decal {
    pub fn new(source: RgbaImage) -> Self {
        Self { source, scaled: None }
    }

    /// Stretch the decal to `rect` (surface units × `scale`) and blend it onto `fb`.
    /// Visual: the decal sits on the jersey; transparent parts show the shirt through.
    pub fn draw(&mut self, fb: &mut FrameBuffer, rect: &OverlayRect, scale: usize) {
        let s = scale as f32;
        let w = ((rect.width * s).round() as u32).max(1);
        let h = ((rect.height * s).round() as u32).max(1);
        if self.scaled.as_ref().map(|i| i.dimensions()) != Some((w, h)) {
            self.scaled = Some(imageops::resize(&self.source, w, h, FilterType::Triangle));
        }
        if let Some(img) = &self.scaled {
            blit_rgba(fb, img, (rect.left * s).round() as i32, (rect.top * s).round() as i32);
        }
    }
}

/// Alpha-blend `img` onto the framebuffer with its top-left at (x0,y0).
pub fn blit_rgba(fb: &mut FrameBuffer, img: &RgbaImage, x0: i32, y0: i32) {
    for (x, y, px) in img.enumerate_pixels() {
        let (sx, sy) = (x0 + x as i32, y0 + y as i32);
        if sx < 0 || sy < 0 || sx as usize >= fb.width || sy as usize >= fb.height {
            continue;
        }
        let idx = sy as usize * fb.width + sx as usize;
        fb.pixels[idx] = blend_over(fb.pixels[idx], px.0);
    }
}

/* ---------- Software drawing: pixels, outline, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// 1-pixel outline around the decal (surface units × `scale`).
/// Visual: a thin blue frame hugs the decal while you drag or resize it.
pub fn draw_outline(fb: &mut FrameBuffer, rect: &OverlayRect, scale: usize, color: u32) {
    let s = scale as f32;
    let x0 = (rect.left * s).round() as i32;
    let y0 = (rect.top * s).round() as i32;
    let x1 = (rect.right() * s).round() as i32 - 1;
    let y1 = (rect.bottom() * s).round() as i32 - 1;
    draw_line(fb, x0, y0, x1, y0, color);
    draw_line(fb, x1, y0, x1, y1, color);
    draw_line(fb, x1, y1, x0, y1, color);
    draw_line(fb, x0, y1, x0, y0, color);
}

/* ---------- 5x7 bitmap font (what the status line needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, 0x00_00_00_00), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; unknown characters leave a gap.
/// Visual: the small status line along the bottom of the window.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
