// Layer tinting.
// Layer art is a single-color silhouette: the alpha channel carries the shape,
// the RGB channels are placeholders. Tinting overwrites RGB and keeps alpha, so
// any shading or multi-color detail in the source is replaced by the flat tint.
// Assets must be authored with that in mind.

use image::RgbaImage;
use rayon::prelude::*;

use crate::color::HexColor;

/// Return a copy of `src` with every pixel's RGB set to `color`.
/// Alpha is copied through unchanged, so the shape mask is preserved exactly.
pub fn recolor(src: &RgbaImage, color: HexColor) -> RgbaImage {
    let mut out = src.clone();
    let row_len = (src.width() as usize * 4).max(4);
    let HexColor { r, g, b } = color;

    out.par_chunks_mut(row_len).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            // px[3] (alpha) untouched
        }
    });

    out
}
