// Layer compositor: load the selected assets, tint each one, stack them onto
// a fresh 400×700 surface in a fixed order.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use rayon::prelude::*;

use crate::color::HexColor;
use crate::error::Error;
use crate::recolor::recolor;
use crate::types::{SURFACE_HEIGHT, SURFACE_WIDTH};

/// The named layers of the front view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Garment,
    Neck,
    Shoulder,
    Stripes,
    Stripes2,
}

impl LayerKind {
    /// Bottom to top.
    pub const DRAW_ORDER: [LayerKind; 5] = [
        LayerKind::Garment,
        LayerKind::Neck,
        LayerKind::Shoulder,
        LayerKind::Stripes,
        LayerKind::Stripes2,
    ];

    pub fn placement(self) -> Placement {
        match self {
            LayerKind::Neck => Placement {
                x: 140,
                y: 40,
                width: 180,
                height: 120,
                clip: Some(Clip { width: 180, height: 120, offset_x: -20, offset_y: -3 }),
            },
            _ => Placement { x: 60, y: 40, width: 300, height: 600, clip: None },
        }
    }
}

/// Where a layer lands on the surface and how big it is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub clip: Option<Clip>,
}

/// Neck trim is first drawn into a small window at an offset, which crops
/// whatever falls outside; the window is then placed on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clip {
    pub width: u32,
    pub height: u32,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// Asset paths picked by the user. `neck` is optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub garment: PathBuf,
    pub shoulder: PathBuf,
    pub stripes: PathBuf,
    pub stripes2: PathBuf,
    pub neck: Option<PathBuf>,
}

impl Selection {
    fn entries(&self) -> Vec<(LayerKind, &Path)> {
        let mut v = vec![
            (LayerKind::Garment, self.garment.as_path()),
            (LayerKind::Shoulder, self.shoulder.as_path()),
            (LayerKind::Stripes, self.stripes.as_path()),
            (LayerKind::Stripes2, self.stripes2.as_path()),
        ];
        if let Some(neck) = &self.neck {
            v.push((LayerKind::Neck, neck.as_path()));
        }
        v
    }
}

/// One tint per layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    pub garment: HexColor,
    pub shoulder: HexColor,
    pub stripes: HexColor,
    pub stripes2: HexColor,
    pub neck: HexColor,
}

impl Palette {
    pub fn color(&self, kind: LayerKind) -> HexColor {
        match kind {
            LayerKind::Garment => self.garment,
            LayerKind::Neck => self.neck,
            LayerKind::Shoulder => self.shoulder,
            LayerKind::Stripes => self.stripes,
            LayerKind::Stripes2 => self.stripes2,
        }
    }
}

/// Decoded bitmaps, one per selected layer.
#[derive(Clone, Default)]
pub struct LoadedLayers {
    layers: Vec<(LayerKind, RgbaImage)>,
}

impl LoadedLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: LayerKind, image: RgbaImage) -> Self {
        self.layers.retain(|(k, _)| *k != kind);
        self.layers.push((kind, image));
        self
    }

    pub fn get(&self, kind: LayerKind) -> Option<&RgbaImage> {
        self.layers.iter().find(|(k, _)| *k == kind).map(|(_, img)| img)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }
}

/// Decode one asset to RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, Error> {
    let img = image::open(path).map_err(|source| Error::AssetLoad { path: path.to_path_buf(), source })?;
    Ok(img.to_rgba8())
}

/// Decode every selected asset concurrently. The first failure aborts the
/// whole batch; nothing partial is returned.
pub fn load_layers(selection: &Selection) -> Result<LoadedLayers, Error> {
    let decoded: Vec<(LayerKind, RgbaImage)> = selection
        .entries()
        .into_par_iter()
        .map(|(kind, path)| load_image(path).map(|img| (kind, img)))
        .collect::<Result<_, _>>()?;

    Ok(decoded.into_iter().fold(LoadedLayers::new(), |acc, (k, img)| acc.with(k, img)))
}

/// Scale, tint and crop a single layer into the bitmap that gets stacked.
fn prepare_layer(src: &RgbaImage, placement: &Placement, color: HexColor) -> RgbaImage {
    let scaled = imageops::resize(src, placement.width, placement.height, FilterType::Triangle);
    let placed = match placement.clip {
        Some(clip) => {
            let mut window = RgbaImage::new(clip.width, clip.height);
            imageops::replace(&mut window, &scaled, clip.offset_x, clip.offset_y);
            window
        }
        None => scaled,
    };
    recolor(&placed, color)
}

/// Build the composite: a cleared transparent surface with every loaded layer
/// drawn bottom to top (garment, neck, shoulder, stripes, stripes2).
/// Layers missing from `loaded` are skipped, which is how "no neck" works.
pub fn compose(loaded: &LoadedLayers, palette: &Palette) -> RgbaImage {
    let mut surface = RgbaImage::new(SURFACE_WIDTH, SURFACE_HEIGHT);

    for kind in LayerKind::DRAW_ORDER {
        let Some(src) = loaded.get(kind) else { continue };
        let placement = kind.placement();
        let layer = prepare_layer(src, &placement, palette.color(kind));
        imageops::overlay(&mut surface, &layer, placement.x, placement.y);
    }

    surface
}

/// Load + compose as one step. Either a whole surface or an error.
pub fn render(selection: &Selection, palette: &Palette) -> Result<RgbaImage, Error> {
    let loaded = load_layers(selection)?;
    log::debug!("Decoded {} layer assets", loaded.len());
    Ok(compose(&loaded, palette))
}
