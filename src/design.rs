// Design file: which assets make up the jersey and what color each layer is.
// JSON, read at startup and again whenever the user asks for a reload.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::HexColor;
use crate::compositor::{Palette, Selection};
use crate::error::Error;

/// Layer tints keyed by the names the selection UI uses.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShapeColors {
    #[serde(rename = "Shirt")]
    pub shirt: HexColor,
    #[serde(rename = "FrontShd")]
    pub front_shoulder: HexColor,
    #[serde(rename = "FrontStripes")]
    pub front_stripes: HexColor,
    #[serde(rename = "FrontStripes2")]
    pub front_stripes2: HexColor,
    #[serde(rename = "Neck")]
    pub neck: HexColor,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AssetPaths {
    pub garment: PathBuf,
    pub shoulder: PathBuf,
    pub stripes: PathBuf,
    pub stripes2: PathBuf,
    #[serde(default)]
    pub neck: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub colors: ShapeColors,
    pub assets: AssetPaths,
    #[serde(default)]
    pub decal: Option<PathBuf>,
}

impl Design {
    /// Read and parse a design file. Relative asset paths are resolved
    /// against the file's own directory.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::DesignRead { path: path.to_path_buf(), source })?;
        let design = Self::parse(&text, path)?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(design.resolved(base))
    }

    fn parse(text: &str, path: &Path) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|source| Error::DesignParse { path: path.to_path_buf(), source })
    }

    fn resolved(mut self, base: &Path) -> Self {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        fix(&mut self.assets.garment);
        fix(&mut self.assets.shoulder);
        fix(&mut self.assets.stripes);
        fix(&mut self.assets.stripes2);
        if let Some(neck) = self.assets.neck.as_mut() {
            fix(neck);
        }
        if let Some(decal) = self.decal.as_mut() {
            fix(decal);
        }
        self
    }

    pub fn selection(&self) -> Selection {
        Selection {
            garment: self.assets.garment.clone(),
            shoulder: self.assets.shoulder.clone(),
            stripes: self.assets.stripes.clone(),
            stripes2: self.assets.stripes2.clone(),
            neck: self.assets.neck.clone(),
        }
    }

    pub fn palette(&self) -> Palette {
        let c = &self.colors;
        Palette {
            garment: c.shirt,
            shoulder: c.front_shoulder,
            stripes: c.front_stripes,
            stripes2: c.front_stripes2,
            neck: c.neck,
        }
    }
}
