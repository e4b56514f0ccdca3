// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the framebuffer failed
    #[error("Failed to load asset {}: {source}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid color {value:?}: {reason}")]
    ColorParse { value: String, reason: &'static str },
    #[error("Failed to read design file {}: {source}", path.display())]
    DesignRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse design file {}: {source}", path.display())]
    DesignParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Render worker stopped")]
    WorkerGone,
}
