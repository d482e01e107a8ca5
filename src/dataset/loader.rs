use std::path::Path;

use image::DynamicImage;

use crate::error::{PipelineError, Result};

/// Decodes a raster image from a path.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage>;
}

/// Reads PNG/JPEG/BMP/GIF files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage> {
        image::open(path).map_err(|source| PipelineError::ImageLoad { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_image_load_error() {
        let err = FsImageLoader.load(Path::new("./no/such/coin.png")).unwrap_err();
        assert!(matches!(err, PipelineError::ImageLoad { .. }));
        assert!(err.to_string().contains("coin.png"));
    }
}
