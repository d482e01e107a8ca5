use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use serde::{Serialize, Deserialize};

/// The `type` token that selects the colour-preserving transform. Matched
/// exactly; anything else falls back to intensity-only.
pub const COLOR_TOKEN: &str = "RGB";

const HI: f64 = 1.0;
const LO: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownsampleKind {
    /// Three values per cell: R, G, B.
    ColorPreserving,
    /// One value per cell: the mean of R, G and B.
    IntensityOnly,
}

impl DownsampleKind {
    pub fn from_token(token: &str) -> DownsampleKind {
        if token == COLOR_TOKEN {
            DownsampleKind::ColorPreserving
        } else {
            DownsampleKind::IntensityOnly
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            DownsampleKind::ColorPreserving => 3,
            DownsampleKind::IntensityOnly => 1,
        }
    }
}

/// Reduces any raster image to a fixed-length vector in [-1, 1].
///
/// With `find_bounds` set, the image is first cropped to the bounding box of
/// its non-blank pixels (a pixel is blank when every channel is at least
/// `blank_level`), so the symbol fills the grid regardless of margins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownsamplePolicy {
    kind: DownsampleKind,
    width: u32,
    height: u32,
    find_bounds: bool,
    blank_level: u8,
}

impl DownsamplePolicy {
    /// Returns `None` if either dimension is zero.
    pub fn new(kind: DownsampleKind, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(DownsamplePolicy { kind, width, height, find_bounds: true, blank_level: u8::MAX })
    }

    pub fn with_bounds(mut self, find_bounds: bool, blank_level: u8) -> Self {
        self.find_bounds = find_bounds;
        self.blank_level = blank_level;
        self
    }

    /// Length of every vector produced by [`apply`](Self::apply).
    pub fn vector_len(&self) -> usize {
        self.width as usize * self.height as usize * self.kind.channels()
    }

    pub fn apply(&self, image: &DynamicImage) -> Vec<f64> {
        let rgb = image.to_rgb8();
        let cropped = match self.find_bounds.then(|| self.content_bounds(&rgb)).flatten() {
            Some((x, y, w, h)) => imageops::crop_imm(&rgb, x, y, w, h).to_image(),
            None => rgb,
        };
        let small = imageops::resize(&cropped, self.width, self.height, FilterType::Lanczos3);

        match self.kind {
            DownsampleKind::ColorPreserving => small.pixels()
                .flat_map(|p| p.0.into_iter().map(normalize))
                .collect(),
            DownsampleKind::IntensityOnly => small.pixels()
                .map(|p| {
                    let [r, g, b] = p.0;
                    (r as f64 + g as f64 + b as f64) / 3.0
                })
                .map(normalize_f)
                .collect(),
        }
    }

    /// Bounding box `(x, y, w, h)` of non-blank pixels, or `None` when the
    /// image is entirely blank.
    fn content_bounds(&self, image: &RgbImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in image.enumerate_pixels() {
            if p.0.iter().all(|&c| c >= self.blank_level) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }
}

fn normalize(channel: u8) -> f64 {
    normalize_f(channel as f64)
}

fn normalize_f(value: f64) -> f64 {
    value / 255.0 * (HI - LO) + LO
}
