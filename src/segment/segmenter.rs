use image::DynamicImage;

/// Splits a composite image into sub-images, one per symbol, in
/// left-to-right reading order.
pub trait Segmenter {
    fn split(&self, image: &DynamicImage) -> Vec<DynamicImage>;
}

/// Vertical-projection segmenter.
///
/// A column is inked when any of its pixels is darker than `ink_threshold`
/// (luma). Each maximal run of inked columns becomes one full-height
/// segment. A blank image yields no segments.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSegmenter {
    pub ink_threshold: u8,
}

impl Default for ColumnSegmenter {
    fn default() -> Self {
        ColumnSegmenter { ink_threshold: 128 }
    }
}

impl ColumnSegmenter {
    /// `(start, width)` of every inked column run.
    fn column_runs(&self, image: &DynamicImage) -> Vec<(u32, u32)> {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        let inked = |x: u32| (0..height).any(|y| luma.get_pixel(x, y).0[0] < self.ink_threshold);

        let mut runs = Vec::new();
        let mut start: Option<u32> = None;
        for x in 0..width {
            match (inked(x), start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, x - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, width - s));
        }
        runs
    }
}

impl Segmenter for ColumnSegmenter {
    fn split(&self, image: &DynamicImage) -> Vec<DynamicImage> {
        let height = image.height();
        self.column_runs(image)
            .into_iter()
            .map(|(x, w)| image.crop_imm(x, 0, w, height))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// White strip with dark bars at the given column ranges.
    fn strip(bars: &[(u32, u32)], width: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, 6, |x, _| {
            if bars.iter().any(|&(a, b)| (a..b).contains(&x)) {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_segments_in_left_to_right_order() {
        let image = strip(&[(1, 3), (5, 9), (12, 13)], 15);
        let seg = ColumnSegmenter::default();
        assert_eq!(seg.column_runs(&image), vec![(1, 2), (5, 4), (12, 1)]);
        let parts = seg.split(&image);
        let widths: Vec<u32> = parts.iter().map(|p| p.width()).collect();
        assert_eq!(widths, vec![2, 4, 1]);
        assert!(parts.iter().all(|p| p.height() == 6));
    }

    #[test]
    fn test_run_touching_right_edge() {
        let image = strip(&[(7, 10)], 10);
        assert_eq!(ColumnSegmenter::default().column_runs(&image), vec![(7, 3)]);
    }

    #[test]
    fn test_blank_image_has_no_segments() {
        assert!(ColumnSegmenter::default().split(&strip(&[], 8)).is_empty());
    }
}
