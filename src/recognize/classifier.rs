use std::collections::BTreeMap;

use image::DynamicImage;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::downsample::policy::DownsamplePolicy;
use crate::engine::model::Model;
use crate::labels::registry::LabelRegistry;
use crate::segment::segmenter::Segmenter;

/// Output indices that print as punctuation instead of their number.
///
/// Reserved tokens appear in the raw result only; the cleaned result keeps
/// just the numeric winners. The default matches a twelve-class digit set
/// where index 10 is `/` and index 11 is `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservedTokens(BTreeMap<usize, String>);

impl ReservedTokens {
    pub fn none() -> Self {
        ReservedTokens(BTreeMap::new())
    }

    pub fn with(mut self, index: usize, token: impl Into<String>) -> Self {
        self.0.insert(index, token.into());
        self
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }
}

impl Default for ReservedTokens {
    fn default() -> Self {
        ReservedTokens::none().with(10, "/").with(11, "-")
    }
}

/// Result of reading one composite image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recognition {
    /// Winner index per segment, in reading order.
    pub winners: Vec<usize>,
    /// Every token, each followed by a space.
    pub raw: String,
    /// Numeric tokens only, each followed by a space.
    pub cleaned: String,
}

/// Builds the raw and cleaned strings from per-segment winners.
pub fn assemble(winners: &[usize], tokens: &ReservedTokens) -> Recognition {
    let mut raw = String::new();
    let mut cleaned = String::new();
    for &winner in winners {
        match tokens.token(winner) {
            Some(token) => {
                raw.push_str(token);
                raw.push(' ');
            }
            None => {
                let digit = winner.to_string();
                raw.push_str(&digit);
                raw.push(' ');
                cleaned.push_str(&digit);
                cleaned.push(' ');
            }
        }
    }
    Recognition { winners: winners.to_vec(), raw, cleaned }
}

/// Segments a composite image and classifies each piece independently.
pub struct SegmentClassifier<'a> {
    pub segmenter: &'a dyn Segmenter,
    pub policy: &'a DownsamplePolicy,
    pub tokens: &'a ReservedTokens,
}

impl<'a> SegmentClassifier<'a> {
    pub fn classify(&self, image: &DynamicImage, model: &mut dyn Model, labels: &LabelRegistry) -> Recognition {
        let winners: Vec<usize> = self.segmenter
            .split(image)
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let winner = model.winner(&self.policy.apply(segment));
                debug!(segment = i, winner, identity = labels.label_of(winner).unwrap_or("?"), "segment classified");
                winner
            })
            .collect();
        assemble(&winners, self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builder::TrainingSet;
    use crate::downsample::policy::DownsampleKind;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_reserved_indices_only_in_raw() {
        let r = assemble(&[1, 10, 2, 11, 3], &ReservedTokens::default());
        assert_eq!(r.raw, "1 / 2 - 3 ");
        assert_eq!(r.cleaned, "1 2 3 ");
    }

    #[test]
    fn test_multi_digit_indices_print_in_decimal() {
        let r = assemble(&[12, 0], &ReservedTokens::default());
        assert_eq!(r.raw, "12 0 ");
        assert_eq!(r.cleaned, "12 0 ");
    }

    #[test]
    fn test_custom_tokens_replace_defaults() {
        let tokens = ReservedTokens::none().with(3, ".");
        let r = assemble(&[3, 10, 11], &tokens);
        assert_eq!(r.raw, ". 10 11 ");
        assert_eq!(r.cleaned, "10 11 ");
    }

    #[test]
    fn test_empty_winners() {
        let r = assemble(&[], &ReservedTokens::default());
        assert_eq!((r.raw.as_str(), r.cleaned.as_str()), ("", ""));
    }

    #[test]
    fn test_tokens_deserialize_from_json() {
        let tokens: ReservedTokens = serde_json::from_str(r#"{"10": "/", "11": "-"}"#).unwrap();
        assert_eq!(tokens, ReservedTokens::default());
    }

    /// Splits into fixed-width columns; reads the winner from the segment's red channel.
    struct Columns;

    impl Segmenter for Columns {
        fn split(&self, image: &DynamicImage) -> Vec<DynamicImage> {
            (0..image.width()).map(|x| image.crop_imm(x, 0, 1, image.height())).collect()
        }
    }

    struct RedChannel;

    impl Model for RedChannel {
        fn iteration(&mut self, _set: &TrainingSet) -> f64 {
            0.0
        }
        fn reset(&mut self) {}
        fn winner(&mut self, input: &[f64]) -> usize {
            // input[0] is red in [-1, 1]; map 0..255 back to the index it encodes.
            (((input[0] + 1.0) / 2.0 * 255.0).round() as usize) / 20
        }
        fn describe(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_classify_keeps_segment_order() {
        let reds = [20u8, 200, 40, 220];
        let img = RgbImage::from_fn(4, 2, |x, _| Rgb([reds[x as usize], 0, 0]));
        let policy = DownsamplePolicy::new(DownsampleKind::ColorPreserving, 1, 1)
            .unwrap()
            .with_bounds(false, 255);
        let tokens = ReservedTokens::default();
        let classifier = SegmentClassifier { segmenter: &Columns, policy: &policy, tokens: &tokens };
        let r = classifier.classify(&DynamicImage::ImageRgb8(img), &mut RedChannel, &LabelRegistry::new());
        assert_eq!(r.winners, vec![1, 10, 2, 11]);
        assert_eq!(r.raw, "1 / 2 - ");
        assert_eq!(r.cleaned, "1 2 ");
    }
}
