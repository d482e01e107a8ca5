use std::path::PathBuf;

use tracing::debug;

use crate::dataset::loader::ImageLoader;
use crate::downsample::policy::DownsamplePolicy;
use crate::error::{PipelineError, Result};

/// A training image registered by an `Input` command; not loaded until the
/// dataset is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledImageRef {
    pub path: PathBuf,
    pub identity: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub input: Vec<f64>,
    pub ideal: Vec<f64>,
}

/// Input/target pairs with sizes fixed by the first example added.
#[derive(Debug, Default, Clone)]
pub struct TrainingSet {
    examples: Vec<TrainingExample>,
    sizes: Option<(usize, usize)>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair. The first pair fixes the input and ideal sizes; later
    /// pairs must match them.
    pub fn add(&mut self, example: TrainingExample, source: &std::path::Path) -> Result<()> {
        let found = (example.input.len(), example.ideal.len());
        match self.sizes {
            None => self.sizes = Some(found),
            Some((input, _)) if input != found.0 => {
                return Err(PipelineError::DimensionMismatch {
                    path: source.to_path_buf(), expected: input, found: found.0,
                });
            }
            Some((_, ideal)) if ideal != found.1 => {
                return Err(PipelineError::DimensionMismatch {
                    path: source.to_path_buf(), expected: ideal, found: found.1,
                });
            }
            Some(_) => {}
        }
        self.examples.push(example);
        Ok(())
    }

    pub fn input_size(&self) -> Option<usize> {
        self.sizes.map(|(input, _)| input)
    }

    pub fn ideal_size(&self) -> Option<usize> {
        self.sizes.map(|(_, ideal)| ideal)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }
}

/// +1 at `index`, -1 everywhere else.
pub fn bipolar_target(index: usize, label_count: usize) -> Vec<f64> {
    (0..label_count).map(|i| if i == index { 1.0 } else { -1.0 }).collect()
}

/// Loads, downsamples and encodes every pending input into a fresh set.
///
/// Every target is encoded against `label_count` as it stands now, so
/// calling this again after more labels were registered re-encodes all
/// examples consistently.
pub fn materialize(
    pending: &[LabeledImageRef],
    label_count: usize,
    policy: &DownsamplePolicy,
    loader: &dyn ImageLoader,
) -> Result<TrainingSet> {
    let mut set = TrainingSet::new();
    for item in pending {
        let image = loader.load(&item.path)?;
        let input = policy.apply(&image);
        debug!(path = %item.path.display(), identity = item.identity, values = input.len(), "downsampled");
        set.add(TrainingExample { input, ideal: bipolar_target(item.identity, label_count) }, &item.path)?;
    }
    Ok(set)
}
