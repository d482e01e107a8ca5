use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::dataset::builder::{materialize, LabeledImageRef, TrainingSet};
use crate::dataset::loader::{FsImageLoader, ImageLoader};
use crate::downsample::policy::{DownsampleKind, DownsamplePolicy};
use crate::engine::model::{Model, ModelFactory};
use crate::error::{PipelineError, Result};
use crate::labels::registry::LabelRegistry;
use crate::network::spec::Topology;
use crate::recognize::classifier::{Recognition, SegmentClassifier};
use crate::script::parser::{parse_line, ParsedLine};
use crate::segment::segmenter::Segmenter;
use crate::train::dialog::{TerminalDialog, TrainingDialog};
use crate::train::loop_fn::train_loop;
use crate::train::monitor::ConsoleMonitor;
use crate::train::train_config::{TrainConfig, TrainMode};

/// The external capabilities a script run depends on.
pub struct Collaborators {
    pub loader: Box<dyn ImageLoader>,
    pub segmenter: Box<dyn Segmenter>,
    pub factory: Box<dyn ModelFactory>,
    pub dialog: Box<dyn TrainingDialog>,
}

impl Collaborators {
    /// Filesystem loader, column segmenter, SGD engine and terminal dialog,
    /// all parametrized from `config`.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Collaborators {
            loader: Box::new(FsImageLoader),
            segmenter: Box::new(config.segmenter()),
            factory: Box::new(config.engine()),
            dialog: Box::new(TerminalDialog),
        }
    }
}

/// Executes a command script line by line, holding the state that commands
/// build up for later ones. Human-readable results go to `out`.
///
/// The first failing line aborts the run.
pub struct Interpreter<W: Write> {
    out: W,
    config: PipelineConfig,
    collaborators: Collaborators,
    labels: LabelRegistry,
    pending: Vec<LabeledImageRef>,
    policy: Option<DownsamplePolicy>,
    dataset: Option<TrainingSet>,
    network: Option<Box<dyn Model>>,
    /// Input width the current network was built for.
    network_input: usize,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W, config: PipelineConfig, collaborators: Collaborators) -> Self {
        Interpreter {
            out,
            config,
            collaborators,
            labels: LabelRegistry::new(),
            pending: Vec::new(),
            policy: None,
            dataset: None,
            network: None,
            network_input: 0,
        }
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    pub fn dataset(&self) -> Option<&TrainingSet> {
        self.dataset.as_ref()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Opens `path` and runs every line in it. The file is closed when this
    /// returns, on success or error.
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        info!(script = %path.display(), "running script");
        self.run(reader)
    }

    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            self.execute_line(&line).map_err(|e| e.at_line(index + 1, &line))?;
        }
        Ok(())
    }

    pub fn execute_line(&mut self, line: &str) -> Result<()> {
        let parsed = parse_line(line)?;
        match parsed.command.as_str() {
            "createtraining" => self.create_training(&parsed),
            "input" => self.input(&parsed),
            "network" => self.network(&parsed),
            "train" => self.train(&parsed),
            "whatis" => self.what_is(&parsed).map(|_| ()),
            other => {
                warn!(command = other, "ignoring unknown command");
                Ok(())
            }
        }
    }

    fn create_training(&mut self, cmd: &ParsedLine) -> Result<()> {
        let width = cmd.positive_arg("width")?;
        let height = cmd.positive_arg("height")?;
        let kind = DownsampleKind::from_token(cmd.arg("type")?);

        let policy = DownsamplePolicy::new(kind, width, height)
            .ok_or_else(|| PipelineError::NonPositive {
                key: "width".into(),
                value: width.to_string(),
                line: cmd.line().to_owned(),
            })?
            .with_bounds(self.config.find_bounds, self.config.blank_level);
        info!(?kind, width, height, "downsampling configured");

        self.policy = Some(policy);
        self.dataset = Some(TrainingSet::new());
        writeln!(self.out, "Training set created")?;
        Ok(())
    }

    fn input(&mut self, cmd: &ParsedLine) -> Result<()> {
        let image = cmd.arg("image")?;
        let identity = cmd.arg("identity")?;

        let index = self.labels.assign_index(identity);
        self.pending.push(LabeledImageRef { path: PathBuf::from(image), identity: index });

        writeln!(self.out, "Added input image:{}", image)?;
        Ok(())
    }

    fn network(&mut self, cmd: &ParsedLine) -> Result<()> {
        let policy = self.policy.as_ref()
            .ok_or(PipelineError::MissingState { command: "network", requires: "createtraining" })?;
        let hidden1: usize = cmd.parse_arg("hidden1")?;
        let hidden2: usize = cmd.parse_arg("hidden2")?;

        writeln!(self.out, "Downsampling images...")?;
        let set = materialize(&self.pending, self.labels.len(), policy, self.collaborators.loader.as_ref())?;
        let (input_size, output_size) = set.input_size().zip(set.ideal_size())
            .ok_or(PipelineError::EmptyDataset)?;

        let topology = Topology::feed_forward(input_size, hidden1, hidden2, output_size, true);
        let model = self.collaborators.factory.build(&topology);
        info!(examples = set.len(), input_size, output_size, hidden1, hidden2, "network created");
        writeln!(self.out, "Created network: {}", model.describe())?;

        self.dataset = Some(set);
        self.network = Some(model);
        self.network_input = input_size;
        Ok(())
    }

    fn train(&mut self, cmd: &ParsedLine) -> Result<()> {
        let mode = TrainMode::from_token(cmd.arg("mode")?);
        let minutes: u64 = cmd.parse_arg("minutes")?;
        let strategy_error: f64 = cmd.parse_arg("strategyerror")?;
        let strategy_cycles: usize = cmd.parse_arg("strategycycles")?;

        let model = self.network.as_deref_mut()
            .ok_or(PipelineError::MissingState { command: "train", requires: "network" })?;
        let set = self.dataset.as_ref()
            .ok_or(PipelineError::MissingState { command: "train", requires: "network" })?;

        writeln!(self.out, "Training Beginning... Output patterns={}", self.labels.len())?;
        let config = TrainConfig::new(mode, minutes, strategy_error, strategy_cycles);
        let report = match config.mode {
            TrainMode::Console => {
                let mut monitor = ConsoleMonitor::new(&mut self.out, self.config.progress_interval());
                train_loop(model, set, &config, &mut monitor)?
            }
            TrainMode::Gui => self.collaborators.dialog.train(model, set, &config)?,
        };
        info!(
            iterations = report.iterations,
            resets = report.resets,
            final_error = report.final_error,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "training finished"
        );
        writeln!(self.out, "Training Stopped...")?;
        Ok(())
    }

    fn what_is(&mut self, cmd: &ParsedLine) -> Result<Recognition> {
        let filename = cmd.arg("image")?;
        let model = self.network.as_deref_mut()
            .ok_or(PipelineError::MissingState { command: "whatis", requires: "network" })?;
        let policy = self.policy.as_ref()
            .ok_or(PipelineError::MissingState { command: "whatis", requires: "createtraining" })?;

        // A later `CreateTraining` may have changed the grid the network was built for.
        if policy.vector_len() != self.network_input {
            return Err(PipelineError::DimensionMismatch {
                path: PathBuf::from(filename),
                expected: self.network_input,
                found: policy.vector_len(),
            });
        }

        let image = self.collaborators.loader.load(Path::new(filename))?;
        let classifier = SegmentClassifier {
            segmenter: self.collaborators.segmenter.as_ref(),
            policy,
            tokens: &self.config.reserved_tokens,
        };
        let recognition = classifier.classify(&image, model, &self.labels);

        writeln!(self.out, "Filename: {}", filename)?;
        writeln!(self.out, "Original number: {}", recognition.raw)?;
        writeln!(self.out, "Digits only: {}", recognition.cleaned)?;
        Ok(recognition)
    }
}
