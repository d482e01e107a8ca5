use std::path::PathBuf;

/// Everything that can abort a script run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A script line has no `:` between keyword and arguments.
    #[error("invalid command: {line}")]
    MalformedCommand { line: String },

    /// A comma-separated argument has no `:` between key and value.
    #[error("invalid argument `{argument}` in command: {line}")]
    MalformedArgument { argument: String, line: String },

    #[error("missing argument {key} for `{command}` on line: {line}")]
    MissingArgument { command: String, key: String, line: String },

    #[error("cannot load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("argument {key} has non-numeric value `{value}` on line: {line}")]
    InvalidNumber { key: String, value: String, line: String },

    #[error("argument {key} must be a positive integer, got `{value}` on line: {line}")]
    NonPositive { key: String, value: String, line: String },

    /// A command ran before the command that creates the state it needs.
    #[error("`{command}` requires a prior `{requires}` command")]
    MissingState { command: &'static str, requires: &'static str },

    #[error("training set is empty; add images with `Input` before `Network`")]
    EmptyDataset,

    #[error("training example from {} has {found} values, the training set expects {expected}", .path.display())]
    DimensionMismatch { path: PathBuf, expected: usize, found: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Attaches the 1-based line number and text of the failing command.
    #[error("line {number} `{line}`: {source}")]
    Line {
        number: usize,
        line: String,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    pub fn at_line(self, number: usize, line: &str) -> PipelineError {
        match self {
            PipelineError::Line { .. } => self,
            other => PipelineError::Line { number, line: line.to_owned(), source: Box::new(other) },
        }
    }

    /// Strips any line wrapper and returns the underlying failure.
    pub fn root(&self) -> &PipelineError {
        match self {
            PipelineError::Line { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
