use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{PipelineError, Result};

/// One script line split into a keyword and its `key:value` arguments.
///
/// The keyword and keys are trimmed and lower-cased; values are trimmed but
/// otherwise kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: String,
    pub args: HashMap<String, String>,
    line: String,
}

impl ParsedLine {
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn arg(&self, key: &str) -> Result<&str> {
        self.args.get(key).map(String::as_str).ok_or_else(|| PipelineError::MissingArgument {
            command: self.command.clone(),
            key: key.to_owned(),
            line: self.line.clone(),
        })
    }

    /// Looks up `key` and parses it, reporting unparsable values.
    pub fn parse_arg<T: FromStr>(&self, key: &str) -> Result<T> {
        let value = self.arg(key)?;
        value.parse().map_err(|_| PipelineError::InvalidNumber {
            key: key.to_owned(),
            value: value.to_owned(),
            line: self.line.clone(),
        })
    }

    /// Like [`parse_arg`](Self::parse_arg) but rejects zero.
    pub fn positive_arg(&self, key: &str) -> Result<u32> {
        let value: u32 = self.parse_arg(key)?;
        if value == 0 {
            return Err(PipelineError::NonPositive {
                key: key.to_owned(),
                value: value.to_string(),
                line: self.line.clone(),
            });
        }
        Ok(value)
    }
}

/// Splits `keyword: key:value, key:value` at the first colon, then the
/// arguments at commas and each argument at its first colon. Empty
/// comma-separated entries are skipped; a repeated key keeps its last value.
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let (keyword, rest) = line
        .split_once(':')
        .ok_or_else(|| PipelineError::MalformedCommand { line: line.to_owned() })?;

    let mut args = HashMap::new();
    for argument in rest.trim().split(',').filter(|a| !a.is_empty()) {
        let (key, value) = argument.split_once(':').ok_or_else(|| PipelineError::MalformedArgument {
            argument: argument.to_owned(),
            line: line.to_owned(),
        })?;
        args.insert(key.trim().to_lowercase(), value.trim().to_owned());
    }

    Ok(ParsedLine { command: keyword.trim().to_lowercase(), args, line: line.to_owned() })
}
