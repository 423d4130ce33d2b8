//! Determining the media type of a file with an external program.
//!
//! The default collaborator is `file(1)`, run as
//! `file --dereference --brief --mime-type -- <path>`, which prints a single
//! `type/subtype` line. The child is waited for without a timeout: a classifier
//! that never exits blocks the run.

use crate::error::ClassificationError;
use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Program used to classify files when nothing else is configured.
pub const DEFAULT_CLASSIFIER: &str = "file";

/// Arguments placed before the file path: follow symlinks, print only the MIME type.
pub const CLASSIFIER_ARGS: [&str; 4] = ["--dereference", "--brief", "--mime-type", "--"];

/// Largest classifier output accepted, in bytes.
pub const MAX_OUTPUT: usize = 1024;

/// Something that can name the media type of a file.
pub trait Classifier {
    /// Returns the media type of `path` as a `type/subtype` string.
    fn classify(&self, path: &Path) -> Result<String, ClassificationError>;
}

/// Classifier backed by an external `file`-compatible program.
#[derive(Debug, Clone)]
pub struct FileCommand {
    program: OsString,
    max_output: usize,
}

impl FileCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            max_output: MAX_OUTPUT,
        }
    }

    /// Overrides the output limit.
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }
}

impl Classifier for FileCommand {
    fn classify(&self, path: &Path) -> Result<String, ClassificationError> {
        let program = self.program.to_string_lossy().into_owned();
        let mut child = Command::new(&self.program)
            .args(CLASSIFIER_ARGS)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ClassificationError::Spawn { program, source })?;

        // One byte past the limit tells overflow apart from output that fits exactly.
        let mut output = Vec::new();
        let read = match child.stdout.take() {
            Some(stdout) => stdout
                .take(self.max_output as u64 + 1)
                .read_to_end(&mut output),
            None => Ok(0),
        };
        // The pipe is closed here, so a child still writing cannot block the wait.
        let status = child.wait().map_err(ClassificationError::Read)?;
        read.map_err(ClassificationError::Read)?;

        debug!(%status, bytes = output.len(), "classifier finished");
        // Checked before the status: a child cut off by the closed pipe may die of SIGPIPE.
        if output.len() > self.max_output {
            return Err(ClassificationError::Overflow {
                limit: self.max_output,
            });
        }
        if !status.success() {
            return Err(ClassificationError::Status(status));
        }
        parse_output(&output, self.max_output)
    }
}

/// Turns raw classifier output into a media type.
///
/// Only the first line is used; it must look like `type/subtype`.
pub fn parse_output(output: &[u8], max_output: usize) -> Result<String, ClassificationError> {
    if output.len() > max_output {
        return Err(ClassificationError::Overflow { limit: max_output });
    }

    let line = match output.iter().position(|&b| b == b'\n') {
        Some(end) => &output[..end],
        None => output,
    };
    if line.is_empty() {
        return Err(ClassificationError::Empty);
    }

    let line = std::str::from_utf8(line).map_err(|_| ClassificationError::NotUtf8)?;
    if !is_media_type(line) {
        return Err(ClassificationError::Malformed(line.to_string()));
    }
    Ok(line.to_string())
}

fn is_media_type(s: &str) -> bool {
    match s.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty()
                && !subtype.is_empty()
                && !subtype.contains('/')
                && !s.chars().any(|c| c.is_whitespace() || c.is_control())
        }
        None => false,
    }
}
