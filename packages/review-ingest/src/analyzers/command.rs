//! Analyzer backed by an external command.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{AnalysisError, AnalysisResult};
use crate::traits::{analyzer::ReviewAnalyzer, sink::DatasetLocation};

/// Runs `program args... <dataset path>` and reads the analyzed dataset's
/// location from the last non-empty line the command prints.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parse a whitespace-separated command line such as
    /// `python -m analysis.run`. Returns `None` for a blank line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).with_args(parts))
    }

    /// Arguments placed before the dataset path.
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl ReviewAnalyzer for CommandAnalyzer {
    async fn analyze(&self, input: &DatasetLocation) -> AnalysisResult<DatasetLocation> {
        info!(program = %self.program, input = %input, "Running analyzer");

        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(input.as_str())
            .output()
            .await
            .map_err(|source| AnalysisError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AnalysisError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(stdout = %stdout, "Analyzer output");

        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .map(DatasetLocation::new)
            .ok_or(AnalysisError::NoOutput)
    }

    fn name(&self) -> &str {
        &self.program
    }
}
