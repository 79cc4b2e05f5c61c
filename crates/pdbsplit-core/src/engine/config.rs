use thiserror::Error;

pub const DEFAULT_EXTENSION: &str = "pdb";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Number of workers used when none is configured: the available parallelism of the host.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Size of the worker pool.
    pub workers: usize,
    /// Extension of the input files, without the leading dot.
    pub extension: String,
    /// Treat files without any HELIX/SHEET record as failures so they stay pending.
    pub require_annotations: bool,
    /// Persist the completion log after every N successful files.
    pub checkpoint_every: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            extension: DEFAULT_EXTENSION.to_string(),
            require_annotations: false,
            checkpoint_every: None,
        }
    }
}

#[derive(Default)]
pub struct BatchConfigBuilder {
    workers: Option<usize>,
    extension: Option<String>,
    require_annotations: Option<bool>,
    checkpoint_every: Option<usize>,
}

impl BatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
    pub fn require_annotations(mut self, required: bool) -> Self {
        self.require_annotations = Some(required);
        self
    }
    pub fn checkpoint_every(mut self, every: Option<usize>) -> Self {
        self.checkpoint_every = every;
        self
    }

    pub fn build(self) -> Result<BatchConfig, ConfigError> {
        let workers = self.workers.unwrap_or_else(default_workers);
        if workers == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "workers",
                reason: "must be at least 1".to_string(),
            });
        }

        let extension = self
            .extension
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        if extension.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "extension",
                reason: "must not be empty".to_string(),
            });
        }

        if self.checkpoint_every == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "checkpoint_every",
                reason: "must be at least 1 when set".to_string(),
            });
        }

        Ok(BatchConfig {
            workers,
            extension,
            require_annotations: self.require_annotations.unwrap_or(false),
            checkpoint_every: self.checkpoint_every,
        })
    }
}
