use thiserror::Error;

/// Errors raised while converting or tiling.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{program}: command not found")]
    ToolNotFound { program: String },

    #[error("{program}: permission denied")]
    ToolNotExecutable { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code}")]
    ToolFailed { program: String, code: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("conversion failed: {0}")]
    Convert(String),

    #[error("cache check failed: {0:#}")]
    Cache(anyhow::Error),
}

impl PipelineError {
    /// Process exit code for this error, following shell conventions.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::ToolNotFound { .. } => 127,
            PipelineError::ToolNotExecutable { .. } => 126,
            // shells report codes modulo 256; 0 would read as success
            PipelineError::ToolFailed { code, .. } => match (*code & 0xff) as u8 {
                0 => 1,
                c => c,
            },
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
