pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod summary;
pub mod tile;
pub mod tool;

pub use cache::CachePolicy;
pub use config::{Config, ConverterBackend};
pub use error::PipelineError;
pub use pipeline::{run, Outcome};
