pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod reconcile;
pub mod resolve;
pub mod source;

pub use config::{IngestAppConfig, IngestConfig, SourceConfig};
pub use engine::{IngestReport, Ingestor};
pub use error::IngestError;
pub use observer::{IngestObserver, TracingObserver};
pub use source::{CodeforcesClient, ContestSource, SourceError};
