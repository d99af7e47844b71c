//! File I/O and serialization for the digitalis pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::ExperimentName;
pub use error::IoError;
pub use reader::BeatTemplateReader;
pub use writer::{ResultWriter, TargetReport};
