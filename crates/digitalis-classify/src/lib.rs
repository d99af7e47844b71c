//! Distance-driven NORMAL/AMI classification of beat templates.
//!
//! Aggregates per-lead DTW distances between a target sample and each of two
//! prototype groups, then reduces the two distance maps to a single verdict
//! by per-lead comparison, majority vote, and a total-distance tie-break.

mod aggregate;
mod error;
mod sample;
mod types;
mod vote;

pub use aggregate::{AggregateResult, AlignmentMode, DistanceAggregator};
pub use error::ClassifyError;
pub use sample::{classify_batch, classify_sample, SampleOutcome};
pub use types::{BeatMap, DistanceMap, LeadId, PrototypeMap, Verdict};
pub use vote::{classify, final_verdict, lead_verdicts, Classification};
