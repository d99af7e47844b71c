//! I/O error types for digitalis-io.

use std::path::PathBuf;

use digitalis_dtw::DtwError;

/// Errors from template loading and verdict serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the template file cannot be opened.
    #[error("cannot open {path}")]
    Open {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a CSV row cannot be parsed into a lead name and samples.
    #[error("malformed CSV in {path} at data row {row}")]
    Csv {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based data row index (excluding the header).
        row: usize,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a row names a lead outside the recognized ECG lead set.
    #[error("unrecognized ECG lead \"{lead}\" in {path} at data row {row}")]
    UnknownLead {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based data row index.
        row: usize,
        /// The unrecognized lead name.
        lead: String,
    },

    /// Returned when the same lead appears in more than one row.
    #[error("lead \"{lead}\" appears more than once in {path}")]
    DuplicateLead {
        /// Path to the CSV file.
        path: PathBuf,
        /// The duplicated lead name.
        lead: String,
    },

    /// Returned when a template's sample count differs from the file's first
    /// template. Beat templates are fixed-length waveforms; one file holds
    /// one length.
    #[error("lead \"{lead}\" in {path} has {got} samples, but lead \"{reference}\" set the template length to {expected}")]
    SampleCountMismatch {
        /// Path to the CSV file.
        path: PathBuf,
        /// Lead whose sample count disagrees.
        lead: String,
        /// Lead of the first row, which fixes the template length.
        reference: String,
        /// Sample count of the first row.
        expected: usize,
        /// Sample count of the offending row.
        got: usize,
    },

    /// Returned when a row's samples fail waveform validation (empty, NaN,
    /// or infinite).
    #[error("invalid beat template for lead \"{lead}\" in {path}")]
    Template {
        /// Path to the CSV file.
        path: PathBuf,
        /// Lead of the offending row.
        lead: String,
        /// The validation failure.
        source: DtwError,
    },

    /// Returned when the file contains a header but no template rows.
    #[error("no beat templates in {path}")]
    NoTemplates {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    CreateDir {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a verdict artifact cannot be written.
    #[error("cannot write {path}")]
    WriteArtifact {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
