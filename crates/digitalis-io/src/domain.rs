//! Validated naming types for template files and output artifacts.

use crate::IoError;

/// Lead names accepted in template files: the standard 12-lead set plus the
/// Frank orthogonal leads (vx, vy, vz) carried by PTB records. Matching is
/// case-insensitive; the name as written in the file becomes the lead key.
const KNOWN_LEADS: [&str; 15] = [
    "i", "ii", "iii", "avr", "avl", "avf", "v1", "v2", "v3", "v4", "v5", "v6", "vx", "vy", "vz",
];

/// Case-insensitive membership test against [`KNOWN_LEADS`].
pub(crate) fn is_known_lead(raw: &str) -> bool {
    KNOWN_LEADS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(raw))
}

/// A validated experiment name, safe to embed in output file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Validate an experiment name: non-empty, ASCII alphanumerics plus `_`
    /// and `-` only.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] otherwise.
    pub fn new(name: impl Into<String>) -> Result<Self, IoError> {
        let name = name.into();
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-');
        match name.chars().next() {
            Some(_) if name.chars().all(allowed) => Ok(Self(name)),
            _ => Err(IoError::InvalidExperimentName { name }),
        }
    }

    /// Return the experiment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
