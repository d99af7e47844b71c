//! JSON verdict writer for classification runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use digitalis_classify::SampleOutcome;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::ExperimentName;
use crate::IoError;

/// One classified target, named by its source (usually the file stem).
pub struct TargetReport {
    /// Target name.
    pub target: String,
    /// Classification outcome for the target.
    pub outcome: SampleOutcome,
}

/// Writes classification verdicts to a JSON artifact.
///
/// Creates the output directory on construction if it does not exist. The
/// output file is named `{experiment}_verdicts.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

#[derive(Serialize)]
struct VerdictArtifact<'a> {
    experiment: &'a str,
    mode: &'a str,
    n_targets: usize,
    targets: Vec<TargetArtifact>,
}

#[derive(Serialize)]
struct TargetArtifact {
    target: String,
    verdict: String,
    label: usize,
    lead_verdicts: BTreeMap<String, String>,
    normal_distances: BTreeMap<String, f64>,
    ami_distances: BTreeMap<String, f64>,
    mean_normal_secs: f64,
    mean_ami_secs: f64,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::CreateDir`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::CreateDir {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Return the path of the verdicts artifact.
    #[must_use]
    pub fn verdicts_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_verdicts.json", self.experiment.as_str()))
    }

    /// Write all target outcomes to `{experiment}_verdicts.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteArtifact`] if the file cannot be written.
    #[instrument(skip_all, fields(n_targets = reports.len()))]
    pub fn write_verdicts(&self, mode: &str, reports: &[TargetReport]) -> Result<(), IoError> {
        let path = self.verdicts_path();

        let targets: Vec<TargetArtifact> = reports
            .iter()
            .map(|report| {
                let outcome = &report.outcome;
                TargetArtifact {
                    target: report.target.clone(),
                    verdict: outcome.verdict.to_string(),
                    label: outcome.verdict.index(),
                    lead_verdicts: outcome
                        .classification
                        .lead_verdicts
                        .iter()
                        .map(|(lead, verdict)| (lead.to_string(), verdict.to_string()))
                        .collect(),
                    normal_distances: outcome
                        .normal
                        .distances
                        .iter()
                        .map(|(lead, cost)| (lead.to_string(), cost.value()))
                        .collect(),
                    ami_distances: outcome
                        .ami
                        .distances
                        .iter()
                        .map(|(lead, cost)| (lead.to_string(), cost.value()))
                        .collect(),
                    mean_normal_secs: outcome.normal.mean_duration.as_secs_f64(),
                    mean_ami_secs: outcome.ami.mean_duration.as_secs_f64(),
                }
            })
            .collect();

        let artifact = VerdictArtifact {
            experiment: self.experiment.as_str(),
            mode,
            n_targets: targets.len(),
            targets,
        };

        let json = serde_json::to_string_pretty(&artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteArtifact {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "verdicts written");
        Ok(())
    }
}
