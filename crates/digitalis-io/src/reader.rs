//! Beat-template CSV loading.

use std::fs::File;
use std::path::{Path, PathBuf};

use digitalis_classify::{BeatMap, LeadId};
use digitalis_dtw::BeatSeries;
use tracing::{info, instrument};

use crate::domain::is_known_lead;
use crate::IoError;

/// A data row: the lead name, then every remaining column as a sample.
type TemplateRow = (String, Vec<f64>);

/// Loads per-lead beat templates from a CSV file.
///
/// One row per lead after a header: `lead,s0,s1,...`. A beat template is a
/// fixed-length waveform, so the first row fixes the sample count for the
/// whole file. Lead names must belong to the recognized ECG lead set
/// (case-insensitive) and may not repeat; waveform validation itself (no
/// empty or non-finite templates) is delegated to [`BeatSeries`].
pub struct BeatTemplateReader {
    path: PathBuf,
}

impl BeatTemplateReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`BeatMap`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Open`] | File doesn't exist or is unreadable |
    /// | [`IoError::Csv`] | Row isn't a lead name followed by floats |
    /// | [`IoError::UnknownLead`] | Lead name outside the recognized set |
    /// | [`IoError::DuplicateLead`] | Same lead in two rows |
    /// | [`IoError::SampleCountMismatch`] | Row length disagrees with the first row |
    /// | [`IoError::Template`] | Samples empty or non-finite |
    /// | [`IoError::NoTemplates`] | Header but zero data rows |
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<BeatMap, IoError> {
        let file = File::open(&self.path).map_err(|source| IoError::Open {
            path: self.path.clone(),
            source,
        })?;

        // flexible(true) defers column-count checking to the per-lead
        // SampleCountMismatch test below, which names the offending lead.
        let mut rows = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut beats = BeatMap::new();
        let mut template_len: Option<(String, usize)> = None;

        for (row, parsed) in rows.deserialize::<TemplateRow>().enumerate() {
            let (lead, samples) = parsed.map_err(|source| IoError::Csv {
                path: self.path.clone(),
                row,
                source,
            })?;

            if !is_known_lead(&lead) {
                return Err(IoError::UnknownLead {
                    path: self.path.clone(),
                    row,
                    lead,
                });
            }

            match &template_len {
                None => template_len = Some((lead.clone(), samples.len())),
                Some((reference, expected)) if *expected != samples.len() => {
                    return Err(IoError::SampleCountMismatch {
                        path: self.path.clone(),
                        lead,
                        reference: reference.clone(),
                        expected: *expected,
                        got: samples.len(),
                    });
                }
                Some(_) => {}
            }

            let beat = BeatSeries::new(samples).map_err(|source| IoError::Template {
                path: self.path.clone(),
                lead: lead.clone(),
                source,
            })?;
            if beats.insert(LeadId::new(lead.clone()), beat).is_some() {
                return Err(IoError::DuplicateLead {
                    path: self.path.clone(),
                    lead,
                });
            }
        }

        if beats.is_empty() {
            return Err(IoError::NoTemplates {
                path: self.path.clone(),
            });
        }

        info!(
            n_leads = beats.len(),
            n_samples = template_len.map_or(0, |(_, len)| len),
            "beat templates loaded"
        );

        Ok(beats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitalis_dtw::DtwError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn reads_precordial_leads() {
        let csv = "lead,s0,s1,s2,s3\nV1,0.0,0.1,0.0,0.1\nV2,0.1,0.0,0.1,0.0\nV3,5.0,5.1,5.0,5.1\nV4,5.1,5.0,5.1,5.0\n";
        let f = write_csv(csv);
        let beats = BeatTemplateReader::new(f.path()).read().unwrap();
        assert_eq!(beats.len(), 4);
        assert_eq!(beats[&LeadId::new("V1")].as_ref(), &[0.0, 0.1, 0.0, 0.1]);
        assert_eq!(beats[&LeadId::new("V4")].len(), 4);
    }

    #[test]
    fn lead_names_matched_case_insensitively() {
        let csv = "lead,s0,s1\naVR,1.0,2.0\nvx,3.0,4.0\n";
        let f = write_csv(csv);
        let beats = BeatTemplateReader::new(f.path()).read().unwrap();
        // Keys keep the file's spelling.
        assert!(beats.contains_key(&LeadId::new("aVR")));
        assert!(beats.contains_key(&LeadId::new("vx")));
    }

    #[test]
    fn values_survive_round_trip() {
        let csv = "lead,s0,s1\nII,1.23456789,9.87654321\n";
        let f = write_csv(csv);
        let beats = BeatTemplateReader::new(f.path()).read().unwrap();
        let vals = beats[&LeadId::new("II")].as_ref();
        assert!((vals[0] - 1.23456789).abs() < 1e-12);
        assert!((vals[1] - 9.87654321).abs() < 1e-12);
    }

    #[test]
    fn error_missing_file() {
        let result = BeatTemplateReader::new(Path::new("/nonexistent/beats.csv")).read();
        assert!(matches!(result, Err(IoError::Open { .. })));
    }

    #[test]
    fn error_header_only() {
        let f = write_csv("lead,s0,s1,s2\n");
        let result = BeatTemplateReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::NoTemplates { .. })));
    }

    #[test]
    fn error_unknown_lead() {
        let f = write_csv("lead,s0,s1\nV1,1.0,2.0\nQ7,3.0,4.0\n");
        let result = BeatTemplateReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::UnknownLead { row: 1, ref lead, .. }) if lead == "Q7"
        ));
    }

    #[test]
    fn error_sample_count_mismatch_names_both_leads() {
        let f = write_csv("lead,s0,s1,s2\nV1,1.0,2.0,3.0\nV2,1.0,2.0\n");
        let result = BeatTemplateReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::SampleCountMismatch {
                ref lead,
                ref reference,
                expected: 3,
                got: 2,
                ..
            }) if lead == "V2" && reference == "V1"
        ));
    }

    #[test]
    fn error_row_without_samples() {
        let f = write_csv("lead,s0,s1\nV1\n");
        let result = BeatTemplateReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::Template {
                source: DtwError::EmptySeries,
                ..
            })
        ));
    }

    #[test]
    fn error_non_finite_sample() {
        let f = write_csv("lead,s0,s1\nV1,1.0,NaN\n");
        let result = BeatTemplateReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::Template {
                source: DtwError::NonFiniteValue { index: 1 },
                ..
            })
        ));
    }

    #[test]
    fn error_unparseable_sample() {
        let f = write_csv("lead,s0,s1\nV1,1.0,abc\n");
        let result = BeatTemplateReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::Csv { row: 0, .. })));
    }

    #[test]
    fn error_duplicate_lead() {
        let f = write_csv("lead,s0,s1\nV1,1.0,2.0\nV2,3.0,4.0\nV1,5.0,6.0\n");
        let result = BeatTemplateReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::DuplicateLead { ref lead, .. }) if lead == "V1"
        ));
    }
}
