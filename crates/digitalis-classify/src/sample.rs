//! Whole-sample classification and parallel batch execution.

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::aggregate::{AggregateResult, AlignmentMode, DistanceAggregator};
use crate::error::ClassifyError;
use crate::types::{BeatMap, PrototypeMap, Verdict};
use crate::vote::{classify, Classification};

/// Everything produced by classifying one target sample: the verdict, the
/// per-lead decisions, and both aggregation results with their timing
/// diagnostics.
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    /// Final verdict for the sample.
    pub verdict: Verdict,
    /// Per-lead decisions and final vote.
    pub classification: Classification,
    /// Distances and mean timing against the NORMAL prototypes.
    pub normal: AggregateResult,
    /// Distances and mean timing against the AMI prototypes.
    pub ami: AggregateResult,
}

/// Classify one target sample against both prototype groups.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ClassifyError::NoComparableLeads`] | The target shares no leads with the NORMAL prototypes |
/// | [`ClassifyError::MissingLead`] | The two distance maps ended up with different key sets |
#[instrument(skip_all, fields(n_leads = target.len()))]
pub fn classify_sample(
    target: &BeatMap,
    normal_prototypes: &PrototypeMap,
    ami_prototypes: &PrototypeMap,
    mode: AlignmentMode,
) -> Result<SampleOutcome, ClassifyError> {
    let aggregator = DistanceAggregator::new(mode);
    let normal = aggregator.distances(target, normal_prototypes);
    let ami = aggregator.distances(target, ami_prototypes);

    if normal.distances.is_empty() {
        return Err(ClassifyError::NoComparableLeads);
    }

    let classification = classify(&normal.distances, &ami.distances)?;
    info!(verdict = %classification.verdict, "sample classified");

    Ok(SampleOutcome {
        verdict: classification.verdict,
        classification,
        normal,
        ami,
    })
}

/// Classify many independent targets in parallel.
///
/// Each comparison owns its own cost tables and windows; no state is shared
/// across targets, so the work distributes freely over the rayon pool.
/// Results are returned in input order.
#[must_use]
pub fn classify_batch(
    targets: &[BeatMap],
    normal_prototypes: &PrototypeMap,
    ami_prototypes: &PrototypeMap,
    mode: AlignmentMode,
) -> Vec<Result<SampleOutcome, ClassifyError>> {
    targets
        .par_iter()
        .map(|target| classify_sample(target, normal_prototypes, ami_prototypes, mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadId;
    use digitalis_dtw::BeatSeries;

    fn beat(values: &[f64]) -> BeatSeries {
        BeatSeries::new(values.to_vec()).unwrap()
    }

    fn lead_map(entries: &[(&str, &[f64])]) -> BeatMap {
        entries
            .iter()
            .map(|&(id, values)| (LeadId::new(id), beat(values)))
            .collect()
    }

    #[test]
    fn sample_matching_normal_prototypes_is_normal() {
        let target = lead_map(&[("V1", &[1.0, 2.0, 1.0]), ("V2", &[0.0, 1.0, 0.0])]);
        let normal = lead_map(&[("V1", &[1.0, 2.0, 1.0]), ("V2", &[0.0, 1.0, 0.0])]);
        let ami = lead_map(&[("V1", &[5.0, 9.0, 5.0]), ("V2", &[4.0, 8.0, 4.0])]);

        let outcome = classify_sample(&target, &normal, &ami, AlignmentMode::Exact).unwrap();
        assert_eq!(outcome.verdict, Verdict::Normal);
        assert_eq!(outcome.normal.distances.len(), 2);
        assert_eq!(outcome.ami.distances.len(), 2);
    }

    #[test]
    fn disjoint_lead_sets_error() {
        let target = lead_map(&[("V1", &[1.0, 2.0])]);
        let normal = lead_map(&[("V6", &[1.0, 2.0])]);
        let ami = lead_map(&[("V6", &[1.0, 2.0])]);

        let result = classify_sample(&target, &normal, &ami, AlignmentMode::Exact);
        assert!(matches!(result, Err(ClassifyError::NoComparableLeads)));
    }

    #[test]
    fn batch_preserves_input_order() {
        let normal_template = [1.0, 2.0, 1.0];
        let ami_template = [9.0, 12.0, 9.0];
        let normal = lead_map(&[("II", &normal_template)]);
        let ami = lead_map(&[("II", &ami_template)]);

        let targets = vec![
            lead_map(&[("II", &normal_template)]),
            lead_map(&[("II", &ami_template)]),
            lead_map(&[("II", &[1.0, 2.5, 1.0])]),
        ];

        let outcomes = classify_batch(&targets, &normal, &ami, AlignmentMode::Exact);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_ref().unwrap().verdict, Verdict::Normal);
        assert_eq!(outcomes[1].as_ref().unwrap().verdict, Verdict::Ami);
        assert_eq!(outcomes[2].as_ref().unwrap().verdict, Verdict::Normal);
    }
}
