//! Per-lead decisions and majority-vote verdict.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::error::ClassifyError;
use crate::types::{DistanceMap, LeadId, Verdict};

/// Per-lead verdicts plus the final majority-vote outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The decision each lead contributed.
    pub lead_verdicts: BTreeMap<LeadId, Verdict>,
    /// The aggregated verdict for the sample.
    pub verdict: Verdict,
}

/// Decide each lead by comparing its two group distances.
///
/// Iterates the leads of the NORMAL map; a lead is `Normal` only when its
/// NORMAL-group distance is strictly smaller than its AMI-group distance —
/// ties go to `Ami`.
///
/// # Errors
///
/// Returns [`ClassifyError::MissingLead`] when a lead of the NORMAL map is
/// absent from the AMI map. Both maps must share one key set; a mismatch is
/// a caller error, not a recoverable condition.
pub fn lead_verdicts(
    normal: &DistanceMap,
    ami: &DistanceMap,
) -> Result<BTreeMap<LeadId, Verdict>, ClassifyError> {
    let mut verdicts = BTreeMap::new();
    for (lead, normal_cost) in normal.iter() {
        let ami_cost = ami.get(lead).ok_or_else(|| ClassifyError::MissingLead {
            lead: lead.clone(),
        })?;
        let verdict = if normal_cost.value() < ami_cost.value() {
            Verdict::Normal
        } else {
            Verdict::Ami
        };
        verdicts.insert(lead.clone(), verdict);
    }
    Ok(verdicts)
}

/// Reduce per-lead verdicts to one sample verdict by majority vote.
///
/// On a split vote the group with the smaller total distance wins. Both
/// distance maps are mandatory parameters precisely because of that
/// tie-break — the decision is a pure function of its inputs.
#[must_use]
pub fn final_verdict(
    verdicts: &BTreeMap<LeadId, Verdict>,
    normal: &DistanceMap,
    ami: &DistanceMap,
) -> Verdict {
    let normal_votes = verdicts.values().filter(|&&v| v == Verdict::Normal).count();
    let ami_votes = verdicts.len() - normal_votes;

    if normal_votes > ami_votes {
        return Verdict::Normal;
    }
    if ami_votes > normal_votes {
        return Verdict::Ami;
    }

    let normal_total = normal.total();
    let ami_total = ami.total();
    debug!(normal_total, ami_total, "split vote, breaking tie on total distance");
    if normal_total < ami_total {
        Verdict::Normal
    } else {
        Verdict::Ami
    }
}

/// Run both voting steps over a pair of distance maps.
///
/// # Errors
///
/// Returns [`ClassifyError::MissingLead`] on a key-set mismatch between the
/// two maps.
#[instrument(skip(normal, ami), fields(n_leads = normal.len()))]
pub fn classify(normal: &DistanceMap, ami: &DistanceMap) -> Result<Classification, ClassifyError> {
    let verdicts = lead_verdicts(normal, ami)?;
    let verdict = final_verdict(&verdicts, normal, ami);
    Ok(Classification {
        lead_verdicts: verdicts,
        verdict,
    })
}
