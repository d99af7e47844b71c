//! Error types for distance aggregation and voting.

use crate::types::LeadId;

/// Errors from distance aggregation and verdict computation.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Returned when a lead present in the NORMAL distance map is missing
    /// from the AMI map. The caller contract requires identical key sets in
    /// both maps at decision time.
    #[error("lead \"{lead}\" present in the NORMAL distance map but missing from the AMI map")]
    MissingLead {
        /// The unmatched lead.
        lead: LeadId,
    },

    /// Returned when a target shares no leads with the prototype groups, so
    /// no vote can be taken.
    #[error("target shares no leads with the prototype maps")]
    NoComparableLeads,

    /// Wraps a DTW error from the underlying alignment.
    #[error(transparent)]
    Dtw(#[from] digitalis_dtw::DtwError),
}
