//! Domain types for per-lead classification.

use std::collections::BTreeMap;
use std::fmt;

use digitalis_dtw::{AlignmentCost, BeatSeries};

/// An ECG lead (channel) identifier — the class key indexing the family of
/// per-lead distance comparisons that feed one voting decision.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeadId(String);

impl LeadId {
    /// Create a new lead identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the lead identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One template beat per lead for a single sample.
pub type BeatMap = BTreeMap<LeadId, BeatSeries>;

/// Representative (averaged) beat per lead for one training group. Built
/// once, read-only during inference.
pub type PrototypeMap = BTreeMap<LeadId, BeatSeries>;

/// Per-lead alignment costs for one (target, prototype-group) comparison.
///
/// Ephemeral: one map is produced per comparison and consumed by the voting
/// step. Iteration is ordered by lead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMap(BTreeMap<LeadId, AlignmentCost>);

impl DistanceMap {
    /// Create an empty distance map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the alignment cost for a lead.
    pub fn insert(&mut self, lead: LeadId, cost: AlignmentCost) {
        self.0.insert(lead, cost);
    }

    /// Return the cost for a lead, if present.
    #[must_use]
    pub fn get(&self, lead: &LeadId) -> Option<AlignmentCost> {
        self.0.get(lead).copied()
    }

    /// Iterate `(lead, cost)` pairs in lead order.
    pub fn iter(&self) -> impl Iterator<Item = (&LeadId, AlignmentCost)> + '_ {
        self.0.iter().map(|(lead, &cost)| (lead, cost))
    }

    /// Sum of all per-lead costs — the tie-break statistic.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.values().map(|c| c.value()).sum()
    }

    /// Return the number of leads in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the map has no leads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A binary classification outcome: healthy sinus rhythm or acute
/// myocardial infarction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Healthy (`"NORMAL"`, reported as label `0`).
    Normal,
    /// Acute myocardial infarction (`"AMI"`, reported as label `1`).
    Ami,
}

impl Verdict {
    /// Return the canonical string label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Ami => "AMI",
        }
    }

    /// Return the integer label used by the reporting layer: 0 for NORMAL,
    /// 1 for AMI.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Ami => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
