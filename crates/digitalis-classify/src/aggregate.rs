//! Per-lead distance aggregation with timing instrumentation.

use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use digitalis_dtw::{exact_distance, AlignmentCost, BeatSeries, DtwError, FastDtw, DEFAULT_RADIUS};

use crate::types::{BeatMap, DistanceMap, PrototypeMap};

/// Which aligner the aggregator runs per lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentMode {
    /// Exact DTW on the scalar series.
    Exact,
    /// Multiresolution approximation with the given search radius. Both
    /// series are reshaped to column-vector form before alignment.
    Fast {
        /// FastDTW search radius.
        radius: usize,
    },
}

impl AlignmentMode {
    /// Fast mode with the default radius.
    #[must_use]
    pub fn fast() -> Self {
        Self::Fast {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// A distance map plus the mean wall-clock duration per comparison.
///
/// The timing is diagnostic instrumentation only; it never feeds the
/// classification decision.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// Per-lead alignment costs.
    pub distances: DistanceMap,
    /// Arithmetic mean of the individual comparison durations. Zero when no
    /// comparison completed.
    pub mean_duration: Duration,
}

/// Computes one distance per lead between a target sample and a prototype
/// group.
#[derive(Debug, Clone, Copy)]
pub struct DistanceAggregator {
    mode: AlignmentMode,
}

impl DistanceAggregator {
    /// Create an aggregator using the given alignment mode.
    #[must_use]
    pub fn new(mode: AlignmentMode) -> Self {
        Self { mode }
    }

    /// Return the configured alignment mode.
    #[must_use]
    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    /// Compute one distance per lead present in *both* maps.
    ///
    /// Leads present in only one map are skipped silently — they are not an
    /// error. Each comparison is timed individually; a comparison that fails
    /// is logged and dropped without touching the other leads' entries.
    #[instrument(skip(self, target, prototypes), fields(n_target = target.len(), n_prototypes = prototypes.len()))]
    pub fn distances(&self, target: &BeatMap, prototypes: &PrototypeMap) -> AggregateResult {
        let mut distances = DistanceMap::new();
        let mut total = Duration::ZERO;
        let mut timed = 0u32;

        for (lead, beat) in target {
            let Some(prototype) = prototypes.get(lead) else {
                debug!(%lead, "no prototype for lead, skipped");
                continue;
            };

            let start = Instant::now();
            let result = self.align(beat, prototype);
            let took = start.elapsed();

            match result {
                Ok(cost) => {
                    distances.insert(lead.clone(), cost);
                    total += took;
                    timed += 1;
                }
                Err(err) => {
                    warn!(%lead, %err, "alignment failed, lead dropped from distance map");
                }
            }
        }

        let mean_duration = if timed == 0 {
            Duration::ZERO
        } else {
            total / timed
        };

        AggregateResult {
            distances,
            mean_duration,
        }
    }

    fn align(&self, beat: &BeatSeries, prototype: &BeatSeries) -> Result<AlignmentCost, DtwError> {
        match self.mode {
            AlignmentMode::Exact => Ok(exact_distance(beat.as_view(), prototype.as_view())),
            AlignmentMode::Fast { radius } => {
                FastDtw::new(radius).distance(&beat.to_points(), &prototype.to_points())
            }
        }
    }
}
