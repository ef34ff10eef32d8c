#![forbid(unsafe_code)]

//! The distributor pipeline: feasibility check, minimum allocation,
//! priority-tiered proportional water-fill, and aggregation.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::flatten::{FlatRegion, flatten};
use crate::region::{GroupSpec, RegionSpec};

/// Default relative epsilon: feasibility slack and "budget is dust"
/// cutoffs are `epsilon_rel * max(1, |total_size|)`.
pub const DEFAULT_EPSILON_REL: f64 = 1e-9;

/// Error returned by [`Distributor::distribute`].
///
/// Two distinct families: `Infeasible` concerns aggregate sizing and is the
/// expected rejection inside a layout loop; the remaining variants reject
/// malformed individual specs before any sizing is attempted.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributeError {
    /// The aggregate minimum exceeds the total, or the aggregate maximum
    /// falls short of it. No partial allocation is produced.
    Infeasible {
        total_size: f64,
        total_min: f64,
        total_max: f64,
    },
    /// The requested total is NaN or infinite.
    NonFiniteTotal { total_size: f64 },
    /// A region has `min > max`, a NaN bound, or a non-finite minimum.
    InvalidBounds {
        group: String,
        member: Option<usize>,
        min: f64,
        max: f64,
    },
    /// A region has a negative or NaN share.
    InvalidShare {
        group: String,
        member: Option<usize>,
        share: f64,
    },
}

impl DistributeError {
    /// Whether this is the aggregate-sizing rejection. Callers typically
    /// relax constraints and re-invoke on this one.
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }

    /// Whether this rejects a malformed individual spec (never raised for
    /// aggregate sizing).
    #[must_use]
    pub fn is_invalid_spec(&self) -> bool {
        !self.is_infeasible()
    }
}

impl fmt::Display for DistributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible {
                total_size,
                total_min,
                total_max,
            } => write!(
                f,
                "infeasible: total {total_size} outside aggregate bounds [{total_min}, {total_max}]"
            ),
            Self::NonFiniteTotal { total_size } => {
                write!(f, "total size {total_size} is not finite")
            }
            Self::InvalidBounds {
                group,
                member: Some(member),
                min,
                max,
            } => write!(
                f,
                "region {group}[{member}] has invalid bounds [min={min}, max={max}]"
            ),
            Self::InvalidBounds {
                group,
                member: None,
                min,
                max,
            } => write!(f, "region {group} has invalid bounds [min={min}, max={max}]"),
            Self::InvalidShare {
                group,
                member: Some(member),
                share,
            } => write!(f, "region {group}[{member}] has invalid share {share}"),
            Self::InvalidShare {
                group,
                member: None,
                share,
            } => write!(f, "region {group} has invalid share {share}"),
        }
    }
}

impl std::error::Error for DistributeError {}

/// One-axis constrained space distributor.
///
/// Stateless apart from tuning; one [`distribute`](Self::distribute) call
/// builds, consumes, and discards all working state, so a `Distributor`
/// can be shared freely across threads.
///
/// ```
/// use std::collections::BTreeMap;
/// use flexfill::{Distributor, GroupSpec, RegionSpec};
///
/// let mut groups = BTreeMap::new();
/// groups.insert(
///     "sidebar".to_string(),
///     GroupSpec::Single(RegionSpec::new().min(10.0).max(40.0)),
/// );
/// groups.insert(
///     "content".to_string(),
///     GroupSpec::Single(RegionSpec::new().min(20.0)),
/// );
///
/// let sizes = Distributor::new().distribute(100.0, &groups).unwrap();
/// assert_eq!(sizes["sidebar"], 40.0);
/// assert_eq!(sizes["content"], 60.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Distributor {
    epsilon_rel: f64,
}

impl Distributor {
    /// Create a distributor with default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epsilon_rel: DEFAULT_EPSILON_REL,
        }
    }

    /// Set the relative epsilon. The absolute tolerance used by a call is
    /// `epsilon_rel * max(1, |total_size|)`, so it tracks the magnitude of
    /// the requested total.
    #[must_use]
    pub fn epsilon_rel(mut self, epsilon_rel: f64) -> Self {
        self.epsilon_rel = epsilon_rel.abs();
        self
    }

    /// Absolute tolerance for a given total.
    #[inline]
    fn epsilon(&self, total_size: f64) -> f64 {
        self.epsilon_rel * total_size.abs().max(1.0)
    }

    /// Compute a size per group such that sizes sum to `total_size`,
    /// respect every region's bounds, and grow proportionally within
    /// priority tiers, higher tiers saturating first.
    ///
    /// For `Many` groups the reported value is the sum over members. On
    /// success `Σ values == total_size` within the configured tolerance.
    pub fn distribute(
        &self,
        total_size: f64,
        groups: &BTreeMap<String, GroupSpec>,
    ) -> Result<BTreeMap<String, f64>, DistributeError> {
        if !total_size.is_finite() {
            return Err(DistributeError::NonFiniteTotal { total_size });
        }
        for (key, group) in groups {
            match group {
                GroupSpec::Single(region) => validate_region(key, None, region)?,
                GroupSpec::Many(regions) => {
                    for (member, region) in regions.iter().enumerate() {
                        validate_region(key, Some(member), region)?;
                    }
                }
            }
        }

        let mut flat = flatten(groups);
        let epsilon = self.epsilon(total_size);

        // Feasibility: the floor must not exceed the budget and the
        // ceiling must reach it. An unbounded max keeps the ceiling
        // infinite.
        let total_min: f64 = flat.iter().map(|region| region.min).sum();
        let total_max: f64 = flat.iter().map(|region| region.max).sum();
        if total_min > total_size + epsilon || total_max < total_size - epsilon {
            #[cfg(feature = "tracing")]
            debug!(total_size, total_min, total_max, "distribution infeasible");
            return Err(DistributeError::Infeasible {
                total_size,
                total_min,
                total_max,
            });
        }

        // Seed every region at its minimum.
        for region in flat.iter_mut() {
            region.allocated = region.min;
        }
        let mut budget = (total_size - total_min).max(0.0);

        // Distinct priorities, highest served first.
        let mut tiers: Vec<i32> = flat.iter().map(|region| region.priority).collect();
        tiers.sort_unstable_by(|a, b| b.cmp(a));
        tiers.dedup();

        for priority in tiers {
            if budget <= epsilon {
                break;
            }
            budget = fill_tier(&mut flat, priority, budget, epsilon);
            #[cfg(feature = "tracing")]
            trace!(priority, remaining = budget, "tier filled");
        }
        // Whatever survives the lowest tier is floating noise (feasibility
        // guarantees the ceilings can absorb the budget).

        // Fold the flat list back into the group shape.
        let mut totals = vec![0.0_f64; groups.len()];
        for region in flat.iter() {
            totals[region.group] += region.allocated;
        }
        Ok(groups.keys().cloned().zip(totals).collect())
    }
}

impl Default for Distributor {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_region(
    group: &str,
    member: Option<usize>,
    region: &RegionSpec,
) -> Result<(), DistributeError> {
    if !region.min.is_finite() || region.max.is_nan() || region.min > region.max {
        return Err(DistributeError::InvalidBounds {
            group: group.to_string(),
            member,
            min: region.min,
            max: region.max,
        });
    }
    if region.share.is_nan() || region.share < 0.0 {
        return Err(DistributeError::InvalidShare {
            group: group.to_string(),
            member,
            share: region.share,
        });
    }
    Ok(())
}

/// Exact proportional water-fill of one priority tier.
///
/// Active members (positive share, headroom left) are sorted by normalized
/// headroom `headroom / share`, the uniform growth rate at which each one
/// hits its ceiling. Walking that order, a member whose proportional
/// entitlement covers its headroom is filled to its max and its share
/// retired; the first member whose entitlement falls short proves no later
/// member can saturate either, so the rest of the budget is handed out
/// proportionally in a single pass. Returns the unconsumed budget, which
/// carries to the next tier.
fn fill_tier(flat: &mut [FlatRegion], priority: i32, mut budget: f64, epsilon: f64) -> f64 {
    let mut active: Vec<usize> = flat
        .iter()
        .enumerate()
        .filter(|(_, region)| {
            region.priority == priority && region.share > 0.0 && region.headroom() > 0.0
        })
        .map(|(idx, _)| idx)
        .collect();
    if active.is_empty() {
        return budget;
    }

    active.sort_by(|&a, &b| {
        let rate_a = flat[a].headroom() / flat[a].share;
        let rate_b = flat[b].headroom() / flat[b].share;
        rate_a
            .partial_cmp(&rate_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut remaining_share: f64 = active.iter().map(|&idx| flat[idx].share).sum();

    for (pos, &idx) in active.iter().enumerate() {
        if budget <= epsilon || remaining_share <= 0.0 {
            break;
        }
        let headroom = flat[idx].headroom();
        let entitled = budget * (flat[idx].share / remaining_share);
        if entitled >= headroom {
            flat[idx].allocated = flat[idx].max;
            budget -= headroom;
            remaining_share -= flat[idx].share;
        } else {
            // No member past this point saturates: each needs a strictly
            // higher growth rate to reach its ceiling. Hand out the whole
            // budget proportionally; the last member takes the arithmetic
            // remainder so the sums stay exact.
            let rest = &active[pos..];
            let mut handed = 0.0;
            for (offset, &rest_idx) in rest.iter().enumerate() {
                let grant = if offset == rest.len() - 1 {
                    (budget - handed).min(flat[rest_idx].headroom())
                } else {
                    budget * (flat[rest_idx].share / remaining_share)
                };
                flat[rest_idx].allocated += grant;
                handed += grant;
            }
            budget -= handed;
            break;
        }
    }
    budget.max(0.0)
}
