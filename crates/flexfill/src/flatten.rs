#![forbid(unsafe_code)]

//! Flattening of named groups into a uniform working list.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::region::{GroupSpec, RegionSpec};

/// Transient per-invocation working record for one flat region.
///
/// Identity is `(group, member)`: the index of the owning group in key
/// order, plus the position within a list group (`None` for single-region
/// groups). Records are freshly built per call and never shared.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlatRegion {
    pub group: usize,
    pub member: Option<usize>,
    pub min: f64,
    pub max: f64,
    pub priority: i32,
    pub share: f64,
    /// Running allocation, seeded at `min` before tier distribution.
    pub allocated: f64,
}

impl FlatRegion {
    fn new(group: usize, member: Option<usize>, spec: &RegionSpec) -> Self {
        Self {
            group,
            member,
            min: spec.min,
            max: spec.max,
            priority: spec.priority,
            share: spec.share,
            allocated: 0.0,
        }
    }

    /// Remaining growth capacity, `max - allocated`.
    #[inline]
    pub fn headroom(&self) -> f64 {
        self.max - self.allocated
    }
}

/// Expand groups into a flat, order-stable list: key order first, then
/// list order within `Many` groups. Infallible.
pub(crate) fn flatten(groups: &BTreeMap<String, GroupSpec>) -> SmallVec<[FlatRegion; 8]> {
    let mut flat = SmallVec::new();
    for (group_idx, group) in groups.values().enumerate() {
        match group {
            GroupSpec::Single(region) => {
                flat.push(FlatRegion::new(group_idx, None, region));
            }
            GroupSpec::Many(regions) => {
                for (member_idx, region) in regions.iter().enumerate() {
                    flat.push(FlatRegion::new(group_idx, Some(member_idx), region));
                }
            }
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: Vec<(&str, GroupSpec)>) -> BTreeMap<String, GroupSpec> {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn flatten_preserves_key_then_member_order() {
        let input = groups(vec![
            ("b", GroupSpec::Many(vec![RegionSpec::fixed(1.0), RegionSpec::fixed(2.0)])),
            ("a", GroupSpec::Single(RegionSpec::fixed(3.0))),
        ]);
        let flat = flatten(&input);
        let identities: Vec<(usize, Option<usize>)> =
            flat.iter().map(|r| (r.group, r.member)).collect();
        // "a" sorts before "b" in key order.
        assert_eq!(identities, vec![(0, None), (1, Some(0)), (1, Some(1))]);
        assert_eq!(flat[0].min, 3.0);
        assert_eq!(flat[2].min, 2.0);
    }

    #[test]
    fn flatten_skips_nothing_and_starts_unallocated() {
        let input = groups(vec![
            ("only", GroupSpec::Single(RegionSpec::new().min(7.0).max(9.0))),
        ]);
        let flat = flatten(&input);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].allocated, 0.0);
        assert_eq!(flat[0].headroom(), 9.0);
    }

    #[test]
    fn empty_list_group_contributes_no_records() {
        let input = groups(vec![
            ("empty", GroupSpec::Many(Vec::new())),
            ("real", GroupSpec::Single(RegionSpec::new())),
        ]);
        let flat = flatten(&input);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].group, 1);
    }
}
