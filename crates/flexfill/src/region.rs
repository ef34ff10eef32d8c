#![forbid(unsafe_code)]

//! Region and group specifications.
//!
//! A [`RegionSpec`] describes one resizable unit: its size bounds, the
//! priority tier it grows in, and its growth share within that tier. A
//! [`GroupSpec`] is a named slot holding either a single region or an
//! ordered list of sub-regions that the caller consumes as one unit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size bounds, priority tier, and growth share for one region.
///
/// All fields default to the permissive end: no minimum, no maximum,
/// tier 0, share 1. Builder methods allow terse inline construction:
///
/// ```
/// use flexfill::RegionSpec;
///
/// let sidebar = RegionSpec::new().min(10.0).max(40.0).priority(2);
/// assert_eq!(sidebar.min, 10.0);
/// assert_eq!(sidebar.priority, 2);
/// assert_eq!(sidebar.share, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegionSpec {
    /// Minimum size. The region never shrinks below this.
    pub min: f64,
    /// Maximum size (`f64::INFINITY` = unbounded).
    pub max: f64,
    /// Priority tier. Higher tiers saturate before lower tiers grow.
    /// May be negative; equal values form one tier.
    pub priority: i32,
    /// Relative growth weight among active regions of the same tier.
    /// A share of 0 pins the region at its minimum.
    pub share: f64,
}

impl RegionSpec {
    /// Create a spec with all defaults (grows freely in tier 0).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
            priority: 0,
            share: 1.0,
        }
    }

    /// Create a fixed-size spec (`min == max`). It never grows.
    #[must_use]
    pub const fn fixed(size: f64) -> Self {
        Self {
            min: size,
            max: size,
            priority: 0,
            share: 1.0,
        }
    }

    /// Set the minimum size.
    #[must_use]
    pub const fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    /// Set the maximum size.
    #[must_use]
    pub const fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    /// Set the priority tier.
    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the growth share.
    #[must_use]
    pub const fn share(mut self, share: f64) -> Self {
        self.share = share;
        self
    }

    /// Whether the bounds pin this region to a single size.
    #[inline]
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

impl Default for RegionSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// A named slot: one region, or an ordered list of sub-regions whose
/// allocations are reported as a single summed value.
///
/// List groups model one logical area split internally, e.g. a "content"
/// area made of a fixed column plus a flexible column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroupSpec {
    /// One region consumed directly.
    Single(RegionSpec),
    /// An ordered sequence of sub-regions consumed as one unit.
    Many(Vec<RegionSpec>),
}

impl GroupSpec {
    /// View the group's regions as a slice, regardless of shape.
    #[must_use]
    pub fn regions(&self) -> &[RegionSpec] {
        match self {
            Self::Single(region) => std::slice::from_ref(region),
            Self::Many(regions) => regions,
        }
    }

    /// Number of regions in the group (0 for an empty list group).
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions().len()
    }

    /// Whether the group holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions().is_empty()
    }
}

impl From<RegionSpec> for GroupSpec {
    fn from(region: RegionSpec) -> Self {
        Self::Single(region)
    }
}

impl From<Vec<RegionSpec>> for GroupSpec {
    fn from(regions: Vec<RegionSpec>) -> Self {
        Self::Many(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let spec = RegionSpec::default();
        assert_eq!(spec.min, 0.0);
        assert_eq!(spec.max, f64::INFINITY);
        assert_eq!(spec.priority, 0);
        assert_eq!(spec.share, 1.0);
    }

    #[test]
    fn builder_chain() {
        let spec = RegionSpec::new().min(5.0).max(20.0).priority(-3).share(0.5);
        assert_eq!(spec.min, 5.0);
        assert_eq!(spec.max, 20.0);
        assert_eq!(spec.priority, -3);
        assert_eq!(spec.share, 0.5);
    }

    #[test]
    fn fixed_pins_both_bounds() {
        let spec = RegionSpec::fixed(12.0);
        assert!(spec.is_fixed());
        assert_eq!(spec.min, 12.0);
        assert_eq!(spec.max, 12.0);
    }

    #[test]
    fn group_regions_view() {
        let single = GroupSpec::Single(RegionSpec::fixed(3.0));
        assert_eq!(single.len(), 1);
        assert!(!single.is_empty());

        let many = GroupSpec::Many(vec![RegionSpec::new(), RegionSpec::fixed(1.0)]);
        assert_eq!(many.len(), 2);
        assert_eq!(many.regions()[1].max, 1.0);

        let empty = GroupSpec::Many(Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn group_from_conversions() {
        let g: GroupSpec = RegionSpec::new().into();
        assert!(matches!(g, GroupSpec::Single(_)));
        let g: GroupSpec = vec![RegionSpec::new()].into();
        assert!(matches!(g, GroupSpec::Many(_)));
    }
}
