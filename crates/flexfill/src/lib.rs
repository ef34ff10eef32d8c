#![forbid(unsafe_code)]

//! One-axis constrained space distribution.
//!
//! Given a fixed total size and a set of named region groups (each region
//! carrying a minimum, a maximum, a priority tier, and a growth share),
//! compute a size per group such that sizes sum exactly to the total,
//! respect every region's bounds, and grow proportionally within priority
//! tiers, higher tiers saturating before lower tiers receive anything.
//!
//! - [`RegionSpec`] / [`GroupSpec`] - region bounds and named groups
//! - [`Distributor`] - the solver, with tolerance tuning
//! - [`distribute`] - one-shot entry point with default tuning
//! - [`quantize`] - optional integer rounding of the result map
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use flexfill::{GroupSpec, RegionSpec, distribute};
//!
//! let mut groups = BTreeMap::new();
//! groups.insert(
//!     "gutter".to_string(),
//!     GroupSpec::Single(RegionSpec::new().min(2.0).max(4.0).priority(1)),
//! );
//! groups.insert(
//!     "content".to_string(),
//!     GroupSpec::Many(vec![
//!         RegionSpec::fixed(20.0),
//!         RegionSpec::new().min(10.0),
//!     ]),
//! );
//!
//! let sizes = distribute(120.0, &groups).unwrap();
//! assert_eq!(sizes["gutter"], 4.0);
//! assert_eq!(sizes["content"], 116.0);
//! ```
//!
//! The solver is pure: all working state is call-local, so concurrent
//! invocations never interfere. Infeasible inputs (aggregate minimum above
//! the total, or aggregate maximum below it) are reported as an
//! [`DistributeError::Infeasible`] value, never as a partial allocation.

pub mod distribute;
mod flatten;
pub mod quantize;
pub mod region;

use std::collections::BTreeMap;

pub use distribute::{DEFAULT_EPSILON_REL, DistributeError, Distributor};
pub use quantize::quantize;
pub use region::{GroupSpec, RegionSpec};

/// Distribute `total_size` across `groups` with default tuning.
///
/// Equivalent to `Distributor::new().distribute(total_size, groups)`; see
/// [`Distributor::distribute`] for the contract.
pub fn distribute(
    total_size: f64,
    groups: &BTreeMap<String, GroupSpec>,
) -> Result<BTreeMap<String, f64>, DistributeError> {
    Distributor::new().distribute(total_size, groups)
}

// ---------------------------------------------------------------------------
// Property loops over randomized feasible inputs
// ---------------------------------------------------------------------------
