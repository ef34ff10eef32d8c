#![forbid(unsafe_code)]

//! Integer quantization of real-valued size maps.
//!
//! [`distribute`](crate::distribute) returns real-valued sizes; rendering
//! backends usually need whole cells or pixels. [`quantize`] rounds a size
//! map to integers with exact sum conservation using the largest remainder
//! method, so no group drifts more than one unit from its target when the
//! targets already sum to the total.

use std::collections::BTreeMap;

/// Round a size map to integers summing exactly to `total`.
///
/// Each value is floored, then the leftover units are awarded one at a
/// time in descending remainder order (key order breaks ties, so the
/// result is deterministic). If the floors already overshoot `total`,
/// which only happens when the targets sum past it, the largest entries
/// are shaved first. An empty map returns empty regardless of `total`.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use flexfill::quantize;
///
/// let sizes: BTreeMap<String, f64> = [
///     ("a".to_string(), 10.4),
///     ("b".to_string(), 20.6),
///     ("c".to_string(), 9.0),
/// ]
/// .into();
/// let cells = quantize(&sizes, 40);
/// assert_eq!(cells.values().sum::<u64>(), 40);
/// assert_eq!(cells["b"], 21);
/// ```
#[must_use]
pub fn quantize(sizes: &BTreeMap<String, f64>, total: u64) -> BTreeMap<String, u64> {
    let count = sizes.len();
    if count == 0 {
        return BTreeMap::new();
    }

    let targets: Vec<f64> = sizes.values().map(|&size| size.max(0.0)).collect();
    let mut cells: Vec<u64> = targets.iter().map(|target| target.floor() as u64).collect();
    let mut sum: u64 = cells.iter().sum();

    if sum > total {
        shave_overflow(&mut cells, &mut sum, total);
    } else if sum < total {
        // Award leftover units by remainder, largest first; cycle if the
        // deficit exceeds the entry count.
        let mut order: Vec<usize> = (0..count).collect();
        order.sort_by(|&a, &b| {
            let rem_a = targets[a] - targets[a].floor();
            let rem_b = targets[b] - targets[b].floor();
            rem_b
                .partial_cmp(&rem_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });
        let mut deficit = total - sum;
        let mut cursor = 0;
        while deficit > 0 {
            cells[order[cursor % count]] += 1;
            deficit -= 1;
            cursor += 1;
        }
    }

    sizes.keys().cloned().zip(cells).collect()
}

/// Shave the largest entries down by one unit at a time until the sum
/// matches. Only reachable when the targets overshoot the total.
fn shave_overflow(cells: &mut [u64], sum: &mut u64, total: u64) {
    while *sum > total {
        let Some((idx, _)) = cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell > 0)
            .max_by_key(|&(_, &cell)| cell)
        else {
            break;
        };
        cells[idx] -= 1;
        *sum -= 1;
    }
}
