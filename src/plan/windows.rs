//! Pure functions for window partitioning
//!
//! These functions split the call range `[0, total)` into consecutive
//! windows and count how many pauses separate them.

use std::ops::Range;

/// Partition `[0, total)` into consecutive windows of `chunk_size` calls
///
/// The last window may be shorter. Returns no windows when `total` or
/// `chunk_size` is zero.
///
/// # Examples
///
/// ```
/// use repeat_calls::plan::plan_windows;
///
/// assert_eq!(plan_windows(7, 3), vec![0..3, 3..6, 6..7]);
/// assert!(plan_windows(0, 3).is_empty());
/// ```
pub fn plan_windows(total: usize, chunk_size: usize) -> Vec<Range<usize>> {
    if total == 0 || chunk_size == 0 {
        return vec![];
    }

    (0..total)
        .step_by(chunk_size)
        .map(|start| start..std::cmp::min(start + chunk_size, total))
        .collect()
}

/// Number of windows needed for `total` calls
pub fn window_count(total: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    total.div_ceil(chunk_size)
}

/// Number of pauses between windows; never one after the last window
pub fn delay_count(total: usize, chunk_size: usize) -> usize {
    window_count(total, chunk_size).saturating_sub(1)
}
