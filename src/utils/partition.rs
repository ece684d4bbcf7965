//! # Work Partitioning
//!
//! Splits an ordered slice into contiguous ranges for independent parallel
//! consumption. Splitting is exponential and binary: every round halves
//! each part that still has at least two elements, so `rounds` rounds yield
//! at most `2^rounds` parts without needing to know the element count up
//! front. Final part count and balance depend on how far the halving gets.

/// Rounds of halving applied before dispatching ranges to the pool (up to
/// 16 parts).
pub const SPLIT_ROUNDS: u32 = 4;

/// Split `items` into at most `2^rounds` contiguous, in-order parts.
///
/// Parts of length 0 or 1 are retained whole. Concatenating the returned
/// parts in order reproduces `items` exactly; no element is lost or
/// duplicated.
pub fn split_ranges<T>(items: &[T], rounds: u32) -> Vec<&[T]> {
    let mut parts = vec![items];

    for _ in 0..rounds {
        let mut next = Vec::with_capacity(parts.len() * 2);

        for part in parts {
            if part.len() < 2 {
                next.push(part);
                continue;
            }

            let (left, right) = part.split_at(part.len() / 2);
            next.push(left);
            next.push(right);
        }

        parts = next;
    }

    parts
}
