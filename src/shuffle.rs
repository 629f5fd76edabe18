//! Trial order randomization
//!
//! Shuffles a caller-owned trial sequence in place (Fisher-Yates). Typical use
//! is mixing CS+ and CS- trials so the animal cannot predict the next stimulus.
//!
//! # Example
//!
//! ```
//! use trialkit::rng::session_rng;
//! use trialkit::shuffle::{shuffle, trial_block};
//!
//! let mut rng = session_rng(Some(3));
//! let mut trials = trial_block(&[10, 10]);
//! shuffle(&mut rng, &mut trials);
//!
//! assert_eq!(trials.len(), 20);
//! assert_eq!(trials.iter().filter(|&&t| t == 1).count(), 10);
//! ```

use crate::rng::RandomSource;

/// Shuffle `items` in place
///
/// For each position `i` in `0..n-1`, draws `j` uniformly from `[i, n)` and
/// swaps the two elements when `j != i`. Sequences of length 0 or 1 are left
/// untouched and consume no draws. Never allocates.
pub fn shuffle<T, S: RandomSource + ?Sized>(source: &mut S, items: &mut [T]) {
    let n = items.len();
    if n < 2 {
        return;
    }

    for i in 0..n - 1 {
        let j = source.next_in_range(i as u64, n as u64) as usize;
        if j != i {
            items.swap(i, j);
        }
    }
}

/// Build an ordered trial block from per-label counts
///
/// Label `i` is repeated `counts[i]` times, so `[2, 1]` yields `[0, 0, 1]`.
/// Pass the result to [`shuffle`] to randomize the order.
pub fn trial_block(counts: &[usize]) -> Vec<u8> {
    let total = counts.iter().sum();
    let mut block = Vec::with_capacity(total);
    for (label, &count) in counts.iter().enumerate() {
        block.extend(std::iter::repeat(label as u8).take(count));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{session_rng, SteppingSource};
    use std::collections::HashMap;

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut rng = session_rng(Some(10));
        for n in 0..40 {
            let original: Vec<u32> = (0..n).map(|i| i % 7).collect();
            let mut items = original.clone();
            shuffle(&mut rng, &mut items);

            let mut sorted = items.clone();
            sorted.sort_unstable();
            let mut expected = original.clone();
            expected.sort_unstable();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_shuffle_short_sequences_untouched() {
        let mut source = SteppingSource::default();

        let mut empty: [i32; 0] = [];
        shuffle(&mut source, &mut empty);

        let mut single = [42];
        shuffle(&mut source, &mut single);
        assert_eq!(single, [42]);

        assert_eq!(source.draws, 0);
    }

    #[test]
    fn test_shuffle_draw_count() {
        let mut source = SteppingSource::default();
        let mut items = [1, 2, 3, 4, 5];
        shuffle(&mut source, &mut items);
        assert_eq!(source.draws, 4);
    }

    #[test]
    fn test_shuffle_identity_draws() {
        // A source that always returns `low` never swaps.
        struct LowSource;
        impl RandomSource for LowSource {
            fn next_in_range(&mut self, low: u64, _high: u64) -> u64 {
                low
            }
        }

        let mut items = [5, 4, 3, 2, 1];
        shuffle(&mut LowSource, &mut items);
        assert_eq!(items, [5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_shuffle_last_element_can_move() {
        struct HighSource;
        impl RandomSource for HighSource {
            fn next_in_range(&mut self, _low: u64, high: u64) -> u64 {
                high - 1
            }
        }

        // i=0 swaps with 3, i=1 with 3, i=2 with 3
        let mut items = ['a', 'b', 'c', 'd'];
        shuffle(&mut HighSource, &mut items);
        assert_eq!(items, ['d', 'a', 'b', 'c']);
    }

    #[test]
    fn test_shuffle_uniform_permutations() {
        let mut rng = session_rng(Some(2024));
        let trials = 60_000;
        let mut counts: HashMap<[u8; 3], u32> = HashMap::new();

        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle(&mut rng, &mut items);
            *counts.entry(items).or_insert(0) += 1;
        }

        // All 3! orderings reachable, each near 10,000 (sd ~91)
        assert_eq!(counts.len(), 6);
        for (perm, count) in &counts {
            assert!(*count > 9_500 && *count < 10_500, "{:?} seen {} times", perm, count);
        }
    }

    #[test]
    fn test_shuffle_position_balance() {
        let mut rng = session_rng(Some(77));
        let n = 8;
        let trials = 40_000;
        let mut first_slot = vec![0u32; n];

        for _ in 0..trials {
            let mut items: Vec<usize> = (0..n).collect();
            shuffle(&mut rng, &mut items);
            first_slot[items[0]] += 1;
        }

        // Expect 5,000 each (sd ~66)
        for count in first_slot {
            assert!(count > 4_700 && count < 5_300, "count {}", count);
        }
    }

    #[test]
    fn test_trial_block() {
        assert_eq!(trial_block(&[2, 1]), vec![0, 0, 1]);
        assert_eq!(trial_block(&[0, 3, 1]), vec![1, 1, 1, 2]);
        assert!(trial_block(&[]).is_empty());
    }

    #[test]
    fn test_shuffle_dyn_source() {
        let mut rng = session_rng(Some(5));
        let source: &mut dyn RandomSource = &mut rng;
        let mut block = trial_block(&[5, 5]);
        shuffle(source, &mut block);
        assert_eq!(block.iter().filter(|&&t| t == 0).count(), 5);
    }
}
