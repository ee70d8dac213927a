// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! K-subsets enumeration.

/// Returns the binomial coefficient for n choose k.
///
/// Returns 0 when k > n, a deck smaller than the number of cards still
/// to be drawn has no valid completions.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }

    // C(n, k) == C(n, n - k), the smaller upper bound keeps every
    // intermediate product exact in 64 bits for a 52 cards deck.
    let k = k.min(n - k);

    let mut c = 1u64;
    for i in 1..=k {
        // c * (n - k + i) is divisible by i, c is C(n - k + i, i).
        c = c * (n - k + i) as u64 / i as u64;
    }

    c
}

/// Lexicographic enumeration of all k-subsets of 0..n.
///
/// The generator advances an index vector in place (Algorithm T style,
/// no recursion) and yields each subset as a sorted slice of indices,
/// so callers can reuse a single output buffer:
///
/// ```
/// # use holdem_odds_cards::Combinations;
/// let items = ["a", "b", "c"];
/// let mut pairs = Vec::new();
/// let mut combos = Combinations::new(items.len(), 2);
/// while let Some(indices) = combos.next_indices() {
///     pairs.push((items[indices[0]], items[indices[1]]));
/// }
/// assert_eq!(pairs, [("a", "b"), ("a", "c"), ("b", "c")]);
/// ```
///
/// The order across subsets is deterministic so that repeated runs over
/// the same deck visit completions in the same sequence.
#[derive(Debug)]
pub struct Combinations {
    indices: Vec<usize>,
    n: usize,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Creates a generator for the k-subsets of 0..n.
    ///
    /// With k == 0 it yields exactly one empty subset, with k == n
    /// exactly one full subset, and with k > n nothing at all.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            indices: (0..k).collect(),
            n,
            started: false,
            done: k > n,
        }
    }

    /// Advances to the next subset, or None when exhausted.
    pub fn next_indices(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();

        // Find the rightmost index that can still move up.
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }

            i -= 1;
            if self.indices[i] != i + self.n - k {
                break;
            }
        }

        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        Some(&self.indices)
    }
}
