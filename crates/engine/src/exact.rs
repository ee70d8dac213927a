// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Exact enumeration engine.
use log::debug;
use std::time::Instant;

use holdem_odds_cards::{Card, Combinations, Deck, binomial};
use holdem_odds_eval::classify;

use crate::message::{NUM_CATEGORIES, Odds, Street, StreetOdds};
use crate::solver::RunControl;

/// Completions processed between progress and cancellation checks.
///
/// This bounds the cancellation latency to one batch of work.
pub(crate) const BATCH_SIZE: u64 = 1000;

/// Enumerates every completion of the missing board cards for each
/// reachable street and tallies the hand categories.
///
/// Progress is cumulative across the streets of the request. Returns
/// None if the run is cancelled.
pub(crate) fn run(hole: [Card; 2], board: &[Card], ctl: &RunControl) -> Option<Vec<StreetOdds>> {
    let mut dealt = hole.to_vec();
    dealt.extend_from_slice(board);
    let deck = Deck::without(&dealt);

    let streets = Street::reachable(board.len());
    let total = streets
        .iter()
        .map(|s| binomial(deck.len(), s.needed()))
        .sum::<u64>();
    debug!(
        "exact enumeration of {total} completions over {} streets",
        streets.len()
    );

    let start = Instant::now();
    let mut processed = 0u64;
    let mut results = Vec::with_capacity(streets.len());

    for &street in streets {
        let mut counts = [0u64; NUM_CATEGORIES];

        // The 7 cards hand, hole cards and the street's known board
        // first, the completion slots overwritten per combination.
        let mut hand = hole.to_vec();
        hand.extend_from_slice(&board[..street.known()]);
        let fixed = hand.len();
        hand.resize(7, hole[0]);

        let mut combos = Combinations::new(deck.len(), street.needed());
        while let Some(indices) = combos.next_indices() {
            for (slot, &pos) in hand[fixed..].iter_mut().zip(indices) {
                *slot = deck.cards()[pos];
            }

            if let Some(pos) = classify(&hand).report_index() {
                counts[pos] += 1;
            }

            processed += 1;
            if processed % BATCH_SIZE == 0 && !ctl.checkpoint(processed, total, &start) {
                debug!("exact enumeration cancelled at {processed}/{total}");
                return None;
            }
        }

        let street_total = binomial(deck.len(), street.needed());
        results.push(StreetOdds {
            street,
            odds: Odds::from_counts(&counts, street_total),
        });
    }

    Some(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_odds_eval::Category;

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn run_exact(hole: &[&str], board: &[&str]) -> Vec<StreetOdds> {
        let (ctl, _rx) = RunControl::new();
        let hole = cards(hole);
        run([hole[0], hole[1]], &cards(board), &ctl).unwrap()
    }

    #[test]
    fn turn_full_house_oracle() {
        // Two pair on the turn, only the 2 aces and 2 kings left in the
        // deck improve to a full house, every other river keeps two pair.
        let results = run_exact(&["AS", "AH"], &["KD", "KC", "2C", "3D"]);
        assert_eq!(results.len(), 3);

        let turn = &results[2];
        assert_eq!(turn.street, Street::Turn);
        assert_eq!(turn.odds.get(Category::FullHouse), 4.0 / 46.0);
        assert_eq!(turn.odds.get(Category::TwoPair), 42.0 / 46.0);
        assert!((turn.odds.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn turn_locked_four_of_a_kind() {
        let results = run_exact(&["AS", "AH"], &["AD", "AC", "2C", "3D"]);

        let turn = &results[2];
        assert_eq!(turn.odds.get(Category::FourOfAKind), 1.0);
        assert_eq!(turn.odds.sum(), 1.0);
    }

    #[test]
    fn flop_locked_two_pair() {
        // Two pair is already made on the flop, every completion keeps
        // at least two pair so the mass at two pair or better is one.
        let results = run_exact(&["7C", "2D"], &["7S", "2S", "KH"]);
        assert_eq!(results.len(), 2);

        let flop = &results[1];
        assert_eq!(flop.street, Street::Flop);
        assert_eq!(flop.odds.get(Category::Pair), 0.0);
        assert!((flop.odds.sum() - 1.0).abs() < 1e-12);

        // A category already made can only grow as more cards are
        // fixed: compare against the preflop two pair or better mass.
        let preflop_locked = Category::REPORTED
            .iter()
            .skip(1)
            .map(|&c| results[0].odds.get(c))
            .sum::<f64>();
        let flop_locked = Category::REPORTED
            .iter()
            .skip(1)
            .map(|&c| flop.odds.get(c))
            .sum::<f64>();
        assert!(flop_locked >= preflop_locked);
    }

    #[test]
    fn flop_counts_within_total() {
        let results = run_exact(&["2C", "7D"], &["TS", "9H", "4D"]);

        for street in &results {
            let sum = street.odds.sum();
            assert!((0.0..=1.0 + 1e-12).contains(&sum));
            for (_, p) in street.odds.iter() {
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn deterministic() {
        let first = run_exact(&["AS", "AH"], &["KD", "KC", "2C", "3D"]);
        let second = run_exact(&["AS", "AH"], &["KD", "KC", "2C", "3D"]);
        assert_eq!(first, second);
    }

    #[test]
    fn cancelled_run_yields_no_result() {
        let (ctl, _rx) = RunControl::new();
        ctl.cancel();

        let hole = cards(&["AS", "AH"]);
        let res = run([hole[0], hole[1]], &[], &ctl);
        assert!(res.is_none());
    }

    // Full preflop enumeration, slow in debug builds.
    #[test]
    #[ignore]
    fn preflop_pocket_aces_regression() {
        let results = run_exact(&["AS", "AH"], &[]);
        assert_eq!(results.len(), 1);

        // A pocket pair never finishes as high card, the reported
        // categories account for the full probability mass.
        let preflop = &results[0];
        assert!((preflop.odds.sum() - 1.0).abs() < 1e-9);
        assert!(preflop.odds.get(Category::Pair) > 0.0);
        assert!(preflop.odds.get(Category::FourOfAKind) > 0.0);
        assert!(preflop.odds.get(Category::RoyalFlush) > 0.0);

        // Bit identical across runs.
        assert_eq!(&results, &run_exact(&["AS", "AH"], &[]));
    }
}
