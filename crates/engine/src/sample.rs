// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo sampling engine.
use log::debug;
use rand::prelude::*;

use holdem_odds_cards::{Card, Deck};
use holdem_odds_eval::classify;

use crate::exact::BATCH_SIZE;
use crate::message::{NUM_CATEGORIES, Odds, Street, StreetOdds};
use crate::solver::RunControl;

/// Approximates the street odds by drawing `iterations` random board
/// completions per street without replacement.
///
/// Returns None if the run is cancelled.
pub(crate) fn run(
    hole: [Card; 2],
    board: &[Card],
    iterations: u32,
    ctl: &RunControl,
) -> Option<Vec<StreetOdds>> {
    let mut dealt = hole.to_vec();
    dealt.extend_from_slice(board);
    let deck = Deck::without(&dealt);

    let streets = Street::reachable(board.len());
    debug!(
        "sampling {iterations} completions for each of {} streets",
        streets.len()
    );

    let mut rng = SmallRng::from_os_rng();
    let mut scratch = deck.cards().to_vec();
    let mut results = Vec::with_capacity(streets.len());

    for &street in streets {
        let needed = street.needed();
        let mut counts = [0u64; NUM_CATEGORIES];

        if needed <= scratch.len() {
            let mut hand = hole.to_vec();
            hand.extend_from_slice(&board[..street.known()]);
            let fixed = hand.len();
            hand.resize(7, hole[0]);

            for i in 0..iterations {
                // Unbiased partial Fisher-Yates, the first `needed`
                // cards are a uniform draw without replacement.
                let (draw, _) = scratch.partial_shuffle(&mut rng, needed);
                hand[fixed..].copy_from_slice(draw);

                if let Some(pos) = classify(&hand).report_index() {
                    counts[pos] += 1;
                }

                if u64::from(i + 1) % BATCH_SIZE == 0 && ctl.cancelled() {
                    debug!("sampling cancelled");
                    return None;
                }
            }
        }

        results.push(StreetOdds {
            street,
            odds: Odds::from_counts(&counts, u64::from(iterations)),
        });
    }

    Some(results)
}
