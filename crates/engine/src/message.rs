// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Request and result types exchanged with the solver.
use serde::{Deserialize, Serialize};
use std::fmt;

use holdem_odds_cards::Card;
use holdem_odds_eval::Category;

use crate::error::EngineError;

/// Number of reported categories in an odds vector.
pub(crate) const NUM_CATEGORIES: usize = Category::REPORTED.len();

/// Default number of Monte Carlo iterations.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// The computation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Exhaustive enumeration of all board completions.
    Exact,
    /// Random sampling of board completions.
    MonteCarlo,
}

/// A computation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// The computation mode.
    pub mode: Mode,
    /// The player hole cards.
    pub hole: [Card; 2],
    /// The known board cards, 0, 3, 4, or 5 of them.
    pub board: Vec<Card>,
    /// Monte Carlo iterations, [DEFAULT_ITERATIONS] if not given.
    pub iterations: Option<u32>,
}

impl Request {
    /// Validates this request before any computation starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !matches!(self.board.len(), 0 | 3 | 4 | 5) {
            return Err(EngineError::BoardSize(self.board.len()));
        }

        let mut seen = Vec::with_capacity(2 + self.board.len());
        for &card in self.hole.iter().chain(&self.board) {
            if seen.contains(&card) {
                return Err(EngineError::DuplicateCard(card));
            }
            seen.push(card);
        }

        if self.mode == Mode::MonteCarlo && self.iterations == Some(0) {
            return Err(EngineError::Iterations);
        }

        Ok(())
    }
}

/// A community cards reveal stage with board cards still to come.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Street {
    /// No board cards dealt.
    Preflop,
    /// Three board cards dealt.
    Flop,
    /// Four board cards dealt.
    Turn,
}

impl Street {
    /// Number of board cards fixed on this street.
    pub fn known(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
        }
    }

    /// Number of board cards still missing on this street.
    pub fn needed(&self) -> usize {
        5 - self.known()
    }

    /// The streets computed for a board, in fixed order.
    ///
    /// A street is included once enough board cards are known; a full
    /// river board reaches all three.
    pub fn reachable(board_len: usize) -> &'static [Street] {
        const ALL: [Street; 3] = [Street::Preflop, Street::Flop, Street::Turn];
        match board_len {
            0 => &ALL[..1],
            3 => &ALL[..2],
            _ => &ALL,
        }
    }

    /// The street label.
    pub fn label(&self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probabilities over the reported hand categories.
///
/// The high card mass is implicit: for an exact enumeration the nine
/// values plus the high card share sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Odds([f64; NUM_CATEGORIES]);

impl Odds {
    /// Normalizes per category counts, all zeros when total is zero.
    pub(crate) fn from_counts(counts: &[u64; NUM_CATEGORIES], total: u64) -> Self {
        if total == 0 {
            // No valid completions.
            return Self::default();
        }

        let mut odds = [0.0; NUM_CATEGORIES];
        for (o, &c) in odds.iter_mut().zip(counts) {
            *o = c as f64 / total as f64;
        }

        Self(odds)
    }

    /// The probability for a category, zero for the high card.
    pub fn get(&self, category: Category) -> f64 {
        category
            .report_index()
            .map(|pos| self.0[pos])
            .unwrap_or(0.0)
    }

    /// Iterates categories and probabilities in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::REPORTED.iter().copied().zip(self.0.iter().copied())
    }

    /// The total reported probability mass.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// The odds computed for one street.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetOdds {
    /// The street these odds refer to.
    pub street: Street,
    /// The per category probabilities.
    pub odds: Odds,
}

/// A progress update from a running exact enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Fraction of the total work processed, in 0..=1.
    pub fraction: f64,
    /// Estimated seconds remaining, None before the first batch.
    pub eta: Option<f64>,
}
