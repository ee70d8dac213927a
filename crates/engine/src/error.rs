// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Engine error types.
use thiserror::Error;

use holdem_odds_cards::Card;

/// Errors surfaced to the caller before a computation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The same card appears twice among the hole and board cards.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// The board has an invalid number of cards.
    #[error("invalid board of {0} cards, must be 0, 3, 4, or 5")]
    BoardSize(usize),
    /// A non positive Monte Carlo iteration count.
    #[error("iterations must be positive")]
    Iterations,
    /// The solver task is no longer running.
    #[error("solver stopped")]
    Stopped,
}
