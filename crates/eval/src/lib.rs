// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Holdem odds hand classifier.
//!
//! Classifies 5, 6 and 7 cards hands into the best achievable poker
//! hand [Category] over any 5 of them:
//!
//! ```
//! # use holdem_odds_eval::*;
//! # use std::str::FromStr;
//! let hand: Vec<Card> = ["AS", "KS", "QS", "JS", "TS"]
//!     .iter()
//!     .map(|s| Card::from_str(s).unwrap())
//!     .collect();
//! assert_eq!(classify(&hand), Category::RoyalFlush);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod classify;

pub use classify::{Category, classify};

// Reexport cards types.
pub use holdem_odds_cards::{Card, Deck, Rank, Suit};
