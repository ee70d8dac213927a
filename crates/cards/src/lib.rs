// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Holdem odds cards types.
//!
//! This crate defines the card types used by the odds engine:
//!
//! ```
//! # use holdem_odds_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = Card::new(Rank::King, Suit::Diamonds);
//! assert!(ah != kd);
//! ```
//!
//! a [Deck] type that starts with the full 52 cards and removes the
//! cards already assigned to a player or the board:
//!
//! ```
//! # use holdem_odds_cards::{Card, Deck, Rank, Suit};
//! let deck = Deck::without(&[
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ]);
//! assert_eq!(deck.len(), 50);
//! ```
//!
//! and a [Combinations] generator that walks all k-subsets of a deck in
//! lexicographic index order:
//!
//! ```
//! # use holdem_odds_cards::Combinations;
//! let mut count = 0u64;
//! let mut combos = Combinations::new(5, 2);
//! while combos.next_indices().is_some() {
//!     count += 1;
//! }
//! assert_eq!(count, 10);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod combinations;
mod deck;

pub use combinations::{Combinations, binomial};
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
