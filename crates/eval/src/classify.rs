// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Poker hand category classifier.
use serde::{Deserialize, Serialize};
use std::fmt;

use holdem_odds_cards::{Card, Rank, Suit};

/// A poker hand category.
///
/// Categories are ordered by precedence, a hand that qualifies for more
/// than one category classifies as the highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    /// No qualifying category.
    HighCard = 0,
    /// One pair.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Five consecutive ranks of the same suit.
    StraightFlush,
    /// Ten to ace of the same suit.
    RoyalFlush,
}

impl Category {
    /// The categories reported by the odds engine, in precedence order.
    ///
    /// [Category::HighCard] is a valid classifier output but is not a
    /// reported category.
    pub const REPORTED: [Category; 9] = [
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    /// The position of this category in [Category::REPORTED], or None
    /// for [Category::HighCard].
    pub fn report_index(&self) -> Option<usize> {
        match self {
            Category::HighCard => None,
            _ => Some(*self as usize - 1),
        }
    }

    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a hand of 5 to 7 cards.
///
/// Returns the best [Category] achievable using any 5 of the cards.
///
/// Panics if the hand has fewer than 5 or more than 7 cards.
pub fn classify(cards: &[Card]) -> Category {
    assert!(
        (5..=7).contains(&cards.len()),
        "hand must have 5 to 7 cards"
    );

    let mut rank_counts = [0u8; 13];
    let mut suit_counts = [0u8; 4];
    // Bit v set when rank value v (2..=14) is present, overall and per suit.
    let mut ranks_mask = 0u16;
    let mut suit_masks = [0u16; 4];

    for card in cards {
        rank_counts[card.rank() as usize] += 1;
        suit_counts[card.suit().index()] += 1;

        let bit = 1u16 << card.rank().value();
        ranks_mask |= bit;
        suit_masks[card.suit().index()] |= bit;
    }

    // A straight flush can only live inside the flush suit, test that
    // subset with the same straight logic before anything else.
    let flush_suit = Suit::suits().find(|s| suit_counts[s.index()] >= 5);
    if let Some(suit) = flush_suit {
        if let Some(high) = straight_high(suit_masks[suit.index()]) {
            return if high == Rank::Ace.value() {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
        }
    }

    // Grouped rank counts sorted descending. With up to 7 cards the two
    // top counts may share ranks with lower groups (e.g. two triplets),
    // the sorted count list is what matters, not disjoint card sets.
    let mut counts = rank_counts.iter().copied().filter(|&c| c > 0).collect::<Vec<_>>();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let top = counts[0];
    let second = counts.get(1).copied().unwrap_or(0);

    if top == 4 {
        Category::FourOfAKind
    } else if top == 3 && second >= 2 {
        Category::FullHouse
    } else if flush_suit.is_some() {
        Category::Flush
    } else if straight_high(ranks_mask).is_some() {
        Category::Straight
    } else if top == 3 {
        Category::ThreeOfAKind
    } else if top == 2 && second == 2 {
        Category::TwoPair
    } else if top == 2 {
        Category::Pair
    } else {
        Category::HighCard
    }
}

/// Returns the high rank value of the best straight in a rank mask.
///
/// The ace plays both high and low, the wheel A-2-3-4-5 is a straight
/// with high value 5.
fn straight_high(mask: u16) -> Option<u8> {
    let mask = if mask & (1 << Rank::Ace.value()) != 0 {
        mask | (1 << 1)
    } else {
        mask
    };

    (5..=Rank::Ace.value())
        .rev()
        .find(|high| {
            let run = 0b11111u16 << (high - 4);
            mask & run == run
        })
}
