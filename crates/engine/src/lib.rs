// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Holdem odds probability engine.
//!
//! Estimates, for a partially dealt Texas Hold'em hand, the probability
//! that the final 7 cards hand falls into each reported poker
//! [Category], either by exact enumeration of all board completions or
//! by Monte Carlo sampling.
//!
//! The engine runs inside a [Solver] task and talks to its caller only
//! through messages: one [Request], zero or more progress events, and
//! exactly one terminal event:
//!
//! ```no_run
//! # use holdem_odds_engine::*;
//! # async fn example() -> Result<(), EngineError> {
//! let mut solver = Solver::new();
//!
//! solver
//!     .compute(Request {
//!         mode: Mode::Exact,
//!         hole: ["AS".parse().unwrap(), "AH".parse().unwrap()],
//!         board: vec![],
//!         iterations: None,
//!     })
//!     .await?;
//!
//! while let Some(event) = solver.recv().await {
//!     match event {
//!         Event::Progress(p) => println!("{:.1}%", p.fraction * 100.0),
//!         Event::Result(odds) => {
//!             for street in &odds {
//!                 println!("{street:?}");
//!             }
//!             break;
//!         }
//!         Event::Cancelled | Event::Failed(_) => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod error;
mod exact;
mod message;
mod sample;
mod solver;

pub use error::EngineError;
pub use message::{DEFAULT_ITERATIONS, Mode, Odds, Progress, Request, Street, StreetOdds};
pub use solver::{Event, Solver};

// Reexport cards and classifier types.
pub use holdem_odds_eval::{Card, Category, Deck, Rank, Suit, classify};
