// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! Command line front end for the odds engine.
use anyhow::{Result, anyhow};
use clap::Parser;
use std::io::{self, Write};

use holdem_odds_engine::{
    Card, Deck, Event, Mode, Request, Solver, StreetOdds, classify,
};

#[derive(Debug, Parser)]
#[command(about = "Computes hand category odds for a Texas Hold'em hand")]
struct Cli {
    /// The two hole cards, e.g. AS AH.
    #[clap(num_args = 2, value_name = "CARD", required_unless_present = "deal")]
    hole: Vec<Card>,
    /// The board cards, 0, 3, 4, or 5 of them, e.g. --board KD KC 2C.
    #[clap(long, short, num_args = 0..=5, value_name = "CARD")]
    board: Vec<Card>,
    /// Deal a random hand and flop instead of giving cards.
    #[clap(long, conflicts_with_all = ["hole", "board"])]
    deal: bool,
    /// Approximate by random sampling instead of exact enumeration.
    #[clap(long)]
    sample: bool,
    /// Number of samples per street in sampling mode.
    #[clap(long, default_value_t = holdem_odds_engine::DEFAULT_ITERATIONS)]
    iterations: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let (hole, board) = if cli.deal {
        deal_hand()?
    } else {
        ([cli.hole[0], cli.hole[1]], cli.board.clone())
    };

    let mode = if cli.sample {
        Mode::MonteCarlo
    } else {
        Mode::Exact
    };

    let req = Request {
        mode,
        hole,
        board: board.clone(),
        iterations: cli.sample.then_some(cli.iterations),
    };

    let mut solver = Solver::new();
    solver.compute(req).await?;

    let results = loop {
        match solver.recv().await {
            Some(Event::Progress(p)) => {
                let eta = p
                    .eta
                    .map(|eta| format!("{eta:.1}s"))
                    .unwrap_or_else(|| "unknown".to_string());
                eprint!("\rProgress: {:5.1}% | ETA: {eta}   ", p.fraction * 100.0);
                io::stderr().flush()?;
            }
            Some(Event::Result(results)) => {
                eprintln!();
                break results;
            }
            Some(Event::Cancelled) => anyhow::bail!("computation cancelled"),
            Some(Event::Failed(e)) => anyhow::bail!("computation failed: {e}"),
            None => anyhow::bail!("solver stopped"),
        }
    };

    print_hand(&hole, &board);
    for street in &results {
        print_street(street);
    }

    Ok(())
}

/// Deals a random hand and flop, as a fresh game round would.
fn deal_hand() -> Result<([Card; 2], Vec<Card>)> {
    let mut deck = Deck::default();
    deck.shuffle(&mut rand::rng());

    let mut deal = || deck.deal().ok_or_else(|| anyhow!("deck is empty"));
    let hole = [deal()?, deal()?];
    let board = vec![deal()?, deal()?, deal()?];

    Ok((hole, board))
}

fn print_hand(hole: &[Card], board: &[Card]) {
    let codes = |cards: &[Card]| {
        cards
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };

    println!("Hole:  {}", codes(hole));
    if !board.is_empty() {
        println!("Board: {}", codes(board));
    }

    // On a full board the made hand needs no completion.
    if board.len() == 5 {
        let cards = hole.iter().chain(board).copied().collect::<Vec<_>>();
        println!("Made hand: {}", classify(&cards));
    }
}

fn print_street(street: &StreetOdds) {
    println!("\n{}", street.street);
    for (category, p) in street.odds.iter() {
        println!("  {:<16} {:>7.3}%", category.label(), p * 100.0);
    }
}
