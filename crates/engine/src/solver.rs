// Copyright (C) 2025 Holdem Odds developers
// SPDX-License-Identifier: Apache-2.0

//! The solver task owning the single in-flight computation.
use log::{info, warn};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};
use tokio::{
    sync::{mpsc, oneshot},
    task,
};

use crate::error::EngineError;
use crate::message::{Mode, Progress, Request, StreetOdds};
use crate::{DEFAULT_ITERATIONS, exact, sample};

/// An event from the solver.
///
/// A computation emits zero or more [Event::Progress] followed by
/// exactly one terminal event.
#[derive(Debug, Clone)]
pub enum Event {
    /// A progress update from a running computation.
    Progress(Progress),
    /// The computed odds for each street of the request.
    Result(Vec<StreetOdds>),
    /// The computation was cancelled.
    Cancelled,
    /// The computation failed.
    Failed(String),
}

/// A command for the solver task.
#[derive(Debug)]
enum Command {
    /// Start a computation, superseding any running one.
    Compute {
        req: Request,
        resp: oneshot::Sender<Result<(), EngineError>>,
    },
    /// Cancel the running computation.
    Cancel,
}

/// Handle to the solver task.
///
/// The solver owns at most one running computation; a new request
/// supersedes the one in flight, which terminates with
/// [Event::Cancelled] before any event of the new run is delivered.
pub struct Solver {
    commands_tx: mpsc::Sender<Command>,
    events_rx: mpsc::Receiver<Event>,
}

impl Solver {
    /// Spawns the solver task and returns its handle.
    pub fn new() -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(64);
        let (events_tx, events_rx) = mpsc::channel(64);

        let mut task = SolverTask {
            commands_rx,
            events_tx,
        };

        task::spawn(async move {
            task.run().await;
            info!("Solver task stopped");
        });

        Self {
            commands_tx,
            events_rx,
        }
    }

    /// Requests a computation.
    ///
    /// Input validation happens before any enumeration starts: an
    /// invalid request fails here and emits no events, leaving any
    /// running computation undisturbed.
    pub async fn compute(&self, req: Request) -> Result<(), EngineError> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.commands_tx
            .send(Command::Compute { req, resp: resp_tx })
            .await
            .map_err(|_| EngineError::Stopped)?;

        resp_rx.await.map_err(|_| EngineError::Stopped)?
    }

    /// Cancels the running computation, if any.
    pub async fn cancel(&self) {
        let _ = self.commands_tx.send(Command::Cancel).await;
    }

    /// Waits for the next event from the solver.
    pub async fn recv(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// An event from the engine running on the blocking thread.
#[derive(Debug)]
pub(crate) enum RunEvent {
    Progress(Progress),
    Done(Vec<StreetOdds>),
}

/// Cancellation flag and progress channel owned by one engine run.
///
/// Every run gets its own control, counters, and deck copy; nothing is
/// shared with a superseded run, whose channel is simply dropped.
pub(crate) struct RunControl {
    cancel: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<RunEvent>,
}

impl RunControl {
    /// Creates a control and the receiving end of its event channel.
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<RunEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let ctl = Self {
            cancel: Arc::new(AtomicBool::new(false)),
            events,
        };

        (ctl, events_rx)
    }

    /// A shared handle to the cancellation flag.
    pub(crate) fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Requests cancellation.
    pub(crate) fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Checks the cancellation flag.
    pub(crate) fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Batch checkpoint: reports progress and checks for cancellation.
    ///
    /// Returns false when the run should stop, either cancelled or
    /// orphaned by a superseding request.
    pub(crate) fn checkpoint(&self, processed: u64, total: u64, start: &Instant) -> bool {
        if self.cancelled() {
            return false;
        }

        let fraction = if total > 0 {
            processed as f64 / total as f64
        } else {
            0.0
        };

        // No estimate before any work is accounted for.
        let eta = (fraction > 0.0)
            .then(|| start.elapsed().as_secs_f64() * (1.0 / fraction - 1.0));

        self.events
            .send(RunEvent::Progress(Progress { fraction, eta }))
            .is_ok()
    }

    /// Sends the terminal result of a completed run.
    fn done(&self, results: Vec<StreetOdds>) {
        let _ = self.events.send(RunEvent::Done(results));
    }
}

/// A running computation as seen from the solver task.
struct ActiveRun {
    cancel: Arc<AtomicBool>,
    run_rx: mpsc::UnboundedReceiver<RunEvent>,
}

impl ActiveRun {
    fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

struct SolverTask {
    commands_rx: mpsc::Receiver<Command>,
    events_tx: mpsc::Sender<Event>,
}

impl SolverTask {
    async fn run(&mut self) {
        let mut active: Option<ActiveRun> = None;

        loop {
            tokio::select! {
                cmd = self.commands_rx.recv() => match cmd {
                    Some(Command::Compute { req, resp }) => {
                        let res = req.validate();

                        if res.is_ok() {
                            // Supersede the in-flight run, dropping its
                            // channel so no stale event can interleave
                            // with the new run's events.
                            if let Some(run) = active.take() {
                                run.cancel();
                                let _ = self.events_tx.send(Event::Cancelled).await;
                            }

                            active = Some(Self::start(req));
                        }

                        let _ = resp.send(res);
                    }
                    Some(Command::Cancel) => {
                        if let Some(run) = active.take() {
                            run.cancel();
                            let _ = self.events_tx.send(Event::Cancelled).await;
                        }
                    }
                    None => {
                        // Handle dropped, stop any running computation.
                        if let Some(run) = active.take() {
                            run.cancel();
                        }
                        break;
                    }
                },
                ev = Self::next_run_event(&mut active) => match ev {
                    Some(RunEvent::Progress(p)) => {
                        let _ = self.events_tx.send(Event::Progress(p)).await;
                    }
                    Some(RunEvent::Done(results)) => {
                        active = None;
                        let _ = self.events_tx.send(Event::Result(results)).await;
                    }
                    None => {
                        // The engine dropped its channel without a
                        // result, report the run as failed.
                        active = None;
                        warn!("engine run stopped without a result");
                        let _ = self
                            .events_tx
                            .send(Event::Failed("engine run stopped".to_string()))
                            .await;
                    }
                },
            }
        }
    }

    /// Starts a validated request on the blocking thread pool.
    fn start(req: Request) -> ActiveRun {
        let (ctl, run_rx) = RunControl::new();
        let cancel = ctl.cancel_flag();

        task::spawn_blocking(move || {
            let results = match req.mode {
                Mode::Exact => exact::run(req.hole, &req.board, &ctl),
                Mode::MonteCarlo => sample::run(
                    req.hole,
                    &req.board,
                    req.iterations.unwrap_or(DEFAULT_ITERATIONS),
                    &ctl,
                ),
            };

            if let Some(results) = results {
                ctl.done(results);
            }
        });

        ActiveRun { cancel, run_rx }
    }

    /// Waits for an event from the active run, or forever if idle.
    async fn next_run_event(active: &mut Option<ActiveRun>) -> Option<RunEvent> {
        match active {
            Some(run) => run.run_rx.recv().await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_odds_cards::Card;
    use holdem_odds_eval::Category;
    use crate::message::Street;

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn request(mode: Mode, hole: &[&str], board: &[&str]) -> Request {
        let hole = cards(hole);
        Request {
            mode,
            hole: [hole[0], hole[1]],
            board: cards(board),
            iterations: None,
        }
    }

    /// Collects events until the first terminal one.
    async fn collect_run(solver: &mut Solver) -> (Vec<Progress>, Event) {
        let mut progress = Vec::new();
        loop {
            match solver.recv().await.expect("solver stopped") {
                Event::Progress(p) => progress.push(p),
                terminal => return (progress, terminal),
            }
        }
    }

    #[tokio::test]
    async fn exact_turn_request() {
        let mut solver = Solver::new();
        let req = request(Mode::Exact, &["AS", "AH"], &["KD", "KC", "2C", "3D"]);
        solver.compute(req).await.unwrap();

        let (progress, terminal) = collect_run(&mut solver).await;

        // Progress fractions are monotonic and in range.
        assert!(!progress.is_empty());
        assert!(progress.iter().all(|p| (0.0..=1.0).contains(&p.fraction)));
        assert!(
            progress
                .windows(2)
                .all(|w| w[0].fraction <= w[1].fraction)
        );
        assert!(progress.iter().flat_map(|p| p.eta).all(|eta| eta >= 0.0));

        let Event::Result(results) = terminal else {
            panic!("expected a result, got {terminal:?}");
        };

        assert_eq!(results.len(), 3);
        let turn = &results[2];
        assert_eq!(turn.street, Street::Turn);
        assert_eq!(turn.odds.get(Category::FullHouse), 4.0 / 46.0);
        assert_eq!(turn.odds.get(Category::TwoPair), 42.0 / 46.0);
    }

    #[tokio::test]
    async fn monte_carlo_request() {
        let mut solver = Solver::new();
        let mut req = request(Mode::MonteCarlo, &["7C", "2D"], &["7S", "2S", "KH"]);
        req.iterations = Some(2000);
        solver.compute(req).await.unwrap();

        let (_, terminal) = collect_run(&mut solver).await;
        let Event::Result(results) = terminal else {
            panic!("expected a result, got {terminal:?}");
        };

        // Same shape as the exact engine, two pair is locked on this flop.
        assert_eq!(results.len(), 2);
        let flop = &results[1];
        assert_eq!(flop.odds.get(Category::Pair), 0.0);
        assert!((flop.odds.sum() - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn invalid_request_fails_fast() {
        let mut solver = Solver::new();

        let req = request(Mode::Exact, &["AS", "AS"], &[]);
        assert!(matches!(
            solver.compute(req).await,
            Err(EngineError::DuplicateCard(_))
        ));

        let req = request(Mode::Exact, &["AS", "AH"], &["KD", "KC"]);
        assert_eq!(
            solver.compute(req).await,
            Err(EngineError::BoardSize(2))
        );

        // The solver is still idle and accepts a valid request, and the
        // rejected requests emitted no events before this run's.
        let mut req = request(Mode::MonteCarlo, &["AS", "AH"], &["AD", "AC", "2C", "3D"]);
        req.iterations = Some(500);
        solver.compute(req).await.unwrap();

        let (_, terminal) = collect_run(&mut solver).await;
        let Event::Result(results) = terminal else {
            panic!("expected a result, got {terminal:?}");
        };
        assert_eq!(results[2].odds.get(Category::FourOfAKind), 1.0);
    }

    #[tokio::test]
    async fn superseding_request_cancels_in_flight_run() {
        let mut solver = Solver::new();

        // A preflop exact run is long enough to still be in flight
        // when the second request arrives.
        let slow = request(Mode::Exact, &["AS", "AH"], &[]);
        solver.compute(slow).await.unwrap();

        let mut fast = request(Mode::MonteCarlo, &["7C", "2D"], &["7S", "2S", "KH"]);
        fast.iterations = Some(500);
        solver.compute(fast).await.unwrap();

        // The superseded run terminates with Cancelled before any
        // event of the new run.
        let (_, terminal) = collect_run(&mut solver).await;
        assert!(matches!(terminal, Event::Cancelled), "got {terminal:?}");

        let (_, terminal) = collect_run(&mut solver).await;
        assert!(matches!(terminal, Event::Result(_)), "got {terminal:?}");
    }

    #[tokio::test]
    async fn explicit_cancel() {
        let mut solver = Solver::new();

        let slow = request(Mode::Exact, &["AS", "AH"], &[]);
        solver.compute(slow).await.unwrap();
        solver.cancel().await;

        let (_, terminal) = collect_run(&mut solver).await;
        assert!(matches!(terminal, Event::Cancelled), "got {terminal:?}");

        // Cancelling with nothing in flight is a no-op.
        solver.cancel().await;

        // Back to idle, a new request completes normally.
        let mut req = request(Mode::MonteCarlo, &["AS", "AH"], &["KD", "KC", "2C", "3D"]);
        req.iterations = Some(500);
        solver.compute(req).await.unwrap();

        let (_, terminal) = collect_run(&mut solver).await;
        assert!(matches!(terminal, Event::Result(_)), "got {terminal:?}");
    }
}
