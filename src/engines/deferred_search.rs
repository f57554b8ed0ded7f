//! One-shot "thinking delay" search on a worker thread.
//!
//! The position and the engine move into the worker, which sleeps for the
//! delay, searches, and passes the position back through the completion
//! callback exactly once. A panic inside the engine is caught and reported
//! as `Failed(SearchWorkerPanicked)` with the position as it was before the
//! search. The engine comes back from [`DeferredSearch::join`].
//! Only one writer ever holds the position; callers must not schedule a new
//! search for the same game before the previous callback has fired.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;

/// Shared flag checked once, when the delay elapses.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredOutcome {
    Completed(EngineOutput),
    /// The token was set before the delay elapsed; no search ran.
    Cancelled,
    Failed(ChessError),
}

pub struct DeferredSearch<E: Engine> {
    handle: JoinHandle<E>,
    cancel: CancelToken,
}

impl<E: Engine + 'static> DeferredSearch<E> {
    /// Start the worker. `on_complete` runs on the worker thread.
    pub fn schedule<F>(
        mut engine: E,
        mut game_state: GameState,
        delay: Duration,
        on_complete: F,
    ) -> Self
    where
        F: FnOnce(GameState, DeferredOutcome) + Send + 'static,
    {
        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();

        let handle = thread::spawn(move || {
            thread::sleep(delay);

            let outcome = if worker_cancel.is_cancelled() {
                debug!("deferred search cancelled before it started");
                DeferredOutcome::Cancelled
            } else {
                let snapshot = game_state.clone();
                let searched =
                    panic::catch_unwind(AssertUnwindSafe(|| engine.choose_move(&mut game_state)));
                match searched {
                    Ok(Ok(output)) => DeferredOutcome::Completed(output),
                    Ok(Err(err)) => DeferredOutcome::Failed(err),
                    Err(_) => {
                        warn!(engine = engine.name(), "engine panicked during deferred search");
                        // The search may have stopped mid-line.
                        game_state = snapshot;
                        DeferredOutcome::Failed(ChessError::SearchWorkerPanicked)
                    }
                }
            };

            on_complete(game_state, outcome);
            engine
        });

        Self { handle, cancel }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[inline]
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the worker and take the engine back. Fails only if the
    /// completion callback itself panicked.
    pub fn join(self) -> ChessResult<E> {
        self.handle
            .join()
            .map_err(|_| ChessError::SearchWorkerPanicked)
    }
}
