//! Periodic tick delivery for the engine.
//!
//! A scheduler only ever sends the timer *generation* back to the event loop;
//! the engine itself stays on the event-loop thread and decides whether a
//! delivered tick is still current.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{error, trace};

pub trait Scheduler {
    /// Start delivering `generation` every `period`, replacing any running timer.
    fn start(&mut self, period: Duration, generation: u64);
    /// Stop the running timer, if any. No tick is sent after this returns.
    fn cancel(&mut self);
}

/// Runs each timer on its own short-lived thread and reports ticks over a channel.
pub struct ThreadScheduler {
    tx: Sender<u64>,
    running: Option<Ticker>,
}

struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<u64>) -> Self {
        Self { tx, running: None }
    }
}

impl Scheduler for ThreadScheduler {
    fn start(&mut self, period: Duration, generation: u64) {
        self.cancel();
        self.running = Ticker::spawn(self.tx.clone(), period, generation);
    }

    fn cancel(&mut self) {
        if let Some(t) = self.running.take() {
            t.stop();
        }
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl Ticker {
    fn spawn(tx: Sender<u64>, period: Duration, generation: u64) -> Option<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let spawned = thread::Builder::new()
            .name(format!("cadence-tick-{generation}"))
            .spawn(move || {
                let mut deadline = Instant::now() + period;
                loop {
                    if stop_flag.load(Ordering::Acquire) {
                        break;
                    }
                    let now = Instant::now();
                    if now < deadline {
                        // Woken early either by `stop` (re-checked above) or spuriously.
                        thread::park_timeout(deadline - now);
                        continue;
                    }
                    if tx.send(generation).is_err() {
                        break;
                    }
                    trace!(generation, "tick sent");
                    deadline = next_deadline(deadline, Instant::now(), period);
                }
            });

        match spawned {
            Ok(handle) => Some(Self { stop, handle }),
            Err(e) => {
                error!("failed to spawn tick thread: {e}");
                None
            }
        }
    }

    fn stop(self) {
        self.stop.store(true, Ordering::Release);
        self.handle.thread().unpark();
        if let Err(e) = self.handle.join() {
            error!("tick thread panicked: {e:?}");
        }
    }
}

/// Deadline after a tick fired. A thread that fell more than a period behind
/// resyncs to `now` instead of sending the missed ticks back to back.
fn next_deadline(deadline: Instant, now: Instant, period: Duration) -> Instant {
    let next = deadline + period;
    if now > next { now + period } else { next }
}

#[cfg(test)]
pub(crate) use manual::{ManualScheduler, ManualTimer};
