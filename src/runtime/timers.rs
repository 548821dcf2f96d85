//! Timer thread for delayed messages
//!
//! One thread holds every pending timer. Scheduling a debounce timer drops
//! the one already waiting on the same channel, so a burst of keystrokes
//! leaves a single sleeper behind.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::debounce::DebounceChannel;
use crate::messages::Msg;

struct Pending {
    due: Instant,
    /// Debounce channel this timer belongs to; `None` for plain delays
    channel: Option<DebounceChannel>,
    msg: Msg,
}

/// Handle to the timer thread
pub struct TimerThread {
    requests: Sender<Pending>,
    /// Timers scheduled but not yet delivered or dropped
    in_flight: Arc<AtomicUsize>,
}

impl TimerThread {
    /// Start the thread; due messages are sent to `output`
    pub fn spawn(output: Sender<Msg>) -> Self {
        let (requests, incoming) = mpsc::channel();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&in_flight);
        std::thread::spawn(move || run(incoming, output, counter));
        Self {
            requests,
            in_flight,
        }
    }

    /// Deliver `msg` after `delay`, replacing any timer pending on `channel`
    pub fn schedule(&self, delay: Duration, channel: Option<DebounceChannel>, msg: Msg) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let pending = Pending {
            due: Instant::now() + delay,
            channel,
            msg,
        };
        if self.requests.send(pending).is_err() {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!("timer thread stopped, delayed message dropped");
        }
    }

    pub fn pending(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

fn run(incoming: Receiver<Pending>, output: Sender<Msg>, in_flight: Arc<AtomicUsize>) {
    let mut timers: Vec<Pending> = Vec::new();
    loop {
        let received = match timers.iter().map(|t| t.due).min() {
            Some(due) => incoming.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => incoming
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(pending) => {
                if let Some(channel) = pending.channel {
                    let before = timers.len();
                    timers.retain(|t| t.channel != Some(channel));
                    let dropped = before - timers.len();
                    if dropped > 0 {
                        tracing::trace!(?channel, "superseded timer dropped");
                        in_flight.fetch_sub(dropped, Ordering::SeqCst);
                    }
                }
                timers.push(pending);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }

        let now = Instant::now();
        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
            timers.drain(..).partition(|t| t.due <= now);
        timers = waiting;
        due.sort_by_key(|t| t.due);
        for timer in due {
            let _ = output.send(timer.msg);
            in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
