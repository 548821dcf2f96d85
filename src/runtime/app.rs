use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::commands::Cmd;
use crate::messages::{Msg, TimerMsg};
use crate::model::AppModel;
use crate::update::update;

use super::timers::TimerThread;

/// Poll interval while waiting on timers
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Drives an `AppModel`: runs update, performs commands, and feeds timer
/// messages back through a channel
pub struct Runtime {
    model: AppModel,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    timers: TimerThread,
    frames: u64,
    quit: bool,
}

impl Runtime {
    pub fn new(model: AppModel) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let timers = TimerThread::spawn(msg_tx.clone());
        Self {
            model,
            msg_tx,
            msg_rx,
            timers,
            frames: 0,
            quit: false,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AppModel {
        &mut self.model
    }

    pub fn into_model(self) -> AppModel {
        self.model
    }

    /// Sender for messages produced outside the runtime
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Number of updates that asked for a redraw
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Timers and delays still running
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Run one message through update and perform the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            if cmd.needs_redraw() {
                self.frames += 1;
            }
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw | Cmd::RedrawAreas(_) => {
                tracing::trace!(damage = ?cmd.damage(), "redraw");
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::StartTimer {
                channel,
                token,
                delay_ms,
            } => {
                self.timers.schedule(
                    Duration::from_millis(delay_ms),
                    Some(channel),
                    Msg::Timer(TimerMsg::Fired { channel, token }),
                );
            }
            Cmd::Delay { delay_ms, msg } => {
                self.timers
                    .schedule(Duration::from_millis(delay_ms), None, *msg);
            }
            Cmd::Quit => {
                tracing::info!("quit requested");
                self.quit = true;
            }
        }
    }

    /// Handle every message that is already waiting; returns how many ran
    pub fn process_async_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            handled += 1;
        }
        handled
    }

    /// Handle messages until no timer is left running or quit is requested
    pub fn run_until_idle(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_async_messages();
            if self.quit {
                return Ok(());
            }
            if self.pending_timers() == 0 {
                // A timer may have sent between the drain and the check
                if self.process_async_messages() == 0 {
                    return Ok(());
                }
                continue;
            }

            let now = Instant::now();
            if now >= deadline {
                bail!(
                    "{} timer(s) still pending after {:?}",
                    self.pending_timers(),
                    timeout
                );
            }
            match self.msg_rx.recv_timeout(IDLE_POLL.min(deadline - now)) {
                Ok(msg) => self.dispatch(msg),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => bail!("message channel closed"),
            }
        }
    }
}
