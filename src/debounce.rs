//! Debounce channels for deferred document work
//!
//! Each channel owns at most one pending timer. Scheduling hands out a new
//! token and forgets the previous one, so a timer that fires with an older
//! token is stale and gets dropped:
//!
//! ```text
//! edit → schedule(ch) → Cmd::StartTimer{token} → (quiet period) → Msg::Timer(Fired{token})
//!                                                                  → fire(ch, token) == pending?
//! ```

use crate::commands::Cmd;
use crate::config::EditorConfig;

/// Independent debounced actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceChannel {
    /// Re-index headings and redraw the outline
    OutlineRebuild,
    /// Report the document-updated time
    DocumentTimestamp,
}

/// Identity of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// The single pending timer of a channel, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingTimer {
    token: Option<TimerToken>,
}

impl PendingTimer {
    /// Install `token`, returning the timer it cancels
    pub fn replace(&mut self, token: TimerToken) -> Option<TimerToken> {
        self.token.replace(token)
    }

    /// Consume the pending timer if `token` is it
    pub fn take_if(&mut self, token: TimerToken) -> bool {
        if self.token == Some(token) {
            self.token = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.token.take()
    }

    pub fn is_pending(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    next_token: u64,
    outline: PendingTimer,
    timestamp: PendingTimer,
    outline_delay_ms: u64,
    timestamp_delay_ms: u64,
}

impl Debouncer {
    pub fn new(outline_delay_ms: u64, timestamp_delay_ms: u64) -> Self {
        Self {
            next_token: 0,
            outline: PendingTimer::default(),
            timestamp: PendingTimer::default(),
            outline_delay_ms,
            timestamp_delay_ms,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.outline.rebuild_debounce_ms,
            config.timestamp_debounce_ms,
        )
    }

    fn timer_mut(&mut self, channel: DebounceChannel) -> &mut PendingTimer {
        match channel {
            DebounceChannel::OutlineRebuild => &mut self.outline,
            DebounceChannel::DocumentTimestamp => &mut self.timestamp,
        }
    }

    pub fn delay_ms(&self, channel: DebounceChannel) -> u64 {
        match channel {
            DebounceChannel::OutlineRebuild => self.outline_delay_ms,
            DebounceChannel::DocumentTimestamp => self.timestamp_delay_ms,
        }
    }

    /// (Re)start the channel's timer
    pub fn schedule(&mut self, channel: DebounceChannel) -> Cmd {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        if let Some(previous) = self.timer_mut(channel).replace(token) {
            tracing::trace!(?channel, previous = previous.0, "debounce timer restarted");
        }
        Cmd::StartTimer {
            channel,
            token,
            delay_ms: self.delay_ms(channel),
        }
    }

    /// Whether a fired timer is the channel's pending one; consumes it if so
    pub fn fire(&mut self, channel: DebounceChannel, token: TimerToken) -> bool {
        let current = self.timer_mut(channel).take_if(token);
        if !current {
            tracing::trace!(?channel, token = token.0, "stale debounce timer ignored");
        }
        current
    }

    pub fn cancel(&mut self, channel: DebounceChannel) {
        self.timer_mut(channel).cancel();
    }

    pub fn is_pending(&self, channel: DebounceChannel) -> bool {
        match channel {
            DebounceChannel::OutlineRebuild => self.outline.is_pending(),
            DebounceChannel::DocumentTimestamp => self.timestamp.is_pending(),
        }
    }
}
