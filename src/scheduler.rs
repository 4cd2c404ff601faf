use std::time::Duration;

/// Identifies one scheduled delay. Tokens are never reused by a scheduler,
/// so a late callback for a cancelled or superseded timer can be told apart
/// from the live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Timer capability injected into the sequencer.
///
/// The sequencer keeps at most one timer outstanding; when the delay
/// elapses, the host calls back into [`Sequencer::on_timer`] with the
/// token. Abstracting the clock keeps the sequencer testable without
/// wall-clock waits.
///
/// [`Sequencer::on_timer`]: crate::sequencer::Sequencer::on_timer
pub trait Scheduler {
    /// Arms a timer for `delay` from now and returns its token.
    fn schedule(&mut self, delay: Duration) -> TimerToken;

    /// Disarms a previously scheduled timer. Unknown or already-fired
    /// tokens are ignored.
    fn cancel(&mut self, token: TimerToken);
}

/// Single-slot scheduler for hosts that pump the event loop themselves
/// (and for tests). Arming a new timer replaces the previous one.
#[derive(Debug, Default)]
pub struct QueueScheduler {
    next_token: u64,
    pending: Option<(TimerToken, Duration)>,
}

impl QueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the pending timer, if any. The host waits out the returned
    /// delay and then fires the token into the sequencer.
    pub fn take_due(&mut self) -> Option<(TimerToken, Duration)> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<(TimerToken, Duration)> {
        self.pending
    }
}

impl Scheduler for QueueScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending = Some((token, delay));
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.pending.is_some_and(|(t, _)| t == token) {
            self.pending = None;
        }
    }
}
