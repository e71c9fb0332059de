use crate::RecoverableError;

/// Unix timestamp (seconds) passed as `from_date`: only records changed at or
/// after it are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cursor(u64);

impl Cursor {
    pub fn from_unix(seconds: u64) -> Self {
        Self(seconds)
    }

    pub fn as_unix(self) -> u64 {
        self.0
    }
}

/// Where the poller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Polling,
    Sleeping,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollState {
    cursor: Cursor,
    last_sent: String,
    phase: Phase,
    completed_cycles: u64,
}

impl PollState {
    /// Fresh state whose cursor points at process start.
    pub fn new(started_at: Cursor) -> Self {
        Self {
            cursor: started_at,
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Text of the last message handed to the notifier, empty before the first one.
    pub fn last_sent(&self) -> &str {
        &self.last_sent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    /// Record `text` as the dedup key. Returns false when it repeats the last one.
    pub(crate) fn remember(&mut self, text: &str) -> bool {
        if self.last_sent == text {
            return false;
        }
        self.last_sent = text.to_string();
        true
    }

    pub(crate) fn finish_cycle(&mut self, now: Cursor) {
        self.cursor = now;
        self.completed_cycles += 1;
        if self.phase != Phase::Stopped {
            self.phase = Phase::Sleeping;
        }
    }

    pub(crate) fn wake(&mut self) {
        if self.phase == Phase::Sleeping {
            self.phase = Phase::Polling;
        }
    }

    pub(crate) fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }
}

/// Chat text reported for a failed cycle.
pub fn error_report(error: &RecoverableError) -> String {
    format!("Program failure: {error}")
}
