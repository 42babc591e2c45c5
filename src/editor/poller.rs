//! Deferred-highlight poll state machine.
//!
//! An error line can arrive before the surface shows the content it refers
//! to (a tab switch or template load may still be in flight). Rather than
//! highlighting a line of the wrong document, the session re-checks on a
//! timer until the content catches up, bounded so a report that never
//! becomes current is dropped.

/// Tick spacing for the re-check timer, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 250;

/// Mismatched ticks tolerated before a request is dropped.
pub const MAX_ATTEMPTS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling { attempts: u32 },
}

/// A pending highlight request: the target line plus how long we have been
/// waiting for the surface to show the expected content.
#[derive(Debug)]
pub struct HighlightPoll {
    state: PollState,
    target: Option<usize>,
}

impl HighlightPoll {
    pub fn new() -> Self {
        Self {
            state: PollState::Idle,
            target: None,
        }
    }

    /// Arm the poller for a line whose content is not current yet.
    pub fn begin(&mut self, line: usize) {
        self.state = PollState::Polling { attempts: 0 };
        self.target = Some(line);
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PollState::Polling { .. })
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Advance one timer tick. Returns the line to highlight when the
    /// content has become current; exhaustion drops the request silently.
    pub fn tick(&mut self, ready: bool) -> Option<usize> {
        match self.state {
            PollState::Idle => None,
            PollState::Polling { attempts } => {
                if ready {
                    self.state = PollState::Idle;
                    return self.target.take();
                }
                let attempts = attempts + 1;
                if attempts >= MAX_ATTEMPTS {
                    self.state = PollState::Idle;
                    self.target = None;
                } else {
                    self.state = PollState::Polling { attempts };
                }
                None
            }
        }
    }
}

impl Default for HighlightPoll {
    fn default() -> Self {
        Self::new()
    }
}
