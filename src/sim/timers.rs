//! Scheduled events checked each frame
//!
//! Each entry carries the session generation it was scheduled under; the
//! owner drops entries whose generation no longer matches, so a timer from
//! an ended session can never touch the next one.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End the scare display: rehide the antagonist, release the player
    HideAntagonist,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    pub due_at: f64,
    pub generation: u64,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_at: f64, generation: u64, kind: TimerKind) {
        self.entries.push(Timer {
            due_at,
            generation,
            kind,
        });
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn take_due(&mut self, now: f64) -> Vec<Timer> {
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.entries.drain(..).partition(|t| t.due_at <= now);
        self.entries = pending;
        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at));
        due
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
