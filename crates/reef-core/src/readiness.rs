//! Startup readiness gate. Components report in by name; the loader holds
//! until everything required is ready or the fallback deadline passes, so a
//! stalled fetch can never leave the page stuck behind the loader.

use crate::constants::LOADER_FALLBACK_SEC;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Waiting,
    /// All components ready, or the deadline passed.
    Complete { timed_out: bool },
}

pub struct ReadinessGate {
    required: SmallVec<[&'static str; 4]>,
    ready: SmallVec<[&'static str; 4]>,
    deadline: f64,
    complete: Option<GateState>,
}

impl ReadinessGate {
    /// `start` is the current time in seconds; the fallback deadline is
    /// measured from it.
    pub fn new(required: &[&'static str], start: f64) -> ReadinessGate {
        ReadinessGate {
            required: required.iter().copied().collect(),
            ready: SmallVec::new(),
            deadline: start + LOADER_FALLBACK_SEC,
            complete: None,
        }
    }

    /// Report a component ready. Unknown names and repeats are harmless.
    pub fn mark_ready(&mut self, name: &'static str) {
        if !self.ready.contains(&name) {
            self.ready.push(name);
        }
    }

    fn all_ready(&self) -> bool {
        self.required.iter().all(|r| self.ready.contains(r))
    }

    /// Evaluate the gate. Completion latches: once fired it never reverts.
    pub fn poll(&mut self, now: f64) -> GateState {
        if let Some(state) = self.complete {
            return state;
        }
        if self.all_ready() {
            let state = GateState::Complete { timed_out: false };
            self.complete = Some(state);
            return state;
        }
        if now >= self.deadline {
            log::warn!(
                "readiness deadline passed, revealing anyway ({} of {} ready)",
                self.ready.len(),
                self.required.len()
            );
            let state = GateState::Complete { timed_out: true };
            self.complete = Some(state);
            return state;
        }
        GateState::Waiting
    }
}
