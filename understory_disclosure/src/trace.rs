// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hook for transition decisions.
//!
//! The controller does not keep a history of why it is open or closed. For
//! debugging and inspection it is useful to answer "what closed this
//! dropdown?" or "why did that Escape press do nothing?".
//!
//! Pass a [`TransitionTrace`] sink through
//! [`DisclosureController::traced`](crate::DisclosureController::traced) to
//! receive one [`TransitionRecord`] per evaluated trigger, including discarded
//! and redundant ones. [`TransitionLog`] is a small recorder that keeps them
//! in order.

use alloc::vec::Vec;

use crate::{EventSource, Outcome};

/// One evaluated trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransitionRecord {
    /// Which trigger was evaluated.
    pub source: EventSource,
    /// The proposed open state, if the trigger got far enough to form one.
    pub proposed: Option<bool>,
    /// What the controller did with it.
    pub outcome: Outcome,
    /// Open state after the decision.
    pub is_open: bool,
}

/// A callback sink for transition tracing.
pub trait TransitionTrace {
    /// Called once per evaluated trigger, after observers were notified.
    fn record(&mut self, record: TransitionRecord);
}

impl TransitionTrace for () {
    fn record(&mut self, _record: TransitionRecord) {}
}

impl<R> TransitionTrace for &mut R
where
    R: TransitionTrace + ?Sized,
{
    fn record(&mut self, record: TransitionRecord) {
        (**self).record(record);
    }
}

/// Records every transition decision in order.
#[derive(Clone, Debug, Default)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns all records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Clears all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns the most recent record that changed the open state.
    ///
    /// This is the answer to "why is it open/closed right now?", unless the
    /// state was since forced by a controlled update, which is not a trigger
    /// and is not recorded.
    #[must_use]
    pub fn last_applied(&self) -> Option<&TransitionRecord> {
        self.records
            .iter()
            .rev()
            .find(|r| r.outcome.changed())
    }

    /// Returns how many records came from `source`.
    #[must_use]
    pub fn count(&self, source: EventSource) -> usize {
        self.records.iter().filter(|r| r.source == source).count()
    }
}

impl TransitionTrace for TransitionLog {
    fn record(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(source: EventSource, outcome: Outcome, is_open: bool) -> TransitionRecord {
        TransitionRecord {
            source,
            proposed: Some(is_open),
            outcome,
            is_open,
        }
    }

    #[test]
    fn last_applied_skips_unapplied_records() {
        let mut log = TransitionLog::new();
        log.record(rec(EventSource::HeaderClick, Outcome::Applied, true));
        log.record(rec(EventSource::EscapeClick, Outcome::Notified, true));
        log.record(rec(EventSource::SectionClick, Outcome::Discarded, true));

        let last = log.last_applied().unwrap();
        assert_eq!(last.source, EventSource::HeaderClick);
        assert_eq!(log.count(EventSource::EscapeClick), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut log = TransitionLog::new();
        log.record(rec(EventSource::ManualTrigger, Outcome::Applied, false));
        log.clear();
        assert!(log.records().is_empty());
        assert!(log.last_applied().is_none());
    }
}
