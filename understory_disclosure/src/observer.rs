// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close notifications.
//!
//! Observers are supplied by the owner for the duration of a call and are not
//! retained by the controller. Every method has a no-op default, so an
//! observer only implements what it cares about. `()` is the empty observer.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::EventSource;

/// Receives proposed transitions.
///
/// For a proposal to open, [`on_open`](Self::on_open) runs first; for a
/// proposal to close, [`on_close`](Self::on_close). [`on_toggle`](Self::on_toggle)
/// always runs last.
pub trait DisclosureObserver {
    /// A transition to open was proposed.
    fn on_open(&mut self, source: EventSource) {
        let _ = source;
    }

    /// A transition to closed was proposed.
    fn on_close(&mut self, source: EventSource) {
        let _ = source;
    }

    /// Any transition was proposed.
    fn on_toggle(&mut self, open: bool, source: EventSource) {
        let _ = (open, source);
    }
}

impl DisclosureObserver for () {}

impl<O> DisclosureObserver for &mut O
where
    O: DisclosureObserver + ?Sized,
{
    fn on_open(&mut self, source: EventSource) {
        (**self).on_open(source);
    }

    fn on_close(&mut self, source: EventSource) {
        (**self).on_close(source);
    }

    fn on_toggle(&mut self, open: bool, source: EventSource) {
        (**self).on_toggle(open, source);
    }
}

impl<O> DisclosureObserver for Option<O>
where
    O: DisclosureObserver,
{
    fn on_open(&mut self, source: EventSource) {
        if let Some(observer) = self {
            observer.on_open(source);
        }
    }

    fn on_close(&mut self, source: EventSource) {
        if let Some(observer) = self {
            observer.on_close(source);
        }
    }

    fn on_toggle(&mut self, open: bool, source: EventSource) {
        if let Some(observer) = self {
            observer.on_toggle(open, source);
        }
    }
}

/// Each observer in the slice is notified in order.
impl<O> DisclosureObserver for [O]
where
    O: DisclosureObserver,
{
    fn on_open(&mut self, source: EventSource) {
        self.iter_mut().for_each(|o| o.on_open(source));
    }

    fn on_close(&mut self, source: EventSource) {
        self.iter_mut().for_each(|o| o.on_close(source));
    }

    fn on_toggle(&mut self, open: bool, source: EventSource) {
        self.iter_mut().for_each(|o| o.on_toggle(open, source));
    }
}

impl<O> DisclosureObserver for Vec<O>
where
    O: DisclosureObserver,
{
    fn on_open(&mut self, source: EventSource) {
        self.as_mut_slice().on_open(source);
    }

    fn on_close(&mut self, source: EventSource) {
        self.as_mut_slice().on_close(source);
    }

    fn on_toggle(&mut self, open: bool, source: EventSource) {
        self.as_mut_slice().on_toggle(open, source);
    }
}

type SourceFn = Box<dyn FnMut(EventSource)>;
type ToggleFn = Box<dyn FnMut(bool, EventSource)>;

/// An observer assembled from optional closures.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_disclosure::{Callbacks, DisclosureConfig, DisclosureController, EventSource};
///
/// let closed_by = Rc::new(Cell::new(None));
/// let sink = closed_by.clone();
/// let mut callbacks = Callbacks::new().with_on_close(move |source| sink.set(Some(source)));
///
/// let config = DisclosureConfig::new().with_default_open(true);
/// let mut dropdown = DisclosureController::<()>::new(config);
/// dropdown.close(&mut callbacks);
///
/// assert_eq!(closed_by.get(), Some(EventSource::ManualTrigger));
/// assert!(!dropdown.is_open());
/// ```
#[derive(Default)]
pub struct Callbacks {
    on_open: Option<SourceFn>,
    on_close: Option<SourceFn>,
    on_toggle: Option<ToggleFn>,
}

impl Callbacks {
    /// Creates an observer with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the open callback.
    #[must_use]
    pub fn with_on_open(mut self, f: impl FnMut(EventSource) + 'static) -> Self {
        self.on_open = Some(Box::new(f));
        self
    }

    /// Sets the close callback.
    #[must_use]
    pub fn with_on_close(mut self, f: impl FnMut(EventSource) + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Sets the toggle callback.
    #[must_use]
    pub fn with_on_toggle(mut self, f: impl FnMut(bool, EventSource) + 'static) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }
}

impl core::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_toggle", &self.on_toggle.is_some())
            .finish()
    }
}

impl DisclosureObserver for Callbacks {
    fn on_open(&mut self, source: EventSource) {
        if let Some(f) = &mut self.on_open {
            f(source);
        }
    }

    fn on_close(&mut self, source: EventSource) {
        if let Some(f) = &mut self.on_close {
            f(source);
        }
    }

    fn on_toggle(&mut self, open: bool, source: EventSource) {
        if let Some(f) = &mut self.on_toggle {
            f(open, source);
        }
    }
}

/// A notification as seen by [`Recorder`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// `on_open(source)`.
    Open(EventSource),
    /// `on_close(source)`.
    Close(EventSource),
    /// `on_toggle(open, source)`.
    Toggle(bool, EventSource),
}

/// Observer that stores every notification in order.
///
/// Handy for tests and for hosts that batch notifications until the end of an
/// event handler.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    notifications: Vec<Notification>,
}

impl Recorder {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notifications: Vec::new(),
        }
    }

    /// Returns the recorded notifications.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Removes and returns the recorded notifications.
    pub fn take(&mut self) -> Vec<Notification> {
        core::mem::take(&mut self.notifications)
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl DisclosureObserver for Recorder {
    fn on_open(&mut self, source: EventSource) {
        self.notifications.push(Notification::Open(source));
    }

    fn on_close(&mut self, source: EventSource) {
        self.notifications.push(Notification::Close(source));
    }

    fn on_toggle(&mut self, open: bool, source: EventSource) {
        self.notifications.push(Notification::Toggle(open, source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn callbacks_skip_missing_closures() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut callbacks = Callbacks::new().with_on_toggle(move |open, source| {
            sink.borrow_mut().push((open, source));
        });

        callbacks.on_open(EventSource::HeaderClick);
        callbacks.on_toggle(true, EventSource::HeaderClick);

        assert_eq!(*seen.borrow(), vec![(true, EventSource::HeaderClick)]);
    }

    #[test]
    fn slice_notifies_each_observer() {
        let mut observers = [Recorder::new(), Recorder::new()];
        observers[..].on_close(EventSource::EscapeClick);
        for recorder in &observers {
            assert_eq!(
                recorder.notifications(),
                &[Notification::Close(EventSource::EscapeClick)]
            );
        }
    }

    #[test]
    fn none_observer_is_silent() {
        let mut observer: Option<Recorder> = None;
        observer.on_open(EventSource::ManualTrigger);
        assert!(observer.is_none());
    }

    #[test]
    fn recorder_take_drains() {
        let mut recorder = Recorder::new();
        recorder.on_open(EventSource::HeaderClick);
        assert_eq!(recorder.take(), vec![Notification::Open(EventSource::HeaderClick)]);
        assert!(recorder.is_empty());
    }
}
