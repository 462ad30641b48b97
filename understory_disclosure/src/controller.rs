// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The open/closed state machine.
//!
//! ## Transition rule
//!
//! Every trigger first forms a proposal `(open, source)`:
//!
//! | Trigger | Proposal | Gate |
//! |---|---|---|
//! | [`header_click`](DisclosureController::header_click) | `!is_open` | [`Gates::TOGGLE_ON_HEADER_CLICK`](crate::Gates::TOGGLE_ON_HEADER_CLICK) |
//! | [`section_click`](DisclosureController::section_click) | `false` | [`Gates::CLOSE_ON_SECTION_CLICK`](crate::Gates::CLOSE_ON_SECTION_CLICK) |
//! | [`outside_click`](DisclosureController::outside_click) | `false`, if the target is outside the boundary | [`Gates::CLOSE_ON_OUTSIDE_CLICK`](crate::Gates::CLOSE_ON_OUTSIDE_CLICK) |
//! | [`key_up`](DisclosureController::key_up) / [`keyboard`](DisclosureController::keyboard) | `false`, if the released key is Escape | [`Gates::CLOSE_ON_ESCAPE`](crate::Gates::CLOSE_ON_ESCAPE) |
//! | [`open`](DisclosureController::open) / [`close`](DisclosureController::close) | `true` / `false`, unless already there | none |
//!
//! Then, identically for every trigger:
//!
//! 1. A closed gate discards the proposal with no side effects.
//! 2. Observers are notified regardless of mode: `on_open` or `on_close`,
//!    then `on_toggle`.
//! 3. The state changes only if the disclosure is uncontrolled and the
//!    proposal differs from the current state.
//!
//! In controlled mode the owner decides whether to honor the proposal by
//! feeding a new value back through [`update_config`](DisclosureController::update_config)
//! or [`update_controlled`](DisclosureController::update_controlled).
//!
//! ```rust
//! use ui_events::keyboard::{Key, NamedKey};
//! use understory_disclosure::{
//!     DisclosureConfig, DisclosureController, EventSource, Notification, Outcome, Recorder,
//! };
//!
//! // Controlled: the owner says "open".
//! let mut menu = DisclosureController::<()>::new(DisclosureConfig::controlled(true));
//! let mut seen = Recorder::new();
//!
//! // Escape proposes "close"; observers hear about it, the state stays put.
//! let escape = Key::Named(NamedKey::Escape);
//! assert_eq!(menu.key_up(&escape, &mut seen), Outcome::Notified);
//! assert!(menu.is_open());
//! assert_eq!(seen.notifications(), &[
//!     Notification::Close(EventSource::EscapeClick),
//!     Notification::Toggle(false, EventSource::EscapeClick),
//! ]);
//!
//! // The owner honors it.
//! menu.update_controlled(Some(false));
//! assert!(!menu.is_open());
//! ```

use alloc::boxed::Box;

use smallvec::SmallVec;
use ui_events::keyboard::{Key, KeyState, KeyboardEvent, NamedKey};

use crate::{
    Boundary, DisclosureConfig, DisclosureContext, DisclosureObserver, EventSource,
    SectionContext, TransitionRecord, TransitionTrace,
};

/// What a trigger did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The trigger did not apply: its gate is closed, the click was inside the
    /// boundary, or the key was not Escape. Nothing was notified.
    Discarded,
    /// A manual open/close matched the current state. Nothing was notified.
    Redundant,
    /// Observers were notified; the state did not change (controlled mode, or
    /// the proposal matched the current state).
    Notified,
    /// Observers were notified and the state changed.
    Applied,
}

impl Outcome {
    /// Returns `true` if observers were notified.
    #[must_use]
    pub const fn notified(self) -> bool {
        matches!(self, Self::Notified | Self::Applied)
    }

    /// Returns `true` if the open state changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Handle returned by [`DisclosureController::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type ContextFn = Box<dyn FnMut(SectionContext)>;

/// Most disclosures have one or two views watching them.
const INLINE_SUBSCRIBERS: usize = 2;

#[derive(Copy, Clone, Debug)]
enum Proposal {
    Discard,
    Redundant,
    Propose(bool),
}

/// Open/closed state for one disclosure widget.
///
/// `B` is the boundary type used for outside-click detection; use `()` when
/// the disclosure never receives outside clicks.
pub struct DisclosureController<B> {
    is_open: bool,
    config: DisclosureConfig,
    boundary: Option<B>,
    revision: u64,
    subscribers: SmallVec<[(SubscriptionId, ContextFn); INLINE_SUBSCRIBERS]>,
    next_subscription: u32,
}

impl<B> core::fmt::Debug for DisclosureController<B>
where
    B: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisclosureController")
            .field("is_open", &self.is_open)
            .field("config", &self.config)
            .field("boundary", &self.boundary)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<B> DisclosureController<B> {
    /// Creates a controller; the initial state is resolved from `config`.
    #[must_use]
    pub fn new(config: DisclosureConfig) -> Self {
        Self {
            is_open: config.initial_open(),
            config,
            boundary: None,
            revision: 0,
            subscribers: SmallVec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the current open state.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Returns `true` if the owner controls the open state.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.config.is_controlled()
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    /// Returns a counter that increases whenever the context value changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the boundary used for outside-click detection.
    #[must_use]
    pub fn boundary(&self) -> Option<&B> {
        self.boundary.as_ref()
    }

    /// Assigns or clears the boundary, returning the previous one.
    ///
    /// Without a boundary every click counts as outside.
    pub fn set_boundary(&mut self, boundary: Option<B>) -> Option<B> {
        core::mem::replace(&mut self.boundary, boundary)
    }

    /// Proposes opening, bypassing gates. No-op if already open.
    pub fn open(&mut self, observer: impl DisclosureObserver) -> Outcome {
        self.traced(&mut ()).open(observer)
    }

    /// Proposes closing, bypassing gates. No-op if already closed.
    pub fn close(&mut self, observer: impl DisclosureObserver) -> Outcome {
        self.traced(&mut ()).close(observer)
    }

    /// The header was clicked: proposes toggling.
    pub fn header_click(&mut self, observer: impl DisclosureObserver) -> Outcome {
        self.traced(&mut ()).header_click(observer)
    }

    /// The section was clicked: proposes closing.
    pub fn section_click(&mut self, observer: impl DisclosureObserver) -> Outcome {
        self.traced(&mut ()).section_click(observer)
    }

    /// A click landed on `target`: proposes closing if it is outside the boundary.
    pub fn outside_click<T>(&mut self, target: &T, observer: impl DisclosureObserver) -> Outcome
    where
        B: Boundary<T>,
    {
        self.traced(&mut ()).outside_click(target, observer)
    }

    /// A key was released: proposes closing if it is Escape.
    pub fn key_up(&mut self, key: &Key, observer: impl DisclosureObserver) -> Outcome {
        self.traced(&mut ()).key_up(key, observer)
    }

    /// A keyboard event arrived: only key releases reach [`key_up`](Self::key_up).
    ///
    /// Presses and auto-repeats are discarded, so holding Escape closes the
    /// disclosure once, on release.
    pub fn keyboard(
        &mut self,
        event: &KeyboardEvent,
        observer: impl DisclosureObserver,
    ) -> Outcome {
        self.traced(&mut ()).keyboard(event, observer)
    }

    /// Borrows the controller with a trace sink attached.
    ///
    /// ```rust
    /// use ui_events::keyboard::{Key, NamedKey};
    /// use understory_disclosure::{
    ///     DisclosureConfig, DisclosureController, EventSource, Outcome, TransitionLog,
    /// };
    ///
    /// let mut dropdown = DisclosureController::<()>::new(DisclosureConfig::new());
    /// let mut log = TransitionLog::new();
    ///
    /// dropdown.traced(&mut log).header_click(());
    /// dropdown.traced(&mut log).key_up(&Key::Named(NamedKey::Enter), ());
    ///
    /// assert_eq!(log.records()[1].outcome, Outcome::Discarded);
    /// assert_eq!(log.last_applied().unwrap().source, EventSource::HeaderClick);
    /// ```
    pub fn traced<'a, R>(&'a mut self, trace: &'a mut R) -> Traced<'a, B, R>
    where
        R: TransitionTrace + ?Sized,
    {
        Traced {
            controller: self,
            trace,
        }
    }

    /// Forwards a new controlled value from the owner.
    ///
    /// If `open` is present and differs from the previously supplied value, the
    /// state is forced to it. No gates are consulted and no observers are
    /// notified. Returns `true` if the state changed.
    pub fn update_controlled(&mut self, open: Option<bool>) -> bool {
        let previous = core::mem::replace(&mut self.config.open, open);
        match open {
            Some(open) if Some(open) != previous => self.set_open(open),
            _ => false,
        }
    }

    /// Replaces the configuration, as on a props change.
    ///
    /// The `open` field is forwarded as in [`update_controlled`](Self::update_controlled);
    /// `default_open` only matters at construction and is ignored here.
    /// Returns `true` if the context value changed.
    pub fn update_config(&mut self, config: DisclosureConfig) -> bool {
        let previous = core::mem::replace(&mut self.config, config);
        let open_changed = match config.open {
            Some(open) if Some(open) != previous.open => self.set_open(open),
            _ => false,
        };
        let disabled_changed = previous.disabled != config.disabled;
        if disabled_changed && !open_changed {
            self.bump();
        }
        open_changed || disabled_changed
    }

    /// Returns the value descendant views read.
    #[must_use]
    pub fn section_context(&self) -> SectionContext {
        SectionContext {
            is_open: self.is_open,
            is_disabled: self.config.disabled,
        }
    }

    /// Borrows the controller as a context object for descendant views.
    pub fn context<O>(&mut self, observer: O) -> DisclosureContext<'_, B, O>
    where
        O: DisclosureObserver,
    {
        DisclosureContext::new(self, observer)
    }

    /// Registers `f` to receive the context value after every change.
    pub fn subscribe(&mut self, f: impl FnMut(SectionContext) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn settle<O, R>(
        &mut self,
        source: EventSource,
        proposal: Proposal,
        mut observer: O,
        trace: &mut R,
    ) -> Outcome
    where
        O: DisclosureObserver,
        R: TransitionTrace + ?Sized,
    {
        let (proposed, outcome) = match proposal {
            Proposal::Discard => (None, Outcome::Discarded),
            Proposal::Redundant => (Some(self.is_open), Outcome::Redundant),
            Proposal::Propose(open) => {
                if open {
                    observer.on_open(source);
                } else {
                    observer.on_close(source);
                }
                observer.on_toggle(open, source);

                let applied = !self.is_controlled() && self.set_open(open);
                (
                    Some(open),
                    if applied {
                        Outcome::Applied
                    } else {
                        Outcome::Notified
                    },
                )
            }
        };
        trace.record(TransitionRecord {
            source,
            proposed,
            outcome,
            is_open: self.is_open,
        });
        outcome
    }

    fn gated(&self, source: EventSource, proposal: Proposal) -> Proposal {
        if self.config.gates.allows(source) {
            proposal
        } else {
            Proposal::Discard
        }
    }

    fn set_open(&mut self, open: bool) -> bool {
        if self.is_open == open {
            return false;
        }
        self.is_open = open;
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.revision += 1;
        let value = self.section_context();
        for (_, f) in &mut self.subscribers {
            f(value);
        }
    }
}

impl<B> Default for DisclosureController<B> {
    fn default() -> Self {
        Self::new(DisclosureConfig::default())
    }
}

/// A [`DisclosureController`] borrowed together with a [`TransitionTrace`].
///
/// Created by [`DisclosureController::traced`]; every trigger evaluated through
/// it produces exactly one [`TransitionRecord`].
pub struct Traced<'a, B, R: ?Sized> {
    controller: &'a mut DisclosureController<B>,
    trace: &'a mut R,
}

impl<B, R> core::fmt::Debug for Traced<'_, B, R>
where
    B: core::fmt::Debug,
    R: ?Sized,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Traced")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl<B, R> Traced<'_, B, R>
where
    R: TransitionTrace + ?Sized,
{
    /// See [`DisclosureController::open`].
    pub fn open(&mut self, observer: impl DisclosureObserver) -> Outcome {
        self.manual(true, observer)
    }

    /// See [`DisclosureController::close`].
    pub fn close(&mut self, observer: impl DisclosureObserver) -> Outcome {
        self.manual(false, observer)
    }

    /// See [`DisclosureController::header_click`].
    pub fn header_click(&mut self, observer: impl DisclosureObserver) -> Outcome {
        let c = &mut *self.controller;
        let proposal = c.gated(EventSource::HeaderClick, Proposal::Propose(!c.is_open));
        c.settle(EventSource::HeaderClick, proposal, observer, &mut *self.trace)
    }

    /// See [`DisclosureController::section_click`].
    pub fn section_click(&mut self, observer: impl DisclosureObserver) -> Outcome {
        let c = &mut *self.controller;
        let proposal = c.gated(EventSource::SectionClick, Proposal::Propose(false));
        c.settle(EventSource::SectionClick, proposal, observer, &mut *self.trace)
    }

    /// See [`DisclosureController::outside_click`].
    pub fn outside_click<T>(&mut self, target: &T, observer: impl DisclosureObserver) -> Outcome
    where
        B: Boundary<T>,
    {
        let c = &mut *self.controller;
        let inside = c.boundary.as_ref().is_some_and(|b| b.contains(target));
        let proposal = if inside {
            Proposal::Discard
        } else {
            Proposal::Propose(false)
        };
        let proposal = c.gated(EventSource::OutsideClick, proposal);
        c.settle(EventSource::OutsideClick, proposal, observer, &mut *self.trace)
    }

    /// See [`DisclosureController::key_up`].
    pub fn key_up(&mut self, key: &Key, observer: impl DisclosureObserver) -> Outcome {
        let c = &mut *self.controller;
        let proposal = if matches!(key, Key::Named(NamedKey::Escape)) {
            Proposal::Propose(false)
        } else {
            Proposal::Discard
        };
        let proposal = c.gated(EventSource::EscapeClick, proposal);
        c.settle(EventSource::EscapeClick, proposal, observer, &mut *self.trace)
    }

    /// See [`DisclosureController::keyboard`].
    pub fn keyboard(
        &mut self,
        event: &KeyboardEvent,
        observer: impl DisclosureObserver,
    ) -> Outcome {
        if event.state == KeyState::Up {
            self.key_up(&event.key, observer)
        } else {
            let c = &mut *self.controller;
            c.settle(EventSource::EscapeClick, Proposal::Discard, observer, &mut *self.trace)
        }
    }

    fn manual(&mut self, open: bool, observer: impl DisclosureObserver) -> Outcome {
        let c = &mut *self.controller;
        let proposal = if c.is_open == open {
            Proposal::Redundant
        } else {
            Proposal::Propose(open)
        };
        c.settle(EventSource::ManualTrigger, proposal, observer, &mut *self.trace)
    }
}
