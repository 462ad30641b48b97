// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What descendant views see of a disclosure.
//!
//! Header and section views do not hold the controller directly. The owner
//! hands them a [`DisclosureContext`] (an explicit context object scoped to
//! one render pass) or a [`SectionContext`] snapshot delivered through
//! [`DisclosureController::subscribe`](crate::DisclosureController::subscribe).
//!
//! Whether a section renders is a pure function of its [`SectionContext`]:
//! [`SectionContext::render`] returns `None` while closed, otherwise the
//! [`SectionModifiers`] to apply.
//!
//! ```rust
//! use understory_disclosure::{
//!     DisclosureConfig, DisclosureController, Gates, Outcome, SectionModifiers,
//! };
//!
//! let mut dropdown = DisclosureController::<()>::new(
//!     DisclosureConfig::new().with_gate(Gates::CLOSE_ON_SECTION_CLICK, true),
//! );
//!
//! let mut cx = dropdown.context(());
//! assert_eq!(cx.render_section(), None);
//!
//! cx.on_header_click();
//! assert_eq!(cx.render_section(), Some(SectionModifiers::OPEN));
//!
//! // A click inside the section forwards to the controller, which applies its gate.
//! assert_eq!(cx.on_section_click(), Outcome::Applied);
//! assert!(!dropdown.is_open());
//! ```

use crate::{DisclosureController, DisclosureObserver, Outcome};

bitflags::bitflags! {
    /// State modifiers a view maps to classes or styles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SectionModifiers: u8 {
        /// The disclosure is open.
        const OPEN     = 0b0000_0001;
        /// The disclosure is closed.
        const CLOSED   = 0b0000_0010;
        /// The disclosure is disabled.
        const DISABLED = 0b0000_0100;
    }
}

impl SectionModifiers {
    /// Modifiers for a state: exactly one of `OPEN`/`CLOSED`, plus `DISABLED`.
    #[must_use]
    pub fn for_state(is_open: bool, is_disabled: bool) -> Self {
        let mut modifiers = if is_open { Self::OPEN } else { Self::CLOSED };
        modifiers.set(Self::DISABLED, is_disabled);
        modifiers
    }
}

/// Snapshot of a disclosure's state as seen by descendant views.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SectionContext {
    /// Whether the disclosure is open.
    pub is_open: bool,
    /// Whether the disclosure is disabled.
    pub is_disabled: bool,
}

impl SectionContext {
    /// Returns the modifiers for this state, whether or not the section renders.
    #[must_use]
    pub fn modifiers(&self) -> SectionModifiers {
        SectionModifiers::for_state(self.is_open, self.is_disabled)
    }

    /// Returns `None` if the section renders nothing, otherwise its modifiers.
    #[must_use]
    pub fn render(&self) -> Option<SectionModifiers> {
        self.is_open.then(|| self.modifiers())
    }
}

/// A controller borrowed for one render pass, with the owner's observer.
///
/// Views read state and forward their clicks here; gating and notification
/// stay with the controller.
pub struct DisclosureContext<'a, B, O> {
    controller: &'a mut DisclosureController<B>,
    observer: O,
}

impl<B, O> core::fmt::Debug for DisclosureContext<'_, B, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisclosureContext")
            .field("value", &self.value())
            .finish_non_exhaustive()
    }
}

impl<'a, B, O> DisclosureContext<'a, B, O>
where
    O: DisclosureObserver,
{
    pub(crate) fn new(controller: &'a mut DisclosureController<B>, observer: O) -> Self {
        Self {
            controller,
            observer,
        }
    }

    /// Forwards a header click.
    pub fn on_header_click(&mut self) -> Outcome {
        self.controller.header_click(&mut self.observer)
    }

    /// Forwards a section click.
    pub fn on_section_click(&mut self) -> Outcome {
        self.controller.section_click(&mut self.observer)
    }
}

impl<B, O> DisclosureContext<'_, B, O> {
    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> SectionContext {
        self.controller.section_context()
    }

    /// Returns whether the disclosure is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Returns whether the disclosure is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.controller.config().disabled
    }

    /// See [`SectionContext::render`].
    #[must_use]
    pub fn render_section(&self) -> Option<SectionModifiers> {
        self.value().render()
    }

    /// Returns the observer, e.g. to drain a [`Recorder`](crate::Recorder).
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
