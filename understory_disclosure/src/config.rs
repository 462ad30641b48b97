// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owner-supplied configuration: initial/controlled state and trigger gates.

use crate::EventSource;

bitflags::bitflags! {
    /// Which interaction triggers may propose a transition.
    ///
    /// A trigger whose gate is unset is discarded before any notification.
    /// Manual [`open`](crate::DisclosureController::open) and
    /// [`close`](crate::DisclosureController::close) calls are never gated.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Gates: u8 {
        /// A header click toggles the disclosure.
        const TOGGLE_ON_HEADER_CLICK = 0b0000_0001;
        /// A section click closes the disclosure.
        const CLOSE_ON_SECTION_CLICK = 0b0000_0010;
        /// A click outside the boundary closes the disclosure.
        const CLOSE_ON_OUTSIDE_CLICK = 0b0000_0100;
        /// Releasing the Escape key closes the disclosure.
        const CLOSE_ON_ESCAPE        = 0b0000_1000;
    }
}

impl Default for Gates {
    /// Header toggles; outside click and Escape close; section click does nothing.
    fn default() -> Self {
        Self::TOGGLE_ON_HEADER_CLICK | Self::CLOSE_ON_OUTSIDE_CLICK | Self::CLOSE_ON_ESCAPE
    }
}

impl Gates {
    /// Returns the gate guarding `source`, or `None` for ungated manual calls.
    #[must_use]
    pub const fn for_source(source: EventSource) -> Option<Self> {
        match source {
            EventSource::HeaderClick => Some(Self::TOGGLE_ON_HEADER_CLICK),
            EventSource::SectionClick => Some(Self::CLOSE_ON_SECTION_CLICK),
            EventSource::OutsideClick => Some(Self::CLOSE_ON_OUTSIDE_CLICK),
            EventSource::EscapeClick => Some(Self::CLOSE_ON_ESCAPE),
            EventSource::ManualTrigger => None,
        }
    }

    /// Returns `true` if a proposal from `source` may proceed.
    #[must_use]
    pub const fn allows(self, source: EventSource) -> bool {
        match Self::for_source(source) {
            Some(gate) => self.contains(gate),
            None => true,
        }
    }
}

/// Configuration for a [`DisclosureController`](crate::DisclosureController).
///
/// Mirrors what the owning view passes on each render. `open` selects
/// controlled mode: while it is `Some`, the controller only proposes and
/// notifies, and the owner feeds the new value back through
/// [`update_config`](crate::DisclosureController::update_config).
///
/// ```rust
/// use understory_disclosure::{DisclosureConfig, Gates};
///
/// let config = DisclosureConfig::default()
///     .with_default_open(true)
///     .with_gate(Gates::CLOSE_ON_SECTION_CLICK, true)
///     .with_gate(Gates::CLOSE_ON_ESCAPE, false);
///
/// assert!(config.initial_open());
/// assert!(!config.is_controlled());
/// assert!(config.gates.contains(Gates::CLOSE_ON_SECTION_CLICK));
/// assert!(!config.gates.contains(Gates::CLOSE_ON_ESCAPE));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisclosureConfig {
    /// Initial state for an uncontrolled disclosure.
    pub default_open: Option<bool>,
    /// Controlled state; overrides `default_open` when present.
    pub open: Option<bool>,
    /// Enabled interaction triggers.
    pub gates: Gates,
    /// Presentational disabled flag surfaced through the context value.
    pub disabled: bool,
}

impl DisclosureConfig {
    /// Creates an uncontrolled, initially closed configuration with default gates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controlled configuration.
    #[must_use]
    pub fn controlled(open: bool) -> Self {
        Self::default().with_open(Some(open))
    }

    /// Sets the uncontrolled initial state.
    #[must_use]
    pub fn with_default_open(mut self, default_open: bool) -> Self {
        self.default_open = Some(default_open);
        self
    }

    /// Sets or clears the controlled state.
    #[must_use]
    pub fn with_open(mut self, open: Option<bool>) -> Self {
        self.open = open;
        self
    }

    /// Replaces the whole gate set.
    #[must_use]
    pub fn with_gates(mut self, gates: Gates) -> Self {
        self.gates = gates;
        self
    }

    /// Enables or disables a single gate.
    #[must_use]
    pub fn with_gate(mut self, gate: Gates, enabled: bool) -> Self {
        self.gates.set(gate, enabled);
        self
    }

    /// Sets the disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Returns `true` if the owner controls the open state.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.open.is_some()
    }

    /// Resolves the state at construction: `open`, else `default_open`, else `false`.
    #[must_use]
    pub fn initial_open(&self) -> bool {
        self.open.or(self.default_open).unwrap_or(false)
    }
}
