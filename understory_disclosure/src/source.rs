// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Why a disclosure changed (or was asked to change).

/// Tag carried with every open/close notification.
///
/// Observers use this to tell apart "the user clicked away" from "the caller
/// closed it programmatically". The discriminants are stable and can be used
/// as a compact encoding via [`EventSource::to_raw`] and [`EventSource::from_raw`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventSource {
    /// The header (trigger) element was clicked.
    HeaderClick = 8,
    /// The section (content) element was clicked.
    SectionClick = 16,
    /// A click landed outside the disclosure's boundary.
    OutsideClick = 24,
    /// The Escape key was released.
    EscapeClick = 32,
    /// [`open`](crate::DisclosureController::open) or
    /// [`close`](crate::DisclosureController::close) was called.
    ManualTrigger = 64,
}

impl EventSource {
    /// All sources, in discriminant order.
    pub const ALL: [Self; 5] = [
        Self::HeaderClick,
        Self::SectionClick,
        Self::OutsideClick,
        Self::EscapeClick,
        Self::ManualTrigger,
    ];

    /// Returns the stable raw discriminant.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        self as u8
    }

    /// Decodes a raw discriminant produced by [`EventSource::to_raw`].
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            8 => Some(Self::HeaderClick),
            16 => Some(Self::SectionClick),
            24 => Some(Self::OutsideClick),
            32 => Some(Self::EscapeClick),
            64 => Some(Self::ManualTrigger),
            _ => None,
        }
    }

    /// Returns `true` for sources that come from user interaction rather than an API call.
    #[must_use]
    pub const fn is_interaction(self) -> bool {
        !matches!(self, Self::ManualTrigger)
    }
}
