// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_disclosure --heading-base-level=0

//! Understory Disclosure: open/closed state for dropdowns, accordions, and popovers.
//!
//! This crate is the behavior half of a disclosure widget. It tracks whether
//! the widget is open, decides when an interaction should change that, and
//! tells observers about it. It does not render anything, hit test, or own an
//! event loop; the host feeds it clicks and key releases and reads back the
//! state.
//!
//! The core type is [`DisclosureController`]. Interaction triggers
//! ([`header_click`](DisclosureController::header_click),
//! [`section_click`](DisclosureController::section_click),
//! [`outside_click`](DisclosureController::outside_click),
//! [`key_up`](DisclosureController::key_up)) are each guarded by one of the
//! [`Gates`] in the [`DisclosureConfig`]. Keys are `ui_events` keys; only
//! `Key::Named(NamedKey::Escape)` closes, and
//! [`keyboard`](DisclosureController::keyboard) accepts a whole
//! `ui_events::keyboard::KeyboardEvent`, acting on releases only. Programmatic
//! [`open`](DisclosureController::open) and
//! [`close`](DisclosureController::close) calls bypass the gates and only
//! skip when the state already matches.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_disclosure::{
//!     DisclosureConfig, DisclosureController, EventSource, Notification, Recorder,
//! };
//!
//! let mut dropdown = DisclosureController::<()>::new(DisclosureConfig::new());
//! let mut seen = Recorder::new();
//!
//! dropdown.header_click(&mut seen);
//! assert!(dropdown.is_open());
//!
//! dropdown.header_click(&mut seen);
//! assert!(!dropdown.is_open());
//!
//! assert_eq!(seen.notifications(), &[
//!     Notification::Open(EventSource::HeaderClick),
//!     Notification::Toggle(true, EventSource::HeaderClick),
//!     Notification::Close(EventSource::HeaderClick),
//!     Notification::Toggle(false, EventSource::HeaderClick),
//! ]);
//! ```
//!
//! ## Controlled and uncontrolled
//!
//! Without [`DisclosureConfig::open`] the controller owns the boolean and
//! applies accepted proposals itself. With it, the owner owns the boolean:
//! the controller still notifies observers of every accepted proposal, but the
//! state only moves when the owner supplies a new value through
//! [`DisclosureController::update_config`]. Notification and mutation are
//! separate steps so a controlling owner can veto a transition without the
//! internal state drifting from the value it supplied.
//!
//! ## Outside clicks
//!
//! Outside-click detection asks the controller's [`Boundary`] whether the
//! click target is contained. Targets are whatever the host resolves clicks
//! to: node identifiers ([`AncestorBoundary`] over a [`ParentLookup`]),
//! points (Kurbo shapes with the `kurbo` feature), or anything a closure can
//! test. A controller without a boundary treats every click as outside.
//!
//! Routing window-level clicks and key releases to every mounted disclosure is
//! the job of `understory_disclosure_listeners`.
//!
//! ## Views
//!
//! Descendant header and section views read a [`SectionContext`] and forward
//! clicks through a [`DisclosureContext`]. Whether a section renders, and with
//! which [`SectionModifiers`], is a pure function of the context value.
//!
//! ## Tracing
//!
//! [`DisclosureController::traced`] attaches a [`TransitionTrace`] sink that
//! receives one [`TransitionRecord`] per evaluated trigger, including
//! discarded ones. [`TransitionLog`] keeps them for inspection.
//!
//! ## Features
//!
//! - `std` (default): Forward `std` to Kurbo when `kurbo` is enabled.
//! - `libm`: Forward `libm` to Kurbo for `no_std` builds.
//! - `kurbo`: [`Boundary`] impls for Kurbo shapes over points.
//! - `hashbrown`: [`ParentLookup`] over `hashbrown::HashMap`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod boundary;
mod config;
mod context;
mod controller;
mod observer;
mod source;
mod trace;

pub use boundary::{AncestorBoundary, Boundary, ParentLookup};
pub use config::{DisclosureConfig, Gates};
pub use context::{DisclosureContext, SectionContext, SectionModifiers};
pub use controller::{DisclosureController, Outcome, SubscriptionId, Traced};
pub use observer::{Callbacks, DisclosureObserver, Notification, Recorder};
pub use source::EventSource;
pub use trace::{TransitionLog, TransitionRecord, TransitionTrace};
