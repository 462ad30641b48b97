// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_disclosure_listeners --heading-base-level=0

//! Understory Disclosure Listeners: shared window-level listeners for disclosures.
//!
//! Dropdowns close when the user clicks elsewhere or presses Escape. Those
//! events arrive at the window, not at the dropdown, so something has to
//! subscribe once and fan them out to every open widget. This crate is that
//! something.
//!
//! [`Disclosures`] owns the mounted [`DisclosureController`]s, keyed by a
//! generational [`DisclosureId`], together with each instance's observer. It
//! installs the window listeners through a [`ListenerHost`] when the first
//! disclosure mounts and removes them when the last one unmounts, so repeated
//! mount/unmount cycles never leak or duplicate subscriptions.
//!
//! Fan-out is read-only infrastructure: the registry hands each event to each
//! instance and every instance applies its own gate and its own boundary.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_disclosure::{DisclosureConfig, Outcome, Recorder};
//! use understory_disclosure_listeners::{CountingHost, Disclosures};
//!
//! let mut registry = Disclosures::<Rect, Recorder, _>::new(CountingHost::default());
//!
//! let menu = registry.mount(DisclosureConfig::new(), Recorder::new());
//! registry.set_boundary(menu, Some(Rect::new(0.0, 0.0, 120.0, 200.0)));
//! assert!(registry.host().is_attached());
//!
//! registry.header_click(menu);
//! assert_eq!(registry.is_open(menu), Some(true));
//!
//! // A click inside the menu leaves it open.
//! let inside = registry.dispatch_click(&Point::new(10.0, 10.0));
//! assert_eq!(inside[0], (menu, Outcome::Discarded));
//!
//! // A click elsewhere closes it.
//! registry.dispatch_click(&Point::new(400.0, 10.0));
//! assert_eq!(registry.is_open(menu), Some(false));
//!
//! registry.unmount(menu);
//! assert!(!registry.host().is_attached());
//! ```
//!
//! ## Hosts
//!
//! - `()`: events are delivered by calling [`Disclosures::dispatch_click`] and
//!   [`Disclosures::dispatch_key_up`] (or [`Disclosures::dispatch_keyboard`])
//!   directly; attach/detach are no-ops.
//! - [`Unsupported`]: an environment without window listeners (for example
//!   server-side rendering). Nothing is ever routed.
//! - [`CountingHost`]: counts attach/detach calls.
//!
//! Implement [`ListenerHost`] to hook real platform subscriptions.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`DisclosureController`]: understory_disclosure::DisclosureController

#![no_std]

extern crate alloc;

mod host;
mod registry;

pub use host::{CountingHost, ListenerHost, Unsupported};
pub use registry::{DisclosureId, Disclosures, Dispatched, Mounted};
