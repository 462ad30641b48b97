// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment the shared listeners are installed into.

/// A host that can subscribe to window-level click and key-up events.
///
/// The registry calls [`attach`](Self::attach) when the first disclosure
/// mounts and [`detach`](Self::detach) when the last one unmounts. Calls are
/// strictly paired: the host never sees two attaches in a row.
pub trait ListenerHost {
    /// Whether this environment can install window-level listeners at all.
    ///
    /// Queried once, when the registry is created. Headless or server-side
    /// hosts return `false`, and nothing is ever routed.
    fn supports_listeners(&self) -> bool {
        true
    }

    /// Install the click and key-up subscriptions.
    fn attach(&mut self);

    /// Remove the click and key-up subscriptions.
    fn detach(&mut self);
}

/// A host whose events are delivered by calling the registry directly.
impl ListenerHost for () {
    fn attach(&mut self) {}

    fn detach(&mut self) {}
}

impl<H> ListenerHost for &mut H
where
    H: ListenerHost + ?Sized,
{
    fn supports_listeners(&self) -> bool {
        (**self).supports_listeners()
    }

    fn attach(&mut self) {
        (**self).attach();
    }

    fn detach(&mut self) {
        (**self).detach();
    }
}

/// A host without window-level listeners, e.g. server-side rendering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Unsupported;

impl ListenerHost for Unsupported {
    fn supports_listeners(&self) -> bool {
        false
    }

    fn attach(&mut self) {}

    fn detach(&mut self) {}
}

/// A host that counts attach/detach calls, for tests and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CountingHost {
    /// Number of [`ListenerHost::attach`] calls.
    pub attaches: u32,
    /// Number of [`ListenerHost::detach`] calls.
    pub detaches: u32,
}

impl CountingHost {
    /// Returns `true` while listeners are installed.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attaches > self.detaches
    }
}

impl ListenerHost for CountingHost {
    fn attach(&mut self) {
        self.attaches += 1;
    }

    fn detach(&mut self) {
        self.detaches += 1;
    }
}
