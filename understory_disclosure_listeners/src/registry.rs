// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of mounted disclosures and the shared listener lifecycle.

use alloc::vec::Vec;

use smallvec::SmallVec;
use ui_events::keyboard::{Key, KeyboardEvent};
use understory_disclosure::{
    Boundary, DisclosureConfig, DisclosureContext, DisclosureController, DisclosureObserver,
    Outcome,
};

use crate::ListenerHost;

/// Identifier for a mounted disclosure.
///
/// A small, copyable handle consisting of a slot index and a generation
/// counter. When a disclosure is unmounted its slot is freed; reusing the slot
/// increments the generation, so a stale `DisclosureId` never aliases a newer
/// mount. Every registry method taking an id treats a stale id as absent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DisclosureId {
    idx: u32,
    generation: u32,
}

/// Per-instance outcomes of one fanned-out event, in mount order.
pub type Dispatched = SmallVec<[(DisclosureId, Outcome); 4]>;

/// A disclosure owned by the registry, with the owner's observer.
#[derive(Debug)]
pub struct Mounted<B, O> {
    /// The state machine.
    pub controller: DisclosureController<B>,
    /// Receives this instance's notifications.
    pub observer: O,
}

#[derive(Debug)]
struct Slot<B, O> {
    generation: u32,
    entry: Option<Mounted<B, O>>,
}

/// Mounted disclosures sharing one set of window-level listeners.
///
/// `B` is the boundary type, `O` the observer type, and `H` the
/// [`ListenerHost`]. Listeners are attached while at least one disclosure is
/// mounted and the host supports them; window events are then fanned out to
/// every mounted instance, each of which evaluates its own gate and boundary.
#[derive(Debug)]
pub struct Disclosures<B, O, H>
where
    H: ListenerHost,
{
    host: H,
    supported: bool,
    attached: bool,
    slots: Vec<Slot<B, O>>,
    free: Vec<u32>,
    /// Live slot indices in mount order.
    order: Vec<u32>,
}

impl<B, O, H> Disclosures<B, O, H>
where
    O: DisclosureObserver,
    H: ListenerHost,
{
    /// Creates an empty registry, probing `host` for listener support once.
    pub fn new(host: H) -> Self {
        let supported = host.supports_listeners();
        Self {
            host,
            supported,
            attached: false,
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Returns the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns `true` if the host reported listener support.
    pub fn supports_listeners(&self) -> bool {
        self.supported
    }

    /// Returns `true` while the shared listeners are installed.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns the number of mounted disclosures.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if `id` refers to a mounted disclosure.
    pub fn contains(&self, id: DisclosureId) -> bool {
        self.get(id).is_some()
    }

    /// Mounts a disclosure and returns its id.
    ///
    /// The initial state is resolved from `config`. The first mount attaches
    /// the shared listeners.
    pub fn mount(&mut self, config: DisclosureConfig, observer: O) -> DisclosureId {
        let entry = Mounted {
            controller: DisclosureController::new(config),
            observer,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.entry = Some(entry);
                DisclosureId {
                    idx,
                    generation: slot.generation,
                }
            }
            None => {
                let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
                self.slots.push(Slot {
                    generation: 1,
                    entry: Some(entry),
                });
                DisclosureId { idx, generation: 1 }
            }
        };
        self.order.push(id.idx);
        self.sync_listeners();
        id
    }

    /// Unmounts a disclosure, returning it with its boundary cleared.
    ///
    /// The last unmount detaches the shared listeners. Stale ids return `None`
    /// and change nothing.
    pub fn unmount(&mut self, id: DisclosureId) -> Option<Mounted<B, O>> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let mut entry = slot.entry.take()?;
        entry.controller.set_boundary(None);
        self.free.push(id.idx);
        self.order.retain(|&idx| idx != id.idx);
        self.sync_listeners();
        Some(entry)
    }

    /// Returns a mounted disclosure.
    pub fn get(&self, id: DisclosureId) -> Option<&Mounted<B, O>> {
        let slot = self.slots.get(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    /// Returns a mounted disclosure mutably.
    pub fn get_mut(&mut self, id: DisclosureId) -> Option<&mut Mounted<B, O>> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Returns the open state of a mounted disclosure.
    pub fn is_open(&self, id: DisclosureId) -> Option<bool> {
        self.get(id).map(|m| m.controller.is_open())
    }

    /// Iterates mounted disclosures in mount order.
    pub fn iter(&self) -> impl Iterator<Item = (DisclosureId, &Mounted<B, O>)> + '_ {
        self.order.iter().filter_map(|&idx| {
            let slot = &self.slots[idx as usize];
            let id = DisclosureId {
                idx,
                generation: slot.generation,
            };
            slot.entry.as_ref().map(|m| (id, m))
        })
    }

    /// Assigns or clears the boundary of a mounted disclosure.
    ///
    /// Returns `false` for a stale id.
    pub fn set_boundary(&mut self, id: DisclosureId, boundary: Option<B>) -> bool {
        match self.get_mut(id) {
            Some(m) => {
                m.controller.set_boundary(boundary);
                true
            }
            None => false,
        }
    }

    /// Forwards a props change; see [`DisclosureController::update_config`].
    pub fn update_config(&mut self, id: DisclosureId, config: DisclosureConfig) -> Option<bool> {
        self.get_mut(id).map(|m| m.controller.update_config(config))
    }

    /// Replaces the observer of a mounted disclosure, returning the old one.
    pub fn set_observer(&mut self, id: DisclosureId, observer: O) -> Option<O> {
        self.get_mut(id)
            .map(|m| core::mem::replace(&mut m.observer, observer))
    }

    /// See [`DisclosureController::open`].
    pub fn open(&mut self, id: DisclosureId) -> Option<Outcome> {
        self.get_mut(id)
            .map(|m| m.controller.open(&mut m.observer))
    }

    /// See [`DisclosureController::close`].
    pub fn close(&mut self, id: DisclosureId) -> Option<Outcome> {
        self.get_mut(id)
            .map(|m| m.controller.close(&mut m.observer))
    }

    /// See [`DisclosureController::header_click`].
    pub fn header_click(&mut self, id: DisclosureId) -> Option<Outcome> {
        self.get_mut(id)
            .map(|m| m.controller.header_click(&mut m.observer))
    }

    /// See [`DisclosureController::section_click`].
    pub fn section_click(&mut self, id: DisclosureId) -> Option<Outcome> {
        self.get_mut(id)
            .map(|m| m.controller.section_click(&mut m.observer))
    }

    /// Borrows a mounted disclosure as a context object for its views.
    pub fn context(&mut self, id: DisclosureId) -> Option<DisclosureContext<'_, B, &mut O>> {
        self.get_mut(id)
            .map(|m| m.controller.context(&mut m.observer))
    }

    /// Routes a window-level click to every mounted disclosure.
    ///
    /// Each instance proposes closing if `target` is outside its own boundary
    /// and its outside-click gate is open. Nothing is routed while the
    /// listeners are detached.
    pub fn dispatch_click<T>(&mut self, target: &T) -> Dispatched
    where
        B: Boundary<T>,
    {
        self.fan_out(|m| m.controller.outside_click(target, &mut m.observer))
    }

    /// Routes a window-level key release to every mounted disclosure.
    ///
    /// Each instance checks the key identity and its own Escape gate. Nothing
    /// is routed while the listeners are detached.
    pub fn dispatch_key_up(&mut self, key: &Key) -> Dispatched {
        self.fan_out(|m| m.controller.key_up(key, &mut m.observer))
    }

    /// Routes a window-level keyboard event to every mounted disclosure.
    ///
    /// Only releases are acted on; see [`DisclosureController::keyboard`].
    pub fn dispatch_keyboard(&mut self, event: &KeyboardEvent) -> Dispatched {
        self.fan_out(|m| m.controller.keyboard(event, &mut m.observer))
    }

    fn fan_out(&mut self, mut f: impl FnMut(&mut Mounted<B, O>) -> Outcome) -> Dispatched {
        let mut out = Dispatched::new();
        if !self.attached {
            return out;
        }
        for &idx in &self.order {
            let slot = &mut self.slots[idx as usize];
            let generation = slot.generation;
            if let Some(m) = slot.entry.as_mut() {
                out.push((DisclosureId { idx, generation }, f(m)));
            }
        }
        out
    }

    fn sync_listeners(&mut self) {
        let want = self.supported && !self.order.is_empty();
        if want && !self.attached {
            self.host.attach();
            self.attached = true;
        } else if !want && self.attached {
            self.host.detach();
            self.attached = false;
        }
    }
}

impl<B, O, H> Drop for Disclosures<B, O, H>
where
    H: ListenerHost,
{
    fn drop(&mut self) {
        if self.attached {
            self.host.detach();
        }
    }
}
