// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_disclosure_listeners` crate.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Circle, Point, Rect};
use ui_events::keyboard::{Key, KeyState, KeyboardEvent, NamedKey};
use understory_disclosure::{Callbacks, DisclosureConfig, EventSource, Outcome};
use understory_disclosure_listeners::{CountingHost, Disclosures, ListenerHost};

#[test]
fn mount_unmount_cycles_keep_one_subscription() {
    let mut host = CountingHost::default();
    {
        let mut reg = Disclosures::<Rect, (), _>::new(&mut host);
        for _ in 0..5 {
            let a = reg.mount(DisclosureConfig::new(), ());
            let b = reg.mount(DisclosureConfig::new(), ());
            reg.unmount(b);
            reg.unmount(a);
        }
        assert!(!reg.is_attached());
    }
    assert_eq!(host, CountingHost { attaches: 5, detaches: 5 });
}

#[test]
fn dropping_an_attached_registry_detaches() {
    let mut host = CountingHost::default();
    {
        let mut reg = Disclosures::<Rect, (), _>::new(&mut host);
        reg.mount(DisclosureConfig::new(), ());
        reg.mount(DisclosureConfig::new(), ());
    }
    assert!(!host.is_attached());
    assert_eq!(host, CountingHost { attaches: 1, detaches: 1 });
}

#[test]
fn kurbo_boundaries_decide_inside_and_outside() {
    let mut reg = Disclosures::<Circle, (), _>::new(());
    let id = reg.mount(DisclosureConfig::new().with_default_open(true), ());
    reg.set_boundary(id, Some(Circle::new((50.0, 50.0), 20.0)));

    let out = reg.dispatch_click(&Point::new(55.0, 45.0));
    assert_eq!(out.as_slice(), &[(id, Outcome::Discarded)]);
    assert_eq!(reg.is_open(id), Some(true));

    let out = reg.dispatch_click(&Point::new(0.0, 0.0));
    assert_eq!(out.as_slice(), &[(id, Outcome::Applied)]);
    assert_eq!(reg.is_open(id), Some(false));
}

#[test]
fn outside_click_on_closed_instances_still_notifies() {
    let closes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&closes);
    let mut reg = Disclosures::<Rect, Callbacks, _>::new(());
    let id = reg.mount(
        DisclosureConfig::new(),
        Callbacks::new().with_on_close(move |source| sink.borrow_mut().push(source)),
    );

    let out = reg.dispatch_click(&Point::new(1.0, 1.0));
    assert_eq!(out.as_slice(), &[(id, Outcome::Notified)]);
    assert_eq!(closes.borrow().as_slice(), &[EventSource::OutsideClick]);
    assert_eq!(reg.is_open(id), Some(false));
}

#[test]
fn escape_reaches_every_open_dropdown() {
    let mut reg = Disclosures::<Rect, (), _>::new(());
    let ids: Vec<_> = (0..3)
        .map(|_| reg.mount(DisclosureConfig::new().with_default_open(true), ()))
        .collect();

    let release = KeyboardEvent {
        state: KeyState::Up,
        key: Key::Named(NamedKey::Escape),
        ..KeyboardEvent::default()
    };
    let out = reg.dispatch_keyboard(&release);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|(_, o)| *o == Outcome::Applied));
    assert!(ids.iter().all(|id| reg.is_open(*id) == Some(false)));
}

#[test]
fn replacing_the_observer_redirects_notifications() {
    let opens = Rc::new(RefCell::new(0_u32));
    let sink = Rc::clone(&opens);
    let mut reg = Disclosures::<Rect, Callbacks, _>::new(());
    let id = reg.mount(DisclosureConfig::new(), Callbacks::new());

    reg.header_click(id);
    reg.header_click(id);
    assert_eq!(*opens.borrow(), 0);

    let previous = reg.set_observer(
        id,
        Callbacks::new().with_on_open(move |_| *sink.borrow_mut() += 1),
    );
    assert!(previous.is_some());
    reg.header_click(id);
    assert_eq!(*opens.borrow(), 1);
}

/// A host that refuses listeners but counts how often it is asked.
#[derive(Default)]
struct Headless {
    attaches: u32,
}

impl ListenerHost for Headless {
    fn supports_listeners(&self) -> bool {
        false
    }

    fn attach(&mut self) {
        self.attaches += 1;
    }

    fn detach(&mut self) {}
}

#[test]
fn unsupported_hosts_are_never_attached() {
    let mut host = Headless::default();
    {
        let mut reg = Disclosures::<Rect, (), _>::new(&mut host);
        let id = reg.mount(DisclosureConfig::new().with_default_open(true), ());
        let escape = Key::Named(NamedKey::Escape);
        assert!(reg.dispatch_key_up(&escape).is_empty());
        assert_eq!(reg.is_open(id), Some(true));
    }
    assert_eq!(host.attaches, 0);
}
