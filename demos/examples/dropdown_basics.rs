// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown basics.
//!
//! Drive two dropdowns through a scripted sequence of clicks and key releases
//! using `understory_disclosure` and `understory_disclosure_listeners`.
//!
//! Run:
//! - `cargo run -p understory_disclosure_demos --example dropdown_basics`

use kurbo::{Point, Rect};
use ui_events::keyboard::{Key, KeyState, KeyboardEvent, NamedKey};
use understory_disclosure::{Callbacks, DisclosureConfig, Gates};
use understory_disclosure_listeners::{CountingHost, Disclosures};

fn logger(name: &'static str) -> Callbacks {
    Callbacks::new()
        .with_on_open(move |source| println!("  {name}: opened by {source:?}"))
        .with_on_close(move |source| println!("  {name}: closed by {source:?}"))
}

fn main() {
    let mut dropdowns = Disclosures::<Rect, Callbacks, _>::new(CountingHost::default());

    // A plain menu, and a picker that also closes once an option is chosen.
    let menu = dropdowns.mount(DisclosureConfig::new(), logger("menu"));
    let picker = dropdowns.mount(
        DisclosureConfig::new().with_gate(Gates::CLOSE_ON_SECTION_CLICK, true),
        logger("picker"),
    );
    dropdowns.set_boundary(menu, Some(Rect::new(0.0, 0.0, 120.0, 240.0)));
    dropdowns.set_boundary(picker, Some(Rect::new(200.0, 0.0, 320.0, 240.0)));
    println!("listeners attached: {}", dropdowns.is_attached());

    println!("click menu header");
    dropdowns.header_click(menu);
    println!("click picker header");
    dropdowns.header_click(picker);

    if let Some(cx) = dropdowns.context(picker) {
        println!("picker section renders with {:?}", cx.render_section());
    }

    println!("click inside the menu at (40, 80)");
    dropdowns.dispatch_click(&Point::new(40.0, 80.0));

    println!("choose a picker option");
    dropdowns.section_click(picker);

    println!("release Enter");
    dropdowns.dispatch_key_up(&Key::Named(NamedKey::Enter));

    let mut escape = KeyboardEvent {
        state: KeyState::Down,
        key: Key::Named(NamedKey::Escape),
        ..KeyboardEvent::default()
    };
    println!("press Escape");
    dropdowns.dispatch_keyboard(&escape);
    println!("release Escape");
    escape.state = KeyState::Up;
    dropdowns.dispatch_keyboard(&escape);

    for (id, mounted) in dropdowns.iter() {
        println!("{id:?}: open = {}", mounted.controller.is_open());
    }

    dropdowns.unmount(menu);
    dropdowns.unmount(picker);
    let host = dropdowns.host();
    println!(
        "listeners attached {} time(s), detached {} time(s)",
        host.attaches, host.detaches
    );
}
