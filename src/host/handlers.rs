//! Shared drag listeners and the record of where they are attached.
//!
//! One closure exists per event type and is registered on every task or
//! column; the element is recovered from `currentTarget` on each call.

use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{DragEvent, Element};

use super::HostInner;

type DragClosure = Closure<dyn FnMut(DragEvent)>;

/// Which listener a binding uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Role {
    DragStart,
    DragEnd,
    DragOver,
    DragEnter,
    DragLeave,
    Drop,
}

impl Role {
    pub(super) const TASK: [Self; 2] = [Self::DragStart, Self::DragEnd];
    pub(super) const COLUMN: [Self; 4] = [Self::DragOver, Self::DragEnter, Self::DragLeave, Self::Drop];

    pub(super) fn event_name(self) -> &'static str {
        match self {
            Self::DragStart => "dragstart",
            Self::DragEnd => "dragend",
            Self::DragOver => "dragover",
            Self::DragEnter => "dragenter",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
        }
    }
}

/// An attached listener, kept so teardown can remove it.
pub(super) struct Binding {
    pub(super) element: Element,
    pub(super) role: Role,
}

pub(super) struct DragHandlers {
    start: DragClosure,
    end: DragClosure,
    over: DragClosure,
    enter: DragClosure,
    leave: DragClosure,
    drop: DragClosure,
}

fn handler(host: &Weak<HostInner>, on_event: fn(&HostInner, &DragEvent)) -> DragClosure {
    let host = host.clone();
    Closure::wrap(Box::new(move |event: DragEvent| {
        if let Some(inner) = host.upgrade() {
            on_event(&inner, &event);
        }
    }) as Box<dyn FnMut(DragEvent)>)
}

impl DragHandlers {
    pub(super) fn new(host: &Weak<HostInner>) -> Self {
        Self {
            start: handler(host, HostInner::on_drag_start),
            end: handler(host, HostInner::on_drag_end),
            over: handler(host, HostInner::on_drag_over),
            enter: handler(host, HostInner::on_drag_enter),
            leave: handler(host, HostInner::on_drag_leave),
            drop: handler(host, HostInner::on_drop),
        }
    }

    fn closure(&self, role: Role) -> &DragClosure {
        match role {
            Role::DragStart => &self.start,
            Role::DragEnd => &self.end,
            Role::DragOver => &self.over,
            Role::DragEnter => &self.enter,
            Role::DragLeave => &self.leave,
            Role::Drop => &self.drop,
        }
    }

    /// Attach the listener for `role` to `element`.
    pub(super) fn attach(&self, element: &Element, role: Role) -> Option<Binding> {
        let callback = self.closure(role);
        match element.add_event_listener_with_callback(role.event_name(), callback.as_ref().unchecked_ref()) {
            Ok(()) => Some(Binding { element: element.clone(), role }),
            Err(e) => {
                log::warn!("addEventListener({}) failed on #{}: {e:?}", role.event_name(), element.id());
                None
            }
        }
    }

    pub(super) fn detach(&self, binding: &Binding) {
        let callback = self.closure(binding.role);
        if let Err(e) = binding
            .element
            .remove_event_listener_with_callback(binding.role.event_name(), callback.as_ref().unchecked_ref())
        {
            log::warn!("removeEventListener({}) failed: {e:?}", binding.role.event_name());
        }
    }
}
