//! Subscription to the board event stream.
//!
//! The browser's `EventSource` owns the connection and reconnects on its
//! own; this wrapper only forwards message payloads to the host. Dropping a
//! [`LiveFeed`] closes the stream.

use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{EventSource, MessageEvent};

use super::HostInner;
use crate::error::BoardError;

pub(super) struct LiveFeed {
    source: EventSource,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
}

impl LiveFeed {
    pub(super) fn open(url: &str, host: Weak<HostInner>) -> Result<Self, BoardError> {
        let source = EventSource::new(url).map_err(|e| BoardError::Dom(format!("EventSource({url}): {e:?}")))?;
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(inner) = host.upgrade() else {
                return;
            };
            if let Some(raw) = event.data().as_string() {
                inner.on_push(&raw);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        log::debug!("subscribed to {url}");
        Ok(Self { source, _on_message: on_message })
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.source.set_onmessage(None);
        self.source.close();
    }
}
