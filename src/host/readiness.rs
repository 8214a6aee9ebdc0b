//! Waiting for the board markup before binding.
//!
//! The default watch is a `MutationObserver` on the whole document that
//! re-attempts binding after each batch of DOM changes. Polling on a fixed
//! delay is used when the page asks for it or the observer cannot be set up.

use std::rc::Weak;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, MutationObserver, MutationObserverInit};

use super::HostInner;
use crate::error::BoardError;

pub(super) struct ReadinessWatch {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl ReadinessWatch {
    pub(super) fn observe(document: &Document, host: Weak<HostInner>) -> Result<Self, BoardError> {
        let target = document
            .document_element()
            .ok_or_else(|| BoardError::Dom("document has no root element".to_owned()))?;

        let callback = Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: MutationObserver| {
            if let Some(inner) = host.upgrade() {
                inner.attempt();
            }
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| BoardError::Dom(format!("MutationObserver: {e:?}")))?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer
            .observe_with_options(&target, &init)
            .map_err(|e| BoardError::Dom(format!("MutationObserver.observe: {e:?}")))?;

        Ok(Self { observer, _callback: callback })
    }

    /// Stop receiving notifications. The callback stays alive until drop so
    /// this is safe to call from inside it.
    pub(super) fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for ReadinessWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Re-attempt binding every `delay` until it succeeds or the host's
/// generation changes (teardown).
pub(super) fn poll(host: Weak<HostInner>, delay: Duration, generation: u32) {
    let ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
    wasm_bindgen_futures::spawn_local(async move {
        loop {
            TimeoutFuture::new(ms).await;
            let Some(inner) = host.upgrade() else {
                return;
            };
            if inner.generation() != generation || inner.attempt() {
                return;
            }
        }
    });
}
