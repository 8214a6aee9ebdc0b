//! Browser host: wires page events to the [`BoardController`].
//!
//! ARCHITECTURE
//! ============
//! One [`BoardHost`] exists per page. It owns the controller, the document
//! handle, the shared drag listeners, the readiness watch and the event
//! stream. Callbacks hold `Weak` references to the host so `teardown` can
//! release everything without leaking closures. The module entry point
//! mounts a host on load; `mount_board`/`unmount_board` are exported for
//! pages that swap the board out.

mod api;
mod handlers;
mod live;
mod readiness;
mod web_dom;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, DragEvent, Element};

use self::handlers::{Binding, DragHandlers, Role};
use self::live::LiveFeed;
use self::readiness::ReadinessWatch;
use self::web_dom::current_element;
pub use self::api::send_move;
pub use self::web_dom::WebDom;
use crate::bind::{self, BindPlan, InitOutcome};
use crate::config::{BoardConfig, ConfigError, Readiness};
use crate::controller::{BoardController, PushOutcome};

pub(crate) struct HostInner {
    weak: Weak<HostInner>,
    controller: RefCell<BoardController>,
    dom: RefCell<WebDom>,
    handlers: DragHandlers,
    bindings: RefCell<Vec<Binding>>,
    feed: RefCell<Option<LiveFeed>>,
    watch: RefCell<Option<ReadinessWatch>>,
    generation: Cell<u32>,
}

/// The board controller mounted on a live page.
pub struct BoardHost {
    inner: Rc<HostInner>,
}

impl BoardHost {
    #[must_use]
    pub fn new(document: Document, config: BoardConfig) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<HostInner>| HostInner {
            weak: weak.clone(),
            controller: RefCell::new(BoardController::new(config)),
            dom: RefCell::new(WebDom::new(document)),
            handlers: DragHandlers::new(weak),
            bindings: RefCell::new(Vec::new()),
            feed: RefCell::new(None),
            watch: RefCell::new(None),
            generation: Cell::new(0),
        });
        Self { inner }
    }

    /// Bind now if the board markup is present, otherwise wait for it.
    pub fn mount(&self) {
        if !self.inner.attempt() {
            self.inner.wait_for_markup();
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.inner.controller.borrow().bind_state().is_bound()
    }

    /// Remove every listener, close the event stream, stop waiting for
    /// markup, and return the controller to its unbound state.
    pub fn teardown(&self) {
        let inner = &self.inner;
        inner.generation.set(inner.generation.get().wrapping_add(1));
        for binding in inner.bindings.borrow_mut().drain(..) {
            inner.handlers.detach(&binding);
        }
        drop(inner.feed.borrow_mut().take());
        drop(inner.watch.borrow_mut().take());
        inner.controller.borrow_mut().reset();
        log::debug!("kanban torn down");
    }
}

impl HostInner {
    pub(crate) fn generation(&self) -> u32 {
        self.generation.get()
    }

    /// Run one bind attempt. Returns `true` once no further attempts are needed.
    pub(crate) fn attempt(&self) -> bool {
        let outcome = {
            let dom = self.dom.borrow();
            self.controller.borrow_mut().try_bind(&*dom)
        };
        match outcome {
            InitOutcome::Ready(plan) => {
                if let Some(watch) = self.watch.borrow().as_ref() {
                    watch.disconnect();
                }
                self.bind_plan(&plan);
                self.subscribe();
                true
            }
            InitOutcome::NotReady { .. } => false,
            InitOutcome::AlreadyBound => true,
        }
    }

    fn wait_for_markup(&self) {
        let config = self.controller.borrow().config().clone();
        if config.readiness == Readiness::Observe {
            let observed = {
                let dom = self.dom.borrow();
                ReadinessWatch::observe(dom.document(), self.weak.clone())
            };
            match observed {
                Ok(watch) => {
                    *self.watch.borrow_mut() = Some(watch);
                    return;
                }
                Err(e) => log::warn!("falling back to polling: {e}"),
            }
        }
        readiness::poll(self.weak.clone(), config.retry_delay, self.generation());
    }

    fn bind_plan(&self, plan: &BindPlan<Element>) {
        for task in &plan.tasks {
            self.bind_roles(task, &Role::TASK);
        }
        for column in &plan.columns {
            self.bind_roles(column, &Role::COLUMN);
        }
    }

    fn bind_roles(&self, element: &Element, roles: &[Role]) {
        let mut bindings = self.bindings.borrow_mut();
        bindings.extend(roles.iter().filter_map(|role| self.handlers.attach(element, *role)));
    }

    fn subscribe(&self) {
        let config = self.controller.borrow().config().clone();
        if !config.live_updates {
            return;
        }
        match LiveFeed::open(&config.events_url, self.weak.clone()) {
            Ok(feed) => *self.feed.borrow_mut() = Some(feed),
            Err(e) => log::error!("live updates unavailable: {e}"),
        }
    }

    // --- Event handlers ---

    pub(crate) fn on_push(&self, raw: &str) {
        let outcome = {
            let controller = self.controller.borrow();
            let mut dom = self.dom.borrow_mut();
            controller.apply_push(&mut *dom, raw)
        };
        if let PushOutcome::Added(task) = outcome {
            self.bind_roles(&task, &Role::TASK);
        }
        self.prune_detached();
    }

    /// Drop listeners on elements the page has removed since binding.
    fn prune_detached(&self) {
        let detached = {
            let dom = self.dom.borrow();
            let mut bindings = self.bindings.borrow_mut();
            bind::take_detached(&*dom, &mut *bindings, |binding| &binding.element)
        };
        for binding in &detached {
            self.handlers.detach(binding);
        }
        if !detached.is_empty() {
            log::debug!("released {} listeners on removed elements", detached.len());
        }
    }

    pub(crate) fn on_drag_start(&self, event: &DragEvent) {
        let (Some(task), Some(transfer)) = (current_element(event), event.data_transfer()) else {
            return;
        };
        let controller = self.controller.borrow();
        let mut dom = self.dom.borrow_mut();
        if let Err(e) = controller.drag_start(&mut *dom, &task, &transfer) {
            log::warn!("drag start: {e}");
        }
    }

    pub(crate) fn on_drag_end(&self, event: &DragEvent) {
        let Some(task) = current_element(event) else {
            return;
        };
        self.controller.borrow().drag_end(&mut *self.dom.borrow_mut(), &task);
    }

    #[allow(clippy::unused_self)]
    pub(crate) fn on_drag_over(&self, event: &DragEvent) {
        event.prevent_default();
    }

    pub(crate) fn on_drag_enter(&self, event: &DragEvent) {
        event.prevent_default();
        if let Some(column) = current_element(event) {
            self.controller.borrow().drag_enter(&mut *self.dom.borrow_mut(), &column);
        }
    }

    pub(crate) fn on_drag_leave(&self, event: &DragEvent) {
        if let Some(column) = current_element(event) {
            self.controller.borrow().drag_leave(&mut *self.dom.borrow_mut(), &column);
        }
    }

    pub(crate) fn on_drop(&self, event: &DragEvent) {
        event.prevent_default();
        let (Some(column), Some(transfer)) = (current_element(event), event.data_transfer()) else {
            return;
        };
        let controller = self.controller.borrow();
        let result = controller.drop_task(&mut *self.dom.borrow_mut(), &column, &transfer);
        match result {
            Ok(request) => api::spawn_move(controller.config().tasks_endpoint.clone(), request),
            Err(e) => log::warn!("drop ignored: {e}"),
        }
    }
}

// =============================================================
// Entry points
// =============================================================

thread_local! {
    static BOARD: RefCell<Option<BoardHost>> = const { RefCell::new(None) };
}

/// Read `data-kanban-*` overrides from `<body>`.
///
/// # Errors
///
/// Returns the first invalid attribute as a [`ConfigError`].
pub fn page_config(document: &Document) -> Result<BoardConfig, ConfigError> {
    let Some(body) = document.body() else {
        return Ok(BoardConfig::default());
    };
    BoardConfig::from_attributes(|name| body.get_attribute(name))
}

fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(level) {
        log::debug!("logger already installed: {e}");
    }
}

/// Module entry point: install logging and mount the board.
#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (config, config_error) = match page_config(&document) {
        Ok(config) => (config, None),
        Err(e) => (BoardConfig::default(), Some(e)),
    };
    init_logging(config.log_level);
    if let Some(e) = config_error {
        log::warn!("invalid board config, using defaults: {e}");
    }
    log::info!("kanban script loaded");

    let host = BoardHost::new(document, config);
    host.mount();
    BOARD.with(|slot| *slot.borrow_mut() = Some(host));
}

/// Mount (or re-mount) the board on the current page.
#[wasm_bindgen]
pub fn mount_board() {
    BOARD.with(|slot| {
        if let Some(host) = slot.borrow().as_ref() {
            host.mount();
        }
    });
}

/// Detach every listener and close the event stream.
#[wasm_bindgen]
pub fn unmount_board() {
    BOARD.with(|slot| {
        if let Some(host) = slot.borrow().as_ref() {
            host.teardown();
        }
    });
}
