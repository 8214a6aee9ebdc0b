//! Board controller: drag lifecycle, drop handling and push updates.
//!
//! `BoardController` holds no board state of its own; the document is the
//! source of truth. Handlers mutate the DOM synchronously and return what
//! the host must do next (bind elements, send a move request). A drop moves
//! the task immediately and the move is never rolled back, whatever the
//! server answers.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::bind::{BindState, InitOutcome};
use crate::config::BoardConfig;
use crate::dom::{Dom, DragPayload};
use crate::error::BoardError;
use crate::ids::{ElementId, element_id};
use crate::wire::{MoveBody, MoveRequest, PushMessage};

/// What applying a push message did to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum PushOutcome<E> {
    /// A task was relocated to the end of a column.
    Moved,
    /// A task fragment was inserted; the host must bind drag handlers to it.
    Added(E),
    /// Unknown type, malformed payload, or missing elements. DOM untouched.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct BoardController {
    config: BoardConfig,
    bind: BindState,
}

impl BoardController {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self { config, bind: BindState::default() }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn bind_state(&self) -> BindState {
        self.bind
    }

    // --- Initialization ---

    /// Check whether the board markup is present and, the first time it is,
    /// hand back the columns and tasks to bind.
    pub fn try_bind<D: Dom>(&mut self, dom: &D) -> InitOutcome<D::Element> {
        if self.bind.is_bound() {
            return InitOutcome::AlreadyBound;
        }
        let classes = &self.config.classes;
        let columns = dom.elements_by_class(&classes.column);
        let tasks = dom.elements_by_class(&classes.task);

        let outcome = self.bind.advance(columns, tasks, self.config.retry_delay);
        match &outcome {
            InitOutcome::Ready(plan) => {
                log::info!("kanban bound: {} columns, {} tasks", plan.columns.len(), plan.tasks.len());
            }
            InitOutcome::NotReady { columns, tasks, retry_after } => {
                log::debug!(
                    "kanban not ready (columns={columns}, tasks={tasks}, attempt={}); retrying in {}ms",
                    self.bind.attempts(),
                    retry_after.as_millis()
                );
            }
            InitOutcome::AlreadyBound => {}
        }
        outcome
    }

    /// Return to the pending state so a later `try_bind` can bind again.
    pub fn reset(&mut self) {
        self.bind = BindState::default();
    }

    // --- Drag source (task) ---

    /// Put the task's element id into the drag payload and mark it dragging.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Dom`] if the payload rejects the write. The
    /// dragging class is applied either way.
    pub fn drag_start<D, P>(&self, dom: &mut D, task: &D::Element, payload: &P) -> Result<(), BoardError>
    where
        D: Dom,
        P: DragPayload + ?Sized,
    {
        let id = dom.id_of(task);
        log::debug!("drag started: {id}");
        dom.add_class(task, &self.config.classes.dragging);
        payload.set_text(&self.config.drag_mime, &id)
    }

    /// Clear the dragging mark, whether or not the drag ended in a drop.
    pub fn drag_end<D: Dom>(&self, dom: &mut D, task: &D::Element) {
        log::debug!("drag ended");
        dom.remove_class(task, &self.config.classes.dragging);
    }

    // --- Drop target (column) ---

    pub fn drag_enter<D: Dom>(&self, dom: &mut D, column: &D::Element) {
        log::debug!("drag enter");
        dom.add_class(column, &self.config.classes.drag_over);
    }

    /// Fires for every descendant boundary the pointer crosses, so the
    /// drag-over mark can flicker; it is cosmetic only.
    pub fn drag_leave<D: Dom>(&self, dom: &mut D, column: &D::Element) {
        log::debug!("drag leave");
        dom.remove_class(column, &self.config.classes.drag_over);
    }

    /// Move the dragged task to the end of `column` and describe the move.
    ///
    /// The DOM change is applied before returning; the caller persists the
    /// returned request.
    ///
    /// # Errors
    ///
    /// - [`BoardError::EmptyPayload`] when the drag carried no element id
    /// - [`BoardError::InvalidElementId`] when the task or column id has the
    ///   wrong prefix or no numeric key
    /// - [`BoardError::MissingElement`] when the dragged task is not in the document
    /// - [`BoardError::MissingTaskList`] when the column has no task list
    /// - [`BoardError::Dom`] when the move itself fails
    pub fn drop_task<D, P>(&self, dom: &mut D, column: &D::Element, payload: &P) -> Result<MoveRequest, BoardError>
    where
        D: Dom,
        P: DragPayload + ?Sized,
    {
        dom.remove_class(column, &self.config.classes.drag_over);

        let task_element_id = payload
            .text(&self.config.drag_mime)
            .ok_or(BoardError::EmptyPayload)?;
        let task_id = ElementId::parse_with_prefix(&task_element_id, &self.config.task_prefix)?;
        let column_id = ElementId::parse_with_prefix(&dom.id_of(column), &self.config.column_prefix)?;
        log::debug!("drop: {task_element_id} -> column {}", column_id.key);

        let task = dom
            .element_by_id(&task_element_id)
            .ok_or_else(|| BoardError::MissingElement(task_element_id.clone()))?;
        let list = dom
            .find_descendant(column, &self.config.classes.task_list)
            .ok_or_else(|| BoardError::MissingTaskList(column_id.key.clone()))?;

        dom.append_child(&list, &task)?;
        let order = dom
            .children(&list)
            .iter()
            .position(|child| *child == task)
            .ok_or_else(|| BoardError::Dom(format!("{task_element_id} missing after move")))?;

        Ok(MoveRequest { task_id: task_id.key, body: MoveBody { column_id: column_id.key, order } })
    }

    // --- Push updates ---

    /// Apply one raw event-stream payload.
    ///
    /// Anything that cannot be applied leaves the board untouched.
    pub fn apply_push<D: Dom>(&self, dom: &mut D, raw: &str) -> PushOutcome<D::Element> {
        match PushMessage::parse(raw) {
            Ok(message) => self.apply_message(dom, &message),
            Err(_) => PushOutcome::Ignored,
        }
    }

    /// Apply one decoded push message.
    pub fn apply_message<D: Dom>(&self, dom: &mut D, message: &PushMessage) -> PushOutcome<D::Element> {
        match message {
            PushMessage::TaskMoved { task_id, new_column_id } => {
                let task = dom.element_by_id(&element_id(&self.config.task_prefix, task_id.as_str()));
                let list = self.task_list_for(dom, new_column_id.as_str());
                let (Some(task), Some(list)) = (task, list) else {
                    return PushOutcome::Ignored;
                };
                match dom.append_child(&list, &task) {
                    Ok(()) => PushOutcome::Moved,
                    Err(_) => PushOutcome::Ignored,
                }
            }
            PushMessage::TaskAdded { column_id, task_html } => {
                let Some(list) = self.task_list_for(dom, column_id.as_str()) else {
                    return PushOutcome::Ignored;
                };
                let previous_last = dom.last_element_child(&list);
                if dom.insert_html_end(&list, task_html).is_err() {
                    return PushOutcome::Ignored;
                }
                // A fragment with no element leaves the old last child in place.
                match dom.last_element_child(&list) {
                    Some(task) if Some(&task) != previous_last.as_ref() => PushOutcome::Added(task),
                    _ => PushOutcome::Ignored,
                }
            }
            PushMessage::Unknown => PushOutcome::Ignored,
        }
    }

    fn task_list_for<D: Dom>(&self, dom: &D, column_key: &str) -> Option<D::Element> {
        let column = dom.element_by_id(&element_id(&self.config.column_prefix, column_key))?;
        dom.find_descendant(&column, &self.config.classes.task_list)
    }
}
