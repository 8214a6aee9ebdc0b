//! Shared defaults for the board controller.

// ── DOM contract ────────────────────────────────────────────────

/// Marker class on every column element.
pub const COLUMN_CLASS: &str = "column";

/// Marker class on every task element.
pub const TASK_CLASS: &str = "task";

/// Marker class on the container inside a column that holds its tasks.
pub const TASK_LIST_CLASS: &str = "tasks";

/// State class toggled on a task while it is being dragged.
pub const DRAGGING_CLASS: &str = "dragging";

/// State class toggled on a column while a drag hovers over it.
pub const DRAG_OVER_CLASS: &str = "drag-over";

/// Element id prefix for columns (`column-<id>`).
pub const COLUMN_ID_PREFIX: &str = "column";

/// Element id prefix for tasks (`task-<id>`).
pub const TASK_ID_PREFIX: &str = "task";

/// Mime type used to carry the dragged element id.
pub const DRAG_MIME: &str = "text/plain";

// ── Server endpoints ────────────────────────────────────────────

/// Base path for task updates; the task key is appended as a path segment.
pub const TASKS_ENDPOINT: &str = "/tasks";

/// Server-sent event stream with board updates.
pub const EVENTS_URL: &str = "/events";

// ── Timing ──────────────────────────────────────────────────────

/// Delay between bind attempts while the board markup is not yet present.
pub const RETRY_DELAY_MS: u64 = 500;
