//! Controller configuration with per-page overrides.
//!
//! Defaults match the board markup rendered by the server. A page can
//! override endpoints and timings through `data-kanban-*` attributes on its
//! `<body>` element; the host reads those attributes and hands them to
//! [`BoardConfig::from_attributes`].

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

use crate::consts;

pub const ATTR_TASKS_ENDPOINT: &str = "data-kanban-tasks-endpoint";
pub const ATTR_EVENTS_URL: &str = "data-kanban-events-url";
pub const ATTR_RETRY_MS: &str = "data-kanban-retry-ms";
pub const ATTR_READINESS: &str = "data-kanban-readiness";
pub const ATTR_LIVE: &str = "data-kanban-live";
pub const ATTR_LOG_LEVEL: &str = "data-kanban-log-level";

/// Error returned by [`BoardConfig::from_attributes`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid data-kanban-retry-ms: {0:?} (expected a positive integer)")]
    InvalidRetryDelay(String),
    #[error("unknown data-kanban-readiness: {0:?} (expected 'observe' or 'poll')")]
    UnknownReadiness(String),
    #[error("unknown data-kanban-live: {0:?} (expected 'on' or 'off')")]
    UnknownLiveToggle(String),
    #[error("unknown data-kanban-log-level: {0:?}")]
    UnknownLogLevel(String),
}

/// How the host waits for the board markup before binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    /// Re-attempt whenever the document's element tree changes.
    #[default]
    Observe,
    /// Re-attempt every `retry_delay`.
    Poll,
}

/// Class names the controller reads and toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classes {
    pub column: String,
    pub task: String,
    pub task_list: String,
    pub dragging: String,
    pub drag_over: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            column: consts::COLUMN_CLASS.to_owned(),
            task: consts::TASK_CLASS.to_owned(),
            task_list: consts::TASK_LIST_CLASS.to_owned(),
            dragging: consts::DRAGGING_CLASS.to_owned(),
            drag_over: consts::DRAG_OVER_CLASS.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub classes: Classes,
    pub column_prefix: String,
    pub task_prefix: String,
    pub drag_mime: String,
    pub tasks_endpoint: String,
    pub events_url: String,
    pub retry_delay: Duration,
    pub readiness: Readiness,
    /// Whether to subscribe to the event stream after binding.
    pub live_updates: bool,
    pub log_level: log::Level,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            classes: Classes::default(),
            column_prefix: consts::COLUMN_ID_PREFIX.to_owned(),
            task_prefix: consts::TASK_ID_PREFIX.to_owned(),
            drag_mime: consts::DRAG_MIME.to_owned(),
            tasks_endpoint: consts::TASKS_ENDPOINT.to_owned(),
            events_url: consts::EVENTS_URL.to_owned(),
            retry_delay: Duration::from_millis(consts::RETRY_DELAY_MS),
            readiness: Readiness::default(),
            live_updates: true,
            log_level: log::Level::Debug,
        }
    }
}

impl BoardConfig {
    /// Build config from page attributes, falling back to defaults.
    ///
    /// `lookup` returns the value of an attribute by name, or `None` when
    /// the page does not set it. Recognized attributes:
    /// - `data-kanban-tasks-endpoint`: default `/tasks`
    /// - `data-kanban-events-url`: default `/events`
    /// - `data-kanban-retry-ms`: default 500
    /// - `data-kanban-readiness`: `observe` (default) or `poll`
    /// - `data-kanban-live`: `on` (default) or `off`
    /// - `data-kanban-log-level`: `error`, `warn`, `info`, `debug` (default) or `trace`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first attribute with an invalid value.
    pub fn from_attributes<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tasks_endpoint = lookup(ATTR_TASKS_ENDPOINT)
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.tasks_endpoint);
        let events_url = non_empty(lookup(ATTR_EVENTS_URL)).unwrap_or(defaults.events_url);
        let retry_delay = match non_empty(lookup(ATTR_RETRY_MS)) {
            Some(raw) => parse_retry_delay(&raw)?,
            None => defaults.retry_delay,
        };
        let readiness = parse_readiness(non_empty(lookup(ATTR_READINESS)).as_deref())?;
        let live_updates = parse_live(non_empty(lookup(ATTR_LIVE)).as_deref())?;
        let log_level = match non_empty(lookup(ATTR_LOG_LEVEL)) {
            Some(raw) => parse_log_level(&raw)?,
            None => defaults.log_level,
        };

        Ok(Self { tasks_endpoint, events_url, retry_delay, readiness, live_updates, log_level, ..defaults })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_retry_delay(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidRetryDelay(raw.to_owned())),
    }
}

fn parse_readiness(raw: Option<&str>) -> Result<Readiness, ConfigError> {
    match raw.unwrap_or("observe") {
        "observe" => Ok(Readiness::Observe),
        "poll" => Ok(Readiness::Poll),
        other => Err(ConfigError::UnknownReadiness(other.to_owned())),
    }
}

fn parse_live(raw: Option<&str>) -> Result<bool, ConfigError> {
    match raw.unwrap_or("on") {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(ConfigError::UnknownLiveToggle(other.to_owned())),
    }
}

fn parse_log_level(raw: &str) -> Result<log::Level, ConfigError> {
    raw.parse::<log::Level>()
        .map_err(|_| ConfigError::UnknownLogLevel(raw.to_owned()))
}
