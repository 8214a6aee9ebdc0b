//! Bind-once state for controller initialization.
//!
//! The board markup may not exist yet when the script starts. Each attempt
//! that finds no columns or no tasks leaves the state pending and counts the
//! attempt; the first attempt that finds both moves to `Bound`, after which
//! further attempts are no-ops until the host tears down.

#[cfg(test)]
#[path = "bind_test.rs"]
mod bind_test;

use std::time::Duration;

use crate::dom::Dom;

/// Where initialization stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    /// Markup not seen yet; `attempts` counts the failed checks so far.
    Pending { attempts: u32 },
    /// Handlers have been handed out for binding.
    Bound,
}

impl Default for BindState {
    fn default() -> Self {
        Self::Pending { attempts: 0 }
    }
}

/// Elements the host should attach listeners to.
#[derive(Debug, Clone, PartialEq)]
pub struct BindPlan<E> {
    pub columns: Vec<E>,
    pub tasks: Vec<E>,
}

/// Result of one initialization attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome<E> {
    /// Markup present: bind these elements now.
    Ready(BindPlan<E>),
    /// Markup missing: nothing was bound; try again after `retry_after`.
    NotReady { columns: usize, tasks: usize, retry_after: Duration },
    /// A previous attempt already produced a plan.
    AlreadyBound,
}

impl<E> InitOutcome<E> {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl BindState {
    #[must_use]
    pub fn is_bound(self) -> bool {
        matches!(self, Self::Bound)
    }

    /// Failed checks recorded before binding (zero once bound).
    #[must_use]
    pub fn attempts(self) -> u32 {
        match self {
            Self::Pending { attempts } => attempts,
            Self::Bound => 0,
        }
    }

    /// Record an attempt over the given element sets.
    pub fn advance<E>(&mut self, columns: Vec<E>, tasks: Vec<E>, retry_after: Duration) -> InitOutcome<E> {
        match *self {
            Self::Bound => InitOutcome::AlreadyBound,
            Self::Pending { attempts } => {
                if columns.is_empty() || tasks.is_empty() {
                    *self = Self::Pending { attempts: attempts.saturating_add(1) };
                    InitOutcome::NotReady { columns: columns.len(), tasks: tasks.len(), retry_after }
                } else {
                    *self = Self::Bound;
                    InitOutcome::Ready(BindPlan { columns, tasks })
                }
            }
        }
    }
}

/// Split off the entries whose element has left the document.
///
/// Entries still attached stay in `entries` in their original order.
pub fn take_detached<D, T>(dom: &D, entries: &mut Vec<T>, element_of: impl Fn(&T) -> &D::Element) -> Vec<T>
where
    D: Dom,
{
    let (kept, detached): (Vec<T>, Vec<T>) = std::mem::take(entries)
        .into_iter()
        .partition(|entry| dom.is_connected(element_of(entry)));
    *entries = kept;
    detached
}
