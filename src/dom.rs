//! The slice of the document the controller reads and mutates.
//!
//! The browser host implements [`Dom`] over `web-sys`; tests use an
//! in-memory tree. Element handles are cheap clones that compare by node
//! identity.

use crate::error::BoardError;

pub trait Dom {
    /// Handle to one element in the document.
    type Element: Clone + PartialEq;

    /// All elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// The element's `id` attribute, or an empty string.
    fn id_of(&self, element: &Self::Element) -> String;

    /// First descendant of `root` carrying `class`.
    fn find_descendant(&self, root: &Self::Element, class: &str) -> Option<Self::Element>;

    /// Element children of `parent`, in order.
    fn children(&self, parent: &Self::Element) -> Vec<Self::Element>;

    /// Move `child` to be the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Dom`] if the document rejects the move.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element) -> Result<(), BoardError>;

    /// Parse `html` and insert it at the end of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Dom`] if the fragment cannot be inserted.
    fn insert_html_end(&mut self, parent: &Self::Element, html: &str) -> Result<(), BoardError>;

    fn last_element_child(&self, parent: &Self::Element) -> Option<Self::Element>;

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Whether `element` is still attached to the document.
    fn is_connected(&self, element: &Self::Element) -> bool;
}

/// The native drag payload carried from drag start to drop.
pub trait DragPayload {
    /// Store `value` under `mime`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Dom`] if the payload is read-only.
    fn set_text(&self, mime: &str, value: &str) -> Result<(), BoardError>;

    /// Value stored under `mime`; `None` when absent or empty.
    fn text(&self, mime: &str) -> Option<String>;
}
