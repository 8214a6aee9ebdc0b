//! [`Dom`] and [`DragPayload`] over `web-sys`.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{DataTransfer, Document, Element};

use crate::dom::{Dom, DragPayload};
use crate::error::BoardError;

fn js_error(context: &str, err: &JsValue) -> BoardError {
    BoardError::Dom(format!("{context}: {err:?}"))
}

/// The live page document.
#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn elements_by_class(&self, class: &str) -> Vec<Element> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn id_of(&self, element: &Element) -> String {
        element.id()
    }

    fn find_descendant(&self, root: &Element, class: &str) -> Option<Element> {
        let collection = root.get_elements_by_class_name(class);
        collection.item(0)
    }

    fn children(&self, parent: &Element) -> Vec<Element> {
        let collection = parent.children();
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), BoardError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| js_error("appendChild", &e))
    }

    fn insert_html_end(&mut self, parent: &Element, html: &str) -> Result<(), BoardError> {
        parent
            .insert_adjacent_html("beforeend", html)
            .map_err(|e| js_error("insertAdjacentHTML", &e))
    }

    fn last_element_child(&self, parent: &Element) -> Option<Element> {
        parent.last_element_child()
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            log::warn!("classList.add({class}) failed: {e:?}");
        }
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().remove_1(class) {
            log::warn!("classList.remove({class}) failed: {e:?}");
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }
}

impl DragPayload for DataTransfer {
    fn set_text(&self, mime: &str, value: &str) -> Result<(), BoardError> {
        self.set_data(mime, value)
            .map_err(|e| js_error("dataTransfer.setData", &e))
    }

    fn text(&self, mime: &str) -> Option<String> {
        match self.get_data(mime) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

/// The element a listener was registered on.
pub(crate) fn current_element(event: &web_sys::Event) -> Option<Element> {
    let target = event.current_target()?;
    target.dyn_ref::<Element>().cloned()
}
