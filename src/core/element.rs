//! Element handles: the on-screen boundary every component writes through
//!
//! Components never query the document themselves. They are handed
//! `Element`s and mutate them through this small surface:
//! - Memory: in-process element for tests and headless embedding
//! - Web: `web_sys::HtmlElement` (wasm feature)
//!
//! Nothing here can fail. A backend that refuses an operation turns it into
//! a no-op, which is what a page does with a detached or missing node.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[cfg(feature = "wasm")]
use crate::wasm::WebElement;

/// Axis-aligned box in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

// =============================================================================
// MEMORY ELEMENT
// =============================================================================

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    content: String,
    value: String,
    disabled: bool,
    offset_top: f64,
    offset_height: f64,
    offset_width: f64,
    rect: Rect,
    children: Vec<MemoryElement>,
    removed: bool,
}

/// In-memory element. Cloning shares the node, like a DOM reference.
///
/// Text and markup share one content slot; markup is stored verbatim and
/// never parsed.
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    node: Rc<RefCell<NodeData>>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            node: Rc::new(RefCell::new(NodeData { tag: tag.to_string(), ..Default::default() })),
        }
    }

    pub fn with_class(self, class: &str) -> Self { self.add_class(class); self }
    pub fn with_attr(self, name: &str, value: &str) -> Self { self.set_attribute(name, value); self }
    pub fn with_content(self, content: &str) -> Self { self.set_inner_html(content); self }
    pub fn with_value(self, value: &str) -> Self { self.set_value(value); self }

    /// Vertical layout box (`offsetTop` / `offsetHeight`)
    pub fn with_layout(self, top: f64, height: f64) -> Self {
        self.set_layout(top, height);
        self
    }

    pub fn with_width(self, width: f64) -> Self {
        self.node.borrow_mut().offset_width = width;
        self
    }

    pub fn with_rect(self, rect: Rect) -> Self {
        self.node.borrow_mut().rect = rect;
        self
    }

    pub fn set_layout(&self, top: f64, height: f64) {
        let mut node = self.node.borrow_mut();
        node.offset_top = top;
        node.offset_height = height;
    }

    pub fn tag(&self) -> String { self.node.borrow().tag.clone() }
    pub fn classes(&self) -> Vec<String> { self.node.borrow().classes.clone() }
    pub fn children(&self) -> Vec<MemoryElement> { self.node.borrow().children.clone() }
    pub fn is_removed(&self) -> bool { self.node.borrow().removed }

    pub fn add_class(&self, class: &str) {
        let mut node = self.node.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.node.borrow_mut().classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node.borrow().classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.node.borrow_mut().attributes.insert(name.to_string(), value.to_string());
    }

    pub fn inner_html(&self) -> String { self.node.borrow().content.clone() }

    pub fn set_inner_html(&self, html: &str) {
        self.node.borrow_mut().content = html.to_string();
    }

    /// Empty value removes the property, matching `style.prop = ''`
    pub fn set_style(&self, property: &str, value: &str) {
        let mut node = self.node.borrow_mut();
        if value.is_empty() {
            node.styles.remove(property);
        } else {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    pub fn style(&self, property: &str) -> String {
        self.node.borrow().styles.get(property).cloned().unwrap_or_default()
    }

    pub fn value(&self) -> String { self.node.borrow().value.clone() }
    pub fn set_value(&self, value: &str) { self.node.borrow_mut().value = value.to_string(); }

    pub fn is_disabled(&self) -> bool { self.node.borrow().disabled }
    pub fn set_disabled(&self, disabled: bool) { self.node.borrow_mut().disabled = disabled; }

    pub fn append_new(&self, tag: &str) -> MemoryElement {
        let child = MemoryElement::new(tag);
        self.node.borrow_mut().children.push(child.clone());
        child
    }

    pub fn remove(&self) {
        self.node.borrow_mut().removed = true;
    }

    pub fn is_same(&self, other: &MemoryElement) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

// =============================================================================
// ELEMENT ENUM
// =============================================================================

/// Element handle dispatching to a backend
#[derive(Debug, Clone)]
pub enum Element {
    Memory(MemoryElement),
    #[cfg(feature = "wasm")]
    Web(WebElement),
}

impl From<MemoryElement> for Element {
    fn from(el: MemoryElement) -> Self { Element::Memory(el) }
}

#[cfg(feature = "wasm")]
impl From<WebElement> for Element {
    fn from(el: WebElement) -> Self { Element::Web(el) }
}

impl Element {
    pub fn add_class(&self, class: &str) {
        match self {
            Element::Memory(el) => el.add_class(class),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.add_class(class),
        }
    }

    pub fn remove_class(&self, class: &str) {
        match self {
            Element::Memory(el) => el.remove_class(class),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.remove_class(class),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Element::Memory(el) => el.has_class(class),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.has_class(class),
        }
    }

    /// Flip a class, returning whether it is now present
    pub fn toggle_class(&self, class: &str) -> bool {
        let on = !self.has_class(class);
        self.set_class(class, on);
        on
    }

    pub fn set_class(&self, class: &str, on: bool) {
        if on { self.add_class(class) } else { self.remove_class(class) }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match self {
            Element::Memory(el) => el.attribute(name),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.attribute(name),
        }
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        match self {
            Element::Memory(el) => el.set_attribute(name, value),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.set_attribute(name, value),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Element::Memory(el) => el.inner_html(),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.text(),
        }
    }

    pub fn set_text(&self, text: &str) {
        match self {
            Element::Memory(el) => el.set_inner_html(text),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.set_text(text),
        }
    }

    pub fn inner_html(&self) -> String {
        match self {
            Element::Memory(el) => el.inner_html(),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.inner_html(),
        }
    }

    pub fn set_inner_html(&self, html: &str) {
        match self {
            Element::Memory(el) => el.set_inner_html(html),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.set_inner_html(html),
        }
    }

    pub fn style(&self, property: &str) -> String {
        match self {
            Element::Memory(el) => el.style(property),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.style(property),
        }
    }

    pub fn set_style(&self, property: &str, value: &str) {
        match self {
            Element::Memory(el) => el.set_style(property, value),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.set_style(property, value),
        }
    }

    pub fn value(&self) -> String {
        match self {
            Element::Memory(el) => el.value(),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            Element::Memory(el) => el.set_value(value),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.set_value(value),
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Element::Memory(el) => el.is_disabled(),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.is_disabled(),
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        match self {
            Element::Memory(el) => el.set_disabled(disabled),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.set_disabled(disabled),
        }
    }

    pub fn offset_top(&self) -> f64 {
        match self {
            Element::Memory(el) => el.node.borrow().offset_top,
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.offset_top(),
        }
    }

    pub fn offset_height(&self) -> f64 {
        match self {
            Element::Memory(el) => el.node.borrow().offset_height,
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.offset_height(),
        }
    }

    pub fn offset_width(&self) -> f64 {
        match self {
            Element::Memory(el) => el.node.borrow().offset_width,
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.offset_width(),
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        match self {
            Element::Memory(el) => el.node.borrow().rect,
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.bounding_rect(),
        }
    }

    /// Create a child element and append it
    pub fn append_new(&self, tag: &str) -> Option<Element> {
        match self {
            Element::Memory(el) => Some(Element::Memory(el.append_new(tag))),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.append_new(tag).map(Element::Web),
        }
    }

    pub fn remove(&self) {
        match self {
            Element::Memory(el) => el.remove(),
            #[cfg(feature = "wasm")]
            Element::Web(el) => el.remove(),
        }
    }

    pub fn is_same(&self, other: &Element) -> bool {
        match (self, other) {
            (Element::Memory(a), Element::Memory(b)) => a.is_same(b),
            #[cfg(feature = "wasm")]
            (Element::Web(a), Element::Web(b)) => a.is_same(b),
            #[cfg(feature = "wasm")]
            _ => false,
        }
    }
}
