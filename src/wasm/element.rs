//! WebElement: `web_sys::HtmlElement` behind the element boundary
//!
//! DOM exceptions are swallowed; a failed write leaves the node untouched.

use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Node};

use crate::core::element::Rect;

#[derive(Debug, Clone)]
pub struct WebElement {
    el: HtmlElement,
}

impl WebElement {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }

    /// `None` for non-HTML elements (SVG, MathML)
    pub fn from_element(el: web_sys::Element) -> Option<Self> {
        el.dyn_into::<HtmlElement>().ok().map(Self::new)
    }

    pub fn inner(&self) -> &HtmlElement { &self.el }

    pub fn add_class(&self, class: &str) {
        let _ = self.el.class_list().add_1(class);
    }

    pub fn remove_class(&self, class: &str) {
        let _ = self.el.class_list().remove_1(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.el.class_list().contains(class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.el.get_attribute(name)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.el.set_attribute(name, value);
    }

    pub fn text(&self) -> String {
        self.el.text_content().unwrap_or_default()
    }

    pub fn set_text(&self, text: &str) {
        self.el.set_text_content(Some(text));
    }

    pub fn inner_html(&self) -> String { self.el.inner_html() }

    pub fn set_inner_html(&self, html: &str) {
        self.el.set_inner_html(html);
    }

    pub fn style(&self, property: &str) -> String {
        self.el.style().get_property_value(property).unwrap_or_default()
    }

    /// An empty value removes the inline property
    pub fn set_style(&self, property: &str, value: &str) {
        let style = self.el.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    pub fn value(&self) -> String {
        if let Some(input) = self.el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    pub fn set_value(&self, value: &str) {
        if let Some(input) = self.el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = self.el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = self.el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self.el.dyn_ref::<HtmlButtonElement>() {
            Some(button) => button.disabled(),
            None => self.el.has_attribute("disabled"),
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.el.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.el.set_attribute("disabled", "");
        } else {
            let _ = self.el.remove_attribute("disabled");
        }
    }

    pub fn offset_top(&self) -> f64 { f64::from(self.el.offset_top()) }
    pub fn offset_height(&self) -> f64 { f64::from(self.el.offset_height()) }
    pub fn offset_width(&self) -> f64 { f64::from(self.el.offset_width()) }

    pub fn bounding_rect(&self) -> Rect {
        let r = self.el.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    pub fn append_new(&self, tag: &str) -> Option<WebElement> {
        let document = self.el.owner_document()?;
        let child = document.create_element(tag).ok()?.dyn_into::<HtmlElement>().ok()?;
        self.el.append_child(&child).ok()?;
        Some(Self::new(child))
    }

    pub fn remove(&self) {
        self.el.remove();
    }

    pub fn is_same(&self, other: &WebElement) -> bool {
        let node: &Node = other.el.as_ref();
        self.el.is_same_node(Some(node))
    }
}
