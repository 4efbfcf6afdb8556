//! Contact form: simulated submission
//!
//! Nothing is sent anywhere. A submit captures the field values and plays
//! the button through its states:
//!
//! ```text
//! t=0       "Sending..."      disabled
//! t=1500    "Message Sent! ✓" green background, fields cleared
//! t=4500    original label    background cleared, enabled
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

use crate::config::ContactConfig;
use crate::core::clock::{Scheduler, TimerId};
use crate::core::element::Element;
use crate::core::selectors::attr;

#[derive(Debug, Clone, Default)]
pub struct ContactElements {
    pub form: Option<Element>,
    pub submit: Option<Element>,
    /// Inputs, textareas and selects inside the form
    pub fields: Vec<Element>,
}

pub struct ContactFormHandler {
    submit: Element,
    fields: Vec<Element>,
    config: ContactConfig,
    scheduler: Scheduler,
    busy: Rc<Cell<bool>>,
    phase: Rc<Cell<Option<TimerId>>>,
    /// Button markup from before the sequence started
    original: Rc<RefCell<Option<String>>>,
}

impl ContactFormHandler {
    /// `None` unless both the form and its submit button exist
    pub fn new(elements: ContactElements, config: ContactConfig, scheduler: Scheduler) -> Option<Self> {
        elements.form?;
        let submit = elements.submit?;
        Some(Self {
            submit,
            fields: elements.fields,
            config,
            scheduler,
            busy: Rc::new(Cell::new(false)),
            phase: Rc::new(Cell::new(None)),
            original: Rc::new(RefCell::new(None)),
        })
    }

    pub fn is_busy(&self) -> bool { self.busy.get() }

    /// Field values keyed by `name`; unnamed fields are skipped
    pub fn form_data(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|f| f.attribute(attr::NAME).map(|name| (name, f.value())))
            .collect()
    }

    /// Start the send sequence. Returns the captured values, or `None`
    /// while a previous submission is still playing out.
    pub fn submit(&self) -> Option<BTreeMap<String, String>> {
        if self.busy.replace(true) {
            return None;
        }
        let data = self.form_data();
        debug!(fields = data.len(), "contact form submitted");

        let original = self.submit.inner_html();
        *self.original.borrow_mut() = Some(original.clone());
        self.submit.set_inner_html(&self.config.sending_label);
        self.submit.set_disabled(true);

        let submit = self.submit.clone();
        let fields = self.fields.clone();
        let config = self.config.clone();
        let scheduler = self.scheduler.clone();
        let busy = self.busy.clone();
        let phase = self.phase.clone();
        let saved = self.original.clone();

        let id = self.scheduler.set_timeout(self.config.send_delay_ms, move || {
            submit.set_inner_html(&config.sent_label);
            submit.set_style("background", &config.sent_background);
            for field in &fields {
                field.set_value("");
            }
            debug!("contact form marked sent");

            let slot = phase.clone();
            let id = scheduler.set_timeout(config.restore_delay_ms, move || {
                submit.set_inner_html(&original);
                submit.set_style("background", "");
                submit.set_disabled(false);
                busy.set(false);
                slot.set(None);
                saved.borrow_mut().take();
            });
            phase.set(Some(id));
        });
        self.phase.set(Some(id));

        Some(data)
    }

    /// Cancel a sequence in flight and put the button back
    pub fn dispose(&self) {
        if let Some(id) = self.phase.take() {
            self.scheduler.clear(id);
        }
        if let Some(original) = self.original.borrow_mut().take() {
            self.submit.set_inner_html(&original);
            self.submit.set_style("background", "");
            self.submit.set_disabled(false);
        }
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::VirtualClock;
    use crate::core::element::MemoryElement;

    struct Fixture {
        button: MemoryElement,
        name: MemoryElement,
        message: MemoryElement,
    }

    fn form(clock: &VirtualClock) -> (ContactFormHandler, Fixture) {
        let f = Fixture {
            button: MemoryElement::new("button").with_content("<span>Send Message</span>"),
            name: MemoryElement::new("input").with_attr("name", "name").with_value("Ada"),
            message: MemoryElement::new("textarea").with_attr("name", "message"),
        };
        let elements = ContactElements {
            form: Some(MemoryElement::new("form").into()),
            submit: Some(f.button.clone().into()),
            fields: vec![f.name.clone().into(), f.message.clone().into()],
        };
        let handler = ContactFormHandler::new(elements, ContactConfig::default(), clock.clone().into()).unwrap();
        (handler, f)
    }

    #[test]
    fn submit_plays_full_sequence() {
        let clock = VirtualClock::new();
        let (handler, f) = form(&clock);

        let data = handler.submit().unwrap();
        assert_eq!(data.get("name").map(String::as_str), Some("Ada"));
        assert_eq!(data.get("message").map(String::as_str), Some(""));
        assert_eq!(f.button.inner_html(), "<span>Sending...</span>");
        assert!(f.button.is_disabled());

        clock.advance(1500);
        assert!(f.button.inner_html().contains("Message Sent"));
        assert!(f.button.style("background").contains("#43e97b"));
        assert_eq!(f.name.value(), "");
        assert!(f.button.is_disabled());

        clock.advance(2999);
        assert!(f.button.is_disabled());
        clock.advance(1);
        assert_eq!(f.button.inner_html(), "<span>Send Message</span>");
        assert_eq!(f.button.style("background"), "");
        assert!(!f.button.is_disabled());
        assert!(!handler.is_busy());
    }

    #[test]
    fn resubmit_while_busy_is_ignored() {
        let clock = VirtualClock::new();
        let (handler, f) = form(&clock);

        assert!(handler.submit().is_some());
        assert!(handler.submit().is_none());
        clock.advance(4500);
        assert_eq!(f.button.inner_html(), "<span>Send Message</span>");
        assert!(handler.submit().is_some());
    }

    #[test]
    fn dispose_mid_sequence_restores_button() {
        let clock = VirtualClock::new();
        let (handler, f) = form(&clock);

        handler.submit().unwrap();
        clock.advance(1500);
        assert!(f.button.inner_html().contains("Message Sent"));

        handler.dispose();
        assert_eq!(f.button.inner_html(), "<span>Send Message</span>");
        assert_eq!(f.button.style("background"), "");
        assert!(!f.button.is_disabled());
        assert!(!handler.is_busy());
        assert_eq!(clock.pending(), 0);

        clock.advance(5000);
        assert_eq!(f.button.inner_html(), "<span>Send Message</span>");
        assert!(handler.submit().is_some());
    }

    #[test]
    fn missing_button_skips_setup() {
        let elements = ContactElements { form: Some(MemoryElement::new("form").into()), ..Default::default() };
        assert!(ContactFormHandler::new(elements, ContactConfig::default(), VirtualClock::new().into()).is_none());
    }
}
