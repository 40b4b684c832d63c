pub mod query;

use std::collections::HashMap;

pub use query::Element;

pub const ACTIVE_ICON_CLASS: &str = "active-icon";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Window,
    Mail,
}

impl NavIcon {
    pub const ALL: [NavIcon; 2] = [NavIcon::Window, NavIcon::Mail];

    pub fn test_id(self) -> &'static str {
        match self {
            NavIcon::Window => "icon-window",
            NavIcon::Mail => "icon-mail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub test_id: &'static str,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub image_url: Option<String>,
    pub image_width: u32,
    pub html: String,
}

/// The mounted page: current markup, live input values and the listeners
/// registered by the active container.
///
/// Every call to [`Document::replace_view`] starts a new generation and drops
/// the previous view's listeners, inputs, modal and alerts.
#[derive(Debug, Default)]
pub struct Document {
    body: String,
    generation: u64,
    active_icon: Option<NavIcon>,
    listeners: Vec<Listener>,
    inputs: HashMap<String, String>,
    modal: Option<Modal>,
    alerts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn replace_view(&mut self, html: String) -> u64 {
        self.generation += 1;
        self.listeners.clear();
        self.inputs.clear();
        self.modal = None;
        self.alerts.clear();
        self.active_icon = None;
        self.body = html;
        self.generation
    }

    /// Swaps the markup of the current view. Ignored when `generation` is
    /// no longer current.
    pub fn patch(&mut self, generation: u64, html: String) -> bool {
        if generation != self.generation {
            return false;
        }
        self.body = html;
        self.apply_active_icon();
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_active_icon(&mut self, icon: Option<NavIcon>) {
        self.active_icon = icon;
        self.apply_active_icon();
    }

    pub fn active_icons(&self) -> Vec<NavIcon> {
        NavIcon::ALL
            .into_iter()
            .filter(|icon| {
                self.query(icon.test_id())
                    .map(|el| el.has_class(ACTIVE_ICON_CLASS))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn apply_active_icon(&mut self) {
        for icon in NavIcon::ALL {
            let Some(mut element) = self.query(icon.test_id()) else {
                continue;
            };
            element.set_class(ACTIVE_ICON_CLASS, self.active_icon == Some(icon));
            self.body.replace_range(element.span.clone(), &element.to_open_tag());
        }
    }

    pub fn query_all(&self, test_id: &str) -> Vec<Element> {
        query::elements(&self.body)
            .into_iter()
            .filter(|el| el.test_id() == Some(test_id))
            .collect()
    }

    pub fn query(&self, test_id: &str) -> Option<Element> {
        query::elements(&self.body)
            .into_iter()
            .find(|el| el.test_id() == Some(test_id))
    }

    pub fn text(&self) -> String {
        query::text_content(&self.body)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }

    pub fn add_listener(&mut self, test_id: &'static str, kind: EventKind) {
        tracing::debug!(test_id, ?kind, generation = self.generation, "listener attached");
        self.listeners.push(Listener { test_id, kind });
    }

    pub fn has_listener(&self, test_id: &str, kind: EventKind) -> bool {
        self.listeners
            .iter()
            .any(|l| l.test_id == test_id && l.kind == kind)
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn set_input_value(&mut self, test_id: &str, value: impl Into<String>) {
        self.inputs.insert(test_id.to_string(), value.into());
    }

    pub fn input_value(&self, test_id: &str) -> String {
        self.inputs.get(test_id).cloned().unwrap_or_default()
    }

    pub fn clear_input(&mut self, test_id: &str) {
        self.inputs.remove(test_id);
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Blocking notification shown to the user.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}
