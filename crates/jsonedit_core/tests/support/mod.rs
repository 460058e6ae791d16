#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use jsonedit_core::{
    ChangeListener, ContainerId, CursorHint, EditSession, ListenerId, Widget, WidgetFactory,
    WidgetHandle,
};

#[derive(Default)]
pub struct MemorySession {
    pub tab_size: Cell<u32>,
    pub soft_tabs: Cell<bool>,
    pub wrap: Cell<bool>,
    pub mode: RefCell<String>,
    pub tab_size_writes: Cell<u32>,
}

impl EditSession for MemorySession {
    fn tab_size(&self) -> u32 {
        self.tab_size.get()
    }
    fn set_tab_size(&self, size: u32) {
        self.tab_size.set(size);
        self.tab_size_writes.set(self.tab_size_writes.get() + 1);
    }
    fn use_soft_tabs(&self) -> bool {
        self.soft_tabs.get()
    }
    fn set_use_soft_tabs(&self, enabled: bool) {
        self.soft_tabs.set(enabled);
    }
    fn use_wrap_mode(&self) -> bool {
        self.wrap.get()
    }
    fn set_use_wrap_mode(&self, enabled: bool) {
        self.wrap.set(enabled);
    }
    fn mode(&self) -> String {
        self.mode.borrow().clone()
    }
    fn set_mode(&self, mode: &str) {
        *self.mode.borrow_mut() = mode.to_string();
    }
}

/// In-memory editor that behaves like Ace: `set_value` fires change
/// listeners synchronously before returning.
#[derive(Default)]
pub struct MemoryWidget {
    pub container: Option<ContainerId>,
    value: RefCell<String>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
    next_listener: Cell<u64>,
    pub session: MemorySession,
    pub theme: RefCell<Option<String>>,
    pub font_size: Cell<Option<u32>>,
    pub print_margin: Cell<Option<bool>>,
    pub unbound_keys: RefCell<Vec<String>>,
    pub cursor_hints: RefCell<Vec<CursorHint>>,
    pub change_events: Cell<u32>,
    pub resizes: Cell<u32>,
    pub destroyed: Cell<u32>,
    pub fail_next_set: Cell<bool>,
}

impl MemoryWidget {
    pub fn bound_to(container: &ContainerId) -> Self {
        Self {
            container: Some(container.clone()),
            ..Default::default()
        }
    }

    /// Simulates the user typing until the content reads `text`.
    pub fn type_text(&self, text: &str) {
        *self.value.borrow_mut() = text.to_string();
        self.notify();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        self.change_events.set(self.change_events.get() + 1);
        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl Widget for MemoryWidget {
    fn get_value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, text: &str, cursor: CursorHint) {
        if self.fail_next_set.replace(false) {
            panic!("widget rejected value");
        }
        *self.value.borrow_mut() = text.to_string();
        self.cursor_hints.borrow_mut().push(cursor);
        self.notify();
    }

    fn on_change(&self, listener: ChangeListener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn off_change(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    fn session(&self) -> &dyn EditSession {
        &self.session
    }

    fn set_theme(&self, theme: &str) {
        *self.theme.borrow_mut() = Some(theme.to_string());
    }

    fn set_font_size(&self, size: u32) {
        self.font_size.set(Some(size));
    }

    fn set_show_print_margin(&self, show: bool) {
        self.print_margin.set(Some(show));
    }

    fn bind_key(&self, key: &str, command: Option<&str>) {
        if command.is_none() {
            self.unbound_keys.borrow_mut().push(key.to_string());
        }
    }

    fn resize(&self, _force: bool) {
        self.resizes.set(self.resizes.get() + 1);
    }

    fn destroy(&self) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

/// Factory that records every widget it creates.
#[derive(Default)]
pub struct MemoryFactory {
    pub created: RefCell<Vec<Rc<MemoryWidget>>>,
}

impl MemoryFactory {
    pub fn shared() -> Rc<MemoryFactory> {
        Rc::new(Self::default())
    }

    pub fn last(&self) -> Rc<MemoryWidget> {
        self.created
            .borrow()
            .last()
            .cloned()
            .expect("factory created no widget")
    }

    pub fn count(&self) -> usize {
        self.created.borrow().len()
    }
}

impl WidgetFactory for MemoryFactory {
    fn edit(&self, container: &ContainerId) -> Option<WidgetHandle> {
        let widget = Rc::new(MemoryWidget::bound_to(container));
        self.created.borrow_mut().push(widget.clone());
        Some(widget as WidgetHandle)
    }
}

/// A library that is present but refuses to create editors.
pub struct RefusingFactory;

impl WidgetFactory for RefusingFactory {
    fn edit(&self, _container: &ContainerId) -> Option<WidgetHandle> {
        None
    }
}

/// Collects every value handed to an `on_change` callback.
#[derive(Clone, Default)]
pub struct ChangeLog(pub Rc<RefCell<Vec<String>>>);

impl ChangeLog {
    pub fn callback(&self) -> impl Fn(String) + use<> {
        let log = self.0.clone();
        move |value| log.borrow_mut().push(value)
    }

    pub fn values(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}
