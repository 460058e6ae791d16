use std::fmt;
use std::rc::Rc;

use crate::widget::{ContainerId, WidgetFactory, WidgetHandle};

/// Receives the full widget content after a user edit.
pub type ChangeCallback = Rc<dyn Fn(String)>;

/// Called once after the widget is created. Returning `Some` replaces the
/// widget the adapter owns; `None` keeps the one passed in.
pub type LoadHook = Rc<dyn Fn(Option<WidgetHandle>, &ContainerId) -> Option<WidgetHandle>>;

/// Properties supplied by the host on mount and on every update.
#[derive(Clone, Default)]
pub struct EditorProps {
    pub value: String,
    pub indentation: Option<u32>,
    pub widget_factory: Option<Rc<dyn WidgetFactory>>,
    pub on_change: Option<ChangeCallback>,
    pub on_load: Option<LoadHook>,
}

impl EditorProps {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_indentation(mut self, indentation: u32) -> Self {
        self.indentation = Some(indentation);
        self
    }

    pub fn with_factory(mut self, factory: Rc<dyn WidgetFactory>) -> Self {
        self.widget_factory = Some(factory);
        self
    }

    pub fn with_on_change(mut self, on_change: impl Fn(String) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn with_on_load(
        mut self,
        on_load: impl Fn(Option<WidgetHandle>, &ContainerId) -> Option<WidgetHandle> + 'static,
    ) -> Self {
        self.on_load = Some(Rc::new(on_load));
        self
    }
}

impl fmt::Debug for EditorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("value", &self.value)
            .field("indentation", &self.indentation)
            .field("widget_factory", &self.widget_factory.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}
