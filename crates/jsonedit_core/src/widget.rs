// Contract between the adapter and the embedded editor widget.
//
// The widget is an imperative object owned by a third party (Ace). Every call
// takes `&self`: change listeners fire synchronously from inside `set_value`
// and read the widget back, so implementations keep their own interior
// mutability and never hold a borrow across a listener call.
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shared handle to a live widget instance.
pub type WidgetHandle = Rc<dyn Widget>;

/// Listener invoked whenever the widget content changes, for any reason.
pub type ChangeListener = Rc<dyn Fn()>;

/// DOM id of the element a widget is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    pub const PREFIX: &'static str = "jsonedit-";

    /// A fresh, document-unique id.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Uuid::new_v4().simple()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the cursor lands after the whole content is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    /// Cursor at the start, scroll reset. Used for every push from the host.
    #[default]
    DocumentStart,
    SelectAll,
    DocumentEnd,
}

impl CursorHint {
    /// The numeric position argument Ace's `setValue` expects.
    pub fn as_ace(self) -> i8 {
        match self {
            CursorHint::DocumentStart => -1,
            CursorHint::SelectAll => 0,
            CursorHint::DocumentEnd => 1,
        }
    }
}

/// Token returned by [`Widget::on_change`], used to unregister the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The nested edit session: indentation, wrapping and language mode.
pub trait EditSession {
    fn tab_size(&self) -> u32;
    fn set_tab_size(&self, size: u32);
    fn use_soft_tabs(&self) -> bool;
    fn set_use_soft_tabs(&self, enabled: bool);
    fn use_wrap_mode(&self) -> bool;
    fn set_use_wrap_mode(&self, enabled: bool);
    fn mode(&self) -> String;
    fn set_mode(&self, mode: &str);
}

pub trait Widget {
    fn get_value(&self) -> String;

    /// Replaces the full content. Implementations notify change listeners
    /// before returning.
    fn set_value(&self, text: &str, cursor: CursorHint);

    fn on_change(&self, listener: ChangeListener) -> ListenerId;
    fn off_change(&self, id: ListenerId);

    fn session(&self) -> &dyn EditSession;

    fn set_theme(&self, theme: &str);
    fn set_font_size(&self, size: u32);
    fn set_show_print_margin(&self, show: bool);

    /// Binds `key` to `command`; `None` removes any binding for that key.
    fn bind_key(&self, key: &str, command: Option<&str>);

    /// Recomputes layout. `force` also re-renders when the size is unchanged.
    fn resize(&self, force: bool);

    fn destroy(&self);
}

/// Creates widgets bound to a container element.
pub trait WidgetFactory {
    /// `None` when the widget library is present but cannot create an editor.
    fn edit(&self, container: &ContainerId) -> Option<WidgetHandle>;
}
