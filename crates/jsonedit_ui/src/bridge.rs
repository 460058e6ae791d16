// Ace running inside the webview, seen through the `Widget` contract.
//
// Calls from Rust are fire-and-forget evals. The bridge mirrors the content
// and session settings on the Rust side so reads stay synchronous; the
// mirror is refreshed by `change` messages from the editor.
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use dioxus::core::Task;
use dioxus::prelude::*;
use jsonedit_core::{
    ChangeListener, ContainerId, CursorHint, EditSession, ListenerId, Widget, WidgetFactory,
    WidgetHandle,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, trace, warn};

use crate::script;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Eval error: {0}")]
    Eval(String),
    #[error("Malformed bridge message: {0}")]
    Message(#[from] serde_json::Error),
}

/// Messages the bootstrap script sends back to Rust.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeMessage {
    Ready,
    /// `revision` is the last push from Rust the editor had applied when
    /// the user edit happened.
    Change {
        value: String,
        #[serde(default)]
        revision: u64,
    },
    /// `window.ace` is missing or the container was not found.
    Unavailable,
}

impl BridgeMessage {
    pub fn parse(raw: Value) -> Result<Self, BridgeError> {
        Ok(serde_json::from_value(raw)?)
    }
}

/// Where the editor in the webview is, as far as Rust has heard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    /// Bootstrap sent, no answer yet. Evals are queued behind it.
    Booting,
    Ready,
    /// The webview has no Ace or no container; evals are dropped.
    Unavailable,
    Destroyed,
}

/// Creates editors with the Ace build loaded in the window.
///
/// `edit` cannot see the webview synchronously, so it always returns a
/// widget and the adapter reports `MountedWithWidget`. A window without Ace
/// only shows up later, as an `unavailable` message that moves the widget to
/// [`BridgeStatus::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AceBridgeFactory;

impl WidgetFactory for AceBridgeFactory {
    fn edit(&self, container: &ContainerId) -> Option<WidgetHandle> {
        Some(AceBridgeWidget::attach(container.clone()) as WidgetHandle)
    }
}

type Evaluator = Rc<dyn Fn(&str)>;

pub struct AceBridgeWidget {
    container: ContainerId,
    value: RefCell<String>,
    // Bumped on every push from Rust; older `change` messages are stale.
    revision: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
    next_listener: Cell<u64>,
    session: BridgeSession,
    receiver: Cell<Option<Task>>,
    status: Rc<Cell<BridgeStatus>>,
    eval: Evaluator,
}

impl AceBridgeWidget {
    /// Boots Ace in `container` and starts listening for its messages.
    /// Must run inside a Dioxus scope, after the container is in the DOM.
    pub fn attach(container: ContainerId) -> Rc<Self> {
        let widget = Rc::new(Self::with_evaluator(
            container,
            Rc::new(|js: &str| {
                let _ = document::eval(js);
            }),
        ));

        let handle = document::eval(&script::bootstrap(&widget.container));
        let task = spawn(receive_loop(handle, Rc::downgrade(&widget)));
        widget.receiver.set(Some(task));
        widget
    }

    fn with_evaluator(container: ContainerId, eval: Evaluator) -> Self {
        let status = Rc::new(Cell::new(BridgeStatus::Booting));
        Self {
            session: BridgeSession::new(container.clone(), status.clone(), eval.clone()),
            container,
            value: RefCell::new(String::new()),
            revision: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            receiver: Cell::new(None),
            status,
            eval,
        }
    }

    /// A widget with no webview behind it; scripts land in `sent`.
    #[cfg(test)]
    fn detached(container: ContainerId, sent: Rc<RefCell<Vec<String>>>) -> Self {
        Self::with_evaluator(
            container,
            Rc::new(move |js: &str| sent.borrow_mut().push(js.to_string())),
        )
    }

    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    pub fn status(&self) -> BridgeStatus {
        self.status.get()
    }

    pub fn receive(&self, raw: Value) -> Result<(), BridgeError> {
        match BridgeMessage::parse(raw)? {
            BridgeMessage::Ready => {
                debug!(container = %self.container, "ace editor ready");
                self.status.set(BridgeStatus::Ready);
            }
            BridgeMessage::Unavailable => {
                warn!(container = %self.container, "ace is not loaded in this window, editor stays empty");
                self.status.set(BridgeStatus::Unavailable);
            }
            BridgeMessage::Change { value, revision } => {
                if revision < self.revision.get() {
                    trace!(
                        container = %self.container,
                        revision,
                        current = self.revision.get(),
                        "stale change message dropped"
                    );
                    return Ok(());
                }
                if *self.value.borrow() == value {
                    trace!(container = %self.container, "change message matches mirror");
                    return Ok(());
                }
                *self.value.borrow_mut() = value;
                self.notify();
            }
        }
        Ok(())
    }

    fn notify(&self) {
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

    fn call(&self, method: &str, args: &[Value]) {
        self.run(script::editor_call(&self.container, method, args));
    }

    fn run(&self, js: String) {
        run_script(&self.container, self.status.get(), &self.eval, &js);
    }
}

fn run_script(container: &ContainerId, status: BridgeStatus, eval: &Evaluator, js: &str) {
    match status {
        BridgeStatus::Destroyed | BridgeStatus::Unavailable => {
            trace!(%container, ?status, "eval skipped");
        }
        BridgeStatus::Booting => {
            trace!(%container, "eval queued before ace reported ready");
            eval(js);
        }
        BridgeStatus::Ready => eval(js),
    }
}

async fn receive_loop(mut handle: document::Eval, widget: Weak<AceBridgeWidget>) {
    loop {
        let raw = match handle.recv::<Value>().await {
            Ok(raw) => raw,
            Err(err) => {
                let err = BridgeError::Eval(format!("{err:?}"));
                debug!(%err, "ace bridge channel closed");
                break;
            }
        };
        let Some(widget) = widget.upgrade() else {
            break;
        };
        if let Err(err) = widget.receive(raw) {
            warn!(container = %widget.container, %err, "ignoring ace bridge message");
        }
    }
}

impl Widget for AceBridgeWidget {
    fn get_value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, text: &str, cursor: CursorHint) {
        let revision = self.revision.get() + 1;
        self.revision.set(revision);
        *self.value.borrow_mut() = text.to_string();
        self.run(script::set_value(&self.container, text, cursor, revision));
        // Ace reports `change` from inside setValue; the script keeps that
        // event in the webview, so the listeners hear it from here instead.
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
        self.call("setTheme", &[json!(theme)]);
    }

    fn set_font_size(&self, size: u32) {
        self.call("setFontSize", &[json!(size)]);
    }

    fn set_show_print_margin(&self, show: bool) {
        self.call("setShowPrintMargin", &[json!(show)]);
    }

    fn bind_key(&self, key: &str, command: Option<&str>) {
        self.call("commands.bindKey", &[json!(key), json!(command)]);
    }

    fn resize(&self, force: bool) {
        self.call("resize", &[json!(force)]);
    }

    fn destroy(&self) {
        self.run(script::destroy(&self.container));
        self.status.set(BridgeStatus::Destroyed);
        if let Some(task) = self.receiver.take() {
            task.cancel();
        }
        self.listeners.borrow_mut().clear();
    }
}

struct BridgeSession {
    container: ContainerId,
    status: Rc<Cell<BridgeStatus>>,
    eval: Evaluator,
    tab_size: Cell<u32>,
    soft_tabs: Cell<bool>,
    wrap: Cell<bool>,
    mode: RefCell<String>,
}

impl BridgeSession {
    fn new(container: ContainerId, status: Rc<Cell<BridgeStatus>>, eval: Evaluator) -> Self {
        // Ace's own defaults until the adapter configures the session.
        Self {
            container,
            status,
            eval,
            tab_size: Cell::new(4),
            soft_tabs: Cell::new(true),
            wrap: Cell::new(false),
            mode: RefCell::new("ace/mode/text".to_string()),
        }
    }

    fn call(&self, method: &str, arg: Value) {
        let js = script::editor_call(&self.container, &format!("getSession().{method}"), &[arg]);
        run_script(&self.container, self.status.get(), &self.eval, &js);
    }
}

impl EditSession for BridgeSession {
    fn tab_size(&self) -> u32 {
        self.tab_size.get()
    }

    fn set_tab_size(&self, size: u32) {
        self.tab_size.set(size);
        self.call("setTabSize", json!(size));
    }

    fn use_soft_tabs(&self) -> bool {
        self.soft_tabs.get()
    }

    fn set_use_soft_tabs(&self, enabled: bool) {
        self.soft_tabs.set(enabled);
        self.call("setUseSoftTabs", json!(enabled));
    }

    fn use_wrap_mode(&self) -> bool {
        self.wrap.get()
    }

    fn set_use_wrap_mode(&self, enabled: bool) {
        self.wrap.set(enabled);
        self.call("setUseWrapMode", json!(enabled));
    }

    fn mode(&self) -> String {
        self.mode.borrow().clone()
    }

    fn set_mode(&self, mode: &str) {
        *self.mode.borrow_mut() = mode.to_string();
        self.call("setMode", json!(mode));
    }
}
