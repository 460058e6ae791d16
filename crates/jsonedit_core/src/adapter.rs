// Lifecycle bridge between a declarative host and the imperative editor widget.
//
// States: unmounted -> mounted (with or without a widget) -> unmounted.
// All entry points run to completion on the UI thread. The only work that
// outlives a call is the deferred resize, which re-checks liveness when it
// finally runs.
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::factory::FactorySource;
use crate::options::EditorOptions;
use crate::props::EditorProps;
use crate::schedule::Scheduler;
use crate::widget::{ContainerId, CursorHint, ListenerId, WidgetHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    Unmounted,
    /// Mounted, but no factory produced a widget: an inert container.
    MountedWithoutWidget,
    /// Mounted with a widget handle. A factory that talks to its editor
    /// asynchronously may only learn later that the editor could not be
    /// built; the handle stays in place and its calls go nowhere.
    MountedWithWidget,
}

/// Owns one editor widget for the lifetime of one mounted container.
///
/// Cloning yields another handle to the same adapter.
#[derive(Clone)]
pub struct EditorAdapter {
    inner: Rc<AdapterInner>,
}

struct AdapterInner {
    container: ContainerId,
    options: EditorOptions,
    factories: FactorySource,
    scheduler: Rc<dyn Scheduler>,
    mounted: Cell<bool>,
    widget: RefCell<Option<WidgetHandle>>,
    listener: Cell<Option<ListenerId>>,
    // True only while the adapter itself is writing into the widget.
    setting_value: Cell<bool>,
    props: RefCell<EditorProps>,
}

/// Holds the suppression flag up until dropped, unwinding included.
struct Suppress<'a>(&'a Cell<bool>);

impl<'a> Suppress<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for Suppress<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl EditorAdapter {
    pub fn new(options: EditorOptions, factories: FactorySource, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_container(ContainerId::generate(), options, factories, scheduler)
    }

    pub fn with_container(
        container: ContainerId,
        options: EditorOptions,
        factories: FactorySource,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Rc::new(AdapterInner {
                container,
                options,
                factories,
                scheduler,
                mounted: Cell::new(false),
                widget: RefCell::new(None),
                listener: Cell::new(None),
                setting_value: Cell::new(false),
                props: RefCell::new(EditorProps::default()),
            }),
        }
    }

    pub fn container(&self) -> &ContainerId {
        &self.inner.container
    }

    pub fn options(&self) -> &EditorOptions {
        &self.inner.options
    }

    pub fn state(&self) -> AdapterState {
        if !self.inner.mounted.get() {
            AdapterState::Unmounted
        } else if self.inner.widget.borrow().is_some() {
            AdapterState::MountedWithWidget
        } else {
            AdapterState::MountedWithoutWidget
        }
    }

    /// The widget currently owned, if any.
    pub fn widget(&self) -> Option<WidgetHandle> {
        self.inner.widget.borrow().clone()
    }

    /// Creates and configures the widget once the container is in the tree.
    pub fn mount(&self, props: EditorProps) {
        let inner = &self.inner;
        if inner.mounted.get() {
            warn!(container = %inner.container, "mount called on a mounted editor adapter");
            return;
        }
        inner.mounted.set(true);

        let created = match inner.factories.resolve(props.widget_factory.as_ref()) {
            Some((factory, origin)) => {
                debug!(container = %inner.container, ?origin, "creating editor widget");
                let widget = factory.edit(&inner.container);
                match &widget {
                    Some(widget) => inner.options.apply(widget.as_ref(), props.indentation),
                    None => debug!(container = %inner.container, "factory produced no widget"),
                }
                widget
            }
            None => {
                debug!(container = %inner.container, "no widget factory available, container stays inert");
                None
            }
        };

        let widget = match &props.on_load {
            Some(hook) => hook(created.clone(), &inner.container).or(created),
            None => created,
        };

        let value = props.value.clone();
        *inner.props.borrow_mut() = props;
        *inner.widget.borrow_mut() = widget.clone();

        if let Some(widget) = widget {
            let weak = Rc::downgrade(&self.inner);
            let id = widget.on_change(Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_change();
                }
            }));
            inner.listener.set(Some(id));

            // Not suppressed: the host hears the seeded content once.
            widget.set_value(&value, CursorHint::DocumentStart);
        }
    }

    /// Pushes new host properties into the live widget. No-op unless mounted.
    pub fn update(&self, props: EditorProps) {
        let inner = &self.inner;
        if !inner.mounted.get() {
            trace!(container = %inner.container, "update ignored, adapter not mounted");
            return;
        }

        let widget = inner.widget.borrow().clone();
        if let Some(widget) = &widget {
            if props.value != widget.get_value() {
                let _suppress = Suppress::engage(&inner.setting_value);
                widget.set_value(&props.value, CursorHint::DocumentStart);
            }

            if let Some(indentation) = props.indentation {
                widget
                    .session()
                    .set_tab_size(inner.options.tab_size_for(Some(indentation)));
            }
        }

        // The surrounding layout may have moved; let it settle first.
        let weak = Rc::downgrade(&self.inner);
        inner.scheduler.defer(Box::new(move || resize_if_alive(&weak)));

        *inner.props.borrow_mut() = props;
    }

    /// Destroys the widget. Later updates and unmounts do nothing.
    pub fn unmount(&self) {
        let inner = &self.inner;
        if !inner.mounted.replace(false) {
            return;
        }

        let widget = inner.widget.borrow_mut().take();
        if let Some(widget) = widget {
            if let Some(id) = inner.listener.take() {
                widget.off_change(id);
            }
            widget.destroy();
            debug!(container = %inner.container, "editor widget destroyed");
        }

        *inner.props.borrow_mut() = EditorProps::default();
    }
}

impl AdapterInner {
    fn handle_change(&self) {
        if self.setting_value.get() {
            trace!(container = %self.container, "change from programmatic update suppressed");
            return;
        }
        let Some(on_change) = self.props.borrow().on_change.clone() else {
            return;
        };
        let Some(widget) = self.widget.borrow().clone() else {
            return;
        };
        on_change(widget.get_value());
    }
}

fn resize_if_alive(adapter: &Weak<AdapterInner>) {
    let Some(inner) = adapter.upgrade() else {
        return;
    };
    let widget = inner.widget.borrow().clone();
    match widget {
        Some(widget) => widget.resize(false),
        None => trace!(container = %inner.container, "deferred resize skipped, widget gone"),
    }
}
