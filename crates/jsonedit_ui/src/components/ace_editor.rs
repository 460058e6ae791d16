use std::rc::Rc;

use dioxus::prelude::*;
use jsonedit_core::{
    ChangeCallback, ContainerId, EditorAdapter, EditorOptions, EditorProps, FactorySource,
    LoadHook, WidgetFactory, WidgetHandle,
};

use crate::bridge::AceBridgeFactory;
use crate::scheduler::DioxusScheduler;

/// A widget factory passed as a prop. Equal when both wrap the same factory.
#[derive(Clone)]
pub struct FactoryProp(pub Rc<dyn WidgetFactory>);

impl PartialEq for FactoryProp {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Hook run once the widget exists; may hand back a replacement widget.
pub type OnLoad = Callback<(Option<WidgetHandle>, ContainerId), Option<WidgetHandle>>;

/// Ace code editor bound to a string value.
///
/// The container `div` has no children in the virtual DOM, so Dioxus never
/// touches the nodes Ace builds inside it. `options` and `widget_factory` are
/// read once, when the editor is created.
#[component]
pub fn AceEditor(
    value: String,
    indentation: Option<u32>,
    widget_factory: Option<FactoryProp>,
    on_change: Option<EventHandler<String>>,
    on_load: Option<OnLoad>,
    options: Option<EditorOptions>,
) -> Element {
    let adapter = use_hook(|| {
        EditorAdapter::new(
            options.clone().unwrap_or_default(),
            FactorySource::bundled(Rc::new(AceBridgeFactory)),
            Rc::new(DioxusScheduler),
        )
    });

    let props = host_props(value, indentation, widget_factory, on_change, on_load);

    // Props only change through a re-render, so every render after the first
    // is an update. Before the mount effect has run this is a no-op.
    adapter.update(props.clone());

    use_effect({
        let adapter = adapter.clone();
        move || adapter.mount(props.clone())
    });

    use_drop({
        let adapter = adapter.clone();
        move || adapter.unmount()
    });

    let container_id = adapter.container().to_string();

    rsx! {
        div {
            id: "{container_id}",
            class: "jsoneditor-code",
            style: "width: 100%; height: 100%;",
        }
    }
}

fn host_props(
    value: String,
    indentation: Option<u32>,
    widget_factory: Option<FactoryProp>,
    on_change: Option<EventHandler<String>>,
    on_load: Option<OnLoad>,
) -> EditorProps {
    EditorProps {
        value,
        indentation,
        widget_factory: widget_factory.map(|factory| factory.0),
        on_change: on_change.map(|handler| Rc::new(move |text: String| handler.call(text)) as ChangeCallback),
        on_load: on_load.map(|hook| {
            Rc::new(move |widget: Option<WidgetHandle>, container: &ContainerId| {
                hook.call((widget, container.clone()))
            }) as LoadHook
        }),
    }
}
