use std::rc::Rc;

use crate::widget::WidgetFactory;

/// Factories available to an adapter besides the one a host passes in.
///
/// `bundled` is the factory shipped with the application. `fallback` stands in
/// for a widget library provided by the surrounding environment; it is injected
/// here instead of being looked up from global state.
#[derive(Clone, Default)]
pub struct FactorySource {
    pub bundled: Option<Rc<dyn WidgetFactory>>,
    pub fallback: Option<Rc<dyn WidgetFactory>>,
}

/// Which candidate [`FactorySource::resolve`] picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryOrigin {
    Explicit,
    Bundled,
    Fallback,
}

impl FactorySource {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn bundled(factory: Rc<dyn WidgetFactory>) -> Self {
        Self {
            bundled: Some(factory),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, factory: Rc<dyn WidgetFactory>) -> Self {
        self.fallback = Some(factory);
        self
    }

    /// Explicit host factory first, then the bundled one, then the fallback.
    pub fn resolve(
        &self,
        explicit: Option<&Rc<dyn WidgetFactory>>,
    ) -> Option<(Rc<dyn WidgetFactory>, FactoryOrigin)> {
        if let Some(factory) = explicit {
            return Some((factory.clone(), FactoryOrigin::Explicit));
        }
        if let Some(factory) = &self.bundled {
            return Some((factory.clone(), FactoryOrigin::Bundled));
        }
        self.fallback
            .as_ref()
            .map(|factory| (factory.clone(), FactoryOrigin::Fallback))
    }
}
