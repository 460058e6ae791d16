use std::time::Duration;

use dioxus::prelude::*;
use jsonedit_core::{DeferredTask, Scheduler};

/// Defers tasks onto the Dioxus executor of the current scope.
///
/// Each task waits one timer turn before running, the way `setTimeout(.., 0)`
/// would. Tasks die with the scope that spawned them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DioxusScheduler;

impl Scheduler for DioxusScheduler {
    fn defer(&self, task: DeferredTask) {
        spawn(async move {
            tokio::time::sleep(Duration::ZERO).await;
            task();
        });
    }
}
