use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Work to run on a later turn of the event loop.
pub type DeferredTask = Box<dyn FnOnce()>;

/// Runs tasks after the current call stack has unwound. Fire and forget:
/// a task must check for itself that whatever it touches is still alive.
pub trait Scheduler {
    fn defer(&self, task: DeferredTask);
}

/// A plain next-turn queue for hosts that drive their own loop.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<DeferredTask>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs every task queued before this call and returns how many ran.
    /// Tasks deferred while draining wait for the next call.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<DeferredTask> = self.tasks.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}

impl Scheduler for TaskQueue {
    fn defer(&self, task: DeferredTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}
