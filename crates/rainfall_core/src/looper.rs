//! UI-thread task queue
//!
//! A `Looper` is the single serialized queue that every Rainfall callback runs
//! on: spawn timers, animation-end notifications, deferred view-tree removals and
//! lifecycle calls. There is no parallelism; ordering is strictly
//! (due time, post order).
//!
//! Time is virtual and measured in milliseconds. The host drives it by calling
//! [`Looper::advance_by`] from its frame loop, and tests drive it directly.
//!
//! Tasks run with no internal borrow held, so a running task may post new tasks,
//! cancel pending ones, or call back into any component that owns a looper.
//!
//! ```rust
//! use rainfall_core::Looper;
//!
//! let looper = Looper::new();
//! let id = looper.post_delayed(100, || unreachable!());
//! assert!(looper.cancel(id));
//! assert_eq!(looper.advance_by(200), 0);
//! ```

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to a posted task
    ///
    /// Ids are generational: once a task has run or been cancelled its id
    /// never matches a live task again.
    pub struct TaskId;
}

type Task = Box<dyn FnOnce()>;

struct PendingTask {
    due_ms: u64,
    seq: u64,
    task: Task,
}

struct LooperInner {
    now_ms: u64,
    next_seq: u64,
    tasks: SlotMap<TaskId, PendingTask>,
    /// Run order: (due time, post sequence)
    queue: BTreeMap<(u64, u64), TaskId>,
}

impl LooperInner {
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TaskId {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.tasks.insert(PendingTask { due_ms, seq, task });
        self.queue.insert((due_ms, seq), id);
        id
    }

    fn unschedule(&mut self, id: TaskId) -> Option<Task> {
        let pending = self.tasks.remove(id)?;
        self.queue.remove(&(pending.due_ms, pending.seq));
        Some(pending.task)
    }

    /// Pop the next task due at or before `deadline_ms`, moving the clock to it
    fn pop_due(&mut self, deadline_ms: u64) -> Option<Task> {
        let (&(due_ms, _), _) = self.queue.first_key_value()?;
        if due_ms > deadline_ms {
            return None;
        }
        let (_, id) = self.queue.pop_first()?;
        let pending = self.tasks.remove(id)?;
        self.now_ms = self.now_ms.max(pending.due_ms);
        Some(pending.task)
    }
}

/// The UI-thread task queue
///
/// Cloning a `Looper` yields another owner of the same queue. Components that
/// capture the queue inside posted tasks should hold a [`LooperHandle`]
/// instead, so the queue is not kept alive by its own tasks.
#[derive(Clone)]
pub struct Looper {
    inner: Rc<RefCell<LooperInner>>,
}

impl Looper {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(LooperInner {
                now_ms: 0,
                next_seq: 0,
                tasks: SlotMap::with_key(),
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Post a task to run at the current instant, after already-queued work
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        self.post_delayed(0, task)
    }

    /// Post a task to run `delay_ms` after the current instant
    pub fn post_delayed<F>(&self, delay_ms: u64, task: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        self.inner.borrow_mut().schedule(delay_ms, Box::new(task))
    }

    /// Cancel a task that has not run yet
    ///
    /// Returns `false` if the task already ran, was already cancelled, or the
    /// id is unknown.
    pub fn cancel(&self, id: TaskId) -> bool {
        let removed = self.inner.borrow_mut().unschedule(id);
        // Dropped outside the borrow: captured state may touch the looper on drop
        removed.is_some()
    }

    /// Check whether a task is still waiting to run
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.inner.borrow().tasks.contains_key(id)
    }

    /// Number of tasks waiting to run
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Move the clock forward by `ms`, running every task that becomes due
    ///
    /// Tasks posted while advancing also run if they fall inside the window.
    /// Returns the number of tasks run.
    pub fn advance_by(&self, ms: u64) -> usize {
        let deadline_ms = self.now_ms().saturating_add(ms);
        let mut ran = 0;

        loop {
            let next = self.inner.borrow_mut().pop_due(deadline_ms);
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.now_ms = inner.now_ms.max(deadline_ms);
        ran
    }

    /// Run the tasks due at the current instant without moving the clock
    pub fn run_pending(&self) -> usize {
        self.advance_by(0)
    }

    /// Get a weak handle for capturing inside tasks
    pub fn handle(&self) -> LooperHandle {
        LooperHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Looper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Looper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Looper")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.tasks.len())
            .finish()
    }
}

/// A weak handle to a [`Looper`]
///
/// Operations through a handle whose looper has been dropped are no-ops.
#[derive(Clone)]
pub struct LooperHandle {
    inner: Weak<RefCell<LooperInner>>,
}

impl LooperHandle {
    /// Recover an owning looper, if it is still alive
    pub fn upgrade(&self) -> Option<Looper> {
        self.inner.upgrade().map(|inner| Looper { inner })
    }

    pub fn post_delayed<F>(&self, delay_ms: u64, task: F) -> Option<TaskId>
    where
        F: FnOnce() + 'static,
    {
        self.upgrade().map(|looper| looper.post_delayed(delay_ms, task))
    }

    pub fn cancel(&self, id: TaskId) -> bool {
        self.upgrade().map(|looper| looper.cancel(id)).unwrap_or(false)
    }

    pub fn now_ms(&self) -> Option<u64> {
        self.upgrade().map(|looper| looper.now_ms())
    }

    /// Check if the looper is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
