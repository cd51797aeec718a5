//! Deferred work run once per frame.

use std::time::{Duration, Instant};

use crate::Ui;

pub type Task = Box<dyn FnMut(&mut Ui)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

pub(crate) struct ScheduledTask {
    pub(crate) id: TaskId,
    pub(crate) due: Instant,
    pub(crate) interval: Option<Duration>,
    pub(crate) task: Task,
}

/// Delayed and repeating tasks.
#[derive(Default)]
pub struct TaskScheduler {
    next_id: u64,
    tasks: Vec<ScheduledTask>,
    /// Ids of tasks that are running right now.
    running: Vec<TaskId>,
    /// Running tasks cancelled while they ran.
    cancelled: Vec<TaskId>,
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("tasks", &self.tasks.len())
            .field("running", &self.running)
            .finish()
    }
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Run `task` once, `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: Task) -> TaskId {
        let id = self.next_id();
        self.tasks.push(ScheduledTask {
            id,
            due: now + delay,
            interval: None,
            task,
        });
        id
    }

    /// Run `task` every `interval`, the first time `interval` after `now`.
    pub fn schedule_repeating(&mut self, now: Instant, interval: Duration, task: Task) -> TaskId {
        let id = self.next_id();
        self.tasks.push(ScheduledTask {
            id,
            due: now + interval,
            interval: Some(interval),
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            return true;
        }
        if self.running.contains(&id) && !self.cancelled.contains(&id) {
            self.cancelled.push(id);
            return true;
        }
        false
    }

    /// Take every task due at `now`, in due order.
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| t.due <= now);
        self.tasks = pending;
        due.sort_by_key(|t| t.due);
        self.running = due.iter().map(|t| t.id).collect();
        due
    }

    /// Put a repeating task back after it ran.
    pub(crate) fn finish(&mut self, mut task: ScheduledTask, now: Instant) {
        self.running.retain(|id| *id != task.id);
        if let Some(index) = self.cancelled.iter().position(|id| *id == task.id) {
            self.cancelled.swap_remove(index);
            return;
        }
        let Some(interval) = task.interval else {
            return;
        };
        task.due += interval;
        if task.due <= now {
            task.due = now + interval;
        }
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.running.clear();
        self.cancelled.clear();
    }
}

impl Ui {
    pub fn schedule_after(&mut self, delay: Duration, task: impl FnMut(&mut Ui) + 'static) -> TaskId {
        self.tasks.schedule_after(self.now, delay, Box::new(task))
    }

    pub fn schedule_repeating(
        &mut self,
        interval: Duration,
        task: impl FnMut(&mut Ui) + 'static,
    ) -> TaskId {
        self.tasks.schedule_repeating(self.now, interval, Box::new(task))
    }

    pub fn cancel_task(&mut self, id: TaskId) -> bool {
        self.tasks.cancel(id)
    }

    /// Run every task that is due at the current frame time.
    pub fn run_tasks(&mut self) {
        let now = self.now;
        for mut scheduled in self.tasks.take_due(now) {
            (scheduled.task)(self);
            self.tasks.finish(scheduled, now);
        }
    }
}
