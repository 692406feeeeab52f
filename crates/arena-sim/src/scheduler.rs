//! Delayed reactions keyed on simulation time.
//!
//! A min-heap ordered by `(due_ms, sequence)`. Equal due times pop in the
//! order they were scheduled. The engine drains it at the start of every tick.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work the orchestrator defers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledTask {
    AwardReward { amount: i64 },
    EnterDefeat,
    ExpireShield { generation: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due_ms: f64,
    seq: u64,
    task: ScheduledTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap yields the earliest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, due_ms: f64, task: ScheduledTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due_ms, seq, task });
    }

    pub fn schedule_in(&mut self, now_ms: f64, delay_ms: f64, task: ScheduledTask) {
        self.schedule_at(now_ms + delay_ms.max(0.0), task);
    }

    /// Pop the earliest task if it is due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<ScheduledTask> {
        if self.heap.peek()?.due_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|e| e.task)
    }

    /// Every task due at `now_ms`, earliest first.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<ScheduledTask> {
        std::iter::from_fn(|| self.pop_due(now_ms)).collect()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
