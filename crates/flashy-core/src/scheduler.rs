// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cooperative timers.
//!
//! Timers are plain data: a task is a due instant and an event. The host
//! calls [`CountdownScheduler::poll`] from its event loop with the current
//! time, and due events are handed back to it. Nothing fires on its own.

use std::time::Duration;
use std::time::Instant;

/// How long the user has to answer before the card is revealed.
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 15;

const TICK: Duration = Duration::from_secs(1);

/// Identifies a scheduled task so that it can be cancelled.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TaskHandle(u64);

struct ScheduledTask<E> {
    handle: TaskHandle,
    due: Instant,
    event: E,
}

/// A queue of events waiting for their due time.
pub struct TaskQueue<E> {
    next_id: u64,
    tasks: Vec<ScheduledTask<E>>,
}

impl<E> TaskQueue<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due: Instant, event: E) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask { handle, due, event });
        handle
    }

    /// Cancel a pending task. Returns false if it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        self.tasks.len() != before
    }

    /// Remove and return the earliest task due at or before `now`. Tasks due
    /// at the same instant come out in the order they were scheduled.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, E)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= now)
            .min_by_key(|(_, task)| (task.due, task.handle.0))
            .map(|(idx, _)| idx)?;
        let task = self.tasks.remove(idx);
        Some((task.due, task.event))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<E> Default for TaskQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CountdownState {
    pub remaining_seconds: u32,
    pub active: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CountdownEvent {
    /// A second passed; this many remain.
    Tick(u32),
    /// Time is up: show the back of the card.
    Reveal,
}

/// Counts down the seconds the user has to answer the current card.
pub struct CountdownScheduler {
    duration: u32,
    state: CountdownState,
    queue: TaskQueue<()>,
    tick: Option<TaskHandle>,
}

impl CountdownScheduler {
    pub fn new(duration: u32) -> Self {
        let duration = duration.max(1);
        Self {
            duration,
            state: CountdownState {
                remaining_seconds: duration,
                active: false,
            },
            queue: TaskQueue::new(),
            tick: None,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Restart the countdown from the full duration. Any tick left over from
    /// the previous card is cancelled first.
    pub fn start(&mut self, now: Instant) -> CountdownEvent {
        self.cancel();
        self.state = CountdownState {
            remaining_seconds: self.duration,
            active: true,
        };
        self.tick = Some(self.queue.schedule(now + TICK, ()));
        CountdownEvent::Tick(self.duration)
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.queue.cancel(handle);
        }
        self.state.active = false;
    }

    /// Fire every tick due by `now`. A host that polls late catches up on
    /// the seconds it missed.
    pub fn poll(&mut self, now: Instant) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        while let Some((due, ())) = self.queue.pop_due(now) {
            self.tick = None;
            self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
            if self.state.remaining_seconds > 0 {
                events.push(CountdownEvent::Tick(self.state.remaining_seconds));
                self.tick = Some(self.queue.schedule(due + TICK, ()));
            } else {
                events.push(CountdownEvent::Reveal);
                self.state.active = false;
            }
        }
        events
    }
}
