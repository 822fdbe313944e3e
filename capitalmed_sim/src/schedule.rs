// Frame scheduling: the redraw flag and a deferred-callback timer queue.
//
// The map runs on cooperative, single-threaded animation frames. Two helpers
// live here:
//
// - `FrameScheduler` batches redraw requests. Any number of state changes in
//   one frame set a single "needs redraw" flag; the render loop takes it once
//   per frame.
// - `TimerQueue<T>` holds payloads due at a future time (milliseconds on the
//   caller's clock), e.g. the chat widget's simulated typing delay. It is a
//   `BinaryHeap` with reversed ordering on `(due_ms, sequence)`, so the
//   earliest timer fires first and timers due at the same instant fire in
//   scheduling order. Cancelling is dropping the handle's entry via
//   `cancel`, or clearing the whole queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Batches redraw requests into at most one redraw per frame.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    needs_redraw: bool,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    /// A scheduler that draws the first frame.
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            frames: 0,
        }
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the flag. Returns whether this frame should be drawn.
    pub fn take_redraw(&mut self) -> bool {
        let draw = std::mem::take(&mut self.needs_redraw);
        if draw {
            self.frames += 1;
        }
        draw
    }

    /// Number of frames actually drawn so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

/// Identifies a scheduled timer for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Timer<T> {
    due_ms: u64,
    sequence: u64,
    payload: T,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.sequence == other.sequence
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the earliest (due, sequence) is the heap maximum.
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-heap of payloads keyed by due time.
pub struct TimerQueue<T> {
    heap: BinaryHeap<Timer<T>>,
    next_sequence: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, payload: T) -> TimerId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Timer {
            due_ms,
            sequence,
            payload,
        });
        TimerId(sequence)
    }

    /// Due time of the next timer, if any.
    pub fn peek_due(&self) -> Option<u64> {
        self.heap.peek().map(|t| t.due_ms)
    }

    /// Pop the next payload if it is due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<T> {
        if self.heap.peek().is_some_and(|t| t.due_ms <= now_ms) {
            self.heap.pop().map(|t| t.payload)
        } else {
            None
        }
    }

    /// Drain every payload due at or before `now_ms`, in firing order.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(p) = self.pop_due(now_ms) {
            out.push(p);
        }
        out
    }

    /// Remove a pending timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.heap.len();
        self.heap.retain(|t| t.sequence != id.0);
        self.heap.len() != before
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redraw_requests_batch_per_frame() {
        let mut sched = FrameScheduler::new();
        assert!(sched.take_redraw());
        assert!(!sched.take_redraw());
        sched.request_redraw();
        sched.request_redraw();
        sched.request_redraw();
        assert!(sched.take_redraw());
        assert!(!sched.take_redraw());
        assert_eq!(sched.frames_drawn(), 2);
    }

    #[test]
    fn default_scheduler_draws_the_first_frame() {
        let mut sched = FrameScheduler::default();
        assert!(sched.needs_redraw());
        assert!(sched.take_redraw());
        assert_eq!(sched.frames_drawn(), 1);
    }

    #[test]
    fn timers_fire_in_due_then_sequence_order() {
        let mut q = TimerQueue::new();
        q.schedule(100, "c");
        q.schedule(50, "a");
        q.schedule(50, "b");
        assert_eq!(q.peek_due(), Some(50));
        assert_eq!(q.drain_due(200), vec!["a", "b", "c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn pop_due_respects_clock() {
        let mut q = TimerQueue::new();
        q.schedule(100, 1);
        assert_eq!(q.pop_due(99), None);
        assert_eq!(q.pop_due(100), Some(1));
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule(10, 'a');
        q.schedule(20, 'b');
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.drain_due(100), vec!['b']);
    }

    #[test]
    fn clear_cancels_everything() {
        let mut q = TimerQueue::new();
        q.schedule(10, ());
        q.schedule(20, ());
        q.clear();
        assert_eq!(q.len(), 0);
        assert_eq!(q.pop_due(u64::MAX), None);
    }
}
