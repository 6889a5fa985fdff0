//! Frame scheduling for the glitch renderer.
//!
//! [`FramePump`] is the seam to the host's per-frame callback primitive
//! (requestAnimationFrame, a timer, an event-loop task). [`AnimationScheduler`]
//! sits on top and enforces the one invariant the render loop relies on:
//! at most one callback is pending per renderer at any instant, and
//! cancellation is synchronous.

use parking_lot::Mutex;
use std::sync::Arc;

/// A single frame callback, invoked with the host's timestamp.
pub type FrameCallback = Box<dyn FnOnce(f64) + Send>;

/// Opaque id of a requested frame, used for cancellation.
pub type FrameId = u64;

/// Host per-frame callback primitive.
///
/// Implementations must queue the callback and invoke it from a later turn of
/// the host loop -- never synchronously from `request_frame`.
pub trait FramePump: Send + Sync {
    /// Queue `callback` for the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameId;

    /// Cancel a previously requested frame. Unknown ids are ignored.
    fn cancel_frame(&self, id: FrameId);
}

/// Single-pending-frame scheduler for one renderer.
///
/// Cheaply cloneable so the frame callback can reschedule through its own
/// scheduler.
#[derive(Clone)]
pub struct AnimationScheduler {
    pump: Arc<dyn FramePump>,
    pending: Arc<Mutex<Option<FrameId>>>,
}

impl AnimationScheduler {
    pub fn new(pump: Arc<dyn FramePump>) -> Self {
        Self {
            pump,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Request the next frame. Returns false (and does nothing) if a frame is
    /// already pending.
    ///
    /// The pending slot is cleared before `callback` runs, so the callback
    /// may immediately schedule its successor.
    pub fn schedule(&self, callback: FrameCallback) -> bool {
        let mut pending = self.pending.lock();
        if pending.is_some() {
            log::trace!("[GLITCH] frame already pending, schedule skipped");
            return false;
        }
        let slot = Arc::clone(&self.pending);
        let id = self.pump.request_frame(Box::new(move |timestamp| {
            *slot.lock() = None;
            callback(timestamp);
        }));
        *pending = Some(id);
        true
    }

    /// Cancel the pending frame, if any. Synchronous and idempotent: once
    /// this returns, the cancelled callback will not run.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.lock().take() {
            self.pump.cancel_frame(id);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }
}

/// Deterministic [`FramePump`] driven by explicit [`tick`](ManualPump::tick)
/// calls. Used by headless hosts and tests.
#[derive(Default)]
pub struct ManualPump {
    inner: Mutex<PumpQueue>,
}

#[derive(Default)]
struct PumpQueue {
    queue: Vec<(FrameId, FrameCallback)>,
    next_id: FrameId,
    cancelled: usize,
}

impl ManualPump {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Run the oldest queued callback with the given timestamp. Returns false
    /// if nothing was queued.
    pub fn tick(&self, timestamp: f64) -> bool {
        let callback = {
            let mut inner = self.inner.lock();
            if inner.queue.is_empty() {
                return false;
            }
            inner.queue.remove(0).1
        };
        // Run outside the lock: the callback may request the next frame.
        callback(timestamp);
        true
    }

    /// Number of callbacks currently queued.
    pub fn queued(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// Number of frames cancelled over the pump's lifetime.
    pub fn cancelled(&self) -> usize {
        self.inner.lock().cancelled
    }
}

impl FramePump for ManualPump {
    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.queue.push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        let mut inner = self.inner.lock();
        let before = inner.queue.len();
        inner.queue.retain(|(queued, _)| *queued != id);
        if inner.queue.len() < before {
            inner.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_at_most_one_pending() {
        let pump = ManualPump::new();
        let scheduler = AnimationScheduler::new(pump.clone() as Arc<dyn FramePump>);

        assert!(scheduler.schedule(Box::new(|_| {})));
        assert!(!scheduler.schedule(Box::new(|_| {})));
        assert_eq!(pump.queued(), 1);
    }

    #[test]
    fn test_callback_can_reschedule_immediately() {
        let pump = ManualPump::new();
        let scheduler = AnimationScheduler::new(pump.clone() as Arc<dyn FramePump>);
        let ran = Arc::new(AtomicUsize::new(0));

        let inner_sched = scheduler.clone();
        let inner_ran = Arc::clone(&ran);
        scheduler.schedule(Box::new(move |_| {
            inner_ran.fetch_add(1, Ordering::SeqCst);
            // Pending slot was cleared before we ran, so this succeeds.
            assert!(inner_sched.schedule(Box::new(|_| {})));
        }));

        assert!(pump.tick(16.0));
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(pump.queued(), 1);
        assert!(scheduler.has_pending());
    }

    #[test]
    fn test_cancel_is_synchronous_and_idempotent() {
        let pump = ManualPump::new();
        let scheduler = AnimationScheduler::new(pump.clone() as Arc<dyn FramePump>);
        let ran = Arc::new(AtomicUsize::new(0));

        let inner_ran = Arc::clone(&ran);
        scheduler.schedule(Box::new(move |_| {
            inner_ran.fetch_add(1, Ordering::SeqCst);
        }));

        scheduler.cancel();
        scheduler.cancel();
        scheduler.cancel();

        assert_eq!(pump.queued(), 0);
        assert_eq!(pump.cancelled(), 1);
        assert!(!pump.tick(16.0));
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_cancel_unknown_id_ignored() {
        let pump = ManualPump::new();
        pump.cancel_frame(42);
        assert_eq!(pump.cancelled(), 0);
    }
}
