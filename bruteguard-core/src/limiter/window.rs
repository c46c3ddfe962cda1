use std::time::Duration;

use tokio::time::Instant;

/// Fixed-window counter admitting at most `capacity` events per `window`.
///
/// The window rolls forward in discrete jumps: once `window` has elapsed since
/// the window started, the count resets and the next window starts at the
/// current instant. A limiter is not synchronized on its own; it is only ever
/// mutated while the owning [`super::BucketStore`] holds its write lock.
#[derive(Debug, Clone)]
pub struct WindowLimiter {
    capacity: u32,
    window: Duration,
    window_start: Instant,
    count: u32,
    last_seen: Instant,
}

impl WindowLimiter {
    pub fn new(capacity: u32, window: Duration) -> Self {
        let now = Instant::now();
        Self {
            capacity,
            window,
            window_start: now,
            count: 0,
            last_seen: now,
        }
    }

    /// Registers one event and reports whether it fits into the current window.
    ///
    /// A denied call still counts, so every further call inside the same window
    /// is denied as well. `last_seen` is refreshed on every call, admitted or not.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= self.window {
            self.count = 0;
            self.window_start = now;
        }

        self.count = self.count.saturating_add(1);
        self.last_seen = now;

        self.count <= self.capacity
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Events registered in the current window, denied ones included.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Time since the last `allow` call (or creation).
    pub fn idle_for(&self) -> Duration {
        Instant::now().duration_since(self.last_seen)
    }
}
