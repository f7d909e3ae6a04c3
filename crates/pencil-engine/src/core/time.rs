/// A fixed-duration wait, advanced by frame deltas (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delay {
    remaining: f32,
}

impl Delay {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            remaining: duration_ms.max(0.0),
        }
    }

    /// Consume frame time. Returns true once the wait is over.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining -= dt.max(0.0);
        self.remaining <= 0.0
    }

    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// Elapsed time against a fixed duration, yielding progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stopwatch {
    elapsed: f32,
    duration: f32,
}

impl Stopwatch {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration_ms.max(0.0),
        }
    }

    /// Add frame time and return the new progress.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.progress()
    }

    /// `min(elapsed / duration, 1)`. A zero duration is already complete.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
