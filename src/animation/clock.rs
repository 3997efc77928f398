/// Process-scoped monotonic animation clock
///
/// Accumulates `delta * speed`; reset only on a full scene rebuild. Negative
/// deltas are treated as zero so the clock never runs backwards.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    time: f32,
    speed: f32,
}

impl AnimationClock {
    pub fn new(speed: f32) -> Self {
        Self { time: 0.0, speed }
    }

    /// Advance by a raw frame delta; returns the scaled delta applied
    pub fn advance(&mut self, delta: f32) -> f32 {
        let scaled = delta.max(0.0) * self.speed;
        self.time += scaled;
        scaled
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}
