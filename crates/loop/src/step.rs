use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("fixed quantum must be positive, got {0}")]
    NonPositiveQuantum(f64),
    #[error("max steps per frame must be at least 1")]
    ZeroMaxSteps,
    #[error("tick rate must be at least 1")]
    ZeroTickRate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPolicy {
    fixed_quantum: f64,
    max_steps_per_frame: u32,
    max_frame_delta: Option<f64>,
}

impl StepPolicy {
    pub const DEFAULT_MAX_STEPS: u32 = 6;
    pub const DEFAULT_MAX_FRAME_DELTA: f64 = 0.25;

    pub fn new(fixed_quantum: f64, max_steps_per_frame: u32) -> Result<Self, PolicyError> {
        if !(fixed_quantum > 0.0) {
            return Err(PolicyError::NonPositiveQuantum(fixed_quantum));
        }
        if max_steps_per_frame == 0 {
            return Err(PolicyError::ZeroMaxSteps);
        }
        Ok(Self {
            fixed_quantum,
            max_steps_per_frame,
            max_frame_delta: None,
        })
    }

    pub fn from_tick_rate(tick_rate: u32) -> Result<Self, PolicyError> {
        if tick_rate == 0 {
            return Err(PolicyError::ZeroTickRate);
        }
        Ok(Self {
            fixed_quantum: 1.0 / tick_rate as f64,
            max_steps_per_frame: Self::DEFAULT_MAX_STEPS,
            max_frame_delta: Some(Self::DEFAULT_MAX_FRAME_DELTA),
        })
    }

    pub fn with_max_steps(mut self, max_steps_per_frame: u32) -> Result<Self, PolicyError> {
        if max_steps_per_frame == 0 {
            return Err(PolicyError::ZeroMaxSteps);
        }
        self.max_steps_per_frame = max_steps_per_frame;
        Ok(self)
    }

    pub fn with_max_frame_delta(mut self, max_frame_delta: Option<f64>) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    pub fn fixed_quantum(&self) -> f64 {
        self.fixed_quantum
    }

    /// The quantum as handed to the simulation target.
    pub fn step_dt(&self) -> f32 {
        self.fixed_quantum as f32
    }

    pub fn max_steps_per_frame(&self) -> u32 {
        self.max_steps_per_frame
    }

    pub fn max_frame_delta(&self) -> Option<f64> {
        self.max_frame_delta
    }

    pub fn clamp_delta(&self, delta: f64) -> f64 {
        match self.max_frame_delta {
            Some(cap) => delta.min(cap),
            None => delta,
        }
    }
}

#[derive(Debug, Default)]
pub struct TimeAccumulator {
    seconds: f64,
}

impl TimeAccumulator {
    pub fn new() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Negative input (a misused clock) is clamped so the balance stays >= 0.
    pub fn add(&mut self, elapsed: f64) {
        self.seconds += elapsed.max(0.0);
    }

    pub fn should_step(&self, policy: &StepPolicy) -> bool {
        self.seconds >= policy.fixed_quantum()
    }

    /// Subtracts one quantum per step, stopping at the policy cap even if
    /// time remains. The leftover stays parked here and the simulation falls
    /// behind wall clock; dropping frames beats a catch-up spiral.
    pub fn drain<F: FnMut(f32)>(&mut self, policy: &StepPolicy, mut step: F) -> u32 {
        let mut steps = 0;
        while self.seconds >= policy.fixed_quantum() && steps < policy.max_steps_per_frame() {
            self.seconds -= policy.fixed_quantum();
            step(policy.step_dt());
            steps += 1;
        }
        steps
    }

    /// Fraction of a quantum currently accumulated. Exceeds 1.0 after a
    /// capped drain; renderers clamp before interpolating.
    pub fn alpha(&self, policy: &StepPolicy) -> f32 {
        (self.seconds / policy.fixed_quantum()) as f32
    }

    pub fn reset(&mut self) {
        self.seconds = 0.0;
    }
}
