use log::debug;

use crate::clock::{MonotonicTime, SimulationClock, TimeSource};
use crate::event::FrameEvent;
use crate::pacing::FramePacer;
use crate::stats::LoopStats;
use crate::step::{StepPolicy, TimeAccumulator};

/// The state advanced by the loop. `advance` receives exactly one fixed
/// quantum per call; `apply` receives every non-quit event the source
/// produced this frame, before any advance.
pub trait Simulation {
    fn advance(&mut self, dt: f32);

    fn apply(&mut self, _event: &FrameEvent) {}
}

/// Non-blocking: returns `None` once the queue is empty for this frame.
pub trait EventSource {
    fn poll_event(&mut self) -> Option<FrameEvent>;
}

pub trait Renderer<S> {
    fn render(&mut self, state: &S, alpha: f32, stats: &LoopStats);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub delta: f64,
    pub steps: u32,
    pub capped: bool,
}

pub struct GameLoop<T: TimeSource = MonotonicTime> {
    clock: SimulationClock<T>,
    accumulator: TimeAccumulator,
    policy: StepPolicy,
    stats: LoopStats,
}

impl GameLoop<MonotonicTime> {
    pub fn new(policy: StepPolicy) -> Self {
        Self::with_source(MonotonicTime::new(), policy)
    }
}

impl<T: TimeSource> GameLoop<T> {
    pub fn with_source(source: T, policy: StepPolicy) -> Self {
        Self {
            clock: SimulationClock::with_source(source),
            accumulator: TimeAccumulator::new(),
            policy,
            stats: LoopStats::new(),
        }
    }

    pub fn policy(&self) -> &StepPolicy {
        &self.policy
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn alpha(&self) -> f32 {
        self.accumulator.alpha(&self.policy)
    }

    /// Discard time accrued across a pause so it does not replay as a burst
    /// of catch-up steps.
    pub fn reset(&mut self) {
        self.clock.tick();
        self.accumulator.reset();
    }

    /// One frame of scheduling: sample the clock, clamp the delta if the
    /// policy asks for it, absorb it, then drain whole quanta into `sim`.
    pub fn frame<S: Simulation>(&mut self, sim: &mut S) -> FrameReport {
        let delta = self.policy.clamp_delta(self.clock.tick());
        self.accumulator.add(delta);

        let steps = self.accumulator.drain(&self.policy, |dt| sim.advance(dt));
        let capped =
            steps == self.policy.max_steps_per_frame() && self.accumulator.should_step(&self.policy);
        if capped {
            debug!(
                "step cap hit, simulation {:.1}ms behind",
                self.accumulator.seconds() * 1000.0
            );
        }

        self.stats
            .record_frame(delta, steps, capped, self.accumulator.seconds());
        FrameReport {
            delta,
            steps,
            capped,
        }
    }

    /// Blocking loop: drain events, schedule steps, render once, pace.
    /// Returns after a frame in which the source produced `Quit`.
    pub fn run<S, E, R>(
        &mut self,
        sim: &mut S,
        events: &mut E,
        renderer: &mut R,
        mut pacer: Option<FramePacer>,
    ) where
        S: Simulation,
        E: EventSource,
        R: Renderer<S>,
    {
        let mut running = true;
        while running {
            if let Some(pacer) = pacer.as_mut() {
                pacer.begin();
            }

            // All pending input lands before this frame's clock sample.
            while let Some(event) = events.poll_event() {
                if event.is_quit() {
                    running = false;
                } else {
                    sim.apply(&event);
                }
            }

            self.frame(sim);
            renderer.render(sim, self.alpha(), &self.stats);

            if let Some(pacer) = pacer.as_ref() {
                pacer.pace();
            }
        }
    }
}
