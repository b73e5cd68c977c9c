use std::time::Instant;

pub trait TimeSource {
    fn raw_ticks(&self) -> u64;
    fn ticks_per_second(&self) -> u64;
}

pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn raw_ticks(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn ticks_per_second(&self) -> u64 {
        1_000_000_000
    }
}

pub struct SimulationClock<T: TimeSource = MonotonicTime> {
    source: T,
    previous: u64,
    current: u64,
}

impl SimulationClock<MonotonicTime> {
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for SimulationClock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> SimulationClock<T> {
    pub fn with_source(source: T) -> Self {
        let now = source.raw_ticks();
        Self {
            source,
            previous: now,
            current: now,
        }
    }

    /// Call exactly once per frame. A sample behind the previous one (a
    /// misbehaving source) reads as zero elapsed rather than going negative.
    pub fn tick(&mut self) -> f64 {
        self.previous = self.current;
        self.current = self.source.raw_ticks().max(self.previous);
        (self.current - self.previous) as f64 / self.source.ticks_per_second() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct ManualTicks(Rc<Cell<u64>>);

    impl ManualTicks {
        fn new(start: u64) -> Self {
            Self(Rc::new(Cell::new(start)))
        }

        fn set(&self, ticks: u64) {
            self.0.set(ticks);
        }
    }

    impl TimeSource for ManualTicks {
        fn raw_ticks(&self) -> u64 {
            self.0.get()
        }

        fn ticks_per_second(&self) -> u64 {
            1000
        }
    }

    #[test]
    fn converts_ticks_to_seconds() {
        let source = ManualTicks::new(0);
        let mut clock = SimulationClock::with_source(source.clone());

        source.set(100);
        assert_eq!(clock.tick(), 0.1);

        source.set(150);
        assert_eq!(clock.tick(), 0.05);
    }

    #[test]
    fn duplicate_sample_is_zero_elapsed() {
        let source = ManualTicks::new(500);
        let mut clock = SimulationClock::with_source(source);

        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn regressing_source_clamps_to_zero() {
        let source = ManualTicks::new(1000);
        let mut clock = SimulationClock::with_source(source.clone());

        source.set(400);
        assert_eq!(clock.tick(), 0.0);

        // Measurement resumes from the high-water mark, not the stale sample.
        source.set(1100);
        assert_eq!(clock.tick(), 0.1);
    }

    #[test]
    fn monotonic_source_never_negative() {
        let mut clock = SimulationClock::new();
        for _ in 0..100 {
            assert!(clock.tick() >= 0.0);
        }
    }
}
