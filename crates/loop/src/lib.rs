pub mod clock;
pub mod event;
pub mod input;
pub mod pacing;
pub mod runner;
pub mod stats;
pub mod step;

pub use clock::{MonotonicTime, SimulationClock, TimeSource};
pub use event::{EventKind, EventSink, FrameEvent, Key, MouseButton, dispatch};
pub use input::{Buttons, InputState};
pub use pacing::FramePacer;
pub use runner::{EventSource, FrameReport, GameLoop, Renderer, Simulation};
pub use stats::LoopStats;
pub use step::{PolicyError, StepPolicy, TimeAccumulator};
