mod events;
mod scene;
mod tui;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cadence::{FramePacer, GameLoop, LoopStats, Renderer, StepPolicy};
use events::{DeadlineEvents, NullEvents, TerminalEvents};
use scene::BallPit;
use tui::Dashboard;

#[derive(Parser)]
#[command(name = "cadence-sandbox")]
#[command(about = "Fixed-timestep physics sandbox")]
struct Args {
    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,

    #[arg(long, default_value_t = StepPolicy::DEFAULT_MAX_STEPS)]
    max_steps: u32,

    #[arg(long, default_value_t = 120)]
    max_fps: u32,

    #[arg(short, long, default_value_t = 3)]
    balls: u32,

    #[arg(long)]
    headless: bool,

    #[arg(long, help = "Quit after this many seconds (headless runs forever without it)")]
    run_secs: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let policy = StepPolicy::from_tick_rate(args.tick_rate)?.with_max_steps(args.max_steps)?;
    let mut scene = BallPit::new(policy.step_dt(), args.balls);
    let mut game_loop = GameLoop::new(policy);
    let pacer = Some(FramePacer::new(args.max_fps));
    let run_for = args.run_secs.map(Duration::from_secs);

    if args.headless {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!(
            "sandbox starting: {} Hz, cap {} steps/frame, {} balls",
            args.tick_rate,
            policy.max_steps_per_frame(),
            args.balls
        );

        let mut events = DeadlineEvents::new(NullEvents, run_for);
        let mut renderer = LogRenderer::default();
        game_loop.run(&mut scene, &mut events, &mut renderer, pacer);

        let stats = game_loop.stats();
        log::info!(
            "sandbox done: {} frames, {} steps, {} capped, {:.0} fps",
            stats.frames,
            stats.steps,
            stats.capped_frames,
            stats.fps
        );
    } else {
        let mut events = DeadlineEvents::new(TerminalEvents::new(), run_for);
        let mut dashboard = Dashboard::new(policy)?;
        game_loop.run(&mut scene, &mut events, &mut dashboard, pacer);
    }

    Ok(())
}

/// Headless stand-in for the dashboard: a periodic status line.
#[derive(Default)]
struct LogRenderer {
    renders: u64,
}

impl LogRenderer {
    const EVERY: u64 = 60;
}

impl Renderer<BallPit> for LogRenderer {
    fn render(&mut self, scene: &BallPit, alpha: f32, stats: &LoopStats) {
        self.renders += 1;
        if self.renders % Self::EVERY != 0 {
            return;
        }

        let highest = scene
            .balls()
            .iter()
            .map(|b| b.render_position(alpha).y)
            .fold(0.0f32, f32::max);

        log::info!(
            "frame {}: {} balls, highest {:.2}m, {} steps, lag {:.1}ms",
            stats.frames,
            scene.ball_count(),
            highest,
            stats.steps,
            stats.sim_lag * 1000.0
        );
    }
}
