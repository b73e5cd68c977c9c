use glam::{Vec2, Vec3};
use rapier3d::prelude::*;

use cadence::{Buttons, FrameEvent, InputState, Key, Simulation};

pub const BALL_RADIUS: f32 = 0.5;
const SPAWN_HEIGHT: f32 = 8.0;
const NUDGE_FORCE: f32 = 5.0;
const NUDGE_FORCE_SPRINT: f32 = 10.0;

pub struct Ball {
    handle: RigidBodyHandle,
    previous: Vec3,
    current: Vec3,
}

impl Ball {
    /// Position blended between the last two simulation steps, so rendering
    /// stays smooth at frame rates that are not a multiple of the tick rate.
    pub fn render_position(&self, alpha: f32) -> Vec3 {
        self.previous.lerp(self.current, alpha.clamp(0.0, 1.0))
    }

    pub fn position(&self) -> Vec3 {
        self.current
    }
}

/// Balls dropped onto a ground plane. The loop advances this by exactly one
/// fixed quantum per step; input spawns and steers balls between steps.
pub struct BallPit {
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector,
    input: InputState,
    balls: Vec<Ball>,
    steps: u64,
}

impl BallPit {
    pub fn new(fixed_dt: f32, initial_balls: u32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = fixed_dt;
        integration_parameters.min_ccd_dt = fixed_dt / 100.0;

        let mut pit = Self {
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(0.0, -9.81, 0.0),
            input: InputState::new(),
            balls: Vec::new(),
            steps: 0,
        };

        pit.add_ground();
        for _ in 0..initial_balls {
            pit.spawn_ball();
        }
        pit
    }

    fn add_ground(&mut self) {
        let collider = ColliderBuilder::cuboid(50.0, 0.1, 50.0)
            .translation(Vector::new(0.0, -0.1, 0.0))
            .build();
        self.colliders.insert(collider);
    }

    pub fn spawn_ball(&mut self) -> RigidBodyHandle {
        let n = self.balls.len();
        // Stagger drop points so stacked spawns don't overlap.
        let position = Vec3::new(
            (n % 5) as f32 * 0.8 - 1.6,
            SPAWN_HEIGHT + (n / 5) as f32 * 1.2,
            ((n % 3) as f32 - 1.0) * 0.6,
        );

        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(position.x, position.y, position.z))
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(BALL_RADIUS).restitution(0.7).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.balls.push(Ball {
            handle,
            previous: position,
            current: position,
        });
        handle
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn nudge_force(&self) -> f32 {
        if self.input.is_held(Buttons::SPRINT) {
            NUDGE_FORCE_SPRINT
        } else {
            NUDGE_FORCE
        }
    }
}

impl Simulation for BallPit {
    fn advance(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        let nudge: Vec2 = self.input.move_axis() * self.nudge_force() * dt;
        if nudge != Vec2::ZERO {
            if let Some(ball) = self.balls.last() {
                if let Some(body) = self.bodies.get_mut(ball.handle) {
                    // Screen-up steers away from the camera.
                    body.apply_impulse(Vector::new(nudge.x, 0.0, -nudge.y), true);
                }
            }
        }

        for ball in &mut self.balls {
            ball.previous = ball.current;
        }

        self.pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );

        for ball in &mut self.balls {
            if let Some(body) = self.bodies.get(ball.handle) {
                let t = body.translation();
                ball.current = Vec3::new(t.x, t.y, t.z);
            }
        }

        self.steps += 1;
    }

    fn apply(&mut self, event: &FrameEvent) {
        self.input.apply(event);
        match *event {
            FrameEvent::KeyDown(Key::Space) | FrameEvent::MouseDown { .. } => {
                self.spawn_ball();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence::MouseButton;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn balls_fall_under_gravity() {
        let mut pit = BallPit::new(DT, 1);
        let start = pit.balls()[0].position().y;

        for _ in 0..30 {
            pit.advance(DT);
        }

        assert!(pit.balls()[0].position().y < start);
        assert_eq!(pit.steps(), 30);
    }

    #[test]
    fn ground_stops_the_fall() {
        let mut pit = BallPit::new(DT, 1);

        // Ten simulated seconds: long past settling.
        for _ in 0..600 {
            pit.advance(DT);
        }

        let y = pit.balls()[0].position().y;
        assert!(y > 0.0, "ball fell through the ground: y = {y}");
        assert!(y < 1.0, "ball never settled: y = {y}");
    }

    #[test]
    fn space_and_click_spawn_balls() {
        let mut pit = BallPit::new(DT, 0);
        assert_eq!(pit.ball_count(), 0);

        pit.apply(&FrameEvent::KeyDown(Key::Space));
        assert_eq!(pit.ball_count(), 1);

        pit.apply(&FrameEvent::MouseDown {
            button: MouseButton::Left,
            x: 4.0,
            y: 2.0,
        });
        assert_eq!(pit.ball_count(), 2);
    }

    #[test]
    fn movement_keys_do_not_spawn() {
        let mut pit = BallPit::new(DT, 1);
        pit.apply(&FrameEvent::KeyDown(Key::Left));
        assert_eq!(pit.ball_count(), 1);
    }

    #[test]
    fn render_position_blends_steps() {
        let mut pit = BallPit::new(DT, 1);
        for _ in 0..5 {
            pit.advance(DT);
        }

        let ball = &pit.balls()[0];
        assert_eq!(ball.render_position(0.0), ball.previous);
        assert_eq!(ball.render_position(1.0), ball.current);

        let mid = ball.render_position(0.5);
        assert!(mid.y <= ball.previous.y);
        assert!(mid.y >= ball.current.y);
    }

    #[test]
    fn nudge_moves_newest_ball() {
        let mut pit = BallPit::new(DT, 1);
        // Let it reach the ground first so the push is not lost to free fall.
        for _ in 0..300 {
            pit.advance(DT);
        }

        let before = pit.balls()[0].position().x;
        pit.apply(&FrameEvent::KeyDown(Key::Right));
        for _ in 0..120 {
            pit.advance(DT);
        }

        assert!(pit.balls()[0].position().x > before);
    }
}
