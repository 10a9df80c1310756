use std::ops::Range;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::world::{Ball, MatchState, Paddle, Role};

use super::launch::{sample_launch_angle, velocity_from_angle};

pub const SPEED_UP: Range<f32> = 1.1..1.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    WallBounce,
    PaddleHit(Role),
    Scored { by: Role },
}

/// Ball and AI simulation for single-player matches.
///
/// The local player owns the left paddle; the right paddle follows the ball.
pub struct LocalPhysicsEngine<R = StdRng> {
    rng: R,
}

impl LocalPhysicsEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for LocalPhysicsEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LocalPhysicsEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn serve(&mut self, state: &mut MatchState) {
        let angle = sample_launch_angle(&mut self.rng);
        let velocity = velocity_from_angle(angle, state.arena.launch_speed);
        log::debug!("Serving at {:.1} degrees", angle);
        state.reset_ball(state.arena.center(), velocity);
    }

    pub fn step(&mut self, state: &mut MatchState, dt: f32) -> Vec<PhysicsEvent> {
        let mut events = Vec::new();

        let previous = state.ball.position;
        state.ball.position += state.ball.velocity * dt;

        if bounce_off_walls(&mut state.ball, state.arena.height) {
            events.push(PhysicsEvent::WallBounce);
        }

        state.right.position.y = state
            .arena
            .clamp_paddle_y(state.ball.position.y, state.right.height);

        if crossed_face(previous, &state.ball, &state.left) {
            state.ball.position.x = state.left.right() + state.ball.radius();
            state.ball.velocity.x = state.ball.velocity.x.abs();
            self.speed_up(&mut state.ball);
            events.push(PhysicsEvent::PaddleHit(Role::Left));
        } else if crossed_face(previous, &state.ball, &state.right) {
            state.ball.position.x = state.right.left() - state.ball.radius();
            state.ball.velocity.x = -state.ball.velocity.x.abs();
            events.push(PhysicsEvent::PaddleHit(Role::Right));
        }

        let scorer = if state.ball.position.x > state.arena.right_score_line() {
            Some(Role::Left)
        } else if state.ball.position.x < state.arena.left_score_line() {
            Some(Role::Right)
        } else {
            None
        };

        if let Some(by) = scorer {
            state.score.award(by);
            log::info!("{} scores ({})", by, state.score);
            events.push(PhysicsEvent::Scored { by });
            self.serve(state);
        }

        events
    }

    fn speed_up(&mut self, ball: &mut Ball) {
        let factor = Vec2::new(
            self.rng.gen_range(SPEED_UP),
            self.rng.gen_range(SPEED_UP),
        );
        ball.velocity *= factor;
        log::trace!("Ball sped up by {:?} to {:?}", factor, ball.velocity);
    }
}

fn bounce_off_walls(ball: &mut Ball, height: f32) -> bool {
    let radius = ball.radius();

    if ball.top() < 0.0 {
        ball.position.y = radius;
        ball.velocity.y = ball.velocity.y.abs();
        true
    } else if ball.bottom() > height {
        ball.position.y = height - radius;
        ball.velocity.y = -ball.velocity.y.abs();
        true
    } else {
        false
    }
}

/// Whether the ball's leading edge passed through the paddle's inner face
/// during the last step while travelling towards it.
fn crossed_face(previous: Vec2, ball: &Ball, paddle: &Paddle) -> bool {
    let radius = ball.radius();
    let (face, before, after) = match paddle.role {
        Role::Left if ball.velocity.x < 0.0 => {
            (paddle.right(), previous.x - radius, ball.left())
        }
        Role::Right if ball.velocity.x > 0.0 => {
            (paddle.left(), previous.x + radius, ball.right())
        }
        _ => return false,
    };

    let reached = match paddle.role {
        Role::Left => before >= face && after <= face,
        Role::Right => before <= face && after >= face,
    };
    if !reached {
        return false;
    }

    let travelled = after - before;
    let t = if travelled == 0.0 {
        1.0
    } else {
        (face - before) / travelled
    };
    let y = previous.y + (ball.position.y - previous.y) * t;

    y + radius >= paddle.top() && y - radius <= paddle.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::world::Score;

    const DT: f32 = 1.0 / 60.0;

    fn state() -> MatchState {
        MatchState::new(ArenaConfig::default())
    }

    #[test]
    fn ball_moves_by_velocity() {
        let mut engine = LocalPhysicsEngine::seeded(1);
        let mut state = state();
        state.reset_ball(Vec2::new(400.0, 250.0), Vec2::new(60.0, -30.0));

        let events = engine.step(&mut state, DT);
        assert!(events.is_empty());
        assert!((state.ball.position - Vec2::new(401.0, 249.5)).length() < 1e-4);
    }

    #[test]
    fn ball_reflects_off_top_wall() {
        let mut engine = LocalPhysicsEngine::seeded(1);
        let mut state = state();
        state.reset_ball(Vec2::new(400.0, 11.0), Vec2::new(0.0, -120.0));

        let events = engine.step(&mut state, DT);
        assert_eq!(events, vec![PhysicsEvent::WallBounce]);
        assert_eq!(state.ball.velocity.y, 120.0);
        assert!(state.ball.top() >= 0.0);
    }

    #[test]
    fn ball_reflects_off_bottom_wall() {
        let mut engine = LocalPhysicsEngine::seeded(1);
        let mut state = state();
        state.reset_ball(Vec2::new(400.0, 489.0), Vec2::new(30.0, 120.0));

        let events = engine.step(&mut state, DT);
        assert_eq!(events, vec![PhysicsEvent::WallBounce]);
        assert_eq!(state.ball.velocity, Vec2::new(30.0, -120.0));
        assert!(state.ball.bottom() <= state.arena.height);
    }

    #[test]
    fn right_paddle_tracks_ball_within_field() {
        let mut engine = LocalPhysicsEngine::seeded(1);
        let mut state = state();

        state.reset_ball(Vec2::new(400.0, 200.0), Vec2::ZERO);
        engine.step(&mut state, DT);
        assert_eq!(state.right.position.y, 200.0);

        state.reset_ball(Vec2::new(400.0, 15.0), Vec2::ZERO);
        engine.step(&mut state, DT);
        assert_eq!(state.right.position.y, 50.0);
    }

    #[test]
    fn left_paddle_reflects_and_speeds_up() {
        let mut engine = LocalPhysicsEngine::seeded(3);
        let mut state = state();
        state.reset_ball(Vec2::new(73.0, 250.0), Vec2::new(-120.0, 60.0));

        let events = engine.step(&mut state, DT);
        assert!(events.contains(&PhysicsEvent::PaddleHit(Role::Left)));

        let v = state.ball.velocity;
        assert!(v.x > 0.0);
        assert!(v.x >= 120.0 * 1.1 && v.x <= 120.0 * 1.9);
        assert!(v.y >= 60.0 * 1.1 && v.y <= 60.0 * 1.9);
    }

    #[test]
    fn right_paddle_reflects_without_speed_up() {
        let mut engine = LocalPhysicsEngine::seeded(3);
        let mut state = state();
        state.reset_ball(Vec2::new(725.0, 250.0), Vec2::new(300.0, 150.0));
        let speed = state.ball.velocity.length();

        let events = engine.step(&mut state, DT);
        assert_eq!(events, vec![PhysicsEvent::PaddleHit(Role::Right)]);

        let v = state.ball.velocity;
        assert_eq!(v, Vec2::new(-300.0, 150.0));
        assert!((v.length() - speed).abs() < 1e-3);
    }

    #[test]
    fn fast_ball_cannot_tunnel_through_paddle() {
        let mut engine = LocalPhysicsEngine::seeded(3);
        let mut state = state();
        state.reset_ball(Vec2::new(700.0, 250.0), Vec2::new(6000.0, 0.0));

        let events = engine.step(&mut state, DT);
        assert!(events.contains(&PhysicsEvent::PaddleHit(Role::Right)));
        assert!(state.ball.velocity.x < 0.0);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn ball_behind_paddle_is_not_reflected() {
        let mut engine = LocalPhysicsEngine::seeded(3);
        let mut state = state();
        state.reset_ball(Vec2::new(45.0, 250.0), Vec2::new(-60.0, 0.0));

        let events = engine.step(&mut state, DT);
        assert!(events.is_empty());
        assert!(state.ball.velocity.x < 0.0);
    }

    #[test]
    fn missing_the_left_paddle_scores_for_right() {
        let mut engine = LocalPhysicsEngine::seeded(5);
        let mut state = state();
        state.reset_ball(Vec2::new(-45.0, 250.0), Vec2::new(-600.0, 0.0));

        let events = engine.step(&mut state, DT);
        assert_eq!(events, vec![PhysicsEvent::Scored { by: Role::Right }]);
        assert_eq!(state.score, Score::new(0, 1));
        assert_eq!(state.ball.position, state.arena.center());
        assert!((state.ball.velocity.length() - state.arena.launch_speed).abs() < 1e-2);
    }

    #[test]
    fn score_increments_once_per_exit() {
        let mut engine = LocalPhysicsEngine::seeded(11);
        let mut state = state();
        engine.serve(&mut state);

        let mut previous = state.score;
        let mut scored = 0;
        for _ in 0..60 * 600 {
            let events = engine.step(&mut state, DT);
            let exits = events
                .iter()
                .filter(|e| matches!(e, PhysicsEvent::Scored { .. }))
                .count() as u32;

            assert!(state.score.left >= previous.left);
            assert!(state.score.right >= previous.right);
            assert_eq!(state.score.total(), previous.total() + exits);
            assert!(exits <= 1);

            scored += exits;
            previous = state.score;
        }

        assert!(scored > 0);
    }
}
